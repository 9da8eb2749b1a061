// Round-to-round game state. A Session is an immutable value; every player or
// timer action goes through `reduce`, which returns the next session and the
// effects the caller has to carry out. No terminal, audio or clock access here.

use std::time::Duration;

use rand::Rng;

use crate::error::{GameError, GameResult};
use crate::feedback::Cue;
use crate::selection::{draw, Draw, DrawHistory, NoRepeatPolicy};
use crate::words::WordList;

pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_millis(2000);

/// One position of the player's guess
pub type Slot = Option<char>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display)]
pub enum ResultStatus {
    #[default]
    #[strum(serialize = "")]
    None,
    #[strum(serialize = "Correct!")]
    Correct,
    #[strum(serialize = "Try Again")]
    Incorrect,
    #[strum(serialize = "All words done. Game over!")]
    GameOver,
}

/// Result of a verification, for driving feedback styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Identifies one scheduled auto-advance. Handles are never reused within a
/// session value's lineage, including across resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    StartRound,
    PlaceLetter { slot: usize, letter: char },
    ClearLetter { slot: usize },
    Verify,
    RepeatWord,
    /// Delivered when a scheduled auto-advance comes due
    AutoAdvance(TaskHandle),
    Reset,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Announce(String),
    Cue(Cue),
    Schedule { handle: TaskHandle, delay: Duration },
    Cancel(TaskHandle),
}

/// Everything a transition needs besides the session itself
#[derive(Debug, Clone, Copy)]
pub struct RoundContext<'a> {
    pub words: &'a WordList,
    pub policy: NoRepeatPolicy,
    pub auto_advance: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
    pub outcome: Option<Outcome>,
}

impl Transition {
    fn unchanged(session: &Session) -> Self {
        Self {
            session: session.clone(),
            effects: vec![],
            outcome: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_word: Option<String>,
    spoken_word: Option<String>,
    slots: Vec<Slot>,
    score: u32,
    round: u64,
    status: ResultStatus,
    history: DrawHistory,
    pending_advance: Option<TaskHandle>,
    next_handle: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target word in uppercase, `None` while idle
    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    /// Target word as it appears in the word list, used for speech
    pub fn spoken_word(&self) -> Option<&str> {
        self.spoken_word.as_deref()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> ResultStatus {
        self.status
    }

    /// Number of words drawn since the session began
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_idle(&self) -> bool {
        self.current_word.is_none()
    }

    pub fn is_over(&self) -> bool {
        self.status == ResultStatus::GameOver
    }

    /// Filled slots in order; empty slots are skipped here, not in [`Session::verify`]
    pub fn guess(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    pub fn start_round<R: Rng + ?Sized>(&self, ctx: &RoundContext<'_>, rng: &mut R) -> Transition {
        if ctx.words.is_empty() {
            return Transition::unchanged(self);
        }

        let mut next = self.clone();
        let mut effects = vec![];
        if let Some(handle) = next.pending_advance.take() {
            effects.push(Effect::Cancel(handle));
        }

        match draw(ctx.words.words(), &self.history, ctx.policy, rng) {
            Draw::Exhausted => {
                next.status = ResultStatus::GameOver;
            }
            Draw::Word(word) => {
                let target = word.to_uppercase();
                next.slots = vec![None; target.chars().count()];
                next.current_word = Some(target);
                next.spoken_word = Some(word.to_string());
                next.status = ResultStatus::None;
                next.round += 1;
                next.history.record(word);
                effects.push(Effect::Announce(word.to_string()));
            }
        }

        Transition {
            session: next,
            effects,
            outcome: None,
        }
    }

    pub fn place_letter(&self, slot: usize, letter: char) -> GameResult<Transition> {
        self.check_slot(slot)?;
        if self.status == ResultStatus::Correct || self.slots[slot].is_some() {
            return Ok(Transition::unchanged(self));
        }

        let mut next = self.clone();
        next.slots[slot] = Some(letter);
        Ok(Transition {
            session: next,
            effects: vec![],
            outcome: None,
        })
    }

    pub fn clear_letter(&self, slot: usize) -> GameResult<Transition> {
        self.check_slot(slot)?;
        if self.status == ResultStatus::Correct {
            return Ok(Transition::unchanged(self));
        }

        let mut next = self.clone();
        next.slots[slot] = None;
        Ok(Transition {
            session: next,
            effects: vec![],
            outcome: None,
        })
    }

    pub fn verify(&self, ctx: &RoundContext<'_>) -> GameResult<Transition> {
        let target = self.active_word()?;
        if self.status == ResultStatus::Correct {
            let mut unchanged = Transition::unchanged(self);
            unchanged.outcome = Some(Outcome::Correct);
            return Ok(unchanged);
        }

        let complete = self.slots.iter().all(Option::is_some);
        let mut next = self.clone();

        if complete && self.guess() == target {
            let handle = TaskHandle(next.next_handle);
            next.next_handle += 1;
            next.pending_advance = Some(handle);
            next.status = ResultStatus::Correct;
            next.score = next.score.saturating_add(1);
            Ok(Transition {
                session: next,
                effects: vec![
                    Effect::Cue(Cue::Success),
                    Effect::Schedule {
                        handle,
                        delay: ctx.auto_advance,
                    },
                ],
                outcome: Some(Outcome::Correct),
            })
        } else {
            next.status = ResultStatus::Incorrect;
            Ok(Transition {
                session: next,
                effects: vec![Effect::Cue(Cue::Failure)],
                outcome: Some(Outcome::Incorrect),
            })
        }
    }

    pub fn repeat_word(&self) -> Transition {
        let mut transition = Transition::unchanged(self);
        if let Some(word) = &self.spoken_word {
            transition.effects.push(Effect::Announce(word.clone()));
        }
        transition
    }

    pub fn auto_advance<R: Rng + ?Sized>(
        &self,
        handle: TaskHandle,
        ctx: &RoundContext<'_>,
        rng: &mut R,
    ) -> Transition {
        if self.pending_advance != Some(handle) {
            tracing::trace!(?handle, "ignoring stale auto-advance");
            return Transition::unchanged(self);
        }

        let mut fired = self.clone();
        fired.pending_advance = None;
        fired.start_round(ctx, rng)
    }

    /// Back to idle with a zero score; only the handle counter survives.
    pub fn reset(&self) -> Transition {
        Transition {
            session: Session {
                next_handle: self.next_handle,
                ..Session::default()
            },
            effects: self.pending_advance.map(Effect::Cancel).into_iter().collect(),
            outcome: None,
        }
    }

    fn active_word(&self) -> GameResult<&str> {
        let word = self.current_word.as_deref().ok_or(GameError::NoActiveRound)?;
        if self.is_over() {
            return Err(GameError::SessionOver);
        }
        Ok(word)
    }

    fn check_slot(&self, slot: usize) -> GameResult<()> {
        self.active_word()?;
        if slot >= self.slots.len() {
            return Err(GameError::SlotOutOfRange {
                index: slot,
                len: self.slots.len(),
            });
        }
        Ok(())
    }
}

/// Applies one action to a session.
pub fn reduce<R: Rng + ?Sized>(
    session: &Session,
    action: Action,
    ctx: &RoundContext<'_>,
    rng: &mut R,
) -> GameResult<Transition> {
    match action {
        Action::StartRound => Ok(session.start_round(ctx, rng)),
        Action::PlaceLetter { slot, letter } => session.place_letter(slot, letter),
        Action::ClearLetter { slot } => session.clear_letter(slot),
        Action::Verify => session.verify(ctx),
        Action::RepeatWord => Ok(session.repeat_word()),
        Action::AutoAdvance(handle) => Ok(session.auto_advance(handle, ctx, rng)),
        Action::Reset => Ok(session.reset()),
    }
}
