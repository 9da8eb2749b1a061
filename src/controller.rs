use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::error::GameResult;
use crate::feedback::{Announcer, FeedbackPlayer, SpeechSettings};
use crate::scheduler::DeferredQueue;
use crate::selection::NoRepeatPolicy;
use crate::session::{
    reduce, Action, Effect, Outcome, RoundContext, Session, Transition, DEFAULT_AUTO_ADVANCE,
};
use crate::words::WordList;

#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    pub policy: NoRepeatPolicy,
    pub auto_advance: Duration,
    pub speech: SpeechSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            policy: NoRepeatPolicy::default(),
            auto_advance: DEFAULT_AUTO_ADVANCE,
            speech: SpeechSettings::default(),
        }
    }
}

/// Owns the current session and carries out the effects its transitions ask for.
pub struct GameController {
    session: Session,
    words: WordList,
    settings: GameSettings,
    rng: StdRng,
    announcer: Box<dyn Announcer>,
    player: Box<dyn FeedbackPlayer>,
    timers: DeferredQueue,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("words", &self.words)
            .field("settings", &self.settings)
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

impl GameController {
    pub fn new(
        words: WordList,
        settings: GameSettings,
        announcer: Box<dyn Announcer>,
        player: Box<dyn FeedbackPlayer>,
    ) -> Self {
        Self {
            session: Session::new(),
            words,
            settings,
            rng: StdRng::from_entropy(),
            announcer,
            player,
            timers: DeferredQueue::new(),
        }
    }

    /// Fixes the word draws, for reproducible tests
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn has_pending_advance(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn start_round(&mut self) {
        // StartRound cannot fail
        let _ = self.dispatch(Action::StartRound, Instant::now());
        match self.session.current_word() {
            Some(word) if !self.session.is_over() => {
                info!(word, score = self.session.score(), "round started")
            }
            _ if self.session.is_over() => info!(score = self.session.score(), "game over"),
            _ => debug!("start requested with an empty word list"),
        }
    }

    pub fn place_letter(&mut self, slot: usize, letter: char) -> GameResult<()> {
        self.dispatch(Action::PlaceLetter { slot, letter }, Instant::now())
            .map(|_| ())
    }

    pub fn clear_letter(&mut self, slot: usize) -> GameResult<()> {
        self.dispatch(Action::ClearLetter { slot }, Instant::now())
            .map(|_| ())
    }

    pub fn verify(&mut self) -> GameResult<Outcome> {
        let outcome = self
            .dispatch(Action::Verify, Instant::now())?
            .unwrap_or(Outcome::Incorrect);
        info!(
            ?outcome,
            guess = %self.session.guess(),
            score = self.session.score(),
            "verified"
        );
        Ok(outcome)
    }

    pub fn repeat_word(&mut self) {
        let _ = self.dispatch(Action::RepeatWord, Instant::now());
    }

    /// Full reset to idle: score, draw history and any pending advance are dropped.
    pub fn reset(&mut self) {
        let _ = self.dispatch(Action::Reset, Instant::now());
        self.timers.clear();
        info!("session reset");
    }

    /// Installs a new word list; the old session does not carry over.
    pub fn replace_words(&mut self, words: WordList) {
        info!(count = words.len(), "word list replaced");
        self.words = words;
        self.reset();
    }

    /// Fires every auto-advance that has come due by `now`.
    pub fn on_tick(&mut self, now: Instant) {
        for handle in self.timers.take_due(now) {
            debug!(?handle, "auto-advance due");
            if self.dispatch(Action::AutoAdvance(handle), now).is_ok() {
                if let Some(word) = self.session.current_word() {
                    info!(word, "round advanced");
                }
            }
        }
    }

    fn dispatch(&mut self, action: Action, now: Instant) -> GameResult<Option<Outcome>> {
        let ctx = RoundContext {
            words: &self.words,
            policy: self.settings.policy,
            auto_advance: self.settings.auto_advance,
        };

        match reduce(&self.session, action.clone(), &ctx, &mut self.rng) {
            Ok(Transition {
                session,
                effects,
                outcome,
            }) => {
                self.session = session;
                for effect in effects {
                    self.apply(effect, now);
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(?action, %err, "action rejected");
                Err(err)
            }
        }
    }

    fn apply(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::Announce(word) => self.announcer.announce(&word, &self.settings.speech),
            Effect::Cue(cue) => self.player.play(cue),
            Effect::Schedule { handle, delay } => self.timers.schedule(handle, delay, now),
            Effect::Cancel(handle) => {
                if self.timers.cancel(handle) {
                    debug!(?handle, "pending auto-advance cancelled");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::feedback::{Cue, Recorder};
    use crate::session::ResultStatus;
    use assert_matches::assert_matches;

    fn controller(words: &str, policy: NoRepeatPolicy) -> (GameController, Recorder) {
        let recorder = Recorder::new();
        let settings = GameSettings {
            policy,
            ..GameSettings::default()
        };
        let controller = GameController::new(
            WordList::parse(words),
            settings,
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        )
        .with_seed(17);
        (controller, recorder)
    }

    fn spell_current(game: &mut GameController) {
        let word = game.session().current_word().unwrap().to_string();
        for (i, c) in word.chars().enumerate() {
            game.place_letter(i, c).unwrap();
        }
    }

    #[test]
    fn start_round_announces_the_word() {
        let (mut game, recorder) = controller("Happy", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();

        assert_eq!(game.session().current_word(), Some("HAPPY"));
        assert_eq!(recorder.announced(), vec!["Happy"]);
        match &recorder.calls()[0] {
            crate::feedback::Recorded::Announced(_, settings) => {
                assert_eq!(settings, &SpeechSettings::default())
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn empty_list_start_does_nothing() {
        let (mut game, recorder) = controller("", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        assert!(game.session().is_idle());
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn correct_answer_plays_success_and_schedules_advance() {
        let (mut game, recorder) = controller("cat, dog", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        spell_current(&mut game);

        assert_eq!(game.verify(), Ok(Outcome::Correct));
        assert_eq!(recorder.cues(), vec![Cue::Success]);
        assert!(game.has_pending_advance());
    }

    #[test]
    fn wrong_answer_plays_failure_without_advance() {
        let (mut game, recorder) = controller("cat", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        game.place_letter(0, 'X').unwrap();

        assert_eq!(game.verify(), Ok(Outcome::Incorrect));
        assert_eq!(recorder.cues(), vec![Cue::Failure]);
        assert!(!game.has_pending_advance());
        assert_eq!(game.session().status(), ResultStatus::Incorrect);
    }

    #[test]
    fn tick_before_deadline_keeps_the_round() {
        let (mut game, _) = controller("cat, dog", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        let first = game.session().current_word().unwrap().to_string();
        spell_current(&mut game);
        game.verify().unwrap();

        game.on_tick(Instant::now());
        assert_eq!(game.session().current_word(), Some(first.as_str()));
        assert_eq!(game.session().status(), ResultStatus::Correct);
    }

    #[test]
    fn tick_after_deadline_advances() {
        let (mut game, recorder) = controller("cat, dog", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        let first = game.session().current_word().unwrap().to_string();
        spell_current(&mut game);
        game.verify().unwrap();

        // repeat while the advance is pending still works
        game.repeat_word();

        game.on_tick(Instant::now() + DEFAULT_AUTO_ADVANCE);
        assert_ne!(game.session().current_word(), Some(first.as_str()));
        assert_eq!(game.session().status(), ResultStatus::None);
        assert_eq!(game.session().score(), 1);
        assert_eq!(recorder.announced().len(), 3);
        assert!(!game.has_pending_advance());
    }

    #[test]
    fn manual_restart_cancels_the_pending_advance() {
        let (mut game, _) = controller("cat, dog, fox", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        spell_current(&mut game);
        game.verify().unwrap();

        game.start_round();
        let manual = game.session().clone();
        assert!(!game.has_pending_advance());

        game.on_tick(Instant::now() + Duration::from_secs(10));
        assert_eq!(game.session(), &manual);
    }

    #[test]
    fn replacing_words_returns_to_idle() {
        let (mut game, _) = controller("cat", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        spell_current(&mut game);
        game.verify().unwrap();
        assert_eq!(game.session().score(), 1);

        game.replace_words(WordList::parse("bird, fish"));
        assert!(game.session().is_idle());
        assert_eq!(game.session().score(), 0);
        assert!(!game.has_pending_advance());
        assert_eq!(game.words().len(), 2);

        game.on_tick(Instant::now() + Duration::from_secs(10));
        assert!(game.session().is_idle());
    }

    #[test]
    fn out_of_range_is_rejected_without_state_change() {
        let (mut game, _) = controller("cat", NoRepeatPolicy::NoImmediateRepeat);
        game.start_round();
        let before = game.session().clone();

        assert_matches!(
            game.place_letter(5, 'A'),
            Err(GameError::SlotOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(game.session(), &before);
    }

    #[test]
    fn exhausted_list_ends_in_game_over() {
        let (mut game, recorder) = controller("cat, dog", NoRepeatPolicy::NoRepeatUntilExhausted);
        game.start_round();
        for _ in 0..2 {
            spell_current(&mut game);
            game.verify().unwrap();
            game.on_tick(Instant::now() + Duration::from_secs(5));
        }

        assert_eq!(game.session().status(), ResultStatus::GameOver);
        assert_eq!(game.session().score(), 2);
        assert_matches!(game.verify(), Err(GameError::SessionOver));
        // the second win's advance found nothing left; only two words were spoken
        assert_eq!(recorder.announced().len(), 2);
    }
}
