use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which previously drawn words are ineligible for the next round
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NoRepeatPolicy {
    /// Never draw the same word twice in a row (waived for single-word lists)
    #[default]
    NoImmediateRepeat,
    /// Never draw a word again until the session ends; running out ends the game
    NoRepeatUntilExhausted,
}

/// Words drawn so far in a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawHistory {
    pub last: Option<String>,
    pub used: BTreeSet<String>,
}

impl DrawHistory {
    pub fn record(&mut self, word: &str) {
        self.last = Some(word.to_string());
        self.used.insert(word.to_string());
    }
}

/// Outcome of a draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw<'a> {
    Word(&'a str),
    Exhausted,
}

/// Draws a word uniformly among those the policy allows.
///
/// The candidate pool is filtered before the draw, so no retry loop is needed
/// and a single-entry list can never spin. Callers must not pass an empty list.
pub fn draw<'a, R: Rng + ?Sized>(
    words: &'a [String],
    history: &DrawHistory,
    policy: NoRepeatPolicy,
    rng: &mut R,
) -> Draw<'a> {
    let eligible: Vec<&'a String> = match policy {
        NoRepeatPolicy::NoImmediateRepeat => {
            let fresh: Vec<_> = words
                .iter()
                .filter(|w| history.last.as_deref() != Some(w.as_str()))
                .collect();
            if fresh.is_empty() {
                words.iter().collect()
            } else {
                fresh
            }
        }
        NoRepeatPolicy::NoRepeatUntilExhausted => words
            .iter()
            .filter(|w| !history.used.contains(w.as_str()))
            .collect(),
    };

    match eligible.choose(rng) {
        Some(&word) => Draw::Word(word.as_str()),
        None => Draw::Exhausted,
    }
}
