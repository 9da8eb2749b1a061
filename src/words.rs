use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_WORDS: [&str; 3] = ["happy", "pretty", "funny"];

/// The letters every board offers, regardless of the word list.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordered list of words a session draws from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Builds a list from arbitrary entries, trimming each one and dropping empties.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parses the comma-separated form used by `--words` and the word input screen.
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(','))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Tile characters for a board built over this list: A-Z followed by any
    /// other characters the uppercased words need, in first-seen order.
    /// Inner spaces count too, so "ice cream" gets a space tile.
    pub fn tile_set(&self) -> Vec<char> {
        let mut seen: BTreeSet<char> = ALPHABET.chars().collect();
        let extras = self
            .words
            .iter()
            .flat_map(|w| w.to_uppercase().chars().collect::<Vec<_>>())
            .filter(|c| seen.insert(*c))
            .collect::<Vec<_>>();

        ALPHABET.chars().chain(extras).collect()
    }

    /// Comma-separated form, suitable for pre-filling the word input screen.
    pub fn to_input_string(&self) -> String {
        self.words.iter().join(", ")
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}
