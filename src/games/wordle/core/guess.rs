use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::Display,
    ops::Not,
};
use tinyvec::TinyVec;

use super::{word::WORD_LENGTH, AsEmoji, Word};

/// A validated guess, with each letter scored against the secret word.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guess {
    letters: [(char, LetterState); WORD_LENGTH],
}

impl Guess {
    pub(super) fn scored(word: &Word, secret: &Word) -> Self {
        let mut letters = [(' ', LetterState::Absent); WORD_LENGTH];

        for (index, letter) in word.iter().enumerate() {
            letters[index] = (letter, secret.cell_state(index, letter));
        }

        Self { letters }
    }

    pub fn is_correct(&self) -> bool {
        self.letters
            .iter()
            .all(|(_, state)| *state == LetterState::Correct)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(char, LetterState)> + '_ {
        self.letters.iter()
    }

    pub fn word(&self) -> String {
        self.letters.iter().map(|(ch, _)| ch).collect()
    }
}

impl AsEmoji for Guess {
    fn as_emoji(&self) -> Cow<str> {
        self.letters
            .iter()
            .map(|(_, state)| state.as_emoji())
            .collect::<String>()
            .into()
    }

    fn emoji_with_letters(&self) -> String {
        let (letters, states) = self.letters.iter().fold(
            (String::new(), String::new()),
            |(letters, states), (letter, state)| {
                (
                    letters + " " + &letter.to_string(),
                    states + &state.as_emoji(),
                )
            },
        );

        letters.trim().to_owned() + "\n" + &states
    }
}

impl Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let txt = self
            .letters
            .iter()
            .map(|letter| letter.1.to_string())
            .collect::<String>();

        f.write_str(&txt)
    }
}

impl PartialEq<&str> for Guess {
    fn eq(&self, other: &&str) -> bool {
        &self.to_string() == other
    }
}

/// Ordered weakest to strongest, so the aggregate status of a letter is the
/// maximum of every state it has been given.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LetterState {
    #[default]
    Absent,
    Present,
    Correct,
}

impl AsEmoji for LetterState {
    fn as_emoji(&self) -> Cow<str> {
        match self {
            Self::Correct => "🟩",
            Self::Present => "🟨",
            Self::Absent => "⬛",
        }
        .into()
    }
}

impl Display for LetterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Correct => "O",
            Self::Present => "o",
            Self::Absent => ".",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GuessesLimit(usize);

impl GuessesLimit {
    pub fn new(limit: usize) -> Self {
        assert!(limit != 0, "limit cannot be 0");
        Self(limit)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Display for GuessesLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.0))
    }
}

impl PartialEq<usize> for GuessesLimit {
    fn eq(&self, other: &usize) -> bool {
        &self.0 == other
    }
}

/// Append-only list of accepted guesses, capped at its limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guesses {
    vec: TinyVec<[Guess; 6]>,
    limit: GuessesLimit,
}

impl Guesses {
    pub fn new(limit: GuessesLimit) -> Self {
        Self {
            vec: TinyVec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> GuessesLimit {
        self.limit
    }

    pub fn limit_reached(&self) -> bool {
        self.limit == self.vec.len()
    }

    pub fn remaining(&self) -> usize {
        self.limit.get().saturating_sub(self.vec.len())
    }

    /// Returns `false` without storing the guess once the limit is reached.
    pub fn push(&mut self, guess: Guess) -> bool {
        if self.limit_reached().not() {
            self.vec.push(guess);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> std::slice::Iter<Guess> {
        self.vec.iter()
    }

    pub fn count(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

/// Aggregate status of every letter guessed so far in a round.
///
/// A letter's status only ever strengthens: `Correct` is never replaced, and
/// `Present` can become `Correct` but never `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LetterStates(BTreeMap<char, LetterState>);

impl LetterStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, letter: char) -> Option<LetterState> {
        self.0.get(&letter.to_ascii_uppercase()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn record(&mut self, letter: char, state: LetterState) {
        self.0
            .entry(letter)
            .and_modify(|current| *current = (*current).max(state))
            .or_insert(state);
    }

    pub fn update(&mut self, guess: &Guess) {
        for (letter, state) in guess.iter() {
            self.record(*letter, *state);
        }
    }
}
