use std::{ops::Index, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::guess::{Guess, LetterState};

pub const WORD_LENGTH: usize = 5;

/// A five-letter, uppercase, ASCII-alphabetic word.
///
/// Used both for the secret word of a round and for submitted guesses
/// before they are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    letters: [char; WORD_LENGTH],
}

impl Word {
    pub fn parse(s: &str) -> Result<Self, ParseWordError> {
        s.parse()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter.to_ascii_uppercase())
    }

    /// Cell status of `letter` at `index` when guessed against this word.
    /// `index` must be below [`WORD_LENGTH`].
    ///
    /// Repeated letters are not counted down: a letter guessed twice but
    /// present once is `Present` at both non-matching positions.
    pub(super) fn cell_state(&self, index: usize, letter: char) -> LetterState {
        if self[index] == letter {
            LetterState::Correct
        } else if self.contains(letter) {
            LetterState::Present
        } else {
            LetterState::Absent
        }
    }

    pub fn guess(&self, word: &Word) -> Guess {
        Guess::scored(word, self)
    }

    pub fn to_lowercase(&self) -> String {
        self.to_string().to_lowercase()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWordError {
    #[error("word `{word}` must have 5 letters but has {len}")]
    WrongLength { word: String, len: usize },

    #[error("word `{0}` contains characters that are not letters")]
    NotAlphabetic(String),
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();

        if upper.chars().any(|ch| !ch.is_ascii_alphabetic()) {
            return Err(ParseWordError::NotAlphabetic(s.to_owned()));
        }

        let letters: [char; WORD_LENGTH] = upper
            .chars()
            .collect::<Vec<char>>()
            .try_into()
            .map_err(|_| ParseWordError::WrongLength {
                word: s.to_owned(),
                len: s.chars().count(),
            })?;

        Ok(Self { letters })
    }
}

impl TryFrom<String> for Word {
    type Error = ParseWordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Word> for String {
    fn from(value: Word) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters.iter().collect::<String>())
    }
}

impl Index<usize> for Word {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_uppercases() {
        let word = Word::parse("crane").expect("valid word");
        assert_eq!(word.to_string(), "CRANE");
        assert_eq!(word.to_lowercase(), "crane");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            Word::parse("cranes"),
            Err(ParseWordError::WrongLength {
                word: "cranes".to_owned(),
                len: 6
            })
        );
        assert!(Word::parse("").is_err());
    }

    #[test]
    fn parse_rejects_symbols() {
        assert_eq!(
            Word::parse("cr4ne"),
            Err(ParseWordError::NotAlphabetic("cr4ne".to_owned()))
        );
        assert!(Word::parse("crâne").is_err());
    }

    #[test]
    fn cell_states_do_not_count_duplicates() {
        let secret = Word::parse("crane").expect("valid word");

        assert_eq!(secret.cell_state(0, 'C'), LetterState::Correct);
        assert_eq!(secret.cell_state(1, 'C'), LetterState::Present);
        assert_eq!(secret.cell_state(2, 'Z'), LetterState::Absent);

        // three E's guessed, one E in the secret word: every one lights up
        let guess = secret.guess(&Word::parse("eerie").expect("valid word"));
        assert_eq!(guess.to_string(), "ooo.O");
    }

    #[test]
    fn serde_round_trip_uses_plain_string() {
        let word = Word::parse("amber").expect("valid word");
        let json = serde_json::to_string(&word).expect("serializes");
        assert_eq!(json, "\"AMBER\"");
        assert!(serde_json::from_str::<Word>("\"amb3r\"").is_err());
    }
}
