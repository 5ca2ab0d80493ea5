use std::ops::Not;

use serde::Serialize;
use tinyvec::ArrayVec;
use tracing::{debug, info, instrument, trace};

use super::core::{Guess, Guesses, GuessesLimit, LetterStates, Word, WORD_LENGTH};

pub const MAX_ATTEMPTS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        self != Self::Playing
    }
}

/// Round counter. Every async operation records the generation it was
/// started under, and its result is dropped if the round has moved on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unsubmitted guess being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input(ArrayVec<[char; WORD_LENGTH]>);

impl Input {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() == WORD_LENGTH
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    fn push(&mut self, letter: char) -> bool {
        self.0.try_push(letter).is_none()
    }

    fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    fn clear(&mut self) {
        self.0.clear()
    }

    fn to_word(&self) -> Option<Word> {
        self.is_full()
            .then(|| Word::parse(&self.to_string()).ok())
            .flatten()
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().collect::<String>())
    }
}

/// A guess waiting on the validator.
///
/// Stamped with the round generation and the number of guesses at the time
/// it was made; [`Game::resolve`] refuses it if either has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    generation: Generation,
    attempt: usize,
    word: Word,
}

impl Submission {
    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guess was valid and has been recorded.
    Accepted { guess: Guess, phase: GamePhase },
    /// The validator rejected the word. Input is left untouched.
    Invalid,
    /// Nothing to submit: the round is over or the input is not full.
    Ignored,
    /// The result arrived for a round, or a guess count, that no longer exists.
    Stale,
}

/// One round of the game.
///
/// Every mutation goes through a single method here, so the whole round can
/// be driven without any network or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    generation: Generation,
    secret: Word,
    guesses: Guesses,
    input: Input,
    letters: LetterStates,
    phase: GamePhase,
}

impl Game {
    pub fn new(secret: Word, generation: Generation) -> Self {
        Self::with_limit(secret, generation, GuessesLimit::new(MAX_ATTEMPTS))
    }

    pub fn with_limit(secret: Word, generation: Generation, limit: GuessesLimit) -> Self {
        Self {
            generation,
            secret,
            guesses: Guesses::new(limit),
            input: Input::default(),
            letters: LetterStates::new(),
            phase: GamePhase::Playing,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn guesses(&self) -> &Guesses {
        &self.guesses
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn letters(&self) -> &LetterStates {
        &self.letters
    }

    pub fn attempts_remaining(&self) -> usize {
        self.guesses.remaining()
    }

    /// The secret word, regardless of phase. Views should prefer
    /// [`Game::revealed`].
    pub fn secret(&self) -> &Word {
        &self.secret
    }

    /// The secret word, once the round is over.
    pub fn revealed(&self) -> Option<&Word> {
        self.phase.is_over().then_some(&self.secret)
    }

    /// Returns whether the letter was added.
    #[instrument(level = "trace", skip(self), fields(generation = %self.generation))]
    pub fn append_character(&mut self, ch: char) -> bool {
        if self.is_playing().not() || self.input.is_full() || ch.is_ascii_alphabetic().not() {
            trace!("ignored");
            return false;
        }

        self.input.push(ch.to_ascii_uppercase())
    }

    /// Returns whether a letter was removed.
    pub fn delete_character(&mut self) -> bool {
        self.is_playing() && self.input.pop().is_some()
    }

    /// Starts submitting the current input, if there is a full word to submit.
    pub fn submission(&self) -> Option<Submission> {
        if self.is_playing().not() {
            return None;
        }

        self.input.to_word().map(|word| Submission {
            generation: self.generation,
            attempt: self.guesses.count(),
            word,
        })
    }

    /// Applies the validator's verdict on `submission`.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn resolve(&mut self, submission: Submission, valid: bool) -> SubmitOutcome {
        if submission.generation != self.generation || submission.attempt != self.guesses.count()
        {
            debug!("discarding stale submission");
            return SubmitOutcome::Stale;
        }

        if self.is_playing().not() {
            debug!(phase = ?self.phase, "round is over, discarding submission");
            return SubmitOutcome::Stale;
        }

        if valid.not() {
            debug!(word = %submission.word, "invalid word");
            return SubmitOutcome::Invalid;
        }

        let guess = self.secret.guess(&submission.word);

        if self.guesses.push(guess).not() {
            return SubmitOutcome::Stale;
        }

        self.letters.update(&guess);
        self.input.clear();

        if guess.is_correct() {
            self.phase = GamePhase::Won;
            info!(guesses = self.guesses.count(), "round won");
        } else if self.guesses.limit_reached() {
            self.phase = GamePhase::Lost;
            info!(secret = %self.secret, "round lost");
        }

        SubmitOutcome::Accepted {
            guess,
            phase: self.phase,
        }
    }

    /// Submits with a verdict that is already known.
    pub fn submit(&mut self, valid: bool) -> SubmitOutcome {
        match self.submission() {
            Some(submission) => self.resolve(submission, valid),
            None => SubmitOutcome::Ignored,
        }
    }

    /// Gives up the round. Returns whether the phase changed.
    pub fn forfeit(&mut self) -> bool {
        if self.is_playing() {
            self.phase = GamePhase::Lost;
            info!(secret = %self.secret, "round forfeited");
            true
        } else {
            false
        }
    }
}
