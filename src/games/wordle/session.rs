use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, instrument, warn};

use super::{
    core::Word,
    game::{Game, Generation, SubmitOutcome},
    keys::Key,
};
use crate::{
    dictionary::{DefinitionBundle, Definitions},
    words::{GuessValidator, SourceError, WordList, WordSource},
};

type Result<T, E = SessionError> = std::result::Result<T, E>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("couldn't generate a word: {0}")]
    Word(#[from] SourceError),

    #[error("no round is in progress")]
    NoRound,
}

/// Result of an async operation that may have been overtaken by a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Stale,
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(t) => Some(t),
            Self::Stale => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Round {
    /// A secret word is being fetched.
    #[default]
    Loading,
    /// Fetching the secret word failed; only a reset gets out of here.
    Unavailable(String),
    Active(Game),
}

impl Round {
    pub fn game(&self) -> Option<&Game> {
        match self {
            Self::Active(game) => Some(game),
            _ => None,
        }
    }

    fn game_mut(&mut self) -> Option<&mut Game> {
        match self {
            Self::Active(game) => Some(game),
            _ => None,
        }
    }
}

/// Definitions for a revealed word, or the reason there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(DefinitionBundle),
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub word: Word,
    pub lookup: Lookup,
}

#[derive(Debug, Default)]
struct State {
    generation: Generation,
    round: Round,
    reveal: Option<Reveal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Edited(bool),
    Submitted(SubmitOutcome),
}

/// Drives a [`Game`] against the network.
///
/// State lives behind a lock that is never held across a request. Each
/// request records the generation it started under; a reset bumps the
/// generation, so whatever comes back for an older round is dropped.
#[derive(Debug)]
pub struct Session<W, D> {
    state: Arc<RwLock<State>>,
    source: WordSource<W>,
    validator: GuessValidator<W>,
    definitions: D,
}

impl<W, D> Clone for Session<W, D>
where
    W: Clone,
    D: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            source: self.source.clone(),
            validator: self.validator.clone(),
            definitions: self.definitions.clone(),
        }
    }
}

impl<W, D> Session<W, D> {
    pub fn new(source: WordSource<W>, validator: GuessValidator<W>, definitions: D) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            source,
            validator,
            definitions,
        }
    }

    async fn state(&self) -> RwLockReadGuard<State> {
        self.state.read().await
    }

    async fn state_mut(&self) -> RwLockWriteGuard<State> {
        self.state.write().await
    }

    pub async fn generation(&self) -> Generation {
        self.state().await.generation
    }

    pub async fn round(&self) -> Round {
        self.state().await.round.clone()
    }

    pub async fn game(&self) -> Option<Game> {
        self.state().await.round.game().cloned()
    }

    async fn with_game<T>(&self, f: impl FnOnce(&mut Game) -> T) -> Result<T> {
        let mut state = self.state_mut().await;
        state.round.game_mut().map(f).ok_or(SessionError::NoRound)
    }

    pub async fn append_character(&self, ch: char) -> Result<bool> {
        self.with_game(|game| game.append_character(ch)).await
    }

    pub async fn delete_character(&self) -> Result<bool> {
        self.with_game(Game::delete_character).await
    }

    pub async fn forfeit(&self) -> Result<bool> {
        self.with_game(Game::forfeit).await
    }
}

impl<W, D> Session<W, D>
where
    W: WordList + Sync,
    D: Definitions + Sync,
{
    /// Starts a new round with a freshly fetched word.
    ///
    /// The old round is gone as soon as this is called, even if the fetch
    /// later fails.
    #[instrument(skip(self))]
    pub async fn reset_round(&self) -> Result<Outcome<Generation>> {
        let generation = {
            let mut state = self.state_mut().await;
            state.generation = state.generation.next();
            state.round = Round::Loading;
            state.reveal = None;
            state.generation
        };

        let fetched = self.source.fetch_secret_word().await;

        let mut state = self.state_mut().await;

        if state.generation != generation {
            debug!(%generation, current = %state.generation, "round was reset while fetching");
            return Ok(Outcome::Stale);
        }

        match fetched {
            Ok(word) => {
                state.round = Round::Active(Game::new(word, generation));
                info!(%generation, "new round started");
                Ok(Outcome::Applied(generation))
            }
            Err(err) => {
                warn!(%generation, error = %err, "failed to start round");
                state.round = Round::Unavailable(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Validates the current input and, if it is a real word, records it.
    ///
    /// Typing continues to work while the validator is running.
    #[instrument(skip(self))]
    pub async fn submit_guess(&self) -> Result<SubmitOutcome> {
        let submission = {
            let state = self.state().await;
            let game = state.round.game().ok_or(SessionError::NoRound)?;

            match game.submission() {
                Some(submission) => submission,
                None => return Ok(SubmitOutcome::Ignored),
            }
        };

        let valid = self
            .validator
            .is_real_word(&submission.word().to_string())
            .await;

        let mut state = self.state_mut().await;

        Ok(match state.round.game_mut() {
            Some(game) => game.resolve(submission, valid),
            None => SubmitOutcome::Stale,
        })
    }

    pub async fn press(&self, key: Key) -> Result<KeyOutcome> {
        match key {
            Key::Letter(ch) => self.append_character(ch).await.map(KeyOutcome::Edited),
            Key::Backspace => self.delete_character().await.map(KeyOutcome::Edited),
            Key::Enter => self.submit_guess().await.map(KeyOutcome::Submitted),
        }
    }

    /// Looks up the current secret word. Looked up once per round; failures
    /// are part of the answer rather than errors.
    #[instrument(skip(self))]
    pub async fn reveal(&self) -> Result<Outcome<Reveal>> {
        let (generation, word) = {
            let state = self.state().await;

            if let Some(reveal) = &state.reveal {
                return Ok(Outcome::Applied(reveal.clone()));
            }

            let game = state.round.game().ok_or(SessionError::NoRound)?;
            (state.generation, *game.secret())
        };

        let lookup = match self
            .definitions
            .fetch_definitions(&word.to_lowercase())
            .await
        {
            Ok(bundle) => Lookup::Found(bundle),
            Err(err) => {
                debug!(error = %err, "no definitions");
                Lookup::Missing(err.to_string())
            }
        };

        let mut state = self.state_mut().await;

        if state.generation != generation {
            return Ok(Outcome::Stale);
        }

        let reveal = state.reveal.get_or_insert(Reveal { word, lookup });

        Ok(Outcome::Applied(reveal.clone()))
    }
}
