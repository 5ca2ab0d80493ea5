use tracing::{instrument, trace, warn};

use super::WordList;
use crate::datamuse::Query;

/// Checks guesses against a [`WordList`].
#[derive(Debug, Clone)]
pub struct GuessValidator<W> {
    words: W,
}

impl<W: WordList + Sync> GuessValidator<W> {
    pub fn new(words: W) -> Self {
        Self { words }
    }

    /// A word is real if the list's top exact-spelling hit is the same word,
    /// ignoring case.
    ///
    /// Fails closed: if the list can't be reached the word is rejected.
    #[instrument(skip(self))]
    pub async fn is_real_word(&self, candidate: &str) -> bool {
        let spelling = candidate.to_lowercase();
        let query = Query::spelled_like(&spelling).max(1);

        match self.words.search(&query).await {
            Ok(entries) => {
                let valid = entries
                    .first()
                    .is_some_and(|entry| entry.word.eq_ignore_ascii_case(candidate));

                trace!(valid);
                valid
            }
            Err(err) => {
                warn!(error = %err, "could not validate guess, rejecting it");
                false
            }
        }
    }
}
