use rand::seq::{IteratorRandom, SliceRandom};
use tracing::{debug, instrument, warn};

use super::WordList;
use crate::{
    datamuse::{Query, WordEntry},
    games::wordle::core::{Word, WORD_LENGTH},
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("failed to fetch words: {0}")]
    WordList(String),

    #[error("no candidate word found after {attempts} attempts")]
    NoCandidateFound { attempts: usize },
}

impl SourceError {
    pub fn word_list(error: impl std::error::Error) -> Self {
        Self::WordList(error.to_string())
    }
}

/// Picks random secret words from a [`WordList`].
#[derive(Debug, Clone)]
pub struct WordSource<W> {
    words: W,
    excluded_tags: Vec<String>,
    max_candidates: usize,
    max_attempts: usize,
}

impl<W> WordSource<W> {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

    pub fn new(words: W) -> Self {
        Self {
            words,
            excluded_tags: ["n", "prop", "pl"].map(str::to_owned).to_vec(),
            max_candidates: Query::DEFAULT_MAX,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn excluded_tags(self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            excluded_tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn max_candidates(self, max_candidates: usize) -> Self {
        Self {
            max_candidates,
            ..self
        }
    }

    /// A ceiling of 0 is treated as 1.
    pub fn max_attempts(self, max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..self
        }
    }

    /// Keeps common five-letter words: entries must carry tags, and none of
    /// the excluded ones.
    fn candidates(&self, entries: Vec<WordEntry>) -> Vec<Word> {
        entries
            .into_iter()
            .filter(|entry| {
                entry.tags.is_some()
                    && !self
                        .excluded_tags
                        .iter()
                        .any(|tag| entry.has_tag(tag))
            })
            .map(|entry| entry.word.to_lowercase())
            .filter(|word| word.chars().count() == WORD_LENGTH)
            .filter_map(|word| Word::parse(&word).ok())
            .collect()
    }
}

fn random_letter() -> char {
    ('a'..='z')
        .choose(&mut rand::thread_rng())
        .unwrap_or('a')
}

fn pick(candidates: &[Word]) -> Option<Word> {
    candidates.choose(&mut rand::thread_rng()).copied()
}

impl<W: WordList + Sync> WordSource<W> {
    /// Draws a random letter, asks for words starting with it, and keeps
    /// drawing until one qualifies or the attempt ceiling is hit.
    ///
    /// A failing request ends the search immediately.
    #[instrument(skip(self))]
    pub async fn fetch_secret_word(&self) -> Result<Word, SourceError> {
        for attempt in 1..=self.max_attempts {
            let letter = random_letter();
            let pattern = format!("{letter}????");

            let query = Query::spelled_like(&pattern)
                .metadata("p")
                .max(self.max_candidates);

            let entries = self.words.search(&query).await.map_err(|err| {
                warn!(error = %err, "word list request failed");
                SourceError::word_list(err)
            })?;

            let candidates = self.candidates(entries);

            if let Some(word) = pick(&candidates) {
                debug!(attempt, candidates = candidates.len(), "picked secret word");
                return Ok(word);
            }

            debug!(attempt, %letter, "no candidates, drawing another letter");
        }

        warn!(attempts = self.max_attempts, "giving up on finding a word");

        Err(SourceError::NoCandidateFound {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::testing::{entry, untagged, FakeWordList};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn every_letter(word: &str, tags: &[&str]) -> Vec<WordEntry> {
        ('a'..='z')
            .map(|letter| entry(&format!("{letter}{word}"), tags))
            .collect()
    }

    #[test]
    fn candidates_filter() {
        let source = WordSource::new(FakeWordList::default());

        let entries = vec![
            entry("crane", &["v"]),
            entry("Crete", &["n", "prop"]),
            entry("cribs", &["n", "pl"]),
            entry("crust", &["n"]),
            entry("cross", &["adj"]),
            entry("craft", &["v"]),
            untagged("cruft"),
            entry("cream", &[]),
            entry("crazed", &["adj"]),
            entry("c-ops", &["v"]),
        ];

        let candidates: Vec<String> = source
            .candidates(entries)
            .iter()
            .map(Word::to_string)
            .collect();

        assert_eq!(candidates, ["CRANE", "CROSS", "CRAFT", "CREAM"]);
    }

    #[test]
    fn custom_excluded_tags() {
        let source = WordSource::new(FakeWordList::default()).excluded_tags(["v"]);
        let candidates = source.candidates(vec![entry("crane", &["v"]), entry("crust", &["n"])]);

        assert_eq!(candidates, [Word::parse("crust").expect("valid word")]);
    }

    #[tokio::test]
    #[traced_test]
    async fn fetches_uppercase_word() {
        let words = FakeWordList::from_entries(every_letter("rave", &["adj"]));
        let source = WordSource::new(words.clone());

        let word = source.fetch_secret_word().await.expect("every letter has a word");

        assert_eq!(&word.to_string()[1..], "RAVE");
        assert_eq!(words.calls(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn retries_are_bounded() {
        let words = FakeWordList::from_entries(every_letter("rave", &["n", "prop"]));
        let source = WordSource::new(words.clone()).max_attempts(4);

        let result = source.fetch_secret_word().await;

        assert!(matches!(
            result,
            Err(SourceError::NoCandidateFound { attempts: 4 })
        ));
        assert_eq!(words.calls(), 4);
    }

    #[tokio::test]
    #[traced_test]
    async fn network_errors_are_not_retried() {
        let words = FakeWordList::offline();
        let source = WordSource::new(words.clone());

        let result = source.fetch_secret_word().await;

        assert!(matches!(result, Err(SourceError::WordList(_))));
        assert_eq!(words.calls(), 1);
    }
}
