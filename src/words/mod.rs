use std::future::Future;

use crate::datamuse::{Query, WordEntry};

mod source;
pub use source::{SourceError, WordSource};

mod validator;
pub use validator::GuessValidator;

/// A searchable list of words, as served by Datamuse.
pub trait WordList {
    type Error: std::error::Error + Send + Sync + 'static;

    fn search(
        &self,
        query: &Query<'_>,
    ) -> impl Future<Output = Result<Vec<WordEntry>, Self::Error>> + Send;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::WordList;
    use crate::datamuse::{Query, WordEntry};

    #[derive(Debug, thiserror::Error)]
    #[error("word list unreachable")]
    pub struct Unreachable;

    /// In-memory word list. `?` in a spelling matches any one letter.
    #[derive(Debug, Clone, Default)]
    pub struct FakeWordList {
        entries: Arc<Vec<WordEntry>>,
        offline: bool,
        calls: Arc<AtomicUsize>,
    }

    pub fn entry(word: &str, tags: &[&str]) -> WordEntry {
        WordEntry {
            word: word.to_owned(),
            score: 100,
            tags: Some(tags.iter().map(|tag| (*tag).to_owned()).collect()),
        }
    }

    pub fn untagged(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_owned(),
            score: 100,
            tags: None,
        }
    }

    impl FakeWordList {
        pub fn from_entries(entries: Vec<WordEntry>) -> Self {
            Self {
                entries: Arc::new(entries),
                ..Self::default()
            }
        }

        pub fn offline() -> Self {
            Self {
                offline: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn matches(pattern: &str, word: &str) -> bool {
            pattern.len() == word.len()
                && pattern
                    .chars()
                    .zip(word.chars())
                    .all(|(p, w)| p == '?' || p.eq_ignore_ascii_case(&w))
        }
    }

    impl WordList for FakeWordList {
        type Error = Unreachable;

        async fn search(&self, query: &Query<'_>) -> Result<Vec<WordEntry>, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.offline {
                return Err(Unreachable);
            }

            Ok(self
                .entries
                .iter()
                .filter(|entry| Self::matches(query.spelling, &entry.word))
                .take(query.max)
                .cloned()
                .collect())
        }
    }
}
