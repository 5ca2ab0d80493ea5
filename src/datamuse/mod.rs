//! Client for the Datamuse word-finding API.
//!
//! Only the `/words` endpoint is used: spelling patterns (`sp`), optional
//! metadata flags (`md`) and a result cap (`max`).

use serde::Deserialize;
use tracing::{debug, instrument};

pub mod error;
pub use error::Error;
use error::ReqwestClientError;

type Result<T, E = Error> = std::result::Result<T, E>;

pub const DEFAULT_BASE_URL: &str = "https://api.datamuse.com/";

#[derive(Debug, Clone)]
pub struct Datamuse {
    client: reqwest::Client,
    base_url: url::Url,
}

impl Datamuse {
    pub fn new(base_url: url::Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: url::Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn words_url(&self) -> Result<url::Url> {
        Ok(self.base_url.join("words")?)
    }

    #[instrument(skip(self), fields(sp = query.spelling))]
    pub async fn words(&self, query: &Query<'_>) -> Result<Vec<WordEntry>> {
        let request = self
            .client
            .get(self.words_url()?)
            .query(&query.params());

        let entries: Vec<WordEntry> = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ReqwestClientError::or_server)?
            .json()
            .await
            .map_err(ReqwestClientError::or_server)?;

        debug!(results = entries.len());

        Ok(entries)
    }
}

impl crate::words::WordList for Datamuse {
    type Error = Error;

    async fn search(&self, query: &Query<'_>) -> Result<Vec<WordEntry>> {
        self.words(query).await
    }
}

/// Parameters for a `/words` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query<'a> {
    pub spelling: &'a str,
    pub metadata: Option<&'a str>,
    pub max: usize,
}

impl<'a> Query<'a> {
    pub const DEFAULT_MAX: usize = 100;

    /// `?` matches any single letter, `*` any run of letters.
    pub fn spelled_like(spelling: &'a str) -> Self {
        Self {
            spelling,
            metadata: None,
            max: Self::DEFAULT_MAX,
        }
    }

    pub fn metadata(self, flags: &'a str) -> Self {
        Self {
            metadata: Some(flags),
            ..self
        }
    }

    pub fn max(self, max: usize) -> Self {
        Self { max, ..self }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("sp", self.spelling.to_owned())];

        if let Some(metadata) = self.metadata {
            params.push(("md", metadata.to_owned()));
        }

        params.push(("max", self.max.to_string()));
        params
    }
}

/// One result from the word list.
///
/// `tags` is only present when metadata was requested, and is `None` for
/// words the service has no part-of-speech data for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl WordEntry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }
}
