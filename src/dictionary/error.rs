#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no definitions found for `{word}`")]
    NoDefinitions { word: String },

    #[error(transparent)]
    ParseUrl(#[from] url::ParseError),

    #[error("error from reqwest client: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    pub fn no_definitions(word: impl Into<String>) -> Self {
        Self::NoDefinitions { word: word.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoDefinitions { .. })
    }
}
