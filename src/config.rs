use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{datamuse, dictionary, words::WordSource};

pub const DEFAULT_CONFIG_FILE: &str = "wordle-web.toml";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config could not be read: {0}")]
    Read(#[source] ::config::ConfigError),

    #[error("config could not be parsed: {0}")]
    Parse(#[source] ::config::ConfigError),
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub datamuse: DatamuseConfig,
    pub dictionary: DictionaryConfig,
    pub game: GameConfig,
}

impl Config {
    /// Reads `path`, or `WORDLE_WEB_TOML`, or `./wordle-web.toml`, with
    /// `WORDLE_WEB_*` environment variables on top. A missing file is fine.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match std::env::var("WORDLE_WEB_TOML") {
                Ok(path) => {
                    info!(path, "using config file from WORDLE_WEB_TOML");
                    PathBuf::from(path)
                }
                Err(_) => PathBuf::from(DEFAULT_CONFIG_FILE),
            },
        };

        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
        }

        let builder = ::config::Config::builder()
            .add_source(
                ::config::File::from(path.as_path())
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("WORDLE_WEB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    ) -> Result<Self, Error> {
        builder
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DatamuseConfig {
    pub base_url: url::Url,
    pub max_candidates: usize,
    pub excluded_tags: Vec<String>,
}

impl Default for DatamuseConfig {
    fn default() -> Self {
        Self {
            base_url: url::Url::parse(datamuse::DEFAULT_BASE_URL)
                .expect("hard-coded url should be valid"),
            max_candidates: datamuse::Query::DEFAULT_MAX,
            excluded_tags: ["n", "prop", "pl"].map(str::to_owned).to_vec(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    pub base_url: url::Url,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: url::Url::parse(dictionary::DEFAULT_BASE_URL)
                .expect("hard-coded url should be valid"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// How many letters to draw before giving up on finding a secret word.
    pub max_word_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_word_attempts: WordSource::<()>::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn from_toml(toml: &str) -> Result<Config, Error> {
        Config::from_builder(
            ::config::Config::builder()
                .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml)),
        )
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = from_toml("").expect("empty config is valid");

        assert_eq!(config.server.address, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.datamuse.base_url.as_str(), "https://api.datamuse.com/");
        assert_eq!(config.datamuse.max_candidates, 100);
        assert_eq!(config.datamuse.excluded_tags, ["n", "prop", "pl"]);
        assert_eq!(
            config.dictionary.base_url.as_str(),
            "https://api.dictionaryapi.dev/"
        );
        assert_eq!(config.game.max_word_attempts, 10);
    }

    #[test]
    fn overrides() {
        let config = from_toml(
            r#"
            [server]
            address = "0.0.0.0:8080"

            [datamuse]
            base_url = "http://localhost:9000/"
            excluded_tags = ["prop"]

            [game]
            max_word_attempts = 3
            "#,
        )
        .expect("config is valid");

        assert_eq!(config.server.address.port(), 8080);
        assert_eq!(config.datamuse.base_url.as_str(), "http://localhost:9000/");
        assert_eq!(config.datamuse.excluded_tags, ["prop"]);
        assert_eq!(config.datamuse.max_candidates, 100);
        assert_eq!(config.game.max_word_attempts, 3);
    }

    #[test]
    fn bad_values_fail_to_parse() {
        let result = from_toml(
            r#"
            [datamuse]
            base_url = "not a url"
            "#,
        );

        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
