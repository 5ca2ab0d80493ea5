//! Client for the Free Dictionary API (`/api/v2/entries/en/{word}`).

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

mod error;
pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/";

/// Anything that can look up the definitions of a word.
pub trait Definitions {
    fn fetch_definitions(
        &self,
        word: &str,
    ) -> impl Future<Output = Result<DefinitionBundle>> + Send;
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    client: reqwest::Client,
    base_url: url::Url,
}

impl Dictionary {
    pub fn new(base_url: url::Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: url::Url) -> Self {
        Self { client, base_url }
    }

    /// `word` always ends up as a single escaped path segment.
    fn entry_url(&self, word: &str) -> Result<url::Url> {
        let mut url = self.base_url.join("api/v2/entries/en/")?;

        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(&word.to_lowercase());

        Ok(url)
    }

    #[instrument(skip(self))]
    pub async fn entries(&self, word: &str) -> Result<Vec<Entry>> {
        let response = self.client.get(self.entry_url(word)?).send().await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "dictionary has no entry");
            return Err(Error::no_definitions(word));
        }

        Ok(response.json().await?)
    }
}

impl Definitions for Dictionary {
    async fn fetch_definitions(&self, word: &str) -> Result<DefinitionBundle> {
        let entries = self.entries(word).await?;
        DefinitionBundle::from_entries(word, entries)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    phonetics: Vec<Phonetic>,
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Deserialize)]
struct Phonetic {
    text: Option<String>,
    audio: Option<String>,
}

impl Phonetic {
    /// Both parts, if both are present and non-empty.
    fn complete(&self) -> Option<(&str, &str)> {
        let text = self.text.as_deref().filter(|s| !s.is_empty())?;
        let audio = self.audio.as_deref().filter(|s| !s.is_empty())?;
        Some((text, audio))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<DefinitionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct DefinitionRecord {
    definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub part_of_speech: String,
    pub definition: String,
}

/// What gets shown when the secret word is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionBundle {
    pub definitions: Vec<Definition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl DefinitionBundle {
    /// Uses the first entry only. Transcription and audio come from the
    /// first phonetic that has both.
    pub fn from_entries(word: &str, entries: Vec<Entry>) -> Result<Self> {
        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| Error::no_definitions(word))?;

        let (transcription, audio_url) = entry
            .phonetics
            .iter()
            .find_map(Phonetic::complete)
            .map(|(text, audio)| (Some(text.to_owned()), Some(audio.to_owned())))
            .unwrap_or_default();

        let definitions = entry
            .meanings
            .into_iter()
            .flat_map(|meaning| {
                let part_of_speech = meaning.part_of_speech;

                meaning
                    .definitions
                    .into_iter()
                    .map(move |record| Definition {
                        part_of_speech: part_of_speech.clone(),
                        definition: record.definition,
                    })
            })
            .collect();

        Ok(Self {
            definitions,
            transcription,
            audio_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CRANE: &str = r#"[
        {
            "word": "crane",
            "phonetics": [
                {"audio": ""},
                {"text": "/kɹeɪn/", "audio": ""},
                {"text": "/kɹeɪn/", "audio": "https://example.com/crane-us.mp3"},
                {"text": "/kɻeɪn/", "audio": "https://example.com/crane-uk.mp3"}
            ],
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        {"definition": "A large wading bird.", "example": "A crane stood in the marsh."},
                        {"definition": "A machine for lifting heavy objects."}
                    ]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [
                        {"definition": "To extend one's neck."}
                    ]
                }
            ]
        },
        {
            "word": "crane",
            "phonetics": [],
            "meanings": [{"partOfSpeech": "noun", "definitions": [{"definition": "ignored"}]}]
        }
    ]"#;

    fn dictionary() -> Dictionary {
        Dictionary::new(url::Url::parse(DEFAULT_BASE_URL).expect("valid url"))
    }

    #[test]
    fn entry_url_for_word() {
        assert_eq!(
            dictionary().entry_url("Crane").expect("valid url").as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/crane"
        );
    }

    #[test]
    fn entry_url_stays_on_the_dictionary() {
        for word in ["http://169.254.169.254/latest/", "//internal.example/admin"] {
            let url = dictionary().entry_url(word).expect("valid url");

            assert_eq!(url.host_str(), Some("api.dictionaryapi.dev"));
            assert!(url.path().starts_with("/api/v2/entries/en/"));
            assert_eq!(url.path_segments().map(Iterator::count), Some(5));
        }
    }

    #[test]
    fn flattens_first_entry() {
        let entries: Vec<Entry> = serde_json::from_str(CRANE).expect("valid json");
        let bundle = DefinitionBundle::from_entries("crane", entries).expect("has an entry");

        assert_eq!(
            bundle,
            DefinitionBundle {
                definitions: vec![
                    Definition {
                        part_of_speech: "noun".to_owned(),
                        definition: "A large wading bird.".to_owned(),
                    },
                    Definition {
                        part_of_speech: "noun".to_owned(),
                        definition: "A machine for lifting heavy objects.".to_owned(),
                    },
                    Definition {
                        part_of_speech: "verb".to_owned(),
                        definition: "To extend one's neck.".to_owned(),
                    },
                ],
                transcription: Some("/kɹeɪn/".to_owned()),
                audio_url: Some("https://example.com/crane-us.mp3".to_owned()),
            }
        );
    }

    #[test]
    fn phonetics_without_audio_are_dropped() {
        let json = r#"[{"phonetics": [{"text": "/ˈæm.bə/"}], "meanings": []}]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).expect("valid json");
        let bundle = DefinitionBundle::from_entries("amber", entries).expect("has an entry");

        assert_eq!(bundle.transcription, None);
        assert_eq!(bundle.audio_url, None);
        assert!(bundle.definitions.is_empty());
    }

    #[test]
    fn empty_results_have_no_definitions() {
        let result = DefinitionBundle::from_entries("zzzzz", Vec::new());

        assert!(matches!(result, Err(Error::NoDefinitions { ref word }) if word == "zzzzz"));
    }

    #[test]
    fn serializes_camel_case() {
        let bundle = DefinitionBundle {
            definitions: vec![Definition {
                part_of_speech: "noun".to_owned(),
                definition: "A bird.".to_owned(),
            }],
            transcription: None,
            audio_url: Some("https://example.com/a.mp3".to_owned()),
        };

        assert_eq!(
            serde_json::to_value(&bundle).expect("serializes"),
            serde_json::json!({
                "definitions": [{"partOfSpeech": "noun", "definition": "A bird."}],
                "audioUrl": "https://example.com/a.mp3"
            })
        );
    }
}
