//! JSON endpoints the browser front end calls.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

use crate::{
    dictionary::{DefinitionBundle, Definitions},
    games::wordle::Word,
    words::{GuessValidator, WordList, WordSource},
};

#[derive(Debug)]
pub struct AppState<W, D> {
    source: WordSource<W>,
    validator: GuessValidator<W>,
    definitions: D,
}

impl<W, D> AppState<W, D> {
    pub fn new(source: WordSource<W>, validator: GuessValidator<W>, definitions: D) -> Self {
        Self {
            source,
            validator,
            definitions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiError {
    WordUnavailable,
    NoDefinitions,
    DictionaryUnavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::WordUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch word"),
            Self::NoDefinitions => (StatusCode::NOT_FOUND, "No definitions found."),
            Self::DictionaryUnavailable => (StatusCode::BAD_GATEWAY, "Failed to fetch definitions"),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

#[derive(Serialize)]
struct WordBody {
    word: String,
}

#[derive(Serialize)]
struct CheckBody {
    word: String,
    valid: bool,
}

pub fn router<W, D>(state: AppState<W, D>) -> Router
where
    W: WordList + Send + Sync + 'static,
    D: Definitions + Send + Sync + 'static,
{
    Router::new()
        .route("/api/word", get(secret_word::<W, D>))
        .route("/api/check/:word", get(check_word::<W, D>))
        .route("/api/define/:word", get(define_word::<W, D>))
        .with_state(Arc::new(state))
}

#[instrument(skip_all)]
async fn secret_word<W, D>(
    State(state): State<Arc<AppState<W, D>>>,
) -> Result<Json<WordBody>, ApiError>
where
    W: WordList + Send + Sync + 'static,
    D: Definitions + Send + Sync + 'static,
{
    match state.source.fetch_secret_word().await {
        Ok(word) => Ok(Json(WordBody {
            word: word.to_lowercase(),
        })),
        Err(err) => {
            error!(error = %err, "failed to fetch word");
            Err(ApiError::WordUnavailable)
        }
    }
}

/// Anything that can't be a guess is invalid without asking the word list.
#[instrument(skip(state))]
async fn check_word<W, D>(
    State(state): State<Arc<AppState<W, D>>>,
    Path(word): Path<String>,
) -> Json<CheckBody>
where
    W: WordList + Send + Sync + 'static,
    D: Definitions + Send + Sync + 'static,
{
    let valid = match Word::parse(&word) {
        Ok(_) => state.validator.is_real_word(&word).await,
        Err(_) => false,
    };

    Json(CheckBody {
        word: word.to_lowercase(),
        valid,
    })
}

#[instrument(skip(state))]
async fn define_word<W, D>(
    State(state): State<Arc<AppState<W, D>>>,
    Path(word): Path<String>,
) -> Result<Json<DefinitionBundle>, ApiError>
where
    W: WordList + Send + Sync + 'static,
    D: Definitions + Send + Sync + 'static,
{
    if Word::parse(&word).is_err() {
        return Err(ApiError::NoDefinitions);
    }

    state
        .definitions
        .fetch_definitions(&word)
        .await
        .map(Json)
        .map_err(|err| {
            if err.is_not_found() {
                ApiError::NoDefinitions
            } else {
                warn!(error = %err, "dictionary request failed");
                ApiError::DictionaryUnavailable
            }
        })
}

pub async fn serve(address: SocketAddr, router: Router) -> crate::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router).await?;

    Ok(())
}
