#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ParseUrl(#[from] url::ParseError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Client(#[from] ReqwestClientError),
}

#[derive(Debug, thiserror::Error)]
#[error("word list service returned an error: {source}")]
pub struct ServerError {
    #[from]
    source: reqwest::Error,
}

#[derive(Debug, thiserror::Error)]
#[error("error from reqwest client: {source}")]
pub struct ReqwestClientError {
    #[from]
    source: reqwest::Error,
}

impl ReqwestClientError {
    /// Status errors came back from the service; everything else never
    /// got a usable response.
    pub(crate) fn or_server(err: reqwest::Error) -> Error {
        if err.is_status() {
            Error::Server(ServerError::from(err))
        } else {
            Error::Client(Self::from(err))
        }
    }
}
