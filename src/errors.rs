use thiserror::Error as ThisError;

use crate::games::wordle::SessionError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
