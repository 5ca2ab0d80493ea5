pub mod core;
pub use core::{AsEmoji, Guess, LetterState, LetterStates, Word};

mod game;
pub use game::{Game, GamePhase, Generation, Input, SubmitOutcome, Submission, MAX_ATTEMPTS};

pub mod keys;
pub use keys::Key;

mod session;
pub use session::{KeyOutcome, Lookup, Outcome, Reveal, Round, Session, SessionError};
