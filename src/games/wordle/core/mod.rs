use std::borrow::Cow;

mod guess;
pub use guess::{Guess, Guesses, GuessesLimit, LetterState, LetterStates};

mod word;
pub use word::{ParseWordError, Word, WORD_LENGTH};

pub trait AsEmoji {
    fn as_emoji(&self) -> Cow<str>;

    fn emoji_with_letters(&self) -> String {
        self.as_emoji().into_owned()
    }
}
