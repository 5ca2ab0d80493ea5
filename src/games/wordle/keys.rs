use std::str::FromStr;

/// A logical key press, from a physical keyboard or the on-screen one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Letter(char),
    Backspace,
    Enter,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a game key")]
pub struct UnknownKeyError(String);

impl FromStr for Key {
    type Err = UnknownKeyError;

    /// Accepts DOM-style key names: `Enter`, `Backspace` or a single letter
    /// in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enter" => Ok(Self::Enter),
            "Backspace" => Ok(Self::Backspace),
            _ => {
                let mut chars = s.chars();

                match (chars.next(), chars.next()) {
                    (Some(ch), None) if ch.is_ascii_alphabetic() => {
                        Ok(Self::Letter(ch.to_ascii_uppercase()))
                    }
                    _ => Err(UnknownKeyError(s.to_owned())),
                }
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Letter(ch) => write!(f, "{ch}"),
            Self::Backspace => f.write_str("⌫"),
            Self::Enter => f.write_str("⏎"),
        }
    }
}

const ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// The on-screen keyboard, top row first. Backspace and Enter close out the
/// bottom row.
pub fn virtual_keyboard() -> Vec<Vec<Key>> {
    let mut rows: Vec<Vec<Key>> = ROWS
        .iter()
        .map(|row| row.chars().map(Key::Letter).collect())
        .collect();

    if let Some(last) = rows.last_mut() {
        last.extend([Key::Backspace, Key::Enter]);
    }

    rows
}
