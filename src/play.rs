//! Line-based terminal view over a [`Session`].
//!
//! Each line of input is either a `:command` or a word. Words are typed
//! letter by letter and submitted, the same way the on-screen keyboard
//! would do it.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, instrument};

use crate::{
    dictionary::Definitions,
    games::wordle::{
        core::WORD_LENGTH, keys::virtual_keyboard, AsEmoji, Game, GamePhase, Key, KeyOutcome,
        LetterStates, Lookup, Outcome, Reveal, Round, Session, SessionError, SubmitOutcome,
    },
    words::WordList,
};

const HELP: &str = "type a five-letter word and press enter\n\
                    :new starts a new round, :give up ends this one\n\
                    :define shows the answer's definitions, :quit exits";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    NewRound,
    Forfeit,
    Define,
    Help,
    Quit,
    Keys(Vec<Key>),
    NotAWord,
    Unknown(String),
}

impl Command {
    /// A word line must be exactly five letters. Its letters are forwarded
    /// as key presses, followed by `Enter`.
    fn parse(line: &str) -> Self {
        let line = line.trim();

        match line {
            ":new" | ":n" => Self::NewRound,
            ":give up" | ":forfeit" => Self::Forfeit,
            ":define" | ":d" => Self::Define,
            ":help" | ":h" => Self::Help,
            ":quit" | ":q" => Self::Quit,
            _ if line.starts_with(':') => Self::Unknown(line.to_owned()),
            _ if line.len() != WORD_LENGTH || !line.chars().all(|ch| ch.is_ascii_alphabetic()) => {
                Self::NotAWord
            }
            _ => Self::Keys(
                line.chars()
                    .map(|ch| Key::Letter(ch.to_ascii_uppercase()))
                    .chain(std::iter::once(Key::Enter))
                    .collect(),
            ),
        }
    }
}

pub async fn run<W, D>(session: Session<W, D>) -> crate::Result<()>
where
    W: WordList + Sync,
    D: Definitions + Sync,
{
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut screen = String::from(HELP);
    screen.push_str("\n\n");
    screen.push_str(&new_round(&session).await);

    loop {
        stdout.write_all(screen.as_bytes()).await?;
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        screen = match Command::parse(&line) {
            Command::Quit => break,
            command => step(&session, command).await,
        };
    }

    Ok(())
}

#[instrument(skip(session))]
async fn step<W, D>(session: &Session<W, D>, command: Command) -> String
where
    W: WordList + Sync,
    D: Definitions + Sync,
{
    let message = match command {
        Command::NewRound => return new_round(session).await,
        Command::Help => Ok(HELP.to_owned()),
        Command::Unknown(command) => Ok(format!("unknown command `{command}`")),
        Command::Forfeit => match session.forfeit().await {
            Ok(true) => reveal(session).await,
            Ok(false) => Ok("the round is already over".to_owned()),
            Err(err) => Err(err),
        },
        Command::Define => match session.game().await {
            Some(game) if game.phase().is_over() => reveal(session).await,
            Some(_) => Ok("finish the round first".to_owned()),
            None => Err(SessionError::NoRound),
        },
        Command::Keys(keys) => type_keys(session, keys).await,
        Command::NotAWord => Ok(format!("guesses need {WORD_LENGTH} letters")),
        Command::Quit => Ok(String::new()),
    };

    let round = render_round(&session.round().await);

    match message {
        Ok(message) if message.is_empty() => round,
        Ok(message) => format!("{round}\n\n{message}"),
        Err(SessionError::NoRound) => format!("{round}\n\nno round in progress, type :new"),
        Err(err) => format!("{round}\n\n{err}"),
    }
}

async fn new_round<W, D>(session: &Session<W, D>) -> String
where
    W: WordList + Sync,
    D: Definitions + Sync,
{
    if let Err(err) = session.reset_round().await {
        debug!(error = %err, "round unavailable");
    }

    render_round(&session.round().await)
}

async fn type_keys<W, D>(session: &Session<W, D>, keys: Vec<Key>) -> Result<String, SessionError>
where
    W: WordList + Sync,
    D: Definitions + Sync,
{
    let mut message = String::new();

    for key in keys {
        match session.press(key).await? {
            KeyOutcome::Submitted(SubmitOutcome::Invalid) => {
                message = "not in word list".to_owned();

                while session.delete_character().await? {}
            }
            KeyOutcome::Submitted(SubmitOutcome::Ignored) => {
                if session.game().await.is_some_and(|game| game.is_playing()) {
                    message = format!("guesses need {WORD_LENGTH} letters");
                }
            }
            KeyOutcome::Submitted(SubmitOutcome::Accepted { phase, .. }) if phase.is_over() => {
                message = reveal(session).await?;
            }
            KeyOutcome::Submitted(_) | KeyOutcome::Edited(_) => {}
        }
    }

    Ok(message)
}

async fn reveal<W, D>(session: &Session<W, D>) -> Result<String, SessionError>
where
    W: WordList + Sync,
    D: Definitions + Sync,
{
    Ok(match session.reveal().await? {
        Outcome::Applied(reveal) => render_reveal(&reveal),
        Outcome::Stale => String::new(),
    })
}

fn render_round(round: &Round) -> String {
    match round {
        Round::Loading => "fetching a word...".to_owned(),
        Round::Unavailable(reason) => {
            format!("couldn't start a round: {reason}\ntype :new to try again")
        }
        Round::Active(game) => {
            format!(
                "{}\n\n{}\n\n{}",
                render_board(game),
                render_keyboard(game.letters()),
                render_status(game)
            )
        }
    }
}

fn render_row(letters: impl Iterator<Item = char>) -> String {
    let mut row: Vec<String> = letters.map(String::from).collect();
    row.resize(WORD_LENGTH, "_".to_owned());
    row.join(" ")
}

/// Past guesses, the row being typed, then blank rows up to the limit.
fn render_board(game: &Game) -> String {
    let mut rows: Vec<String> = game
        .guesses()
        .iter()
        .map(|guess| guess.emoji_with_letters())
        .collect();

    if game.is_playing() {
        rows.push(render_row(game.input().as_slice().iter().copied()));
    }

    while rows.len() < game.guesses().limit().get() {
        rows.push(render_row(std::iter::empty()));
    }

    rows.join("\n")
}

/// Keys are followed by their best known state, if any.
fn render_keyboard(letters: &LetterStates) -> String {
    virtual_keyboard()
        .iter()
        .map(|row| {
            row.iter()
                .map(|key| match key {
                    Key::Letter(ch) => match letters.get(*ch) {
                        Some(state) => format!("{ch}{state}"),
                        None => format!("{ch} "),
                    },
                    key => key.to_string(),
                })
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn render_status(game: &Game) -> String {
    match game.phase() {
        GamePhase::Playing => match game.attempts_remaining() {
            1 => "last guess!".to_owned(),
            remaining => format!("{remaining} guesses left"),
        },
        GamePhase::Won => format!("solved in {}!", game.guesses().count()),
        GamePhase::Lost => format!("the word was {}", game.secret()),
    }
}

fn render_reveal(reveal: &Reveal) -> String {
    let mut lines = vec![reveal.word.to_string()];

    match &reveal.lookup {
        Lookup::Found(bundle) => {
            if let Some(transcription) = &bundle.transcription {
                lines.push(transcription.clone());
            }

            if let Some(audio_url) = &bundle.audio_url {
                lines.push(format!("listen: {audio_url}"));
            }

            lines.extend(
                bundle
                    .definitions
                    .iter()
                    .enumerate()
                    .map(|(i, def)| {
                        format!("{}. ({}) {}", i + 1, def.part_of_speech, def.definition)
                    }),
            );
        }
        Lookup::Missing(_) => lines.push("No definitions found.".to_owned()),
    }

    lines.join("\n")
}
