use std::path::PathBuf;

use tracing::info;

use crate::{
    config::Config,
    datamuse::Datamuse,
    dictionary::Dictionary,
    games::wordle::Session,
    play, server,
    words::{GuessValidator, WordSource},
};

#[derive(clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// TOML config file. Defaults to `WORDLE_WEB_TOML`, then `./wordle-web.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Serve the JSON API.
    #[default]
    Serve,

    /// Play a round in the terminal.
    Play,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }
}

pub async fn run(command: Command, config: Config) -> crate::Result<()> {
    let datamuse = Datamuse::new(config.datamuse.base_url.clone());
    let dictionary = Dictionary::new(config.dictionary.base_url.clone());

    let source = WordSource::new(datamuse.clone())
        .excluded_tags(config.datamuse.excluded_tags.clone())
        .max_candidates(config.datamuse.max_candidates)
        .max_attempts(config.game.max_word_attempts);
    let validator = GuessValidator::new(datamuse);

    match command {
        Command::Serve => {
            let router = server::router(server::AppState::new(source, validator, dictionary));
            server::serve(config.server.address, router).await
        }
        Command::Play => {
            info!("starting terminal game");
            play::run(Session::new(source, validator, dictionary)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["wordle-web"]).expect("no args is valid");

        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn parse_play_with_config() {
        let cli = Cli::try_parse_from(["wordle-web", "--config", "game.toml", "play"])
            .expect("args are valid");

        assert_eq!(cli.command(), Command::Play);
        assert_eq!(cli.config, Some(PathBuf::from("game.toml")));
    }
}
