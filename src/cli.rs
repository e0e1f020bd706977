use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::core::engine::Engine;
use crate::core::logging;
use crate::games::hangman::{HangmanGame, RoundEngine, WordBank};

#[derive(Parser, Debug)]
#[command(name = "hangman")]
#[command(about = "Guess the word before the gallows is complete")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load the word bank from a JSON file, e.g. {"animals": ["CAT", "DOG"]}
    #[arg(short, long, global = true, value_name = "FILE")]
    pub words: Option<PathBuf>,

    /// Seed the random word selection
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Start a new round this many milliseconds after a win or loss
    #[arg(long, global = true, value_name = "MS")]
    pub auto_advance_ms: Option<u64>,

    /// Log file (default: hangman.log in the system temp directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Play in the terminal (default)
    Play,
    /// List the word bank's categories and word counts
    Categories,
}

/// Settings resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub words: Option<PathBuf>,
    pub seed: Option<u64>,
    pub auto_advance: Option<Duration>,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            words: cli.words.clone(),
            seed: cli.seed,
            auto_advance: cli.auto_advance_ms.map(Duration::from_millis),
            log_file: cli
                .log_file
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join("hangman.log")),
        }
    }

    /// The configured word file, or the built-in bank
    pub fn word_bank(&self) -> Result<WordBank> {
        match &self.words {
            Some(path) => WordBank::load(path),
            None => Ok(WordBank::default()),
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(config).await,
        Commands::Categories => {
            let bank = config.word_bank()?;
            write_categories(&bank, &mut io::stdout().lock())?;
            Ok(())
        }
    }
}

/// One line per category: name and number of words
pub fn write_categories(bank: &WordBank, out: &mut impl Write) -> io::Result<()> {
    for category in bank.categories() {
        let count = bank.words(category).map_or(0, <[String]>::len);
        writeln!(out, "{category} ({count} words)")?;
    }
    Ok(())
}

async fn play(config: AppConfig) -> Result<()> {
    logging::init(&config.log_file)?;
    info!(?config, "starting hangman");

    let bank = config.word_bank()?;
    let engine = RoundEngine::new(bank, config.rng());
    let game = HangmanGame::new(engine, config.auto_advance);

    let mut terminal = ratatui::init();
    let result = Engine::new(game).run(&mut terminal).await;
    if let Err(e) = ratatui::try_restore() {
        warn!(error = %e, "failed to restore terminal");
    }

    let game = result?;
    info!(score = game.score(), "session finished");
    println!("Thanks for playing! Final score: {}", game.score());
    Ok(())
}
