/// Hangman game module: engine, terminal front end and renderer
pub mod game;
pub mod renderer;
pub mod round;
pub mod word_bank;

pub use game::{HangmanGame, RoundResult};
pub use renderer::HangmanRenderer;
pub use round::{GuessOutcome, Outcome, RoundEngine, RoundState, Session, MAX_MISTAKES};
pub use word_bank::{Category, WordBank, WordBankError};
