//! Round state machine for Hangman.
//!
//! A [`RoundState`] tracks one word from selection until it is won or lost.
//! [`RoundEngine`] owns the active round together with the session score and
//! the random source used to pick words, and replaces the round wholesale on
//! every [`RoundEngine::start_round`].

use std::collections::BTreeSet;

use rand::Rng;
use rand_core::RngCore;
use tracing::{debug, info};

use super::word_bank::{normalize_word, Category, WordBank, WordBankError};

/// Wrong guesses allowed before the round is lost
pub const MAX_MISTAKES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

/// What a single call to `guess` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Repeated letter, non-letter input, or the round is already over
    Ignored,
    Correct,
    Wrong,
    Won,
    Lost,
}

/// Score carried across rounds for the lifetime of the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    score: u32,
}

impl Session {
    pub fn score(&self) -> u32 {
        self.score
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    category: Category,
    word: String,
    guessed: BTreeSet<char>,
    correct: BTreeSet<char>,
    wrong: BTreeSet<char>,
    outcome: Outcome,
}

impl RoundState {
    /// Fresh round for a known word.
    ///
    /// `word` is trimmed and uppercased, and must be a non-empty run of A-Z
    /// so that every round can be won.
    pub fn new(category: Category, word: &str) -> Result<Self, WordBankError> {
        let word = normalize_word(category.as_str(), word)?;
        Ok(Self::fresh(category, word))
    }

    fn fresh(category: Category, word: String) -> Self {
        Self {
            category,
            word,
            guessed: BTreeSet::new(),
            correct: BTreeSet::new(),
            wrong: BTreeSet::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Pick a category, then a word within it, uniformly at random
    pub fn random<R: RngCore>(bank: &WordBank, rng: &mut R) -> Self {
        let (category, words) = bank.entry(rng.random_range(0..bank.category_count()));
        // Bank words are already validated
        let word = words[rng.random_range(0..words.len())].clone();
        Self::fresh(category.clone(), word)
    }

    /// Apply one guess, crediting `session` on a win.
    ///
    /// Lowercase ASCII letters are uppercased; anything else outside A-Z is
    /// ignored, as are repeats and guesses after the round has ended.
    pub fn guess(&mut self, letter: char, session: &mut Session) -> GuessOutcome {
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() || self.is_over() || self.guessed.contains(&letter) {
            return GuessOutcome::Ignored;
        }

        self.guessed.insert(letter);

        if self.word.contains(letter) {
            self.correct.insert(letter);
            if self.word.chars().all(|c| self.correct.contains(&c)) {
                self.outcome = Outcome::Won;
                session.score += 1;
                return GuessOutcome::Won;
            }
            GuessOutcome::Correct
        } else {
            self.wrong.insert(letter);
            if self.wrong.len() >= MAX_MISTAKES {
                self.outcome = Outcome::Lost;
                return GuessOutcome::Lost;
            }
            GuessOutcome::Wrong
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn correct(&self) -> &BTreeSet<char> {
        &self.correct
    }

    pub fn wrong(&self) -> &BTreeSet<char> {
        &self.wrong
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    pub fn remaining_chances(&self) -> usize {
        MAX_MISTAKES.saturating_sub(self.wrong.len())
    }

    /// One entry per letter of the word, `Some` once that letter was guessed
    pub fn masked_word(&self) -> Vec<Option<char>> {
        self.word
            .chars()
            .map(|c| self.guessed.contains(&c).then_some(c))
            .collect()
    }

    /// Masked word as text, e.g. `C _ T`
    pub fn masked_display(&self) -> String {
        self.masked_word()
            .into_iter()
            .map(|c| c.unwrap_or('_').to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Owns the word bank, the random source, the session and the active round
pub struct RoundEngine<R> {
    bank: WordBank,
    rng: R,
    session: Session,
    round: RoundState,
}

impl<R: RngCore> RoundEngine<R> {
    /// Create an engine with its first round already started
    pub fn new(bank: WordBank, mut rng: R) -> Self {
        let round = RoundState::random(&bank, &mut rng);
        log_round_start(&round);
        Self {
            bank,
            rng,
            session: Session::default(),
            round,
        }
    }

    /// Discard the active round and start a new one
    pub fn start_round(&mut self) -> &RoundState {
        self.round = RoundState::random(&self.bank, &mut self.rng);
        log_round_start(&self.round);
        &self.round
    }

    /// Install a specific round as the active one
    pub fn replace_round(&mut self, round: RoundState) -> &RoundState {
        self.round = round;
        log_round_start(&self.round);
        &self.round
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let result = self.round.guess(letter, &mut self.session);
        match result {
            GuessOutcome::Ignored => debug!(?letter, "guess ignored"),
            GuessOutcome::Correct | GuessOutcome::Wrong => {
                debug!(?letter, ?result, remaining = self.round.remaining_chances(), "guess evaluated")
            }
            GuessOutcome::Won => {
                info!(word = %self.round.word, score = self.session.score, "round won")
            }
            GuessOutcome::Lost => {
                info!(word = %self.round.word, score = self.session.score, "round lost")
            }
        }
        result
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }
}

fn log_round_start(round: &RoundState) {
    info!(category = %round.category, len = round.word.len(), "round started");
    debug!(word = %round.word, "secret word");
}
