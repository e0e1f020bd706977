use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand_core::RngCore;
use tracing::debug;

use crate::core::game::{Context, Game};
use crate::core::renderer::GameRenderer;
use crate::games::hangman::renderer::HangmanRenderer;
use crate::games::hangman::round::{GuessOutcome, Outcome, RoundEngine, RoundState};

/// Letters of the on-screen keyboard, in display order
pub const KEYS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Keys per on-screen keyboard row
pub const KEYS_PER_ROW: usize = 13;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Contents of the end-of-round dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub title: String,
    pub description: String,
    pub is_win: bool,
}

impl RoundResult {
    fn for_round(round: &RoundState) -> Option<Self> {
        match round.outcome() {
            Outcome::InProgress => None,
            Outcome::Won => Some(Self {
                title: "Congratulations!".to_string(),
                description: format!(
                    "You won! The word was \"{}\". Let's play another round!",
                    round.word()
                ),
                is_win: true,
            }),
            Outcome::Lost => Some(Self {
                title: "Game Over".to_string(),
                description: format!(
                    "The word was \"{}\". Better luck next time!",
                    round.word()
                ),
                is_win: false,
            }),
        }
    }
}

/// Terminal front end for a [`RoundEngine`]: key wiring, keyboard cursor,
/// result dialog and the optional auto-advance timer
pub struct HangmanGame<R> {
    engine: RoundEngine<R>,
    cursor: usize,
    message: String,
    auto_advance: Option<Duration>,
    // Time since the first tick that saw the round over
    finished_for: Option<Duration>,
}

impl<R: RngCore> HangmanGame<R> {
    pub fn new(engine: RoundEngine<R>, auto_advance: Option<Duration>) -> Self {
        Self {
            engine,
            cursor: 0,
            message: welcome_message(),
            auto_advance,
            finished_for: None,
        }
    }

    pub fn engine(&self) -> &RoundEngine<R> {
        &self.engine
    }

    pub fn round(&self) -> &RoundState {
        self.engine.round()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    /// Index into [`KEYS`] of the highlighted key
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Dialog to show, present once the round is over
    pub fn result(&self) -> Option<RoundResult> {
        RoundResult::for_round(self.engine.round())
    }

    /// Start a fresh round, e.g. from the "New Word" shortcut or "Play Again"
    pub fn new_round(&mut self) {
        self.engine.start_round();
        self.finished_for = None;
        self.message = welcome_message();
    }

    /// Install a specific round, resetting the auto-advance timer
    pub fn replace_round(&mut self, round: RoundState) {
        self.engine.replace_round(round);
        self.finished_for = None;
        self.message = welcome_message();
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let letter = letter.to_ascii_uppercase();
        let outcome = self.engine.guess(letter);
        match outcome {
            GuessOutcome::Ignored => {}
            GuessOutcome::Correct => {
                self.message = format!("Good guess! '{}' is in the word.", letter);
            }
            GuessOutcome::Wrong => {
                self.message = format!("Sorry, '{}' is not in the word.", letter);
            }
            GuessOutcome::Won => {
                self.message = format!("You won! The word was '{}'.", self.round().word());
            }
            GuessOutcome::Lost => {
                self.message = format!("Game over! The word was '{}'.", self.round().word());
            }
        }
        outcome
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let len = KEYS.len();
        self.cursor = match code {
            KeyCode::Left => (self.cursor + len - 1) % len,
            KeyCode::Right => (self.cursor + 1) % len,
            KeyCode::Up | KeyCode::Down => (self.cursor + KEYS_PER_ROW) % len,
            _ => self.cursor,
        };
    }
}

impl<R: RngCore> Game for HangmanGame<R> {
    fn tick_rate(&self) -> Option<Duration> {
        self.auto_advance.map(|_| TICK_RATE)
    }

    fn on_tick(&mut self, dt: Duration, _ctx: &Context) {
        let Some(delay) = self.auto_advance else {
            return;
        };
        if !self.round().is_over() {
            self.finished_for = None;
            return;
        }
        // `dt` on the first tick after the round ended may span time spent
        // playing, so the countdown starts from zero there
        let elapsed = match self.finished_for {
            None => Duration::ZERO,
            Some(elapsed) => elapsed + dt,
        };
        self.finished_for = Some(elapsed);
        if elapsed >= delay {
            debug!(?delay, "auto-advancing to next round");
            self.new_round();
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &Context) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => ctx.quit(),
            KeyCode::Char('n') if ctrl => self.new_round(),
            KeyCode::F(2) => self.new_round(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.round().is_over() {
                    self.new_round();
                } else {
                    self.guess(KEYS[self.cursor]);
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.move_cursor(key.code)
            }
            KeyCode::Char(c) if !ctrl && c.is_ascii_alphabetic() => {
                self.guess(c);
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        HangmanRenderer::render(frame, self);
    }
}

fn welcome_message() -> String {
    "Type a letter, or pick one with the arrows and Enter.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::EngineCommand;
    use crate::games::hangman::word_bank::{Category, WordBank};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    fn game_with_word(word: &str, auto_advance: Option<Duration>) -> HangmanGame<StdRng> {
        let engine = RoundEngine::new(WordBank::default(), StdRng::seed_from_u64(1));
        let mut game = HangmanGame::new(engine, auto_advance);
        game.replace_round(RoundState::new(Category::new("animals"), word).unwrap());
        game
    }

    fn ctx() -> (Context, mpsc::UnboundedReceiver<EngineCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Context::new(tx), rx)
    }

    fn press(game: &mut HangmanGame<StdRng>, ctx: &Context, code: KeyCode) {
        game.handle_key(KeyEvent::new(code, KeyModifiers::NONE), ctx);
    }

    #[test]
    fn typed_letters_are_guessed_case_insensitively() {
        let mut game = game_with_word("CAT", None);
        let (ctx, _rx) = ctx();

        press(&mut game, &ctx, KeyCode::Char('c'));
        press(&mut game, &ctx, KeyCode::Char('X'));

        assert!(game.round().correct().contains(&'C'));
        assert!(game.round().wrong().contains(&'X'));
        assert_eq!(game.message(), "Sorry, 'X' is not in the word.");
    }

    #[test]
    fn enter_guesses_letter_under_cursor() {
        let mut game = game_with_word("CAT", None);
        let (ctx, _rx) = ctx();

        // A is at index 0; one step right is B, one row down from B is O
        press(&mut game, &ctx, KeyCode::Enter);
        press(&mut game, &ctx, KeyCode::Right);
        press(&mut game, &ctx, KeyCode::Down);
        assert_eq!(KEYS[game.cursor()], 'O');
        press(&mut game, &ctx, KeyCode::Char(' '));

        assert!(game.round().correct().contains(&'A'));
        assert!(game.round().wrong().contains(&'O'));
    }

    #[test]
    fn cursor_wraps_around_the_keyboard() {
        let mut game = game_with_word("CAT", None);
        let (ctx, _rx) = ctx();

        press(&mut game, &ctx, KeyCode::Left);
        assert_eq!(KEYS[game.cursor()], 'Z');
        press(&mut game, &ctx, KeyCode::Up);
        assert_eq!(KEYS[game.cursor()], 'M');
    }

    #[test]
    fn win_shows_dialog_and_enter_plays_again() {
        let mut game = game_with_word("OX", None);
        let (ctx, _rx) = ctx();

        press(&mut game, &ctx, KeyCode::Char('o'));
        press(&mut game, &ctx, KeyCode::Char('x'));

        let result = game.result().unwrap();
        assert!(result.is_win);
        assert_eq!(
            result.description,
            "You won! The word was \"OX\". Let's play another round!"
        );
        assert_eq!(game.score(), 1);

        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(game.round().outcome(), Outcome::InProgress);
        assert!(game.round().guessed().is_empty());
        assert!(game.result().is_none());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn loss_dialog_names_the_word() {
        let mut game = game_with_word("DOG", None);
        let (ctx, _rx) = ctx();
        for c in ['x', 'q', 'z', 'v', 'j'] {
            press(&mut game, &ctx, KeyCode::Char(c));
        }

        let result = game.result().unwrap();
        assert!(!result.is_win);
        assert_eq!(result.title, "Game Over");
        assert_eq!(result.description, "The word was \"DOG\". Better luck next time!");
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn new_word_shortcuts_restart_mid_round() {
        let mut game = game_with_word("CAT", None);
        let (ctx, _rx) = ctx();
        press(&mut game, &ctx, KeyCode::Char('q'));

        game.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL), &ctx);
        assert!(game.round().guessed().is_empty());

        press(&mut game, &ctx, KeyCode::Char('q'));
        press(&mut game, &ctx, KeyCode::F(2));
        assert!(game.round().guessed().is_empty());
    }

    #[test]
    fn ctrl_c_requests_quit() {
        let mut game = game_with_word("CAT", None);
        let (ctx, mut rx) = ctx();

        game.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &ctx);

        assert_eq!(rx.try_recv().ok(), Some(EngineCommand::Quit));
        assert!(game.round().guessed().is_empty());
    }

    #[test]
    fn auto_advance_waits_for_delay_after_round_ends() {
        let delay = Duration::from_millis(300);
        let mut game = game_with_word("OX", Some(delay));
        let (ctx, _rx) = ctx();
        assert_eq!(game.tick_rate(), Some(TICK_RATE));

        // Ticks before the round ends do not count towards the delay
        game.on_tick(Duration::from_secs(5), &ctx);
        press(&mut game, &ctx, KeyCode::Char('o'));
        press(&mut game, &ctx, KeyCode::Char('x'));

        game.on_tick(TICK_RATE, &ctx);
        game.on_tick(Duration::from_millis(200), &ctx);
        assert_eq!(game.round().outcome(), Outcome::Won);

        game.on_tick(Duration::from_millis(100), &ctx);
        assert_eq!(game.round().outcome(), Outcome::InProgress);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn long_tick_spanning_the_round_end_keeps_dialog_up() {
        let delay = Duration::from_secs(3);
        let mut game = game_with_word("OX", Some(delay));
        let (ctx, _rx) = ctx();

        press(&mut game, &ctx, KeyCode::Char('o'));
        press(&mut game, &ctx, KeyCode::Char('x'));

        // Key presses starved the ticks; the first one reports a long gap
        game.on_tick(Duration::from_secs(5), &ctx);
        assert_eq!(game.round().outcome(), Outcome::Won);
        assert!(game.result().is_some());

        game.on_tick(Duration::from_millis(2900), &ctx);
        assert_eq!(game.round().outcome(), Outcome::Won);

        game.on_tick(Duration::from_millis(100), &ctx);
        assert_eq!(game.round().outcome(), Outcome::InProgress);
    }

    #[test]
    fn manual_new_round_resets_countdown() {
        let delay = Duration::from_millis(300);
        let mut game = game_with_word("OX", Some(delay));
        let (ctx, _rx) = ctx();

        press(&mut game, &ctx, KeyCode::Char('o'));
        press(&mut game, &ctx, KeyCode::Char('x'));
        game.on_tick(TICK_RATE, &ctx);
        game.on_tick(Duration::from_millis(250), &ctx);

        game.replace_round(RoundState::new(Category::new("animals"), "OX").unwrap());
        press(&mut game, &ctx, KeyCode::Char('o'));
        press(&mut game, &ctx, KeyCode::Char('x'));
        game.on_tick(TICK_RATE, &ctx);
        game.on_tick(Duration::from_millis(100), &ctx);
        assert_eq!(game.round().outcome(), Outcome::Won);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn without_auto_advance_there_are_no_ticks() {
        let game = game_with_word("OX", None);
        assert_eq!(game.tick_rate(), None);
    }
}
