/// Core game interface: the seam between the terminal engine and a game
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Requests a game can make of the engine driving it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Quit,
}

/// Handle passed to every game callback
#[derive(Clone)]
pub struct Context {
    pub(crate) tx: UnboundedSender<EngineCommand>,
}

impl Context {
    pub fn new(tx: UnboundedSender<EngineCommand>) -> Self {
        Self { tx }
    }

    /// Ask the engine to leave its loop after the current event
    pub fn quit(&self) {
        if self.tx.send(EngineCommand::Quit).is_err() {
            debug!("engine already stopped");
        }
    }
}

/// Main game trait driven by [`crate::core::engine::Engine`]
pub trait Game {
    /// How often `on_tick` should run. `None` disables ticks.
    fn tick_rate(&self) -> Option<Duration>;

    fn on_tick(&mut self, dt: Duration, ctx: &Context);

    fn handle_key(&mut self, key: KeyEvent, ctx: &Context);

    fn render(&self, frame: &mut ratatui::Frame);
}
