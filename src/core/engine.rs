use std::time::Instant;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::core::game::{Context, EngineCommand, Game};

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<G> {
        let mut last_tick = Instant::now();
        let mut events = EventStream::new();

        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<EngineCommand>();
        let ctx = Context::new(cmd_tx);

        // One interval for the whole run so key traffic cannot starve ticks
        let mut ticker = self.game.tick_rate().map(|rate| {
            let mut interval = tokio::time::interval(rate);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            terminal.draw(|f| self.game.render(f))?;

            tokio::select! {
                Some(cmd) = cmd_rx.recv() => match cmd {
                    EngineCommand::Quit => break,
                },

                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if key.code == KeyCode::Esc {
                            break;
                        }
                        self.game.handle_key(key, &ctx);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },

                _ = async {
                    match ticker.as_mut() {
                        Some(interval) => { interval.tick().await; }
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    let dt = last_tick.elapsed();
                    last_tick = Instant::now();
                    self.game.on_tick(dt, &ctx);
                }
            }
        }

        info!("engine loop finished");
        Ok(self.game)
    }
}
