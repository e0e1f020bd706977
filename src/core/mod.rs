pub mod engine;
pub mod game;
pub mod logging;
pub mod renderer;  // Pure drawing trait
