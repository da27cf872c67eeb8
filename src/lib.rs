//! Simulation core and terminal presentation for a grid-based snake game.
//!
//! The core (`config`, `input`, `snake`, `obstacle`, `food`, `level`, `game`)
//! is a deterministic tick-based state machine with no I/O of its own. The
//! presentation modules (`renderer`, `ui`) are read-only consumers of the
//! [`game::GameSession`] snapshot and own nothing the core depends on.

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod level;
pub mod obstacle;
pub mod renderer;
pub mod snake;
pub mod ui;
