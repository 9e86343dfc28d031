//! # game2048
//!
//! This library provides the core game logic for the 2048 sliding-tile puzzle
//! on a square grid of any size, with a configurable winning tile and optional
//! undo.
//!
//! It is used by the `human_player` binary, which plays the game on the
//! command line. Any other front end drives the same `Session` API: send it
//! swipes and undo requests, then read the grid, score and win/lose flags back.
//!
//! ## Modules
//! - `grid`: The tile grid (`Grid`), swipe directions (`Direction`), rotation,
//!   and the single-line slide/merge transform all directions reduce to.
//! - `engine`: Game state (`GameState`) and the engine (`GridEngine`) that applies
//!   swipes, spawns tiles, keeps score and detects win and loss.
//! - `history`: The undo stack (`HistoryManager`).
//! - `config`: Validated start-up configuration (`GameConfig`).
//! - `session`: The command/query facade (`Session`) front ends talk to.
//! - `error`: Configuration and parsing errors.
//! - `utils`: Helpers such as parsing a grid from rows of text.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod session;
pub mod utils;
