//! Error types for configuration validation and grid parsing.
//!
//! Nothing inside the move engine can fail; these errors only surface at the
//! edges, before a game is constructed or while reading a grid from text.

use thiserror::Error;

/// Rejected start-up configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid must be at least 2x2.
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    /// The target must be a positive power of two.
    #[error("target score must be a power of 2, got {0}")]
    TargetNotPowerOfTwo(u32),
    /// The smallest tile a merge can produce is 4.
    #[error("target score {0} can never be produced by a merge")]
    TargetUnreachable(u32),
    /// The target is larger than the biggest supported tile.
    #[error("target score {value} exceeds the largest supported tile {max}")]
    TargetTooLarge { value: u32, max: u32 },
}

/// Failure while parsing a grid from rows of text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("expected at least 2 rows, found {0}")]
    TooFewRows(usize),
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unrecognized token '{token}' in row {row} col {col}")]
    BadToken {
        token: String,
        row: usize,
        col: usize,
    },
    #[error("tile {value} in row {row} col {col} is not a power of 2")]
    NotPowerOfTwo { value: u32, row: usize, col: usize },
    #[error("tile {value} in row {row} col {col} exceeds the largest supported tile {max}")]
    TileTooLarge {
        value: u32,
        max: u32,
        row: usize,
        col: usize,
    },
}
