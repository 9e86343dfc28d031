//! Start-up configuration for a game.
//!
//! Everything the engine assumes about its inputs is checked here, before a
//! game is ever constructed.
use crate::error::ConfigError;
use crate::grid::{Tile, MAX_TILE};

/// Grid size offered when the player does not choose one.
pub const DEFAULT_SIZE: usize = 5;

/// Winning tile offered when the player does not choose one.
pub const DEFAULT_TARGET_SCORE: Tile = 2048;

/// Smallest grid the rules make sense on.
pub const MIN_SIZE: usize = 2;

/// A validated game configuration.
///
/// # Examples
/// ```
/// use game2048::config::GameConfig;
/// use game2048::error::ConfigError;
///
/// let config = GameConfig::new(4, 2048, true).unwrap();
/// assert_eq!(config.size(), 4);
///
/// assert_eq!(GameConfig::new(1, 2048, true), Err(ConfigError::GridTooSmall(1)));
/// assert_eq!(GameConfig::new(4, 1000, true), Err(ConfigError::TargetNotPowerOfTwo(1000)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    size: usize,
    target_score: Tile,
    undo_enabled: bool,
}

impl GameConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    /// - `GridTooSmall` if `size < 2`.
    /// - `TargetNotPowerOfTwo` if `target_score` is zero or not a power of two.
    /// - `TargetUnreachable` if `target_score` is below 4, the smallest merge result.
    /// - `TargetTooLarge` if `target_score` is above `MAX_TILE`.
    pub fn new(size: usize, target_score: Tile, undo_enabled: bool) -> Result<Self, ConfigError> {
        if size < MIN_SIZE {
            return Err(ConfigError::GridTooSmall(size));
        }
        if !target_score.is_power_of_two() {
            return Err(ConfigError::TargetNotPowerOfTwo(target_score));
        }
        if target_score < 4 {
            return Err(ConfigError::TargetUnreachable(target_score));
        }
        if target_score > MAX_TILE {
            return Err(ConfigError::TargetTooLarge {
                value: target_score,
                max: MAX_TILE,
            });
        }
        Ok(GameConfig {
            size,
            target_score,
            undo_enabled,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn target_score(&self) -> Tile {
        self.target_score
    }

    pub fn undo_enabled(&self) -> bool {
        self.undo_enabled
    }
}

impl Default for GameConfig {
    /// 5x5 grid, 2048 to win, undo on.
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_SIZE,
            target_score: DEFAULT_TARGET_SCORE,
            undo_enabled: true,
        }
    }
}
