//! Core game engine for the 2048 puzzle.
//!
//! This module defines the live game state and the engine that advances it:
//! - `GameState`: grid, score, win/lose flags and the winning tile, as one value.
//! - `GridEngine`: owns the live `GameState` and a random source, applies
//!   swipes, spawns tiles, and detects win and loss.
//!
//! Spawning is the only random step. The engine is generic over `rand::Rng`
//! so tests can drive it from a seeded `SmallRng` and get reproducible games.
use crate::grid::{Direction, Grid, Tile, EMPTY};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Number of tiles placed on a fresh grid.
pub const INITIAL_TILES: usize = 2;

/// Places a 2 (or, with `FOUR_PROBABILITY`, a 4) in a uniformly chosen empty cell.
///
/// Returns the placed `(x, y, value)`, or `None` if the grid is full.
pub fn spawn_into<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<(usize, usize, Tile)> {
    let empties = grid.empty_cells();
    let &(x, y) = empties.choose(rng)?;
    let value = if rng.gen_bool(FOUR_PROBABILITY) { 4 } else { 2 };
    grid.set(x, y, value);
    Some((x, y, value))
}

/// A complete snapshot of one game: everything undo needs to restore.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub grid: Grid,
    pub score: u64,
    /// Set when a merge produced exactly `target_score`.
    pub won: bool,
    /// Set when the grid is full and no neighbours are equal.
    pub lost: bool,
    pub target_score: Tile,
}

impl GameState {
    /// An empty grid with no score and no flags set.
    pub fn new(size: usize, target_score: Tile) -> Self {
        GameState {
            grid: Grid::new(size),
            score: 0,
            won: false,
            lost: false,
            target_score,
        }
    }

    /// Wraps an existing grid, deriving `lost` from it.
    pub fn from_grid(grid: Grid, target_score: Tile) -> Self {
        let lost = !grid.can_move();
        GameState {
            grid,
            score: 0,
            won: false,
            lost,
            target_score,
        }
    }

    /// The state after swiping in `direction`, before any tile is spawned.
    ///
    /// Returns `None` when no row changes, i.e. the swipe is a no-op.
    /// The returned pair holds the new state and the points the swipe earned.
    pub fn after_move(&self, direction: Direction) -> Option<(GameState, u64)> {
        let slide = self.grid.slid(direction, self.target_score);
        if !slide.changed {
            return None;
        }
        let next = GameState {
            grid: slide.grid,
            score: self.score + slide.score_gained,
            won: self.won || slide.reached_target,
            lost: self.lost,
            target_score: self.target_score,
        };
        Some((next, slide.score_gained))
    }
}

/// What a call to `GridEngine::apply_move` did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// False when the swipe left every row as it was.
    pub changed: bool,
    pub score_gained: u64,
    /// The tile placed after the swipe, if any.
    pub spawned: Option<(usize, usize, Tile)>,
}

impl MoveOutcome {
    /// Outcome of a swipe that did nothing.
    pub fn unchanged() -> Self {
        MoveOutcome::default()
    }
}

/// Owns the live `GameState` and applies swipes to it.
///
/// # Examples
/// ```
/// use game2048::engine::GridEngine;
/// use game2048::grid::Direction;
///
/// let mut engine = GridEngine::with_seed(4, 2048, 7);
/// assert_eq!(engine.grid().empty_cells().len(), 14);
///
/// let outcome = engine.apply_move(Direction::Left);
/// if outcome.changed {
///     assert!(outcome.spawned.is_some());
/// }
/// println!("score: {}", engine.score());
/// ```
#[derive(Clone, Debug)]
pub struct GridEngine<R = SmallRng> {
    state: GameState,
    rng: R,
}

impl GridEngine<SmallRng> {
    /// Starts a game driven by a `SmallRng` seeded with `seed`.
    ///
    /// The same seed and the same sequence of swipes always yield the same game.
    pub fn with_seed(size: usize, target_score: Tile, seed: u64) -> Self {
        Self::new(size, target_score, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GridEngine<R> {
    /// Starts a fresh game: empty `size` x `size` grid plus two spawned tiles.
    ///
    /// # Arguments
    /// * `size`: Side length of the grid. Assumed to be at least 2; see `GameConfig`.
    /// * `target_score`: The tile value that wins. Assumed to be a valid power of two.
    /// * `rng`: Source of randomness for every spawn in this game.
    ///
    /// # Returns
    /// A `GridEngine` with a zero score and exactly `INITIAL_TILES` tiles on the grid.
    pub fn new(size: usize, target_score: Tile, rng: R) -> Self {
        let mut engine = GridEngine {
            state: GameState::new(size, target_score),
            rng,
        };
        engine.reset(size, target_score);
        engine
    }

    /// Wraps an existing state without spawning anything.
    pub fn from_state(state: GameState, rng: R) -> Self {
        GridEngine { state, rng }
    }

    /// Discards the current game and starts a new one.
    ///
    /// # Arguments
    /// * `size`: Side length of the new grid.
    /// * `target_score`: The winning tile for the new game.
    ///
    /// The RNG is kept, so a seeded engine keeps producing a reproducible sequence.
    #[instrument(skip(self))]
    pub fn reset(&mut self, size: usize, target_score: Tile) {
        self.state = GameState::new(size, target_score);
        for _ in 0..INITIAL_TILES {
            self.spawn_tile();
        }
        debug!(grid = %self.state.grid, "new grid");
    }

    /// Spawns one tile into a random empty cell. Does nothing on a full grid.
    ///
    /// # Returns
    /// `Some((x, y, value))` for the placed tile, or `None` if no cell was empty.
    pub fn spawn_tile(&mut self) -> Option<(usize, usize, Tile)> {
        let spawned = spawn_into(&mut self.state.grid, &mut self.rng);
        if let Some((x, y, value)) = spawned {
            debug!(x, y, value, "spawned tile");
        }
        spawned
    }

    /// Swipes the grid in `direction`.
    ///
    /// A swipe that changes at least one row adds its merges to the score,
    /// may set `won`, and spawns exactly one tile. A swipe that changes nothing
    /// leaves the state untouched. Either way `lost` is refreshed from the grid.
    ///
    /// # Arguments
    /// * `direction`: The direction every tile slides towards.
    ///
    /// # Returns
    /// A `MoveOutcome` telling whether the grid changed and which tile, if any,
    /// was spawned afterwards.
    #[instrument(skip(self), fields(score = self.state.score))]
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let Some((mut next, score_gained)) = self.state.after_move(direction) else {
            debug!("swipe changed nothing");
            self.state.lost = !self.state.grid.can_move();
            return MoveOutcome::unchanged();
        };

        let spawned = spawn_into(&mut next.grid, &mut self.rng);
        next.lost = !next.grid.can_move();
        if next.won && !self.state.won {
            debug!(target_score = next.target_score, "target reached");
        }
        if next.lost {
            debug!(score = next.score, "no moves left");
        }
        self.state = next;

        MoveOutcome {
            changed: true,
            score_gained,
            spawned,
        }
    }

    /// True if an empty cell exists or two neighbours share a value.
    pub fn can_move(&self) -> bool {
        self.state.grid.can_move()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replaces the live state, e.g. with a snapshot popped from history.
    ///
    /// # Arguments
    /// * `state`: The snapshot to restore. Its grid, score and flags are taken as-is.
    pub fn install(&mut self, state: GameState) {
        self.state = state;
    }

    /// Drops the `won` flag so play can continue past the target.
    pub fn clear_won(&mut self) {
        self.state.won = false;
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn is_won(&self) -> bool {
        self.state.won
    }

    pub fn is_lost(&self) -> bool {
        self.state.lost
    }

    pub fn target_score(&self) -> Tile {
        self.state.target_score
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.state.grid.cells().iter().filter(|&&t| t != EMPTY).count()
    }
}
