//! Command/query facade a presentation layer drives.
//!
//! A `Session` owns one `GridEngine`, the optional undo history, and the
//! "win already announced" flag. Front ends send it commands (`apply_move`,
//! `undo`, `acknowledge_win_and_continue`, `restart`) and poll its queries
//! after each one to redraw.
use crate::config::GameConfig;
use crate::engine::{GameState, GridEngine, MoveOutcome};
use crate::grid::{Direction, Grid, Tile};
use crate::history::HistoryManager;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// One player's game, from start screen to restart.
///
/// # Examples
/// ```
/// use game2048::config::GameConfig;
/// use game2048::grid::Direction;
/// use game2048::session::Session;
///
/// let config = GameConfig::new(4, 2048, true).unwrap();
/// let mut session = Session::with_seed(config, 1);
///
/// let start = session.state().clone();
/// if session.apply_move(Direction::Up).changed {
///     assert!(session.undo());
///     assert_eq!(session.state(), &start);
/// }
/// assert!(!session.undo());
/// ```
#[derive(Clone, Debug)]
pub struct Session<R = SmallRng> {
    config: GameConfig,
    engine: GridEngine<R>,
    history: Option<HistoryManager>,
    win_acknowledged: bool,
}

impl Session<SmallRng> {
    /// Starts a reproducible game.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    /// Starts a game seeded from the operating system.
    pub fn from_entropy(config: GameConfig) -> Self {
        Self::new(config, SmallRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    /// Starts a new game with `config`.
    ///
    /// # Arguments
    /// * `config`: Validated grid size, target and undo setting.
    /// * `rng`: Source of randomness for every spawn, kept across restarts.
    ///
    /// # Returns
    /// A `Session` with two spawned tiles and an empty undo history.
    pub fn new(config: GameConfig, rng: R) -> Self {
        info!(
            size = config.size(),
            target_score = config.target_score(),
            undo = config.undo_enabled(),
            "new game"
        );
        Session {
            engine: GridEngine::new(config.size(), config.target_score(), rng),
            history: config.undo_enabled().then(HistoryManager::new),
            win_acknowledged: false,
            config,
        }
    }

    /// Replaces the configuration and starts over, keeping the random source.
    pub fn new_game(&mut self, config: GameConfig) {
        info!(
            size = config.size(),
            target_score = config.target_score(),
            undo = config.undo_enabled(),
            "new game"
        );
        self.config = config;
        self.history = config.undo_enabled().then(HistoryManager::new);
        self.reset();
    }

    /// Starts over with the current configuration.
    ///
    /// Score, flags, undo history and the win acknowledgement are all reset.
    pub fn restart(&mut self) {
        info!(score = self.engine.score(), "restart");
        self.reset();
    }

    fn reset(&mut self) {
        self.engine
            .reset(self.config.size(), self.config.target_score());
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
        self.win_acknowledged = false;
    }

    /// Swipes in `direction`.
    ///
    /// Ignored once the game is lost. With undo enabled, the state before the
    /// swipe is recorded only if the swipe changed the grid.
    ///
    /// # Arguments
    /// * `direction`: The direction every tile slides towards.
    ///
    /// # Returns
    /// The engine's `MoveOutcome`, or `MoveOutcome::unchanged()` when the game
    /// is already lost.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.engine.is_lost() {
            debug!(?direction, "move ignored, game is lost");
            return MoveOutcome::unchanged();
        }

        let snapshot = self.history.as_ref().map(|_| self.engine.state().clone());
        let outcome = self.engine.apply_move(direction);
        if outcome.changed {
            if let (Some(history), Some(snapshot)) = (self.history.as_mut(), snapshot) {
                history.record_before_move(&snapshot);
            }
        }
        outcome
    }

    /// Restores the state before the last accepted move.
    ///
    /// Works on a lost game too.
    ///
    /// # Returns
    /// `true` if a snapshot was restored; `false` when undo is disabled or
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.as_mut().and_then(HistoryManager::undo) {
            Some(state) => {
                debug!(score = state.score, "undo");
                self.engine.install(state);
                true
            }
            None => false,
        }
    }

    /// Lets the player keep going after reaching the target.
    ///
    /// Clears the `won` flag and remembers that the win was announced, so
    /// `win_pending` stays false until the next restart.
    pub fn acknowledge_win_and_continue(&mut self) {
        if self.engine.is_won() {
            info!(score = self.engine.score(), "continuing past target");
            self.engine.clear_won();
            self.win_acknowledged = true;
        }
    }

    /// True when the target was reached and the player has not been asked yet.
    pub fn win_pending(&self) -> bool {
        self.engine.is_won() && !self.win_acknowledged
    }

    /// Every cell as `(x, y, value)`, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.engine.grid().tiles()
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn score(&self) -> u64 {
        self.engine.score()
    }

    pub fn is_won(&self) -> bool {
        self.engine.is_won()
    }

    pub fn is_lost(&self) -> bool {
        self.engine.is_lost()
    }

    pub fn can_move(&self) -> bool {
        self.engine.can_move()
    }

    /// Number of moves that can currently be undone; always 0 with undo off.
    pub fn undo_depth(&self) -> usize {
        self.history.as_ref().map_or(0, HistoryManager::len)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_from_str_array;

    fn session_on(rows: &[&str], target: Tile, undo: bool) -> Session {
        let config = GameConfig::new(rows.len(), target, undo).unwrap();
        let mut session = Session::with_seed(config, 5);
        let grid = grid_from_str_array(rows).unwrap();
        session.engine.install(GameState::from_grid(grid, target));
        session
    }

    // Cycles through the directions until `moves` of them changed the grid.
    fn play(session: &mut Session, moves: usize) -> usize {
        let mut accepted = 0;
        let mut attempts = 0;
        while accepted < moves && !session.is_lost() && attempts < 1_000 {
            let direction = Direction::ALL[attempts % 4];
            if session.apply_move(direction).changed {
                accepted += 1;
            }
            attempts += 1;
        }
        accepted
    }

    #[test]
    fn test_new_session() {
        let session = Session::with_seed(GameConfig::default(), 3);
        assert_eq!(session.grid().size(), 5);
        assert_eq!(session.tiles().filter(|&(_, _, v)| v != 0).count(), 2);
        assert_eq!(session.score(), 0);
        assert!(!session.is_won());
        assert!(!session.is_lost());
        assert!(session.can_move());
        assert_eq!(session.undo_depth(), 0);
    }

    #[test]
    fn test_undo_round_trip() {
        let config = GameConfig::new(4, 2048, true).unwrap();
        let mut session = Session::with_seed(config, 11);
        let start = session.state().clone();

        let accepted = play(&mut session, 10);
        assert!(accepted > 0);
        assert_eq!(session.undo_depth(), accepted);

        for _ in 0..accepted {
            assert!(session.undo());
        }
        assert_eq!(session.state(), &start);
        assert!(!session.undo(), "undo must not go before the first move");
        assert_eq!(session.state(), &start);
    }

    #[test]
    fn test_undo_restores_previous_move_exactly() {
        let mut session = session_on(&["2 2 . .", ". . . .", ". . . .", ". . . ."], 2048, true);
        let before = session.state().clone();
        assert!(session.apply_move(Direction::Left).changed);
        assert_eq!(session.score(), 4);

        assert!(session.undo());
        assert_eq!(session.state(), &before);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_noop_move_is_not_recorded() {
        let mut session = session_on(&["2 . .", "4 . .", ". . ."], 2048, true);
        let outcome = session.apply_move(Direction::Left);
        assert!(!outcome.changed);
        assert_eq!(session.undo_depth(), 0);
        assert!(!session.undo());
    }

    #[test]
    fn test_undo_disabled() {
        let mut session = session_on(&["2 2 . .", ". . . .", ". . . .", ". . . ."], 2048, false);
        assert!(session.apply_move(Direction::Left).changed);
        let after = session.state().clone();
        assert!(!session.undo());
        assert_eq!(session.state(), &after);
        assert_eq!(session.undo_depth(), 0);
    }

    #[test]
    fn test_lost_game_ignores_moves_but_allows_undo() {
        let mut session = session_on(&["2 4 8", "16 8 2", "32 . 64"], 2048, true);
        assert!(session.apply_move(Direction::Right).changed);
        assert!(session.is_lost());
        assert!(!session.can_move());

        let locked = session.state().clone();
        for direction in Direction::ALL {
            assert_eq!(session.apply_move(direction), MoveOutcome::unchanged());
        }
        assert_eq!(session.state(), &locked);

        assert!(session.undo());
        assert!(!session.is_lost());
        assert_eq!(session.grid().get(0, 2), 32);
    }

    #[test]
    fn test_win_acknowledgement() {
        let mut session = session_on(&["1024 1024", ". ."], 2048, true);
        session.apply_move(Direction::Left);
        assert!(session.is_won());
        assert!(session.win_pending());

        session.acknowledge_win_and_continue();
        assert!(!session.is_won());
        assert!(!session.win_pending());
        assert_eq!(session.grid().get(0, 0), 2048);
    }

    #[test]
    fn test_acknowledge_without_win_is_noop() {
        let mut session = session_on(&["2 2", ". ."], 2048, true);
        session.acknowledge_win_and_continue();
        assert!(!session.win_acknowledged);
    }

    #[test]
    fn test_restart_clears_history_and_acknowledgement() {
        let mut session = session_on(&["1024 1024", ". ."], 2048, true);
        session.apply_move(Direction::Left);
        session.acknowledge_win_and_continue();
        assert_eq!(session.undo_depth(), 1);

        session.restart();
        assert_eq!(session.undo_depth(), 0);
        assert!(!session.win_acknowledged);
        assert_eq!(session.score(), 0);
        assert_eq!(session.tiles().filter(|&(_, _, v)| v != 0).count(), 2);
        assert!(!session.undo());
    }

    #[test]
    fn test_new_game_switches_config() {
        let mut session = Session::with_seed(GameConfig::new(4, 2048, true).unwrap(), 8);
        play(&mut session, 3);

        session.new_game(GameConfig::new(3, 256, false).unwrap());
        assert_eq!(session.grid().size(), 3);
        assert_eq!(session.state().target_score, 256);
        assert_eq!(session.config().target_score(), 256);
        assert_eq!(session.score(), 0);
        play(&mut session, 2);
        assert!(!session.undo());
    }
}
