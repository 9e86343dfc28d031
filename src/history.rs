//! Undo history: a LIFO stack of `GameState` snapshots.
use crate::engine::GameState;

/// Stack of states captured right before each accepted move.
///
/// Snapshots are plain values; popping one hands it back to the caller, who
/// installs it into the engine. The history never touches the engine itself.
#[derive(Clone, Debug, Default)]
pub struct HistoryManager {
    snapshots: Vec<GameState>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a copy of `state`. Call this only for moves that change the grid.
    ///
    /// # Arguments
    /// * `state`: The live state as it was before the move was applied.
    pub fn record_before_move(&mut self, state: &GameState) {
        self.snapshots.push(state.clone());
    }

    /// Pops the most recent snapshot.
    ///
    /// # Returns
    /// The state captured before the last recorded move, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<GameState> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
