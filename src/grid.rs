//! Tile grid and the canonical slide/merge transform.
//!
//! This module defines the value types the engine is built from:
//! - `Tile`: a plain integer, `EMPTY` (0) for a vacant cell.
//! - `Direction`: the four swipe directions and how each one maps onto a left swipe.
//! - `Grid`: a square, row-major buffer of tiles with rotation, the left swipe,
//!   and the adjacency checks used for loss detection.
//!
//! Every direction is reduced to a left swipe: the grid is rotated clockwise by
//! the direction's quarter turns, every row is slid left, and the result is
//! rotated back by the remaining quarter turns.
use std::fmt;

/// A single cell value. Non-empty tiles are powers of two.
pub type Tile = u32;

/// The value stored in a vacant cell.
pub const EMPTY: Tile = 0;

/// Largest tile accepted as input or as a winning target.
///
/// Merging two `MAX_TILE`s still fits in a `Tile`. Anything that would not fit
/// is never merged.
pub const MAX_TILE: Tile = 1 << 30;

/// Swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Number of clockwise quarter turns that bring this direction onto `Left`.
    ///
    /// `Right` is a half turn, never a mirror, so that merges keep happening
    /// from the leading edge of the swipe.
    ///
    /// ```
    /// use game2048::grid::Direction;
    /// assert_eq!(Direction::Left.quarter_turns(), 0);
    /// assert_eq!(Direction::Down.quarter_turns(), 1);
    /// assert_eq!(Direction::Right.quarter_turns(), 2);
    /// assert_eq!(Direction::Up.quarter_turns(), 3);
    /// ```
    pub fn quarter_turns(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    /// Quarter turns that undo `quarter_turns`.
    pub fn inverse_quarter_turns(self) -> u8 {
        (4 - self.quarter_turns()) % 4
    }
}

/// Result of sliding a single line to the left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSlide {
    /// The line after compaction, merging and re-packing.
    pub tiles: Vec<Tile>,
    /// Sum of all tiles produced by merges.
    pub score_gained: u64,
    /// Whether some merge produced exactly the target tile.
    pub reached_target: bool,
}

/// Slides one line towards index 0.
///
/// Empty cells are squeezed out, then equal neighbours are merged in a single
/// left-to-right pass. A tile produced by a merge is never merged again in the
/// same slide, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`. A pair whose sum
/// would overflow a `Tile` stays as two tiles.
///
/// ```
/// use game2048::grid::slide_line;
/// let slide = slide_line(&[2, 0, 2, 4], 2048);
/// assert_eq!(slide.tiles, vec![4, 4, 0, 0]);
/// assert_eq!(slide.score_gained, 4);
/// ```
pub fn slide_line(line: &[Tile], target: Tile) -> LineSlide {
    let packed: Vec<Tile> = line.iter().copied().filter(|&t| t != EMPTY).collect();

    let mut tiles = Vec::with_capacity(line.len());
    let mut score_gained = 0u64;
    let mut reached_target = false;

    let mut i = 0;
    while i < packed.len() {
        let merged = if i + 1 < packed.len() && packed[i] == packed[i + 1] {
            packed[i].checked_mul(2)
        } else {
            None
        };
        if let Some(merged) = merged {
            score_gained += u64::from(merged);
            if merged == target {
                reached_target = true;
            }
            tiles.push(merged);
            i += 2; // both sources consumed
        } else {
            tiles.push(packed[i]);
            i += 1;
        }
    }
    tiles.resize(line.len(), EMPTY);

    LineSlide {
        tiles,
        score_gained,
        reached_target,
    }
}

/// Result of sliding a whole grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSlide {
    pub grid: Grid,
    pub score_gained: u64,
    pub reached_target: bool,
    /// True if at least one row differs from before the slide.
    pub changed: bool,
}

/// A square grid of tiles stored row-major, addressed by `(x, y)` with `x` the
/// column and `y` the row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Box<[Tile]>,
}

impl Grid {
    /// Creates an empty `size` x `size` grid.
    ///
    /// # Panics
    /// Panics if `size < 2`.
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "grid size must be at least 2");
        Grid {
            size,
            cells: vec![EMPTY; size * size].into_boxed_slice(),
        }
    }

    /// Builds a grid from a row-major cell buffer.
    ///
    /// # Panics
    /// Panics if `size < 2` or `cells.len() != size * size`.
    pub fn from_cells(size: usize, cells: Vec<Tile>) -> Self {
        assert!(size >= 2, "grid size must be at least 2");
        assert_eq!(
            cells.len(),
            size * size,
            "cell buffer does not match a {0}x{0} grid",
            size
        );
        Grid {
            size,
            cells: cells.into_boxed_slice(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the tile at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if either coordinate is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.cells[self.index(x, y)]
    }

    /// Sets the tile at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if either coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let idx = self.index(x, y);
        self.cells[idx] = tile;
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.size && y < self.size,
            "({}, {}) is outside a {2}x{2} grid",
            x,
            y,
            self.size
        );
        x + y * self.size
    }

    /// The raw row-major cell buffer.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Iterates over every cell as `(x, y, value)` in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % size, i / size, v))
    }

    /// Coordinates `(x, y)` of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.tiles()
            .filter(|&(_, _, v)| v == EMPTY)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&t| t != EMPTY)
    }

    /// Largest tile on the grid, `EMPTY` for an empty grid.
    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// True if some cell equals its right or down neighbour and the pair can merge.
    pub fn has_equal_neighbours(&self) -> bool {
        let n = self.size;
        for y in 0..n {
            for x in 0..n {
                let t = self.get(x, y);
                if t.checked_mul(2).is_none() {
                    continue;
                }
                if (x + 1 < n && t == self.get(x + 1, y)) || (y + 1 < n && t == self.get(x, y + 1))
                {
                    return true;
                }
            }
        }
        false
    }

    /// True if a swipe in some direction could change the grid.
    pub fn can_move(&self) -> bool {
        !self.is_full() || self.has_equal_neighbours()
    }

    /// Returns a copy rotated clockwise by `quarter_turns` * 90 degrees.
    ///
    /// One clockwise turn moves the top row onto the right column.
    pub fn rotated(&self, quarter_turns: u8) -> Grid {
        let n = self.size;
        let last = n - 1;
        let mut out = vec![EMPTY; n * n];
        for (x, y, v) in self.tiles() {
            let (nx, ny) = match quarter_turns % 4 {
                0 => (x, y),
                1 => (last - y, x),
                2 => (last - x, last - y),
                _ => (y, last - x),
            };
            out[nx + ny * n] = v;
        }
        Grid::from_cells(n, out)
    }

    /// Slides every row to the left.
    pub fn slid_left(&self, target: Tile) -> GridSlide {
        let mut cells = Vec::with_capacity(self.cells.len());
        let mut score_gained = 0;
        let mut reached_target = false;
        let mut changed = false;

        for row in self.rows() {
            let slide = slide_line(row, target);
            if slide.tiles.as_slice() != row {
                changed = true;
            }
            score_gained += slide.score_gained;
            reached_target |= slide.reached_target;
            cells.extend_from_slice(&slide.tiles);
        }

        GridSlide {
            grid: Grid::from_cells(self.size, cells),
            score_gained,
            reached_target,
            changed,
        }
    }

    /// Slides the grid in `direction` by rotating onto a left slide and back.
    ///
    /// ```
    /// use game2048::grid::{Direction, Grid};
    /// let grid = Grid::from_cells(2, vec![2, 0, 2, 4]);
    /// let slide = grid.slid(Direction::Up, 2048);
    /// assert_eq!(slide.grid.cells(), &[4, 4, 0, 0]);
    /// assert_eq!(slide.score_gained, 4);
    /// ```
    pub fn slid(&self, direction: Direction, target: Tile) -> GridSlide {
        let mut slide = self
            .rotated(direction.quarter_turns())
            .slid_left(target);
        slide.grid = slide.grid.rotated(direction.inverse_quarter_turns());
        slide
    }
}

impl fmt::Display for Grid {
    /// Right-aligned tile values, `.` for empty cells, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().to_string().len().max(1);
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, &v) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                if v == EMPTY {
                    write!(f, "{:>width$}", ".", width = width)?;
                } else {
                    write!(f, "{:>width$}", v, width = width)?;
                }
            }
        }
        Ok(())
    }
}
