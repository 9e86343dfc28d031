use crate::error::GridParseError;
use crate::grid::{Grid, Tile, EMPTY, MAX_TILE};

/// Parses rows of whitespace-separated tile values into a square `Grid`.
///
/// Each string slice is one row, starting from the top (row 0). The number of
/// rows sets the grid size, and every row must hold exactly that many cells.
///
/// Valid cell tokens are:
/// - `.` or `0`: an empty cell
/// - a power of two from `2` up to `MAX_TILE`: a tile
///
/// # Returns
/// * `Ok(Grid)` if parsing is successful.
/// * `Err(GridParseError)` if:
///     - fewer than 2 rows are given,
///     - a row's cell count differs from the row count,
///     - a token is not a number or `.`,
///     - a number is not a power of two (or is 1),
///     - a number is larger than `MAX_TILE`.
///
/// # Examples
/// ```
/// use game2048::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&[
///     "2 . 4",
///     ". 8 .",
///     "16 . 2",
/// ]).unwrap();
/// assert_eq!(grid.size(), 3);
/// assert_eq!(grid.get(0, 0), 2);
/// assert_eq!(grid.get(1, 1), 8);
/// assert_eq!(grid.get(0, 2), 16);
///
/// assert!(grid_from_str_array(&["2 4", "8"]).is_err());
/// assert!(grid_from_str_array(&["2 3", "8 8"]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, GridParseError> {
    let size = s.len();
    if size < 2 {
        return Err(GridParseError::TooFewRows(size));
    }

    let mut cells = Vec::with_capacity(size * size);

    for (row, row_str) in s.iter().enumerate() {
        let tokens: Vec<&str> = row_str.split_whitespace().collect();
        if tokens.len() != size {
            return Err(GridParseError::RaggedRow {
                row,
                found: tokens.len(),
                expected: size,
            });
        }

        for (col, token) in tokens.into_iter().enumerate() {
            cells.push(parse_tile(token, row, col)?);
        }
    }

    Ok(Grid::from_cells(size, cells))
}

fn parse_tile(token: &str, row: usize, col: usize) -> Result<Tile, GridParseError> {
    if token == "." {
        return Ok(EMPTY);
    }
    let value: Tile = token.parse().map_err(|_| GridParseError::BadToken {
        token: token.to_string(),
        row,
        col,
    })?;
    if value != EMPTY && (value < 2 || !value.is_power_of_two()) {
        return Err(GridParseError::NotPowerOfTwo { value, row, col });
    }
    if value > MAX_TILE {
        return Err(GridParseError::TileTooLarge {
            value,
            max: MAX_TILE,
            row,
            col,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_str_array_valid() {
        let grid = grid_from_str_array(&[
            "2 4 8 16",
            ". . . .",
            "0 0 0 0",
            "2048 . 4096 2",
        ])
        .unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.get(3, 0), 16);
        assert_eq!(grid.get(0, 1), EMPTY);
        assert_eq!(grid.get(0, 2), EMPTY);
        assert_eq!(grid.get(2, 3), 4096);
    }

    #[test]
    fn test_grid_from_str_array_extra_whitespace() {
        let grid = grid_from_str_array(&["  2   .", "\t4 8 "]).unwrap();
        assert_eq!(grid.cells(), &[2, 0, 4, 8]);
    }

    #[test]
    fn test_grid_from_str_array_invalid_token() {
        let result = grid_from_str_array(&["2 x", ". ."]);
        assert_eq!(
            result,
            Err(GridParseError::BadToken {
                token: "x".to_string(),
                row: 0,
                col: 1
            })
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unrecognized token 'x'"));
    }

    #[test]
    fn test_grid_from_str_array_not_power_of_two() {
        assert_eq!(
            grid_from_str_array(&["2 6", ". ."]),
            Err(GridParseError::NotPowerOfTwo {
                value: 6,
                row: 0,
                col: 1
            })
        );
        assert!(grid_from_str_array(&["1 .", ". ."]).is_err());
    }

    #[test]
    fn test_grid_from_str_array_tile_too_large() {
        assert_eq!(
            grid_from_str_array(&["2147483648 2147483648", ". ."]),
            Err(GridParseError::TileTooLarge {
                value: 1 << 31,
                max: MAX_TILE,
                row: 0,
                col: 0
            })
        );
        let grid = grid_from_str_array(&["1073741824 1073741824", ". ."]).unwrap();
        assert_eq!(grid.get(1, 0), MAX_TILE);
    }

    #[test]
    fn test_grid_from_str_array_ragged_rows() {
        assert_eq!(
            grid_from_str_array(&["2 2 2", "2 2", "2 2 2"]),
            Err(GridParseError::RaggedRow {
                row: 1,
                found: 2,
                expected: 3
            })
        );
        // Rows must match the row count, not each other.
        assert!(grid_from_str_array(&["2 2 2", "2 2 2"]).is_err());
    }

    #[test]
    fn test_grid_from_str_array_too_few_rows() {
        let no_rows: [&str; 0] = [];
        assert_eq!(grid_from_str_array(&no_rows), Err(GridParseError::TooFewRows(0)));
        assert_eq!(grid_from_str_array(&["2"]), Err(GridParseError::TooFewRows(1)));
    }

    #[test]
    fn test_round_trip_through_display() {
        let rows = ["2 . 4", ". 8 .", "16 . 2"];
        let grid = grid_from_str_array(&rows).unwrap();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(grid_from_str_array(&lines).unwrap(), grid);
    }
}
