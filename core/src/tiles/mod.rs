//! The 2048 board: a 4x4 grid of power-of-two tiles that slide and merge.

use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;
pub use session::*;

mod session;

pub const GRID_SIZE: usize = 4;

/// Reaching this tile wins the game.
pub const WINNING_TILE: u32 = 2048;

/// Probability that a spawned tile is a 2 rather than a 4.
const SPAWN_TWO_CHANCE: f64 = 0.9;

/// Largest tile a 4x4 board can build.
pub const MAX_TILE: u32 = 1 << 17;

pub type TileRows = [[u32; GRID_SIZE]; GRID_SIZE];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Up => &["up", "w", "k"],
            Self::Down => &["down", "s", "j"],
            Self::Left => &["left", "a", "h"],
            Self::Right => &["right", "d", "l"],
        }
    }

    /// Cells of line `index` ordered so that tiles move toward position 0.
    fn line_coords(self, index: usize) -> [(usize, usize); GRID_SIZE] {
        let last = GRID_SIZE - 1;
        core::array::from_fn(|i| match self {
            Self::Left => (index, i),
            Self::Right => (index, last - i),
            Self::Up => (i, index),
            Self::Down => (last - i, index),
        })
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|direction| {
                direction
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(s))
            })
            .ok_or(GameError::UnknownDirection)
    }
}

/// Result of sliding a grid in one direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlideOutcome {
    pub grid: TileGrid,
    /// Sum of every tile created by a merge.
    pub score: u32,
    pub moved: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TileRows", into = "TileRows")]
pub struct TileGrid {
    cells: TileRows,
}

impl TileGrid {
    pub const fn empty() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Starting position: an empty grid with two random tiles.
    pub fn new<R: RandomSource>(rng: &mut R) -> Self {
        let mut grid = Self::empty();
        for _ in 0..2 {
            if let Some(next) = grid.with_random_tile(rng) {
                grid = next;
            }
        }
        grid
    }

    pub fn from_rows(cells: TileRows) -> Result<Self> {
        for &value in cells.iter().flatten() {
            if value != 0 && (value < 2 || value > MAX_TILE || !value.is_power_of_two()) {
                return Err(GameError::InvalidTile(value));
            }
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> &TileRows {
        &self.cells
    }

    pub fn empty_cells(&self) -> SmallVec<[(usize, usize); GRID_SIZE * GRID_SIZE]> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .filter(|&(_, &value)| value == 0)
                    .map(move |(col, _)| (row, col))
            })
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&value| value != 0).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Copy of the grid with a 2 (90%) or 4 (10%) dropped on a uniformly
    /// chosen empty cell, `None` when the grid is full.
    pub fn with_random_tile<R: RandomSource>(&self, rng: &mut R) -> Option<Self> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[rng.index(empty.len())];
        let value = if rng.chance(SPAWN_TWO_CHANCE) { 2 } else { 4 };
        log::trace!("spawn {} at {:?}", value, (row, col));

        let mut next = *self;
        next.cells[row][col] = value;
        Some(next)
    }

    /// Slides and merges every line toward `direction`. Does not spawn.
    pub fn slide(&self, direction: Direction) -> SlideOutcome {
        let mut grid = *self;
        let mut score = 0;

        for index in 0..GRID_SIZE {
            let coords = direction.line_coords(index);
            let line = coords.map(|(row, col)| self.cells[row][col]);
            let (merged, line_score) = merge_line(line);
            for ((row, col), value) in coords.into_iter().zip(merged) {
                grid.cells[row][col] = value;
            }
            score += line_score;
        }

        SlideOutcome {
            grid,
            score,
            moved: grid != *self,
        }
    }

    /// No empty cell and no equal neighbors in any row or column.
    pub fn is_game_over(&self) -> bool {
        if self.cells.iter().flatten().any(|&value| value == 0) {
            return false;
        }

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = self.cells[row][col];
                if col + 1 < GRID_SIZE && self.cells[row][col + 1] == value {
                    return false;
                }
                if row + 1 < GRID_SIZE && self.cells[row + 1][col] == value {
                    return false;
                }
            }
        }

        true
    }

    pub fn has_won(&self) -> bool {
        self.max_tile() >= WINNING_TILE
    }
}

impl Index<(usize, usize)> for TileGrid {
    type Output = u32;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.cells[row][col]
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            for value in line {
                if *value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl TryFrom<TileRows> for TileGrid {
    type Error = GameError;

    fn try_from(cells: TileRows) -> Result<Self> {
        Self::from_rows(cells)
    }
}

impl From<TileGrid> for TileRows {
    fn from(grid: TileGrid) -> Self {
        grid.cells
    }
}

/// Compresses a line toward index 0 and merges equal pairs once.
fn merge_line(line: [u32; GRID_SIZE]) -> ([u32; GRID_SIZE], u32) {
    let tiles: SmallVec<[u32; GRID_SIZE]> = line.into_iter().filter(|&value| value != 0).collect();
    let mut merged = [0; GRID_SIZE];
    let mut score: u32 = 0;
    let mut out = 0;
    let mut i = 0;

    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let value = tiles[i].saturating_mul(2);
            merged[out] = value;
            score = score.saturating_add(value);
            i += 2;
        } else {
            merged[out] = tiles[i];
            i += 1;
        }
        out += 1;
    }

    (merged, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::scripted::ScriptedRandom;

    fn grid(rows: TileRows) -> TileGrid {
        TileGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn merge_line_merges_each_tile_once() {
        assert_eq!(merge_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(merge_line([4, 0, 4, 8]), ([8, 8, 0, 0], 8));
        assert_eq!(merge_line([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(merge_line([2, 4, 8, 16]), ([2, 4, 8, 16], 0));
    }

    #[test]
    fn slide_left_merges_first_row() {
        let start = grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let outcome = start.slide(Direction::Left);

        assert_eq!(outcome.grid.rows()[0], [4, 0, 0, 0]);
        assert_eq!(outcome.score, 4);
        assert!(outcome.moved);
    }

    #[test]
    fn slide_right_and_down_move_toward_far_edge() {
        let start = grid([[2, 0, 2, 4], [0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0]]);

        let right = start.slide(Direction::Right);
        assert_eq!(right.grid.rows()[0], [0, 0, 4, 4]);

        let down = start.slide(Direction::Down);
        assert_eq!(down.grid.rows()[3], [4, 0, 2, 4]);
        assert_eq!(down.score, 4);
    }

    #[test]
    fn slide_without_change_reports_not_moved() {
        let start = grid([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let outcome = start.slide(Direction::Left);

        assert!(!outcome.moved);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.grid, start);
    }

    #[test]
    fn checkerboard_is_game_over() {
        let board = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(board.is_game_over());

        let mut rows = *board.rows();
        rows[2][1] = 0;
        assert!(!grid(rows).is_game_over());

        rows[2][1] = 2;
        rows[2][2] = 2;
        assert!(!grid(rows).is_game_over());
    }

    #[test]
    fn random_tile_uses_scripted_cell_and_value() {
        let mut rng = ScriptedRandom::new(&[3], &[false]);

        let next = TileGrid::empty().with_random_tile(&mut rng).unwrap();

        assert_eq!(next[(0, 3)], 4);
        assert_eq!(next.tile_count(), 1);
    }

    #[test]
    fn random_tile_on_full_grid_is_none() {
        let full = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut rng = ScriptedRandom::new(&[0], &[true]);

        assert_eq!(full.with_random_tile(&mut rng), None);
    }

    #[test]
    fn new_grid_has_two_tiles() {
        let mut rng = SeededRandom::new(11);

        let start = TileGrid::new(&mut rng);

        assert_eq!(start.tile_count(), 2);
        assert!(start.rows().iter().flatten().all(|&v| v == 0 || v == 2 || v == 4));
    }

    #[test]
    fn has_won_at_2048() {
        assert!(grid([[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).has_won());
        assert!(!grid([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]).has_won());
    }

    #[test]
    fn from_rows_rejects_non_powers_of_two() {
        let result = TileGrid::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(result, Err(GameError::InvalidTile(3)));
        let result = TileGrid::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(result, Err(GameError::InvalidTile(1)));
    }

    #[test]
    fn from_rows_rejects_tiles_past_the_board_maximum() {
        let result = TileGrid::from_rows([[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(result, Err(GameError::InvalidTile(1 << 31)));

        let outcome = grid([[1 << 16, 1 << 16, 0, 0], [0; 4], [0; 4], [0; 4]]).slide(Direction::Left);
        assert_eq!(outcome.grid.rows()[0], [MAX_TILE, 0, 0, 0]);
        assert_eq!(outcome.score, MAX_TILE);
    }

    #[test]
    fn deserializing_checks_tiles() {
        let grid = grid([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<TileGrid>(&json).unwrap(), grid);

        let bad = "[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]";
        assert!(serde_json::from_str::<TileGrid>(bad).is_err());
    }

    #[test]
    fn parses_directions() {
        assert_eq!("LEFT".parse(), Ok(Direction::Left));
        assert_eq!("w".parse(), Ok(Direction::Up));
        assert_eq!("sideways".parse::<Direction>(), Err(GameError::UnknownDirection));
    }
}
