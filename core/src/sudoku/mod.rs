//! Classic 9x9 sudoku: validation, completion checks and hints.

use alloc::collections::BTreeSet;
use core::fmt;
use core::ops::Index;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;
pub use generator::*;
pub use session::*;

mod generator;
mod session;

pub const GRID_SIZE: usize = 9;
pub const BOX_SIZE: usize = 3;

pub type SudokuRows = [[u8; GRID_SIZE]; GRID_SIZE];

/// Next cell to fill together with its value in the solution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub coords: Coord2,
    pub value: u8,
}

/// A 9x9 board of digits, 0 marks a blank cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SudokuRows", into = "SudokuRows")]
pub struct SudokuGrid {
    cells: SudokuRows,
}

impl SudokuGrid {
    pub const fn empty() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn from_rows(cells: SudokuRows) -> Result<Self> {
        if let Some(&digit) = cells.iter().flatten().find(|&&digit| digit > 9) {
            return Err(GameError::InvalidDigit(digit));
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> &SudokuRows {
        &self.cells
    }

    pub fn get(&self, (row, col): Coord2) -> Option<u8> {
        self.cells
            .get(usize::from(row))
            .and_then(|line| line.get(usize::from(col)))
            .copied()
    }

    pub(crate) fn set(&mut self, (row, col): Coord2, digit: u8) {
        self.cells[usize::from(row)][usize::from(col)] = digit;
    }

    pub fn blank_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&digit| digit == 0).count()
    }

    /// `digit` does not already appear in the row, column or box of `coords`.
    pub fn is_valid_placement(&self, (row, col): Coord2, digit: u8) -> bool {
        let (row, col) = (usize::from(row), usize::from(col));

        if self.cells[row].contains(&digit) {
            return false;
        }
        if self.cells.iter().any(|line| line[col] == digit) {
            return false;
        }

        let box_row = row - row % BOX_SIZE;
        let box_col = col - col % BOX_SIZE;
        !self.cells[box_row..box_row + BOX_SIZE]
            .iter()
            .any(|line| line[box_col..box_col + BOX_SIZE].contains(&digit))
    }

    pub fn is_complete(&self) -> bool {
        self.blank_count() == 0
    }

    /// No row, column or box repeats a non-zero digit. Blanks are ignored.
    pub fn is_valid(&self) -> bool {
        units().all(|unit| {
            let mut seen: u16 = 0;
            unit.iter().all(|&coords| match self[coords] {
                0 => true,
                digit => {
                    let bit = 1 << digit;
                    let fresh = seen & bit == 0;
                    seen |= bit;
                    fresh
                }
            })
        })
    }

    /// Every cell whose digit is repeated within one of its units.
    pub fn conflicts(&self) -> BTreeSet<Coord2> {
        let mut conflicts = BTreeSet::new();
        for unit in units() {
            let mut by_digit: [SmallVec<[Coord2; 2]>; 10] = Default::default();
            for coords in unit {
                by_digit[usize::from(self[coords])].push(coords);
            }
            for cells in &by_digit[1..] {
                if cells.len() > 1 {
                    conflicts.extend(cells.iter().copied());
                }
            }
        }
        conflicts
    }

    /// Exact cell-by-cell match against `solution`.
    pub fn matches(&self, solution: &SudokuGrid) -> bool {
        self.cells == solution.cells
    }

    /// First blank cell in row-major order with its solution value.
    pub fn hint(&self, solution: &SudokuGrid) -> Option<Hint> {
        let coords = self.next_blank(0)?;
        Some(Hint {
            coords,
            value: solution[coords],
        })
    }

    /// First blank cell at or after the row-major position `start`.
    pub(crate) fn next_blank(&self, start: usize) -> Option<Coord2> {
        (start..GRID_SIZE * GRID_SIZE)
            .map(cell_coords)
            .find(|&coords| self[coords] == 0)
    }
}

fn cell_coords(index: usize) -> Coord2 {
    ((index / GRID_SIZE) as Coord, (index % GRID_SIZE) as Coord)
}

/// The 27 rows, columns and boxes.
fn units() -> impl Iterator<Item = [Coord2; GRID_SIZE]> {
    (0..GRID_SIZE).flat_map(|i| {
        let row = core::array::from_fn(|j| (i as Coord, j as Coord));
        let col = core::array::from_fn(|j| (j as Coord, i as Coord));
        let (box_row, box_col) = ((i / BOX_SIZE) * BOX_SIZE, (i % BOX_SIZE) * BOX_SIZE);
        let boxed = core::array::from_fn(|j| {
            (
                (box_row + j / BOX_SIZE) as Coord,
                (box_col + j % BOX_SIZE) as Coord,
            )
        });
        [row, col, boxed]
    })
}

impl TryFrom<SudokuRows> for SudokuGrid {
    type Error = GameError;

    fn try_from(cells: SudokuRows) -> Result<Self> {
        Self::from_rows(cells)
    }
}

impl From<SudokuGrid> for SudokuRows {
    fn from(grid: SudokuGrid) -> Self {
        grid.cells
    }
}

impl Index<Coord2> for SudokuGrid {
    type Output = u8;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[usize::from(row)][usize::from(col)]
    }
}

impl fmt::Display for SudokuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.cells.iter().enumerate() {
            if row > 0 && row % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (col, digit) in line.iter().enumerate() {
                if col > 0 && col % BOX_SIZE == 0 {
                    write!(f, "| ")?;
                }
                match digit {
                    0 => write!(f, ". ")?,
                    digit => write!(f, "{} ", digit)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    pub(super) const SOLVED: SudokuRows = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    fn solved() -> SudokuGrid {
        SudokuGrid::from_rows(SOLVED).unwrap()
    }

    #[test]
    fn placement_checks_row_column_and_box() {
        let mut grid = solved();
        grid.set((0, 0), 0);

        assert!(grid.is_valid_placement((0, 0), 5));
        // 3 is in row 0
        assert!(!grid.is_valid_placement((0, 0), 3));
        // 6 is in column 0
        assert!(!grid.is_valid_placement((0, 0), 6));
    }

    #[test]
    fn placement_checks_box() {
        let mut grid = SudokuGrid::empty();
        grid.set((1, 1), 9);

        assert!(!grid.is_valid_placement((0, 0), 9));
        assert!(!grid.is_valid_placement((2, 2), 9));
        assert!(grid.is_valid_placement((0, 5), 9));
        assert!(grid.is_valid_placement((3, 0), 9));
    }

    #[test]
    fn placement_accepts_on_empty_grid() {
        let grid = SudokuGrid::empty();
        assert!((1..=9).all(|digit| grid.is_valid_placement((4, 4), digit)));
    }

    #[test]
    fn solved_grid_is_complete_and_valid() {
        let grid = solved();
        assert!(grid.is_complete());
        assert!(grid.is_valid());
        assert!(grid.conflicts().is_empty());
    }

    #[test]
    fn duplicates_are_invalid_and_reported() {
        let mut grid = SudokuGrid::empty();
        grid.set((0, 0), 7);
        grid.set((1, 1), 7);
        grid.set((8, 8), 7);

        assert!(!grid.is_valid());
        let conflicts = grid.conflicts();
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.contains(&(0, 0)));
        assert!(conflicts.contains(&(1, 1)));
    }

    #[test]
    fn blanks_do_not_conflict() {
        let mut grid = solved();
        grid.set((3, 3), 0);
        grid.set((3, 4), 0);

        assert!(grid.is_valid());
        assert!(!grid.is_complete());
    }

    #[test]
    fn hint_returns_first_blank_with_solution_value() {
        let solution = solved();
        let mut grid = solution;
        grid.set((2, 5), 0);
        grid.set((7, 1), 0);

        assert_eq!(
            grid.hint(&solution),
            Some(Hint {
                coords: (2, 5),
                value: 2
            })
        );
        assert_eq!(solution.hint(&solution), None);
    }

    #[test]
    fn matches_requires_exact_equality() {
        let solution = solved();
        let mut grid = solution;
        assert!(grid.matches(&solution));

        grid.set((0, 0), 0);
        assert!(!grid.matches(&solution));
    }

    #[test]
    fn from_rows_rejects_digits_above_nine() {
        let mut rows = SOLVED;
        rows[4][4] = 10;
        assert_eq!(SudokuGrid::from_rows(rows), Err(GameError::InvalidDigit(10)));
    }

    #[test]
    fn deserializing_rejects_digits_above_nine() {
        let json = serde_json::to_string(&solved()).unwrap();
        assert_eq!(serde_json::from_str::<SudokuGrid>(&json).unwrap(), solved());

        let mut rows = SOLVED;
        rows[0][0] = 12;
        let bad = serde_json::to_string(&rows).unwrap();
        let err = serde_json::from_str::<SudokuGrid>(&bad).unwrap_err();
        assert!(err.to_string().contains("12"));
    }
}
