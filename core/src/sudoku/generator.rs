use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::*;

/// A carved puzzle together with the grid it was carved from.
///
/// Cells are removed without checking that the puzzle keeps a single
/// solution, so other completions may exist. Those are not accepted as
/// solved since completion compares against `solution` only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuPuzzle {
    pub puzzle: SudokuGrid,
    pub solution: SudokuGrid,
}

/// How many cells are blanked for each difficulty.
pub const fn cells_to_remove(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 40,
        Difficulty::Medium => 50,
        Difficulty::Hard => 60,
    }
}

/// One cell of the backtracking search: its candidates in trial order and
/// how many of them were tried already.
struct Frame {
    cell: usize,
    candidates: [u8; GRID_SIZE],
    next: usize,
}

impl Frame {
    fn new<R: RandomSource>(cell: usize, rng: &mut R) -> Self {
        let mut candidates = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        rng.shuffle(&mut candidates);
        Self {
            cell,
            candidates,
            next: 0,
        }
    }
}

impl SudokuGrid {
    /// Fully populated valid grid from randomized backtracking.
    pub fn generate_complete<R: RandomSource>(rng: &mut R) -> Self {
        let mut grid = Self::empty();
        let filled = grid.fill(rng);
        debug_assert!(filled, "an empty grid always has a completion");
        grid
    }

    /// Fills every blank in row-major order, trying digits in random order
    /// and undoing a cell once all of its candidates fail. Returns `false`
    /// and leaves the blanks in place when no completion exists.
    pub fn fill<R: RandomSource>(&mut self, rng: &mut R) -> bool {
        let Some(first) = self.next_blank(0) else {
            return true;
        };

        let mut stack: Vec<Frame> = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        stack.push(Frame::new(cell_index(first), rng));
        let mut backtracks: u32 = 0;

        while let Some(frame) = stack.last_mut() {
            let coords = cell_coords(frame.cell);
            self.set(coords, 0);

            let mut placed = false;
            while frame.next < GRID_SIZE {
                let digit = frame.candidates[frame.next];
                frame.next += 1;
                if self.is_valid_placement(coords, digit) {
                    self.set(coords, digit);
                    placed = true;
                    break;
                }
            }

            if !placed {
                stack.pop();
                backtracks += 1;
                continue;
            }

            let cell = frame.cell;
            match self.next_blank(cell + 1) {
                Some(next) => stack.push(Frame::new(cell_index(next), rng)),
                None => {
                    log::trace!("grid filled after {} backtracks", backtracks);
                    return true;
                }
            }
        }

        log::debug!("no completion after {} backtracks", backtracks);
        false
    }
}

fn cell_index((row, col): Coord2) -> usize {
    usize::from(row) * GRID_SIZE + usize::from(col)
}

/// Random solution plus a copy with `cells_to_remove(difficulty)` distinct
/// cells blanked.
pub fn generate_puzzle<R: RandomSource>(difficulty: Difficulty, rng: &mut R) -> SudokuPuzzle {
    let solution = SudokuGrid::generate_complete(rng);
    let mut puzzle = solution;

    let target = cells_to_remove(difficulty);
    let mut removed = 0;
    while removed < target {
        let coords = (rng.index(GRID_SIZE) as Coord, rng.index(GRID_SIZE) as Coord);
        if puzzle[coords] != 0 {
            puzzle.set(coords, 0);
            removed += 1;
        }
    }
    log::debug!("carved {} cells for {} puzzle", removed, difficulty);

    SudokuPuzzle { puzzle, solution }
}
