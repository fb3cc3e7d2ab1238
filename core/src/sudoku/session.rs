use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use super::{GRID_SIZE, Hint, SudokuGrid, SudokuPuzzle, generate_puzzle};
use crate::*;

/// Outcome of writing a digit into the board
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Accepted,
    /// Digit repeats within its row, column or box
    Conflict,
    Solved,
}

/// One sudoku game: the carved puzzle, its stored solution and the player's
/// working grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SudokuGame {
    difficulty: Difficulty,
    puzzle: SudokuPuzzle,
    grid: SudokuGrid,
    hints_used: u32,
    state: SessionState,
}

impl SudokuGame {
    pub fn new<R: RandomSource>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self::from_puzzle(difficulty, generate_puzzle(difficulty, rng))
    }

    pub fn from_puzzle(difficulty: Difficulty, puzzle: SudokuPuzzle) -> Self {
        Self {
            difficulty,
            grid: puzzle.puzzle,
            puzzle,
            hints_used: 0,
            state: SessionState::Ready,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    pub fn puzzle(&self) -> &SudokuPuzzle {
        &self.puzzle
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Cells given by the puzzle cannot be edited.
    pub fn is_given(&self, coords: Coord2) -> bool {
        self.puzzle.puzzle.get(coords).is_some_and(|digit| digit != 0)
    }

    pub fn conflicts(&self) -> BTreeSet<Coord2> {
        self.grid.conflicts()
    }

    fn check_editable(&self, coords: Coord2) -> Result<Coord2> {
        let size = GRID_SIZE as Coord;
        if coords.0 >= size || coords.1 >= size {
            return Err(GameError::InvalidCoords);
        }
        self.state.check_not_finished()?;
        if self.is_given(coords) {
            return Err(GameError::FixedCell);
        }
        Ok(coords)
    }

    pub fn enter(&mut self, coords: Coord2, digit: u8) -> Result<EntryOutcome> {
        let coords = self.check_editable(coords)?;
        if !(1..=9).contains(&digit) {
            return Err(GameError::InvalidDigit(digit));
        }

        self.grid.set(coords, 0);
        let valid = self.grid.is_valid_placement(coords, digit);
        self.grid.set(coords, digit);
        self.state.mark_started();

        if self.finish_if_solved() {
            Ok(EntryOutcome::Solved)
        } else if valid {
            Ok(EntryOutcome::Accepted)
        } else {
            log::debug!("conflicting {} at {:?}", digit, coords);
            Ok(EntryOutcome::Conflict)
        }
    }

    pub fn clear(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.check_editable(coords)?;
        self.grid.set(coords, 0);
        Ok(())
    }

    /// Fills the first blank cell from the solution and counts the hint.
    /// `None` when no blank is left.
    pub fn hint(&mut self) -> Result<Option<Hint>> {
        self.state.check_not_finished()?;

        let Some(hint) = self.grid.hint(&self.puzzle.solution) else {
            return Ok(None);
        };
        self.grid.set(hint.coords, hint.value);
        self.hints_used += 1;
        self.state.mark_started();
        self.finish_if_solved();
        Ok(Some(hint))
    }

    fn finish_if_solved(&mut self) -> bool {
        let solved = self.grid.is_complete() && self.grid.matches(&self.puzzle.solution);
        if solved {
            self.state.end(true);
        }
        solved
    }

    /// Record for the outcome store, available once solved.
    pub fn outcome(&self) -> Option<GameOutcome> {
        (self.state == SessionState::Won).then(|| {
            let points = sudoku_points(self.difficulty, self.hints_used);
            GameOutcome {
                game: GameKind::Sudoku,
                score: points,
                points,
                difficulty: Some(self.difficulty),
                completed: true,
            }
        })
    }
}
