//! Sliding tile puzzle on a 3x3 or 4x4 board.

use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

pub const SUPPORTED_SIZES: [Coord; 2] = [3, 4];

/// Gap cell value
pub const GAP: u8 = 0;

/// Board size used for each difficulty.
pub const fn size_for(difficulty: Difficulty) -> Coord {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium | Difficulty::Hard => 4,
    }
}

/// Number of random gap moves used to scramble a board.
pub const fn shuffle_moves(size: Coord) -> usize {
    if size == 3 { 100 } else { 200 }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderGrid {
    tiles: Array2<u8>,
    gap: Coord2,
}

impl SliderGrid {
    /// Tiles `1..size²` in row-major order with the gap last.
    pub fn solved(size: Coord) -> Result<Self> {
        if !SUPPORTED_SIZES.contains(&size) {
            return Err(GameError::UnsupportedSize(size));
        }
        let side = usize::from(size);
        let tiles = Array2::from_shape_fn((side, side), |(row, col)| {
            let value = row * side + col + 1;
            if value == side * side { GAP } else { value as u8 }
        });
        Ok(Self {
            tiles,
            gap: (size - 1, size - 1),
        })
    }

    /// Solved board scrambled by a random walk of the gap, so it always
    /// remains solvable.
    pub fn shuffled<R: RandomSource>(size: Coord, rng: &mut R) -> Result<Self> {
        let mut grid = Self::solved(size)?;
        for _ in 0..shuffle_moves(size) {
            let options: SmallVec<[Coord2; 4]> = grid.tiles.iter_orthogonal(grid.gap).collect();
            let pick = options[rng.index(options.len())];
            grid.swap_with_gap(pick);
        }
        log::debug!("shuffled {}x{} board, gap at {:?}", size, size, grid.gap);
        Ok(grid)
    }

    pub fn size(&self) -> Coord {
        array_size(&self.tiles).0
    }

    pub fn gap(&self) -> Coord2 {
        self.gap
    }

    pub fn get(&self, coords: Coord2) -> Option<u8> {
        self.tiles.get(coords.to_nd_index()).copied()
    }

    /// Tiles that can currently move into the gap.
    pub fn movable(&self) -> SmallVec<[Coord2; 4]> {
        self.tiles.iter_orthogonal(self.gap).collect()
    }

    /// Board after moving the tile at `coords` into the gap, `None` when the
    /// tile does not touch the gap.
    pub fn slide(&self, coords: Coord2) -> Option<Self> {
        if !self.movable().contains(&coords) {
            return None;
        }
        let mut next = self.clone();
        next.swap_with_gap(coords);
        Some(next)
    }

    fn swap_with_gap(&mut self, coords: Coord2) {
        self.tiles
            .swap(coords.to_nd_index(), self.gap.to_nd_index());
        self.gap = coords;
    }

    pub fn is_solved(&self) -> bool {
        let count = self.tiles.len();
        self.tiles
            .iter()
            .enumerate()
            .all(|(index, &tile)| match index + 1 {
                last if last == count => tile == GAP,
                expected => usize::from(tile) == expected,
            })
    }
}

impl fmt::Display for SliderGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.tiles.rows() {
            for tile in line {
                match *tile {
                    GAP => write!(f, "   .")?,
                    tile => write!(f, "{:4}", tile)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Sliding puzzle from the scrambled board to the solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliderGame {
    grid: SliderGrid,
    moves: u32,
    state: SessionState,
}

impl SliderGame {
    pub fn new<R: RandomSource>(size: Coord, rng: &mut R) -> Result<Self> {
        Ok(Self::from_grid(SliderGrid::shuffled(size, rng)?))
    }

    pub fn from_grid(grid: SliderGrid) -> Self {
        Self {
            grid,
            moves: 0,
            state: SessionState::Ready,
        }
    }

    pub fn grid(&self) -> &SliderGrid {
        &self.grid
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns whether the tile moved.
    pub fn slide(&mut self, coords: Coord2) -> Result<bool> {
        let size = self.grid.size();
        if coords.0 >= size || coords.1 >= size {
            return Err(GameError::InvalidCoords);
        }
        self.state.check_not_finished()?;

        let Some(next) = self.grid.slide(coords) else {
            return Ok(false);
        };
        self.grid = next;
        self.moves += 1;
        self.state.mark_started();
        if self.grid.is_solved() {
            log::debug!("solved in {} moves", self.moves);
            self.state.end(true);
        }
        Ok(true)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        (self.state == SessionState::Won).then(|| GameOutcome {
            game: GameKind::SlidingPuzzle,
            score: self.moves,
            points: SLIDING_PUZZLE_POINTS,
            difficulty: None,
            completed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_board_layout() {
        let grid = SliderGrid::solved(3).unwrap();

        assert!(grid.is_solved());
        assert_eq!(grid.gap(), (2, 2));
        assert_eq!(grid.get((0, 0)), Some(1));
        assert_eq!(grid.get((2, 1)), Some(8));
        assert_eq!(SliderGrid::solved(5), Err(GameError::UnsupportedSize(5)));
    }

    #[test]
    fn only_tiles_next_to_the_gap_slide() {
        let grid = SliderGrid::solved(4).unwrap();

        assert!(grid.slide((0, 0)).is_none());
        assert!(grid.slide((2, 2)).is_none());

        let moved = grid.slide((3, 2)).unwrap();
        assert_eq!(moved.gap(), (3, 2));
        assert_eq!(moved.get((3, 3)), Some(15));
        assert!(!moved.is_solved());
        assert!(grid.is_solved());
    }

    #[test]
    fn shuffle_keeps_a_permutation() {
        for size in SUPPORTED_SIZES {
            let grid = SliderGrid::shuffled(size, &mut SeededRandom::new(4)).unwrap();

            let mut tiles: alloc::vec::Vec<u8> = grid.tiles.iter().copied().collect();
            tiles.sort_unstable();
            let expected: alloc::vec::Vec<u8> = (0..size * size).collect();
            assert_eq!(tiles, expected);
            assert_eq!(grid.get(grid.gap()), Some(GAP));
        }
    }

    #[test]
    fn game_counts_moves_until_solved() {
        let grid = SliderGrid::solved(3).unwrap().slide((2, 1)).unwrap();
        let mut game = SliderGame::from_grid(grid);

        assert!(!game.slide((0, 0)).unwrap());
        assert_eq!(game.moves(), 0);

        assert!(game.slide((2, 2)).unwrap());
        assert_eq!(game.state(), SessionState::Won);
        assert_eq!(game.slide((2, 1)), Err(GameError::AlreadyEnded));

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.points, 20);
    }
}
