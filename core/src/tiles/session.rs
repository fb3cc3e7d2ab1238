use serde::{Deserialize, Serialize};

use super::{Direction, TileGrid};
use crate::*;

/// Outcome of a slide within a session
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileMoveOutcome {
    NoChange,
    Moved,
    Won,
    Lost,
}

impl TileMoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One 2048 game from the opening tiles to a win or a jammed board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileMergeGame {
    grid: TileGrid,
    score: u32,
    moves: u32,
    state: SessionState,
}

impl TileMergeGame {
    pub fn new<R: RandomSource>(rng: &mut R) -> Self {
        Self::from_grid(TileGrid::new(rng))
    }

    /// Session starting from `grid`. A grid with no legal slide starts
    /// already lost.
    pub fn from_grid(grid: TileGrid) -> Self {
        let mut state = SessionState::Ready;
        if grid.is_game_over() {
            state.end(false);
        }
        Self {
            grid,
            score: 0,
            moves: 0,
            state,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Slides the board, then spawns a tile only if something moved.
    pub fn slide<R: RandomSource>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<TileMoveOutcome> {
        self.state.check_not_finished()?;

        let outcome = self.grid.slide(direction);
        if !outcome.moved {
            return Ok(TileMoveOutcome::NoChange);
        }

        self.grid = outcome.grid.with_random_tile(rng).unwrap_or(outcome.grid);
        self.score = self.score.saturating_add(outcome.score);
        self.moves += 1;
        self.state.mark_started();
        log::debug!(
            "slide {:?}: +{} (score {})",
            direction,
            outcome.score,
            self.score
        );

        if self.grid.has_won() {
            self.state.end(true);
            Ok(TileMoveOutcome::Won)
        } else if self.grid.is_game_over() {
            self.state.end(false);
            Ok(TileMoveOutcome::Lost)
        } else {
            Ok(TileMoveOutcome::Moved)
        }
    }

    /// Record for the outcome store, available once the game has ended.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.is_finished().then(|| GameOutcome {
            game: GameKind::TileMerge,
            score: self.score,
            points: tile_merge_points(self.score),
            difficulty: None,
            completed: self.state == SessionState::Won,
        })
    }
}
