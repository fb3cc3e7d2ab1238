use serde::{Deserialize, Serialize};

use super::{MineGrid, MinefieldConfig};
use crate::*;

/// Outcome of flagging a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Represents a minesweeper game from the first click to the end
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinefieldGame {
    difficulty: Difficulty,
    config: MinefieldConfig,
    grid: MineGrid,
    mines_placed: bool,
    state: SessionState,
    triggered_mine: Option<Coord2>,
}

impl MinefieldGame {
    /// Unmined board, mines are placed by the first reveal.
    pub fn new(difficulty: Difficulty) -> Self {
        let config = MinefieldConfig::for_difficulty(difficulty);
        Self {
            difficulty,
            config,
            grid: MineGrid::new(config),
            mines_placed: false,
            state: SessionState::Ready,
            triggered_mine: None,
        }
    }

    /// Game over a prepared layout, the first reveal places nothing.
    pub fn with_layout(difficulty: Difficulty, grid: MineGrid) -> Self {
        let config = MinefieldConfig::new_unchecked(grid.size(), grid.mine_count());
        Self {
            difficulty,
            config,
            grid,
            mines_placed: true,
            state: SessionState::Ready,
            triggered_mine: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &MinefieldConfig {
        &self.config
    }

    pub fn grid(&self) -> &MineGrid {
        &self.grid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.grid.count_flags() as isize)
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.grid.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.state.check_not_finished()?;

        if self.grid[coords].is_revealed {
            return Ok(FlagOutcome::NoChange);
        }
        self.grid = self.grid.toggle_flag(coords);
        Ok(FlagOutcome::Changed)
    }

    pub fn reveal<R: RandomSource>(&mut self, coords: Coord2, rng: &mut R) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.state.check_not_finished()?;

        let cell = self.grid[coords];
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.mines_placed {
            self.grid = self.grid.place_mines(&self.config, coords, rng);
            self.config.mines = self.grid.mine_count();
            self.mines_placed = true;
        }

        if self.grid[coords].is_mine {
            log::debug!("mine hit at {:?}", coords);
            self.grid = self.grid.reveal_all_mines();
            self.triggered_mine = Some(coords);
            self.state.end(false);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.grid.reveal_mut(coords);
        log::debug!("revealed {} cells from {:?}", opened, coords);

        if self.grid.check_win(&self.config) {
            self.state.end(true);
            Ok(RevealOutcome::Won)
        } else {
            self.state.mark_started();
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Record for the outcome store, available once the game has ended.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.is_finished().then(|| {
            let won = self.state == SessionState::Won;
            let points = minesweeper_points(self.difficulty, won);
            GameOutcome {
                game: GameKind::Minesweeper,
                score: points,
                points,
                difficulty: Some(self.difficulty),
                completed: won,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> MinefieldGame {
        let grid = MineGrid::from_mine_coords(size, mines).unwrap();
        MinefieldGame::with_layout(Difficulty::Easy, grid)
    }

    #[test]
    fn first_reveal_places_mines_away_from_click() {
        let mut game = MinefieldGame::new(Difficulty::Easy);
        let mut rng = SeededRandom::new(42);

        let outcome = game.reveal((0, 0), &mut rng).unwrap();

        assert!(outcome.has_update());
        assert_ne!(outcome, RevealOutcome::HitMine);
        assert_eq!(game.grid().mine_count(), 10);
        assert_eq!(game.grid()[(0, 0)].neighbor_mines, 0);
        assert!(game.grid()[(1, 1)].is_revealed);
    }

    #[test]
    fn hitting_a_mine_reveals_all_and_loses() {
        let mut game = game((3, 3), &[(0, 0), (2, 2)]);
        let mut rng = SeededRandom::new(0);

        assert_eq!(
            game.reveal((1, 1), &mut rng).unwrap(),
            RevealOutcome::Revealed
        );
        assert_eq!(
            game.reveal((0, 0), &mut rng).unwrap(),
            RevealOutcome::HitMine
        );

        assert_eq!(game.state(), SessionState::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
        assert!(game.grid()[(2, 2)].is_revealed);
        assert_eq!(game.reveal((0, 1), &mut rng), Err(GameError::AlreadyEnded));
        assert_eq!(game.outcome().unwrap().points, 0);
    }

    #[test]
    fn winning_board_transitions_to_won_state() {
        let mut game = game((2, 1), &[(0, 0)]);
        let mut rng = SeededRandom::new(0);

        assert_eq!(game.reveal((1, 0), &mut rng).unwrap(), RevealOutcome::Won);
        assert!(game.is_finished());

        let outcome = game.outcome().unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.points, 30);
    }

    #[test]
    fn flags_block_reveal_and_count_down_mines_left() {
        let mut game = game((2, 2), &[(0, 0)]);
        let mut rng = SeededRandom::new(0);

        assert_eq!(game.toggle_flag((0, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(game.mines_left(), 0);
        assert_eq!(
            game.reveal((0, 0), &mut rng).unwrap(),
            RevealOutcome::NoChange
        );

        game.reveal((1, 1), &mut rng).unwrap();
        assert_eq!(game.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let mut game = MinefieldGame::new(Difficulty::Easy);
        let mut rng = SeededRandom::new(0);

        assert_eq!(game.reveal((8, 0), &mut rng), Err(GameError::InvalidCoords));
        assert_eq!(game.toggle_flag((0, 8)), Err(GameError::InvalidCoords));
    }
}
