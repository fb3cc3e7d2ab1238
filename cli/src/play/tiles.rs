use arcade_core::tiles::{Direction, TileMergeGame, TileMoveOutcome};
use arcade_core::{GameOutcome, SeededRandom};

use super::Play;

pub struct TilesPlay {
    game: TileMergeGame,
}

impl TilesPlay {
    pub fn new(rng: &mut SeededRandom) -> Self {
        Self::from_game(TileMergeGame::new(rng))
    }

    pub fn from_game(game: TileMergeGame) -> Self {
        Self { game }
    }
}

impl Play for TilesPlay {
    fn render(&self) -> String {
        format!("{}score {}\n", self.game.grid(), self.game.score())
    }

    fn usage(&self) -> &'static str {
        "slide with up/down/left/right (or w/s/a/d, k/j/h/l), quit to stop"
    }

    fn apply(&mut self, command: &str, rng: &mut SeededRandom) -> anyhow::Result<Option<String>> {
        let direction: Direction = command.parse()?;
        let message = match self.game.slide(direction, rng)? {
            TileMoveOutcome::NoChange => Some("nothing moves that way".to_owned()),
            TileMoveOutcome::Moved => None,
            TileMoveOutcome::Won => Some("2048!".to_owned()),
            TileMoveOutcome::Lost => Some("no moves left".to_owned()),
        };
        Ok(message)
    }

    fn is_finished(&self) -> bool {
        self.game.state().is_finished()
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.game.outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::tests::play_script;
    use crate::records::memory::MemoryRecorder;
    use arcade_core::tiles::TileGrid;

    #[test]
    fn merging_into_2048_wins_and_records() {
        let grid = TileGrid::from_rows([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut play = TilesPlay::from_game(TileMergeGame::from_grid(grid));
        let mut recorder = MemoryRecorder::default();

        let (outcome, output) = play_script(&mut play, "sideways\nleft\n", &mut recorder);

        let outcome = outcome.unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.score, 2048);
        assert_eq!(outcome.points, 20);
        assert_eq!(recorder.outcomes, [outcome]);
        assert!(output.contains("error: Unknown direction"));
        assert!(output.contains("2048!"));
    }

    #[test]
    fn blocked_slide_is_reported() {
        let grid = TileGrid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut play = TilesPlay::from_game(TileMergeGame::from_grid(grid));
        let mut recorder = MemoryRecorder::default();

        let (outcome, output) = play_script(&mut play, "a\nq\n", &mut recorder);

        assert!(outcome.is_none());
        assert!(output.contains("nothing moves that way"));
        assert!(recorder.outcomes.is_empty());
    }
}
