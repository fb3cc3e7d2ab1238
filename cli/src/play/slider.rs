use arcade_core::slider::{SliderGame, size_for};
use arcade_core::{Difficulty, GameOutcome, SeededRandom};

use super::{Play, parse_coords, split_command};

pub struct SliderPlay {
    game: SliderGame,
}

impl SliderPlay {
    pub fn new(difficulty: Difficulty, rng: &mut SeededRandom) -> anyhow::Result<Self> {
        Ok(Self::from_game(SliderGame::new(size_for(difficulty), rng)?))
    }

    pub fn from_game(game: SliderGame) -> Self {
        Self { game }
    }
}

impl Play for SliderPlay {
    fn render(&self) -> String {
        format!("{}moves {}\n", self.game.grid(), self.game.moves())
    }

    fn usage(&self) -> &'static str {
        "ROW COL slides that tile into the gap, quit to stop"
    }

    fn apply(&mut self, command: &str, _rng: &mut SeededRandom) -> anyhow::Result<Option<String>> {
        let (first, mut args) = split_command(command);
        args.insert(0, first);

        if self.game.slide(parse_coords(&args)?)? {
            Ok(self.game.state().is_finished().then(|| "solved".to_owned()))
        } else {
            Ok(Some("that tile is not next to the gap".to_owned()))
        }
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
    use arcade_core::slider::SliderGrid;

    #[test]
    fn sliding_back_solves_and_records_moves() {
        let grid = SliderGrid::solved(3).unwrap();
        let grid = grid.slide((1, 2)).unwrap().slide((1, 1)).unwrap();
        let mut play = SliderPlay::from_game(SliderGame::from_grid(grid));
        let mut recorder = MemoryRecorder::default();

        let (outcome, output) = play_script(&mut play, "0 0\n1 2\n2 2\n", &mut recorder);

        assert!(output.contains("not next to the gap"));
        let outcome = outcome.unwrap();
        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.points, 20);
    }

    #[test]
    fn new_game_uses_difficulty_size() {
        let play = SliderPlay::new(Difficulty::Easy, &mut SeededRandom::new(5)).unwrap();

        assert_eq!(play.game.grid().size(), 3);
    }
}
