use anyhow::bail;
use arcade_core::minefield::{FlagOutcome, MinefieldGame, RevealOutcome};
use arcade_core::{Difficulty, GameOutcome, SeededRandom};

use super::{Play, parse_coords, split_command};

pub struct MinesPlay {
    game: MinefieldGame,
}

impl MinesPlay {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_game(MinefieldGame::new(difficulty))
    }

    pub fn from_game(game: MinefieldGame) -> Self {
        Self { game }
    }
}

impl Play for MinesPlay {
    fn render(&self) -> String {
        format!("{}mines left {}\n", self.game.grid(), self.game.mines_left())
    }

    fn usage(&self) -> &'static str {
        "r ROW COL reveals, f ROW COL flags, quit to stop"
    }

    fn apply(&mut self, command: &str, rng: &mut SeededRandom) -> anyhow::Result<Option<String>> {
        let (verb, args) = split_command(command);
        let coords = parse_coords(&args)?;

        let message = match verb {
            "r" | "reveal" => match self.game.reveal(coords, rng)? {
                RevealOutcome::NoChange => Some("already open or flagged"),
                RevealOutcome::Revealed => None,
                RevealOutcome::HitMine => Some("boom"),
                RevealOutcome::Won => Some("field cleared"),
            },
            "f" | "flag" => match self.game.toggle_flag(coords)? {
                FlagOutcome::NoChange => Some("cannot flag an open cell"),
                FlagOutcome::Changed => None,
            },
            other => bail!("unknown command {:?}", other),
        };
        Ok(message.map(str::to_owned))
    }

    fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.game.outcome()
    }
}
