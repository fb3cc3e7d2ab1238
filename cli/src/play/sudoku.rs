use anyhow::bail;
use arcade_core::sudoku::{EntryOutcome, SudokuGame};
use arcade_core::{Difficulty, GameOutcome, SeededRandom};

use super::{Play, parse_coords, parse_number, split_command};

pub struct SudokuPlay {
    game: SudokuGame,
}

impl SudokuPlay {
    pub fn new(difficulty: Difficulty, rng: &mut SeededRandom) -> Self {
        Self::from_game(SudokuGame::new(difficulty, rng))
    }

    pub fn from_game(game: SudokuGame) -> Self {
        Self { game }
    }
}

impl Play for SudokuPlay {
    fn render(&self) -> String {
        let conflicts = self.game.conflicts();
        let mut text = self.game.grid().to_string();
        if !conflicts.is_empty() {
            text.push_str(&format!("conflicts at {:?}\n", conflicts));
        }
        text.push_str(&format!("hints used {}\n", self.game.hints_used()));
        text
    }

    fn usage(&self) -> &'static str {
        "s ROW COL DIGIT writes, c ROW COL clears, hint fills one cell, rows and columns count from 0"
    }

    fn apply(&mut self, command: &str, _rng: &mut SeededRandom) -> anyhow::Result<Option<String>> {
        let (verb, args) = split_command(command);

        match (verb, args.as_slice()) {
            ("s" | "set", [row, col, digit]) => {
                let coords = parse_coords(&[*row, *col])?;
                let digit = parse_number(digit, "digit")?;
                let message = match self.game.enter(coords, digit)? {
                    EntryOutcome::Accepted => None,
                    EntryOutcome::Conflict => Some(format!("{} clashes with its row, column or box", digit)),
                    EntryOutcome::Solved => Some("solved".to_owned()),
                };
                Ok(message)
            }
            ("c" | "clear", args) => {
                self.game.clear(parse_coords(args)?)?;
                Ok(None)
            }
            ("hint", []) => Ok(Some(match self.game.hint()? {
                Some(hint) => format!(
                    "row {} column {} is {}",
                    hint.coords.0, hint.coords.1, hint.value
                ),
                None => "no blank cells left".to_owned(),
            })),
            (other, _) => bail!("unknown command {:?}", other),
        }
    }

    fn is_finished(&self) -> bool {
        self.game.state().is_finished()
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.game.outcome()
    }
}
