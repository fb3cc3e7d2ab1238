//! Line-driven play loops shared by every game.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use arcade_core::{Coord2, GameOutcome, SeededRandom};

use crate::records::OutcomeRecorder;

pub use blackjack::BlackjackPlay;
pub use mines::MinesPlay;
pub use slider::SliderPlay;
pub use sudoku::SudokuPlay;
pub use tiles::TilesPlay;

mod blackjack;
mod mines;
mod slider;
mod sudoku;
mod tiles;

/// A game the loop can drive one command at a time.
pub trait Play {
    /// Text shown before each prompt.
    fn render(&self) -> String;

    /// One line of command help.
    fn usage(&self) -> &'static str;

    /// Applies a player command. Errors are reported to the player and the
    /// game carries on.
    fn apply(&mut self, command: &str, rng: &mut SeededRandom) -> anyhow::Result<Option<String>>;

    fn is_finished(&self) -> bool;

    fn outcome(&self) -> Option<GameOutcome>;
}

/// Runs `game` until it ends, the player quits or input runs out. The
/// outcome of a finished game is handed to `recorder`; a failing recorder
/// only logs a warning.
pub fn run<P, I, O>(
    game: &mut P,
    input: I,
    mut output: O,
    rng: &mut SeededRandom,
    recorder: &mut dyn OutcomeRecorder,
) -> anyhow::Result<Option<GameOutcome>>
where
    P: Play + ?Sized,
    I: BufRead,
    O: Write,
{
    writeln!(output, "{}", game.usage())?;
    let mut lines = input.lines();

    while !game.is_finished() {
        write!(output, "{}> ", game.render())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            log::debug!("input closed");
            break;
        };
        let line = line.context("reading command")?;
        let command = line.trim();

        match command {
            "" => continue,
            "q" | "quit" | "exit" => {
                writeln!(output, "bye")?;
                return Ok(None);
            }
            "?" | "help" => writeln!(output, "{}", game.usage())?,
            _ => match game.apply(command, rng) {
                Ok(Some(message)) => writeln!(output, "{}", message)?,
                Ok(None) => {}
                Err(err) => writeln!(output, "error: {:#}", err)?,
            },
        }
    }

    let Some(outcome) = game.outcome() else {
        return Ok(None);
    };
    write!(output, "{}", game.render())?;
    writeln!(
        output,
        "{} finished: score {}, {} points",
        outcome.game, outcome.score, outcome.points
    )?;

    match recorder.record(&outcome) {
        Ok(badges) => {
            for badge in badges {
                writeln!(output, "badge earned: {:?}", badge)?;
            }
            let stats = recorder.stats();
            writeln!(
                output,
                "total {} points over {} games",
                stats.total_points, stats.games_played
            )?;
        }
        Err(err) => log::warn!("could not record outcome: {:#}", err),
    }

    Ok(Some(outcome))
}

/// Splits a command into its verb and the remaining arguments.
pub(crate) fn split_command(command: &str) -> (&str, Vec<&str>) {
    let mut words = command.split_whitespace();
    let verb = words.next().unwrap_or_default();
    (verb, words.collect())
}

pub(crate) fn parse_coords(args: &[&str]) -> anyhow::Result<Coord2> {
    match args {
        [row, col] => Ok((parse_number(row, "row")?, parse_number(col, "column")?)),
        _ => bail!("expected a row and a column"),
    }
}

pub(crate) fn parse_number<T>(text: &str, what: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    text.parse()
        .map_err(|err| anyhow::anyhow!("bad {} {:?}: {}", what, text, err))
}
