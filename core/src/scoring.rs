use alloc::collections::BTreeSet;
use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Difficulty;
use crate::blackjack::RoundResult;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "sudoku")]
    Sudoku,
    #[serde(rename = "2048")]
    TileMerge,
    #[serde(rename = "minesweeper")]
    Minesweeper,
    #[serde(rename = "puzzle")]
    SlidingPuzzle,
    #[serde(rename = "blackjack")]
    Blackjack,
}

impl GameKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sudoku => "sudoku",
            Self::TileMerge => "2048",
            Self::Minesweeper => "minesweeper",
            Self::SlidingPuzzle => "puzzle",
            Self::Blackjack => "blackjack",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One point per hundred points of tile score.
pub const fn tile_merge_points(score: u32) -> u32 {
    score / 100
}

pub const fn minesweeper_points(difficulty: Difficulty, won: bool) -> u32 {
    if !won {
        return 0;
    }
    match difficulty {
        Difficulty::Easy => 30,
        Difficulty::Medium => 40,
        Difficulty::Hard => 50,
    }
}

/// Base points minus two per hint, never below 5.
pub fn sudoku_points(difficulty: Difficulty, hints_used: u32) -> u32 {
    let base = match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 30,
        Difficulty::Hard => 50,
    };
    let penalty = hints_used.saturating_mul(2).min(base - 5);
    (base - penalty).max(5)
}

pub const SLIDING_PUZZLE_POINTS: u32 = 20;

pub const fn blackjack_points(result: RoundResult) -> u32 {
    match result {
        RoundResult::Win => 10,
        RoundResult::Draw => 5,
        RoundResult::Loss => 0,
    }
}

/// What a finished session hands to the outcome store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub game: GameKind,
    /// Game specific score: tile score, move count or points.
    pub score: u32,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub completed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "first_win")]
    FirstWin,
    #[serde(rename = "10_games")]
    TenGames,
    #[serde(rename = "100_points")]
    HundredPoints,
}

/// Cumulative totals kept per player by the outcome store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_points: u32,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    #[serde(default)]
    pub badges: BTreeSet<Badge>,
}

impl PlayerStats {
    /// Folds `outcome` into the totals and returns the badges it unlocked.
    pub fn apply(&mut self, outcome: &GameOutcome) -> SmallVec<[Badge; 3]> {
        self.total_points = self.total_points.saturating_add(outcome.points);
        self.games_played += 1;
        if outcome.completed {
            self.games_won += 1;
        } else {
            self.games_lost += 1;
        }

        let mut earned = SmallVec::new();
        let mut award = |badge: Badge, stats: &mut Self| {
            if stats.badges.insert(badge) {
                log::debug!("badge earned: {:?}", badge);
                earned.push(badge);
            }
        };

        if self.games_played == 1 && outcome.completed {
            award(Badge::FirstWin, self);
        }
        if self.games_played >= 10 {
            award(Badge::TenGames, self);
        }
        if self.total_points >= 100 {
            award(Badge::HundredPoints, self);
        }

        earned
    }
}
