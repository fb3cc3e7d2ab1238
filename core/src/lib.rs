#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use difficulty::*;
pub use error::*;
pub use rng::*;
pub use scoring::*;
pub use types::*;

pub mod blackjack;
mod difficulty;
mod error;
pub mod minefield;
mod rng;
mod scoring;
pub mod slider;
pub mod sudoku;
pub mod tiles;
mod types;

/// Lifecycle shared by every single-player session.
///
/// Valid transitions:
/// - Ready -> Active
/// - Ready -> Won
/// - Ready -> Lost
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Board is set up, no move made yet
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub(crate) fn check_not_finished(self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    pub(crate) fn mark_started(&mut self) {
        if self.is_ready() {
            log::debug!("session started");
            *self = Self::Active;
        }
    }

    pub(crate) fn end(&mut self, won: bool) {
        if self.is_finished() {
            return;
        }
        *self = if won { Self::Won } else { Self::Lost };
        log::debug!("session ended: {:?}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_sticky() {
        let mut state = SessionState::Ready;

        state.mark_started();
        state.end(false);
        state.end(true);

        assert_eq!(state, SessionState::Lost);
        assert_eq!(state.check_not_finished(), Err(GameError::AlreadyEnded));
    }
}
