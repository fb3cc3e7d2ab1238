use anyhow::bail;
use arcade_core::blackjack::{BlackjackRound, Card, RoundResult};
use arcade_core::{GameOutcome, SeededRandom};

use super::Play;

pub struct BlackjackPlay {
    round: BlackjackRound,
}

impl BlackjackPlay {
    pub fn new(rng: &mut SeededRandom) -> Self {
        Self::from_round(BlackjackRound::deal(rng))
    }

    pub fn from_round(round: BlackjackRound) -> Self {
        Self { round }
    }
}

fn hand(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Play for BlackjackPlay {
    fn render(&self) -> String {
        let dealer = if self.round.is_finished() {
            format!(
                "{} ({})",
                hand(self.round.dealer_hand()),
                self.round.dealer_total()
            )
        } else {
            let upcard = self.round.dealer_upcard().map(|card| card.to_string());
            format!("{} ??", upcard.unwrap_or_default())
        };

        let mut text = format!(
            "dealer: {}\nyou:    {} ({})\n",
            dealer,
            hand(self.round.player_hand()),
            self.round.player_total()
        );
        if let Some(result) = self.round.result() {
            let verdict = match result {
                RoundResult::Win => "you win",
                RoundResult::Draw => "push",
                RoundResult::Loss => "dealer wins",
            };
            text.push_str(verdict);
            text.push('\n');
        }
        text
    }

    fn usage(&self) -> &'static str {
        "hit (h) draws a card, stand (s) ends your turn, quit to stop"
    }

    fn apply(&mut self, command: &str, _rng: &mut SeededRandom) -> anyhow::Result<Option<String>> {
        match command {
            "h" | "hit" => {
                let card = self.round.hit()?;
                Ok(Some(format!("you draw {}", card)))
            }
            "s" | "stand" => {
                self.round.stand()?;
                Ok(None)
            }
            other => bail!("unknown command {:?}", other),
        }
    }

    fn is_finished(&self) -> bool {
        self.round.is_finished()
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.round.outcome()
    }
}
