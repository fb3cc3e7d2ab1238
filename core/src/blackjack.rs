//! Single-deck blackjack rounds against a dealer standing on 17.

use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

pub const BLACKJACK: u32 = 21;
pub const DEALER_STANDS_AT: u32 = 17;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    pub const fn symbol(self) -> char {
        match self {
            Self::Spades => '♠',
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Face value with aces counted high.
    pub const fn value(self) -> u32 {
        match self {
            Self::Ace => 11,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Hand total with aces demoted from 11 to 1 while the hand is over 21.
pub fn hand_value(cards: &[Card]) -> u32 {
    let mut total: u32 = cards.iter().map(|card| card.rank.value()).sum();
    let mut soft_aces = cards.iter().filter(|card| card.rank == Rank::Ace).count();
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    total
}

/// Cards left to draw, the top of the deck is the end of the vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in suit then rank order.
    pub fn ordered() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Deck that deals `cards` front to back.
    pub fn stacked(cards: &[Card]) -> Self {
        Self {
            cards: cards.iter().rev().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Win,
    Draw,
    Loss,
}

/// One round from the deal to the settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackRound {
    deck: Deck,
    player: Vec<Card>,
    dealer: Vec<Card>,
    result: Option<RoundResult>,
}

impl BlackjackRound {
    pub fn deal<R: RandomSource>(rng: &mut R) -> Self {
        Self::deal_from(Deck::shuffled(rng))
    }

    /// Two cards to the player, then two to the dealer. A natural 21 on
    /// either side settles the round at once.
    pub fn deal_from(mut deck: Deck) -> Self {
        let player = deck.draw().into_iter().chain(deck.draw()).collect();
        let dealer = deck.draw().into_iter().chain(deck.draw()).collect();
        let mut round = Self {
            deck,
            player,
            dealer,
            result: None,
        };

        let player_natural = round.player_total() == BLACKJACK;
        let dealer_natural = round.dealer_total() == BLACKJACK;
        match (player_natural, dealer_natural) {
            (true, true) => round.settle(RoundResult::Draw),
            (true, false) => round.settle(RoundResult::Win),
            (false, true) => round.settle(RoundResult::Loss),
            (false, false) => {}
        }
        round
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer
    }

    /// The dealer's face-up card while the round is in play.
    pub fn dealer_upcard(&self) -> Option<Card> {
        self.dealer.first().copied()
    }

    pub fn player_total(&self) -> u32 {
        hand_value(&self.player)
    }

    pub fn dealer_total(&self) -> u32 {
        hand_value(&self.dealer)
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn settle(&mut self, result: RoundResult) {
        log::debug!(
            "round settled {:?}: player {} dealer {}",
            result,
            self.player_total(),
            self.dealer_total()
        );
        self.result = Some(result);
    }

    /// Player draws one card, going over 21 loses the round.
    ///
    /// An empty deck settles the round as a stand would and returns
    /// [`GameError::DeckExhausted`]; the result is then in [`Self::result`].
    pub fn hit(&mut self) -> Result<Card> {
        self.check_not_finished()?;

        let Some(card) = self.deck.draw() else {
            self.stand()?;
            return Err(GameError::DeckExhausted);
        };
        self.player.push(card);
        if self.player_total() > BLACKJACK {
            self.settle(RoundResult::Loss);
        }
        Ok(card)
    }

    /// Dealer draws below 17, then totals are compared.
    pub fn stand(&mut self) -> Result<RoundResult> {
        self.check_not_finished()?;

        while self.dealer_total() < DEALER_STANDS_AT {
            let Some(card) = self.deck.draw() else {
                log::warn!("deck ran out while the dealer was drawing");
                break;
            };
            self.dealer.push(card);
        }

        let (player, dealer) = (self.player_total(), self.dealer_total());
        let result = if dealer > BLACKJACK || player > dealer {
            RoundResult::Win
        } else if player < dealer {
            RoundResult::Loss
        } else {
            RoundResult::Draw
        };
        self.settle(result);
        Ok(result)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.result.map(|result| {
            let points = blackjack_points(result);
            GameOutcome {
                game: GameKind::Blackjack,
                score: points,
                points,
                difficulty: None,
                completed: result == RoundResult::Win,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Rank::*;

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&rank| Card::new(rank, Suit::Hearts)).collect()
    }

    fn round(ranks: &[Rank]) -> BlackjackRound {
        BlackjackRound::deal_from(Deck::stacked(&cards(ranks)))
    }

    #[test]
    fn aces_are_demoted_only_when_needed() {
        assert_eq!(hand_value(&cards(&[Ace, King])), 21);
        assert_eq!(hand_value(&cards(&[Ace, Ace])), 12);
        assert_eq!(hand_value(&cards(&[Ace, Ace, Nine])), 21);
        assert_eq!(hand_value(&cards(&[Ace, Six, Nine])), 16);
        assert_eq!(hand_value(&cards(&[King, Queen, Five])), 25);
    }

    #[test]
    fn shuffled_deck_has_every_card_once() {
        let mut deck = Deck::shuffled(&mut SeededRandom::new(11));
        let mut seen = Vec::new();

        while let Some(card) = deck.draw() {
            assert!(!seen.contains(&card));
            seen.push(card);
        }

        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn naturals_settle_on_the_deal() {
        assert_eq!(round(&[Ace, King, Nine, Seven]).result(), Some(RoundResult::Win));
        assert_eq!(round(&[Nine, Seven, Ace, Queen]).result(), Some(RoundResult::Loss));
        assert_eq!(round(&[Ace, Jack, Ace, Ten]).result(), Some(RoundResult::Draw));
        assert_eq!(round(&[Nine, Seven, Ten, Seven]).result(), None);
    }

    #[test]
    fn busting_loses_and_ends_the_round() {
        let mut round = round(&[Ten, Six, Ten, Seven, King]);

        assert_eq!(round.hit().unwrap().rank, King);
        assert_eq!(round.result(), Some(RoundResult::Loss));
        assert_eq!(round.stand(), Err(GameError::AlreadyEnded));
        assert_eq!(round.outcome().unwrap().points, 0);
    }

    #[test]
    fn dealer_draws_to_seventeen_and_can_bust() {
        let mut round = round(&[Ten, Eight, Ten, Four, Nine]);

        assert_eq!(round.stand().unwrap(), RoundResult::Win);
        assert_eq!(round.dealer_total(), 23);
        let outcome = round.outcome().unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.points, 10);
    }

    #[test]
    fn stand_compares_totals() {
        let mut higher = round(&[Ten, Seven, Ten, Eight]);
        assert_eq!(higher.stand().unwrap(), RoundResult::Loss);

        let mut equal = round(&[Ten, Eight, Nine, Nine]);
        assert_eq!(equal.stand().unwrap(), RoundResult::Draw);
        assert_eq!(equal.outcome().unwrap().points, 5);
        assert!(!equal.outcome().unwrap().completed);
    }

    #[test]
    fn hitting_an_empty_deck_settles_the_round() {
        let mut round = round(&[Ten, Six, Ten, Seven]);

        assert_eq!(round.hit(), Err(GameError::DeckExhausted));
        assert_eq!(round.result(), Some(RoundResult::Loss));
        assert_eq!(round.player_hand().len(), 2);
        assert_eq!(round.hit(), Err(GameError::AlreadyEnded));
    }
}
