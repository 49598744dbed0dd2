//! Data structures and pure rules for a single-player blackjack round.

use crate::commands::games::card::Card;
use crate::commands::games::deck::Deck;
use crate::constants::{BLACKJACK_TARGET, DEALER_STAND_MIN};
use crate::economy::wager::Wager;
use serenity::model::user::User;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    PlayerTurn,
    DealerTurn,
    Resolved,
}

/// How a resolved round ended, for rendering and settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    /// Initial two-card 21; pays 1.5x the wager.
    NaturalWin,
    Win,
    Push,
    Loss,
    Bust,
    TimedOut,
}

pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Sum of ranks with aces counted as 11, then demoted to 1 one at a time
    /// while the total is over 21.
    pub fn value(&self) -> u8 {
        let mut total: u8 = 0;
        let mut high_aces = 0;
        for card in &self.cards {
            let (value, is_ace) = card.rank.blackjack_value();
            total = total.saturating_add(value);
            if is_ace {
                high_aces += 1;
            }
        }
        while total > BLACKJACK_TARGET && high_aces > 0 {
            total -= 10;
            high_aces -= 1;
        }
        total
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK_TARGET
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK_TARGET
    }

    pub fn display(&self) -> String {
        self.cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BlackjackRound {
    pub player: Arc<User>,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub deck: Deck,
    /// Taken out at settlement time; `None` once the round has settled.
    pub wager: Option<Wager>,
    pub bet_amount: i64,
    pub phase: RoundPhase,
    pub result: Option<RoundResult>,
    pub last_drawn: Option<Card>,
    pub last_action: Instant,
}

impl BlackjackRound {
    /// Deals two cards each to player and dealer from a fresh shuffled deck.
    pub fn deal(player: Arc<User>, wager: Wager) -> Self {
        let mut deck = Deck::shuffled();
        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        for _ in 0..2 {
            if let Some(card) = deck.draw() {
                player_hand.add_card(card);
            }
            if let Some(card) = deck.draw() {
                dealer_hand.add_card(card);
            }
        }
        let bet_amount = wager.amount();
        Self {
            player,
            player_hand,
            dealer_hand,
            deck,
            wager: Some(wager),
            bet_amount,
            phase: RoundPhase::PlayerTurn,
            result: None,
            last_drawn: None,
            last_action: Instant::now(),
        }
    }

    /// Draws one card for the player. Busting resolves the round.
    pub fn hit(&mut self) {
        if let Some(card) = self.deck.draw() {
            self.player_hand.add_card(card);
            self.last_drawn = Some(card);
        }
        if self.player_hand.is_bust() {
            self.resolve(RoundResult::Bust);
        } else {
            self.last_action = Instant::now();
        }
    }

    /// Stands: the dealer draws to 17+ and the round is judged.
    pub fn stand(&mut self) {
        self.phase = RoundPhase::DealerTurn;
        while self.dealer_hand.value() < DEALER_STAND_MIN {
            match self.deck.draw() {
                Some(card) => self.dealer_hand.add_card(card),
                None => break,
            }
        }
        let result = judge(self.player_hand.value(), self.dealer_hand.value());
        self.resolve(result);
    }

    pub fn resolve(&mut self, result: RoundResult) {
        self.phase = RoundPhase::Resolved;
        self.result = Some(result);
    }

    pub fn is_resolved(&self) -> bool {
        self.phase == RoundPhase::Resolved
    }

    /// The 1.5x payout for a natural, floored.
    pub fn natural_payout(&self) -> i64 {
        self.bet_amount * 3 / 2
    }
}

/// Compares final totals once the dealer has played out their hand.
pub fn judge(player_value: u8, dealer_value: u8) -> RoundResult {
    if dealer_value > BLACKJACK_TARGET
        || (player_value <= BLACKJACK_TARGET && player_value > dealer_value)
    {
        RoundResult::Win
    } else if player_value == dealer_value {
        RoundResult::Push
    } else {
        RoundResult::Loss
    }
}
