//! A standard 52-card deck, shuffled per round.
//!
//! Drawing pops from a shuffled vector, which is sampling without
//! replacement: a round can never see the same card twice.

use super::card::{Card, Rank, Suit};
use rand::seq::SliceRandom;

pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds a fresh 52-card deck in random order.
    pub fn shuffled() -> Self {
        let suits = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
        let ranks = [
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ];

        let mut cards = Vec::with_capacity(52);
        for &suit in &suits {
            for &rank in &ranks {
                cards.push(Card { suit, rank });
            }
        }
        cards.shuffle(&mut rand::rng());
        Deck { cards }
    }

    /// Draws one card. `None` only if the deck is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
