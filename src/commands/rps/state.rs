//! Moves and the beats-relation for rock-paper-scissors.

use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn emoji(self) -> &'static str {
        match self {
            Move::Rock => "🪨",
            Move::Paper => "📄",
            Move::Scissors => "✂️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }

    /// The standard cyclic relation: rock > scissors > paper > rock.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper)
        )
    }

    pub fn random() -> Move {
        *Move::ALL
            .choose(&mut rand::rng())
            .unwrap_or(&Move::Rock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelResult {
    Win,
    Loss,
    Tie,
}

pub fn duel(player: Move, house: Move) -> DuelResult {
    if player == house {
        DuelResult::Tie
    } else if player.beats(house) {
        DuelResult::Win
    } else {
        DuelResult::Loss
    }
}
