//! The shared game engine and card utilities used by all games.

pub mod card;
pub mod deck;
pub mod engine;

pub use engine::{Game, GameManager, GameUpdate};
