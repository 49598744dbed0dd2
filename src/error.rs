//! The error type shared by the economy and game layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The bet did not parse as a positive integer.
    #[error("invalid bet amount")]
    InvalidAmount,
    /// The bet exceeds the account balance.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// A game parameter fell outside its accepted band.
    #[error("value out of range: {0}")]
    InvalidRange(&'static str),
    /// A wordle guess failed shape or dictionary validation.
    #[error("{0}")]
    InvalidGuess(String),
    /// The player made no choice within the decision window.
    #[error("decision timed out")]
    DecisionTimeout,
    /// The external word source could not supply a usable word.
    #[error("word lookup failed: {0}")]
    ExternalLookup(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GameError {
    /// The reply text shown to the player. Internal failures get a generic
    /// line; the details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            GameError::InvalidAmount => "Please enter a valid bet amount.".to_string(),
            GameError::InsufficientFunds => {
                "You don't have enough chips to place that bet.".to_string()
            }
            GameError::InvalidRange(band) => format!("Invalid number range.\n{}", band),
            GameError::InvalidGuess(message) => message.clone(),
            GameError::DecisionTimeout => {
                "Took too long to pick, please try again.".to_string()
            }
            GameError::ExternalLookup(_) => {
                "Couldn't fetch a word right now, please try again.".to_string()
            }
            GameError::Database(_) => "Something went wrong. Please try again later.".to_string(),
        }
    }
}
