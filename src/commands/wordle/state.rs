//! The Wordle session state machine and guess scoring.
//!
//! Sessions are keyed per channel in `AppState`; a terminal guess removes
//! the entry so the next invocation starts a fresh word.

use crate::error::GameError;

pub const WORD_LEN: usize = 5;
pub const MAX_TRIES: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterScore {
    /// Right letter, right position.
    Green,
    /// Right letter, wrong position, with copies still unaccounted for.
    Yellow,
    /// Letter not present (or all copies already consumed).
    Gray,
}

impl LetterScore {
    pub fn emoji(self) -> &'static str {
        match self {
            LetterScore::Green => "🟩",
            LetterScore::Yellow => "🟨",
            LetterScore::Gray => "⬛",
        }
    }
}

/// Scores a guess against the secret in one left-to-right pass over a
/// remaining-letter multiset: a green consumes a copy, otherwise a yellow
/// consumes one if any remain, otherwise gray. Both inputs must be uppercase
/// ASCII of equal length.
pub fn score_guess(secret: &str, guess: &str) -> Vec<LetterScore> {
    let secret_bytes = secret.as_bytes();
    let guess_bytes = guess.as_bytes();

    let mut remaining = [0u8; 26];
    for &b in secret_bytes {
        if b.is_ascii_uppercase() {
            remaining[(b - b'A') as usize] += 1;
        }
    }

    let mut scores = Vec::with_capacity(guess_bytes.len());
    for (i, &b) in guess_bytes.iter().enumerate() {
        if !b.is_ascii_uppercase() {
            scores.push(LetterScore::Gray);
            continue;
        }
        let slot = (b - b'A') as usize;
        if secret_bytes.get(i) == Some(&b) {
            scores.push(LetterScore::Green);
            remaining[slot] = remaining[slot].saturating_sub(1);
        } else if remaining[slot] > 0 {
            scores.push(LetterScore::Yellow);
            remaining[slot] -= 1;
        } else {
            scores.push(LetterScore::Gray);
        }
    }
    scores
}

/// Rejects guesses that are not exactly five ASCII letters. Dictionary
/// membership is checked separately by the word client.
pub fn validate_shape(guess: &str) -> Result<(), GameError> {
    if guess.len() != WORD_LEN || !guess.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidGuess(
            "Please enter a valid 5-letter English word".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct GuessRecord {
    pub guess: String,
    pub scores: Vec<LetterScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Won,
    Lost,
    InProgress,
}

pub struct WordleSession {
    secret: String,
    tries_left: u8,
    history: Vec<GuessRecord>,
}

impl WordleSession {
    /// Starts a session around an already-validated uppercase secret.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            tries_left: MAX_TRIES,
            history: Vec::new(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn tries_left(&self) -> u8 {
        self.tries_left
    }

    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Consumes a try for an uppercase guess that already passed validation
    /// (or matches the secret exactly, which wins unconditionally).
    pub fn apply_guess(&mut self, guess: String) -> TurnOutcome {
        self.tries_left = self.tries_left.saturating_sub(1);

        let scores = score_guess(&self.secret, &guess);
        let won = guess == self.secret;
        self.history.push(GuessRecord { guess, scores });

        if won {
            TurnOutcome::Won
        } else if self.tries_left == 0 {
            TurnOutcome::Lost
        } else {
            TurnOutcome::InProgress
        }
    }
}
