//! Client for the external word source: random secret words and dictionary
//! validity lookups against the Wordnik API.

use crate::constants::{WORD_FETCH_ATTEMPTS, WORD_REQUEST_TIMEOUT_SECS};
use crate::error::GameError;
use serde::Deserialize;
use std::time::Duration;

const RANDOM_WORD_URL: &str = "https://api.wordnik.com/v4/words.json/randomWord";
const DEFINITIONS_URL: &str = "https://api.wordnik.com/v4/word.json";

#[derive(Deserialize)]
struct RandomWordResponse {
    word: String,
}

#[derive(Clone)]
pub struct WordClient {
    http: reqwest::Client,
    api_key: String,
}

impl WordClient {
    pub fn new(api_key: String) -> Self {
        // A hung lookup must fail the guess, not sit pending forever.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(WORD_REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { http, api_key }
    }

    /// Fetches a random secret word: five ASCII letters, no trailing 'S'
    /// (avoids trivial plurals). Retries a bounded number of times for
    /// unsuitable words; transport failures surface as a retryable error
    /// rather than starting a session with an empty secret.
    pub async fn random_word(&self) -> Result<String, GameError> {
        for _ in 0..WORD_FETCH_ATTEMPTS {
            let response = self
                .http
                .get(RANDOM_WORD_URL)
                .query(&[
                    ("minLength", "5"),
                    ("maxLength", "5"),
                    ("api_key", self.api_key.as_str()),
                ])
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| GameError::ExternalLookup(e.to_string()))?;
            let body: RandomWordResponse = response
                .json()
                .await
                .map_err(|e| GameError::ExternalLookup(e.to_string()))?;

            let word = body.word.to_uppercase();
            if is_suitable_secret(&word) {
                return Ok(word);
            }
        }
        Err(GameError::ExternalLookup(
            "no suitable word after bounded retries".to_string(),
        ))
    }

    /// Dictionary check for a guess: a word counts as valid when the
    /// definitions endpoint answers successfully. Transport failures and
    /// trailing-'S' words are treated as invalid.
    pub async fn is_valid_word(&self, word: &str) -> bool {
        if word.to_uppercase().ends_with('S') {
            return false;
        }
        let url = format!("{}/{}/definitions", DEFINITIONS_URL, word.to_lowercase());
        match self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response.error_for_status().is_ok(),
            Err(e) => {
                tracing::warn!(target: "wordle", error = %e, "dictionary lookup failed");
                false
            }
        }
    }
}

fn is_suitable_secret(word: &str) -> bool {
    word.len() == 5 && word.chars().all(|c| c.is_ascii_alphabetic()) && !word.ends_with('S')
}
