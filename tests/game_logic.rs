//! Unit tests for the pure game rules: hand scoring, the dealer judge, dice
//! odds, rps duels, wordle scoring and the claim cooldown policy.

use chiphouse_bot::commands::blackjack::state::{judge, Hand, RoundResult};
use chiphouse_bot::commands::dice::{
    is_winning_roll, net_winnings, payout_multiplier, roll_number, DiceSide,
};
use chiphouse_bot::commands::games::card::{Card, Rank, Suit};
use chiphouse_bot::commands::games::deck::Deck;
use chiphouse_bot::commands::rps::state::{duel, DuelResult, Move};
use chiphouse_bot::commands::wordle::state::{
    score_guess, validate_shape, LetterScore, TurnOutcome, WordleSession, MAX_TRIES,
};
use chiphouse_bot::economy::cooldown::{self, Claimability, ClaimKind};
use chiphouse_bot::error::GameError;
use chiphouse_bot::sweep::sweep_due;
use chiphouse_bot::util::{chips_noun, format_wait};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;

fn hand_of(ranks: &[Rank]) -> Hand {
    let mut hand = Hand::new();
    for &rank in ranks {
        hand.add_card(Card {
            suit: Suit::Spades,
            rank,
        });
    }
    hand
}

#[test]
fn hand_value_demotes_aces() {
    assert_eq!(hand_of(&[Rank::Ace, Rank::Ace]).value(), 12);
    assert_eq!(hand_of(&[Rank::Ace, Rank::Nine, Rank::Ace]).value(), 21);
    assert_eq!(hand_of(&[Rank::King, Rank::Queen]).value(), 20);
    assert_eq!(hand_of(&[Rank::Ace, Rank::King, Rank::Five]).value(), 16);
}

#[test]
fn natural_needs_exactly_two_cards() {
    assert!(hand_of(&[Rank::Ace, Rank::King]).is_blackjack());
    assert!(!hand_of(&[Rank::Ten, Rank::Five, Rank::Six]).is_blackjack());
    assert!(!hand_of(&[Rank::Ten, Rank::Nine]).is_blackjack());
}

#[test]
fn busting_over_twentyone() {
    assert!(hand_of(&[Rank::King, Rank::Queen, Rank::Five]).is_bust());
    assert!(!hand_of(&[Rank::King, Rank::Ace]).is_bust());
}

#[test]
fn judge_covers_all_endings() {
    assert_eq!(judge(18, 22), RoundResult::Win);
    assert_eq!(judge(20, 18), RoundResult::Win);
    assert_eq!(judge(20, 20), RoundResult::Push);
    assert_eq!(judge(17, 20), RoundResult::Loss);
}

#[test]
fn deck_deals_52_unique_cards() {
    let mut deck = Deck::shuffled();
    let mut seen = HashSet::new();
    while let Some(card) = deck.draw() {
        assert!(seen.insert(card.to_string()));
    }
    assert_eq!(seen.len(), 52);
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn dice_multiplier_is_inverse_win_probability() {
    let over = payout_multiplier(DiceSide::Over, 50.0).unwrap();
    let under = payout_multiplier(DiceSide::Under, 50.0).unwrap();
    assert!((over - 2.0).abs() < 1e-9);
    assert!((under - 2.0).abs() < 1e-9);

    let long_shot = payout_multiplier(DiceSide::Over, 99.98).unwrap();
    assert!((long_shot - 5000.0).abs() < 1e-6);
}

#[test]
fn dice_rejects_thresholds_outside_the_bands() {
    assert!(matches!(
        payout_multiplier(DiceSide::Over, 5.0),
        Err(GameError::InvalidRange(_))
    ));
    assert!(matches!(
        payout_multiplier(DiceSide::Under, 95.0),
        Err(GameError::InvalidRange(_))
    ));
}

#[test]
fn dice_win_is_strict_inequality() {
    assert!(is_winning_roll(DiceSide::Over, 50.0, 50.01));
    assert!(!is_winning_roll(DiceSide::Over, 50.0, 50.0));
    assert!(is_winning_roll(DiceSide::Under, 50.0, 49.99));
    assert!(!is_winning_roll(DiceSide::Under, 50.0, 50.0));
}

#[test]
fn dice_roll_stays_in_range_with_two_decimals() {
    for _ in 0..200 {
        let roll = roll_number();
        assert!((0.01..=99.99).contains(&roll));
        assert!(((roll * 100.0).round() - roll * 100.0).abs() < 1e-9);
    }
}

#[test]
fn dice_net_winnings_round_before_subtracting() {
    assert_eq!(net_winnings(100, 2.0), 100);
    // 100 / (100 - 33) = 1.4925...; 150 * m = 223.88 rounds to 224.
    let m = payout_multiplier(DiceSide::Over, 33.0).unwrap();
    assert_eq!(net_winnings(150, m), 74);
}

#[test]
fn rps_beats_is_cyclic() {
    assert!(Move::Rock.beats(Move::Scissors));
    assert!(Move::Scissors.beats(Move::Paper));
    assert!(Move::Paper.beats(Move::Rock));
    assert!(!Move::Rock.beats(Move::Paper));
}

#[test]
fn rps_duel_outcomes() {
    assert_eq!(duel(Move::Rock, Move::Scissors), DuelResult::Win);
    assert_eq!(duel(Move::Rock, Move::Paper), DuelResult::Loss);
    assert_eq!(duel(Move::Rock, Move::Rock), DuelResult::Tie);
}

#[test]
fn wordle_scoring_consumes_letter_copies_left_to_right() {
    use LetterScore::*;
    assert_eq!(
        score_guess("SPEED", "ERASE"),
        vec![Yellow, Gray, Gray, Yellow, Yellow]
    );
    assert_eq!(
        score_guess("ABBEY", "BABES"),
        vec![Yellow, Yellow, Green, Green, Gray]
    );
    assert_eq!(
        score_guess("SPEED", "EERIE"),
        vec![Yellow, Yellow, Gray, Gray, Gray]
    );
}

#[test]
fn wordle_exact_match_is_all_green() {
    assert_eq!(
        score_guess("CRANE", "CRANE"),
        vec![LetterScore::Green; 5]
    );
}

#[test]
fn wordle_shape_validation() {
    assert!(validate_shape("crane").is_ok());
    assert!(matches!(
        validate_shape("cran3"),
        Err(GameError::InvalidGuess(_))
    ));
    assert!(validate_shape("cranes").is_err());
    assert!(validate_shape("cat").is_err());
}

#[test]
fn wordle_session_wins_on_exact_guess() {
    let mut session = WordleSession::new("CRANE".to_string());
    assert_eq!(session.apply_guess("SLOTH".to_string()), TurnOutcome::InProgress);
    assert_eq!(session.tries_left(), MAX_TRIES - 1);
    assert_eq!(session.apply_guess("CRANE".to_string()), TurnOutcome::Won);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn wordle_session_loses_after_max_tries() {
    let mut session = WordleSession::new("CRANE".to_string());
    for _ in 0..MAX_TRIES - 1 {
        assert_eq!(session.apply_guess("SLOTH".to_string()), TurnOutcome::InProgress);
    }
    assert_eq!(session.apply_guess("SLOTH".to_string()), TurnOutcome::Lost);
    assert_eq!(session.tries_left(), 0);
}

#[test]
fn hourly_claim_uses_a_rolling_hour() {
    let last = Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();

    let now = last + Duration::minutes(30);
    assert_eq!(
        cooldown::evaluate(ClaimKind::Hourly, last, now),
        Claimability::Wait(Duration::minutes(30))
    );

    let now = last + Duration::hours(1);
    assert_eq!(
        cooldown::evaluate(ClaimKind::Hourly, last, now),
        Claimability::Ready
    );
}

#[test]
fn daily_claim_gates_on_the_local_calendar_date() {
    // 23:50 and 00:10 local time straddle midnight in America/New_York even
    // though only twenty minutes of UTC time pass.
    let last = Utc.with_ymd_and_hms(2024, 6, 2, 3, 50, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 2, 4, 10, 0).unwrap();
    assert_eq!(
        cooldown::evaluate(ClaimKind::Daily, last, now),
        Claimability::Ready
    );

    // Same local date: the wait runs to the next local midnight.
    let last = Utc.with_ymd_and_hms(2024, 6, 2, 15, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 2, 20, 0, 0).unwrap();
    assert_eq!(
        cooldown::evaluate(ClaimKind::Daily, last, now),
        Claimability::Wait(Duration::hours(8))
    );
}

#[test]
fn claim_rewards_stay_in_their_ranges() {
    for _ in 0..100 {
        assert!((500..=2000).contains(&ClaimKind::Daily.roll_reward()));
        assert!((100..=200).contains(&ClaimKind::Hourly.roll_reward()));
    }
}

#[test]
fn sweep_waits_for_the_next_local_midnight() {
    // Marked at spawn on 2024-06-02 local time: nothing fires for the rest
    // of that local day, even right before midnight.
    let mark = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    let same_day = Utc.with_ymd_and_hms(2024, 6, 3, 3, 59, 0).unwrap(); // 23:59 local
    assert!(!sweep_due(mark, same_day));

    let past_midnight = Utc.with_ymd_and_hms(2024, 6, 3, 4, 1, 0).unwrap(); // 00:01 local
    assert!(sweep_due(mark, past_midnight));
}

#[test]
fn choice_timeout_reply_text() {
    assert_eq!(
        GameError::DecisionTimeout.user_message(),
        "Took too long to pick, please try again."
    );
}

#[test]
fn wait_formatting() {
    assert_eq!(format_wait(Duration::seconds(3661)), "1:01:01");
    assert_eq!(format_wait(Duration::seconds(59)), "0:00:59");
    assert_eq!(format_wait(Duration::hours(8)), "8:00:00");
    assert_eq!(format_wait(Duration::seconds(-5)), "0:00:00");
}

#[test]
fn chip_noun_pluralizes() {
    assert_eq!(chips_noun(1), "chip");
    assert_eq!(chips_noun(0), "chips");
    assert_eq!(chips_noun(250), "chips");
}
