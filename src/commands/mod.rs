pub mod balance;
pub mod blackjack;
pub mod claim;
pub mod coinflip;
pub mod dice;
pub mod games;
pub mod help;
pub mod leaderboard;
pub mod rps;
pub mod wordle;
