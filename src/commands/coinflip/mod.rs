pub mod game;
pub mod run;
