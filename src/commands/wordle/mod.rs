pub mod run;
pub mod state;
pub mod words;
