pub mod commands;
pub mod constants;
pub mod database;
pub mod economy;
pub mod error;
pub mod handler;
pub mod model;
pub mod sweep;
pub mod util;

pub use model::AppState;
