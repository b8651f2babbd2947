//! Match history viewer core: player page orchestration, favorites, match
//! scoreboards and their text rendering on top of the backend client.

pub mod app;
pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod generation;
pub mod logging;
pub mod player;
pub mod render;
pub mod routes;

#[cfg(test)]
mod testing;

pub use app::App;
pub use error::AppError;
pub use player::{FanOutFailure, FanOutSource, LoadStatus, PlayerDataOrchestrator, PlayerPage, PlayerRequest};
