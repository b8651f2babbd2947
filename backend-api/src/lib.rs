//! Typed client for the matchlens backend API.
//!
//! The backend is a thin proxy in front of the Riot Games API plus a small
//! favorites store. Each endpoint family is a trait with default methods built
//! on [`api::client::ApiRequest`], so any transport able to perform a raw
//! request gets the whole API. [`ddragon::AssetVersionResolver`] resolves the
//! versioned CDN metadata shared by every icon URL.

pub mod api;
pub mod ddragon;
pub mod types;

pub use api::{BackendApiFull, BackendClient};
pub use types::{ApiResponse, BackendApiError};
