use std::env;
use std::num::NonZeroU32;

use matchlens_backend_api::ddragon::{
    AssetSources, DEFAULT_AUGMENTS_URL, DEFAULT_FALLBACK_VERSION, DEFAULT_VERSIONS_URL,
};
use matchlens_shared::stats::DEFAULT_MATCH_WINDOW;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_base_url: String,
    pub match_count: usize,
    pub backend_rate_limit_per_second: NonZeroU32,
    pub assets: AssetSources,
}

const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_BACKEND_RATE_LIMIT_PER_SECOND: u32 = 20;

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Unparsable numbers fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let backend_base_url = lookup("BACKEND_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.into());

        if !(backend_base_url.starts_with("http://") || backend_base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "BACKEND_BASE_URL must be an http(s) URL, got {backend_base_url}"
            )));
        }

        let match_count = lookup("MATCH_COUNT")
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or(DEFAULT_MATCH_WINDOW);

        let backend_rate_limit_per_second = lookup("BACKEND_RATE_LIMIT_PER_SECOND")
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_BACKEND_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let assets = AssetSources {
            versions_url: lookup("DDRAGON_VERSIONS_URL")
                .unwrap_or_else(|| DEFAULT_VERSIONS_URL.into()),
            augments_url: lookup("CDRAGON_AUGMENTS_URL")
                .unwrap_or_else(|| DEFAULT_AUGMENTS_URL.into()),
            fallback_version: lookup("DDRAGON_FALLBACK_VERSION")
                .unwrap_or_else(|| DEFAULT_FALLBACK_VERSION.into()),
        };

        Ok(Self {
            backend_base_url,
            match_count,
            backend_rate_limit_per_second,
            assets,
        })
    }
}
