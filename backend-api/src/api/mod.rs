use std::{num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;

use crate::types::ApiResponse;

pub mod client;
pub mod favorites;
pub mod matches;
pub mod metrics;
pub mod ranked;
pub mod stats;
pub mod summoner;

pub use client::{ApiClientBase, ApiRequest};
pub use favorites::FavoritesApi;
pub use matches::MatchApi;
pub use metrics::RequestMetrics;
pub use ranked::RankedApi;
pub use stats::StatsApi;
pub use summoner::AccountApi;

/// Every backend endpoint the viewer relies on.
pub trait BackendApiFull: AccountApi + MatchApi + StatsApi + RankedApi + FavoritesApi {}

/// High level client implementing all backend APIs.
#[derive(Debug)]
pub struct BackendClient(ApiClientBase);

impl BackendClient {
    pub fn new(base_url: impl Into<String>, requests_per_second: NonZeroU32) -> Self {
        Self(ApiClientBase::new(base_url, requests_per_second))
    }

    pub fn base_url(&self) -> &str {
        self.0.base_url()
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.0.metrics.clone()
    }
}

#[async_trait]
impl ApiRequest for BackendClient {
    async fn request(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> ApiResponse<Bytes> {
        self.0.request(method, path, body).await
    }
}

impl AccountApi for BackendClient {}
impl MatchApi for BackendClient {}
impl StatsApi for BackendClient {}
impl RankedApi for BackendClient {}
impl FavoritesApi for BackendClient {}
impl BackendApiFull for BackendClient {}
