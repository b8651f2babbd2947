use async_trait::async_trait;
use matchlens_shared::{Region, stats::PlayerStats};
use reqwest::Method;
use urlencoding::encode;

use crate::types::ApiResponse;

use super::client::{ApiRequest, decode};

#[async_trait]
pub trait StatsApi: ApiRequest {
    /// Server side aggregate over the `count` most recent matches.
    async fn get_stats(&self, puuid: &str, region: Region, count: usize) -> ApiResponse<PlayerStats> {
        tracing::trace!("[BACKEND::CLIENT] get_stats {} in {}", puuid, region);

        let path = format!(
            "/api/stats?puuid={}&region={}&count={}",
            encode(puuid),
            region,
            count
        );

        let bytes = self.request(Method::GET, path, None).await?;
        decode(&bytes)
    }
}
