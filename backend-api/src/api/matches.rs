use async_trait::async_trait;
use matchlens_shared::{
    Region,
    lol_match::{MatchDetail, MatchSummary},
};
use reqwest::Method;
use urlencoding::encode;

use crate::types::ApiResponse;

use super::client::{ApiRequest, decode, decode_list};

#[async_trait]
pub trait MatchApi: ApiRequest {
    /// Most recent matches first, as ordered by the backend.
    async fn get_match_summaries(
        &self,
        puuid: &str,
        region: Region,
        count: usize,
    ) -> ApiResponse<Vec<MatchSummary>> {
        tracing::trace!("[BACKEND::CLIENT] get_match_summaries {} in {}", puuid, region);

        let path = format!(
            "/api/matches/summary?puuid={}&region={}&count={}",
            encode(puuid),
            region,
            count
        );

        let bytes = self.request(Method::GET, path, None).await?;
        decode_list(&bytes, "match summaries")
    }

    async fn get_match_detail(&self, match_id: &str, region: Region) -> ApiResponse<MatchDetail> {
        tracing::trace!("[BACKEND::CLIENT] get_match_detail {} in {}", match_id, region);

        let path = format!(
            "/api/matches/full-detail?matchId={}&region={}",
            encode(match_id),
            region
        );

        let bytes = self.request(Method::GET, path, None).await?;
        decode(&bytes)
    }
}
