use async_trait::async_trait;
use matchlens_shared::{RankedEntry, Region};
use reqwest::Method;
use urlencoding::encode;

use crate::types::ApiResponse;

use super::client::{ApiRequest, decode_list};

#[async_trait]
pub trait RankedApi: ApiRequest {
    async fn get_ranked(&self, puuid: &str, region: Region) -> ApiResponse<Vec<RankedEntry>> {
        tracing::trace!("[BACKEND::CLIENT] get_ranked {} in {}", puuid, region);

        let path = format!("/api/ranked?puuid={}&region={}", encode(puuid), region);

        let bytes = self.request(Method::GET, path, None).await?;
        decode_list(&bytes, "ranked entries")
    }
}
