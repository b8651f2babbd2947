use async_trait::async_trait;
use matchlens_shared::{Account, Region};
use reqwest::Method;
use urlencoding::encode;

use crate::types::ApiResponse;

use super::client::{ApiRequest, decode};

/// Account resolution by Riot ID.
#[async_trait]
pub trait AccountApi: ApiRequest {
    async fn get_account(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> ApiResponse<Account> {
        tracing::trace!("[BACKEND::CLIENT] get_account {}#{} in {}", game_name, tag_line, region);

        let path = format!(
            "/api/summoner?gameName={}&tag={}&region={}",
            encode(game_name),
            encode(tag_line),
            region
        );

        let bytes = self.request(Method::GET, path, None).await?;
        decode(&bytes)
    }
}
