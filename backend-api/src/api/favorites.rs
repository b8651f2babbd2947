use async_trait::async_trait;
use matchlens_shared::{FavoritePlayer, NewFavorite};
use reqwest::Method;
use serde::Deserialize;
use urlencoding::encode;

use crate::types::{ApiResponse, BackendApiError};

use super::client::{ApiRequest, decode, decode_list};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FavoriteCheckDto {
    #[serde(default)]
    is_favorite: bool,
}

/// Backend held list of saved players.
#[async_trait]
pub trait FavoritesApi: ApiRequest {
    async fn list_favorites(&self) -> ApiResponse<Vec<FavoritePlayer>> {
        tracing::trace!("[BACKEND::CLIENT] list_favorites");

        let bytes = self.request(Method::GET, "/api/favorites".into(), None).await?;
        decode_list(&bytes, "favorites")
    }

    /// Any non-2xx answer means "not a favorite". Transport failures are
    /// still reported.
    async fn check_favorite(&self, puuid: &str) -> ApiResponse<bool> {
        tracing::trace!("[BACKEND::CLIENT] check_favorite {}", puuid);

        let path = format!("/api/favorites/check/{}", encode(puuid));

        match self.request(Method::GET, path, None).await {
            Ok(bytes) => Ok(decode::<FavoriteCheckDto>(&bytes)
                .map(|dto| dto.is_favorite)
                .unwrap_or(false)),
            Err(BackendApiError::Status { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn add_favorite(&self, favorite: &NewFavorite) -> ApiResponse<FavoritePlayer> {
        tracing::trace!("[BACKEND::CLIENT] add_favorite {}", favorite.puuid);

        let body = serde_json::to_value(favorite)?;
        let bytes = self
            .request(Method::POST, "/api/favorites".into(), Some(body))
            .await?;
        decode(&bytes)
    }

    async fn remove_favorite(&self, puuid: &str) -> ApiResponse<()> {
        tracing::trace!("[BACKEND::CLIENT] remove_favorite {}", puuid);

        let path = format!("/api/favorites/{}", encode(puuid));
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }
}
