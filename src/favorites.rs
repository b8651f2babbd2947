//! Client side view of the backend favorites store.

use std::sync::Arc;

use matchlens_backend_api::api::FavoritesApi;
use matchlens_shared::{FavoritePlayer, NewFavorite};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{error::AppError, generation::RequestGeneration};

/// Keeps the last fetched favorites list. The backend owns the data; every
/// mutation is followed by a refresh.
#[derive(Debug)]
pub struct FavoritesService<Api> {
    api: Arc<Api>,
    favorites: RwLock<Vec<FavoritePlayer>>,
    generation: RequestGeneration,
}

impl<Api: FavoritesApi> FavoritesService<Api> {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            api,
            favorites: RwLock::new(Vec::new()),
            generation: RequestGeneration::new(),
        }
    }

    /// Last fetched list, most recent call wins.
    pub async fn favorites(&self) -> Vec<FavoritePlayer> {
        self.favorites.read().await.clone()
    }

    pub async fn refresh(&self) -> Result<Vec<FavoritePlayer>, AppError> {
        let ticket = self.generation.next();
        let favorites = self.api.list_favorites().await?;

        if self.generation.is_current(ticket) {
            *self.favorites.write().await = favorites.clone();
        } else {
            debug!("favorites refresh superseded, dropping result");
        }
        Ok(favorites)
    }

    /// Duplicates are rejected by the backend and surface as its message.
    #[instrument(skip(self, favorite), fields(puuid = %favorite.puuid))]
    pub async fn add(&self, favorite: &NewFavorite) -> Result<FavoritePlayer, AppError> {
        let saved = self.api.add_favorite(favorite).await?;
        info!("⭐ {}#{} saved", saved.game_name, saved.tag_line);

        self.refresh_quietly().await;
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, puuid: &str) -> Result<(), AppError> {
        self.api.remove_favorite(puuid).await?;
        info!("🗑️ favorite removed");

        self.refresh_quietly().await;
        Ok(())
    }

    /// `false` when the backend cannot answer.
    pub async fn is_favorite(&self, puuid: &str) -> bool {
        match self.api.check_favorite(puuid).await {
            Ok(flag) => flag,
            Err(e) => {
                warn!(puuid, error = %e, "⚠️ favorite check failed");
                false
            }
        }
    }

    // The mutation already succeeded, a stale list is not worth failing for.
    async fn refresh_quietly(&self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "⚠️ favorites refresh failed");
        }
    }
}
