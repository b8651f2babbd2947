//! Wires the backend client, the asset resolver and the page loaders
//! together and renders each page as text.

use std::sync::Arc;

use chrono::Utc;
use matchlens_backend_api::{
    BackendApiFull, BackendClient, api::RequestMetrics, ddragon::AssetVersionResolver,
};
use matchlens_shared::Region;
use tracing::{instrument, warn};

use crate::{
    config::Config,
    detail::MatchDetailLoader,
    error::AppError,
    favorites::FavoritesService,
    player::{PlayerDataOrchestrator, PlayerRequest},
    render::{AssetContext, FavoritesView, MatchView, PlayerView},
    routes::Route,
};

#[derive(Debug)]
pub struct App<Api> {
    api: Arc<Api>,
    resolver: Arc<AssetVersionResolver>,
    favorites: Arc<FavoritesService<Api>>,
    player: PlayerDataOrchestrator<Api>,
    details: MatchDetailLoader<Api>,
    show_icons: bool,
}

impl App<BackendClient> {
    pub fn from_config(config: &Config, match_count: usize, show_icons: bool) -> Self {
        let api = Arc::new(BackendClient::new(
            config.backend_base_url.clone(),
            config.backend_rate_limit_per_second,
        ));
        let resolver = Arc::new(AssetVersionResolver::new(config.assets.clone()));
        Self::new(api, resolver, match_count, show_icons)
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.api.metrics()
    }
}

impl<Api: BackendApiFull> App<Api> {
    pub fn new(
        api: Arc<Api>,
        resolver: Arc<AssetVersionResolver>,
        match_count: usize,
        show_icons: bool,
    ) -> Self {
        let favorites = Arc::new(FavoritesService::new(api.clone()));
        Self {
            resolver,
            player: PlayerDataOrchestrator::new(api.clone(), favorites.clone(), match_count),
            details: MatchDetailLoader::new(api.clone()),
            favorites,
            api,
            show_icons,
        }
    }

    pub async fn open(&self, route: &Route) -> Result<String, AppError> {
        match route {
            Route::Home => self.favorites_page().await,
            Route::Player {
                region,
                game_name,
                tag,
            } => {
                self.player_page(PlayerRequest::new(*region, game_name, tag), false)
                    .await
            }
            Route::Match {
                region,
                match_id,
                puuid,
            } => self.match_page(*region, match_id, puuid.as_deref()).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn player_page(
        &self,
        request: PlayerRequest,
        toggle_favorite: bool,
    ) -> Result<String, AppError> {
        let (page, version) = tokio::join!(self.player.load(request), self.resolver.patch_version());
        page?;

        let toggle_error = if toggle_favorite {
            match self.player.toggle_favorite().await {
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, "⚠️ favorite toggle failed");
                    Some(e.to_string())
                }
            }
        } else {
            None
        };

        let page = self.player.page().await;
        let augments = if page.matches.iter().any(|m| m.is_arena()) {
            self.resolver.augment_icon_table().await
        } else {
            Default::default()
        };

        let view = PlayerView {
            page: &page,
            assets: AssetContext {
                version: &version,
                augments: &augments,
                now_ms: Utc::now().timestamp_millis(),
                show_icons: self.show_icons,
            },
            toggle_error: toggle_error.as_deref(),
        };
        Ok(view.to_string())
    }

    #[instrument(skip(self))]
    pub async fn match_page(
        &self,
        region: Region,
        match_id: &str,
        puuid: Option<&str>,
    ) -> Result<String, AppError> {
        let (detail, version) = tokio::join!(
            self.details.load(match_id, region),
            self.resolver.patch_version()
        );
        let detail = detail?;
        let augments = self.resolver.augment_icon_table().await;

        let view = MatchView {
            detail: &detail,
            puuid,
            assets: AssetContext {
                version: &version,
                augments: &augments,
                now_ms: Utc::now().timestamp_millis(),
                show_icons: self.show_icons,
            },
        };
        Ok(view.to_string())
    }

    pub async fn favorites_page(&self) -> Result<String, AppError> {
        let favorites = self.favorites.refresh().await?;
        Ok(FavoritesView(&favorites).to_string())
    }

    pub async fn remove_favorite(&self, puuid: &str) -> Result<String, AppError> {
        self.favorites.remove(puuid).await?;
        self.favorites_page().await
    }
}
