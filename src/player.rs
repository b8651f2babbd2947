//! Player page loading: account first, then everything else in parallel.

use std::{fmt, sync::Arc};

use matchlens_backend_api::BackendApiFull;
use matchlens_shared::{
    Account, NewFavorite, RankedEntry, Region, ranked_badges,
    lol_match::MatchSummary,
    stats::{ChampionStats, PlayerStats, aggregate_champions, aggregate_stats},
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

use crate::{error::AppError, favorites::FavoritesService, generation::RequestGeneration};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Done,
    /// Upstream message, shown as is.
    Error(String),
}

/// What the user asked for. `game_name#tag` is only a lookup input, the
/// resolved puuid identifies the player afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRequest {
    pub region: Region,
    pub game_name: String,
    pub tag: String,
}

impl PlayerRequest {
    pub fn new(region: Region, game_name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            region,
            game_name: game_name.into(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for PlayerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} ({})", self.game_name, self.tag, self.region)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOutSource {
    Matches,
    Stats,
    Ranked,
    Favorite,
}

impl fmt::Display for FanOutSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FanOutSource::Matches => "matches",
            FanOutSource::Stats => "stats",
            FanOutSource::Ranked => "ranked",
            FanOutSource::Favorite => "favorite",
        })
    }
}

/// A parallel call that failed and was replaced by its fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOutFailure {
    pub source: FanOutSource,
    pub message: String,
}

/// Everything shown on the player page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPage {
    pub status: LoadStatus,
    pub request: Option<PlayerRequest>,
    pub account: Option<Account>,
    pub matches: Vec<MatchSummary>,
    pub stats: Option<PlayerStats>,
    pub ranked: Vec<RankedEntry>,
    pub is_favorite: bool,
    pub failures: Vec<FanOutFailure>,
}

impl PlayerPage {
    fn loading(request: PlayerRequest) -> Self {
        Self {
            status: LoadStatus::Loading,
            request: Some(request),
            ..Default::default()
        }
    }

    pub fn top_champions(&self) -> Vec<ChampionStats> {
        aggregate_champions(&self.matches)
    }

    pub fn ranked_badges(&self) -> Vec<&RankedEntry> {
        ranked_badges(&self.ranked)
    }

    pub fn failure(&self, source: FanOutSource) -> Option<&FanOutFailure> {
        self.failures.iter().find(|f| f.source == source)
    }
}

/// Drives the player page. Each call to [`load`](Self::load) supersedes the
/// previous one: results of an older load never reach the page.
#[derive(Debug)]
pub struct PlayerDataOrchestrator<Api> {
    api: Arc<Api>,
    favorites: Arc<FavoritesService<Api>>,
    page: RwLock<PlayerPage>,
    generation: RequestGeneration,
    /// Held for a whole toggle so each one sees the flag left by the last.
    toggle_lock: Mutex<()>,
    match_count: usize,
}

impl<Api: BackendApiFull> PlayerDataOrchestrator<Api> {
    pub fn new(api: Arc<Api>, favorites: Arc<FavoritesService<Api>>, match_count: usize) -> Self {
        Self {
            api,
            favorites,
            page: RwLock::new(PlayerPage::default()),
            generation: RequestGeneration::new(),
            toggle_lock: Mutex::new(()),
            match_count,
        }
    }

    pub async fn page(&self) -> PlayerPage {
        self.page.read().await.clone()
    }

    /// Load a player page from scratch.
    ///
    /// The account lookup is the only fatal step: its failure puts the page
    /// in [`LoadStatus::Error`] with the backend message and nothing else is
    /// requested. Once the account is known, matches, stats, ranked entries
    /// and the favorite flag are fetched concurrently and each one falls
    /// back on its own (see [`FanOutFailure`]).
    ///
    /// Returns [`AppError::Superseded`] when a newer load started meanwhile.
    #[instrument(skip(self), fields(player = %request))]
    pub async fn load(&self, request: PlayerRequest) -> Result<PlayerPage, AppError> {
        let ticket = self.generation.next();
        {
            let mut page = self.page.write().await;
            if !self.generation.is_current(ticket) {
                return Err(AppError::Superseded);
            }
            *page = PlayerPage::loading(request.clone());
        }

        let account = match self
            .api
            .get_account(&request.game_name, &request.tag, request.region)
            .await
        {
            Ok(account) => account,
            Err(e) => {
                error!(error = %e, "❌ account lookup failed");
                let mut page = self.page.write().await;
                if !self.generation.is_current(ticket) {
                    return Err(AppError::Superseded);
                }
                page.status = LoadStatus::Error(e.to_string());
                return Err(e.into());
            }
        };

        {
            let mut page = self.page.write().await;
            if !self.generation.is_current(ticket) {
                debug!("load superseded after account lookup");
                return Err(AppError::Superseded);
            }
            page.account = Some(account.clone());
        }

        let puuid = account.puuid.as_str();
        let (matches, stats, ranked, favorite) = tokio::join!(
            self.api
                .get_match_summaries(puuid, request.region, self.match_count),
            self.api.get_stats(puuid, request.region, self.match_count),
            self.api.get_ranked(puuid, request.region),
            self.api.check_favorite(puuid),
        );

        let mut failures = Vec::new();
        let mut record = |source: FanOutSource, message: String| {
            warn!(%source, %message, "⚠️ falling back");
            failures.push(FanOutFailure { source, message });
        };

        let matches = matches.unwrap_or_else(|e| {
            record(FanOutSource::Matches, e.to_string());
            Vec::new()
        });
        let stats = stats.unwrap_or_else(|e| {
            record(FanOutSource::Stats, e.to_string());
            aggregate_stats(&matches)
        });
        let ranked = ranked.unwrap_or_else(|e| {
            record(FanOutSource::Ranked, e.to_string());
            Vec::new()
        });
        let is_favorite = favorite.unwrap_or_else(|e| {
            record(FanOutSource::Favorite, e.to_string());
            false
        });

        let mut page = self.page.write().await;
        if !self.generation.is_current(ticket) {
            debug!("load superseded during fan-out");
            return Err(AppError::Superseded);
        }

        page.matches = matches;
        page.stats = Some(stats);
        page.ranked = ranked;
        page.is_favorite = is_favorite;
        page.failures = failures;
        page.status = LoadStatus::Done;

        info!(
            matches = page.matches.len(),
            failures = page.failures.len(),
            "✅ {} loaded",
            account.riot_id()
        );
        Ok(page.clone())
    }

    /// Add or remove the loaded player from the favorites.
    ///
    /// Toggles run one at a time: a toggle issued while another is in
    /// flight starts from the flag the first one settled on. The flag flips
    /// once the backend accepted the change; on failure it stays as it was
    /// and the error is returned. Returns the new flag.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self) -> Result<bool, AppError> {
        let _toggle = self.toggle_lock.lock().await;

        let (account, region, was_favorite) = {
            let page = self.page.read().await;
            match (&page.account, &page.request) {
                (Some(account), Some(request)) if page.status == LoadStatus::Done => {
                    (account.clone(), request.region, page.is_favorite)
                }
                _ => return Err(AppError::NoPlayerLoaded),
            }
        };

        if was_favorite {
            self.favorites.remove(&account.puuid).await?;
        } else {
            self.favorites
                .add(&NewFavorite::for_account(&account, region))
                .await?;
        }
        let is_favorite = !was_favorite;

        let mut page = self.page.write().await;
        let same_player = page
            .account
            .as_ref()
            .is_some_and(|a| a.puuid == account.puuid);
        if same_player {
            page.is_favorite = is_favorite;
        } else {
            debug!("another player was loaded meanwhile, page left untouched");
        }

        Ok(is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use matchlens_shared::stats::PlayerStats;

    use super::*;
    use crate::testing::{FakeBackend, summary};

    fn orchestrator(backend: FakeBackend) -> PlayerDataOrchestrator<FakeBackend> {
        let api = Arc::new(backend);
        let favorites = Arc::new(FavoritesService::new(api.clone()));
        PlayerDataOrchestrator::new(api, favorites, 10)
    }

    fn ahri_lux_matches() -> Vec<MatchSummary> {
        vec![
            summary("EUW1_1", "Ahri", 5, 2, 5, true),
            summary("EUW1_2", "Lux", 1, 4, 2, false),
            summary("EUW1_3", "Ahri", 5, 2, 5, false),
            summary("EUW1_4", "Ahri", 5, 2, 5, true),
            summary("EUW1_5", "Ahri", 5, 2, 5, false),
            summary("EUW1_6", "Ahri", 5, 2, 5, true),
        ]
    }

    fn ranked(queue_type: &str, tier: &str) -> RankedEntry {
        RankedEntry {
            queue_type: queue_type.to_string(),
            tier: tier.to_string(),
            rank: "I".to_string(),
            league_points: 100,
            wins: 10,
            losses: 5,
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        let orchestrator = orchestrator(FakeBackend::default());
        assert_eq!(orchestrator.page().await.status, LoadStatus::Idle);
    }

    #[tokio::test]
    async fn loads_every_section() {
        let backend = FakeBackend::default()
            .with_player("Hide on bush", "KR1", "p-faker")
            .with_matches("p-faker", ahri_lux_matches())
            .with_ranked(
                "p-faker",
                vec![
                    ranked("RANKED_FLEX_SR", "DIAMOND"),
                    ranked("CHERRY", "UNRANKED"),
                    ranked("RANKED_SOLO_5x5", "CHALLENGER"),
                ],
            );
        let orchestrator = orchestrator(backend);

        let page = orchestrator
            .load(PlayerRequest::new(Region::Kr, "Hide on bush", "KR1"))
            .await
            .unwrap();

        assert_eq!(page.status, LoadStatus::Done);
        assert_eq!(page.account.as_ref().unwrap().puuid, "p-faker");
        assert_eq!(page.matches.len(), 6);
        assert_eq!(page.stats.as_ref().unwrap().total_games, 6);
        assert!(page.failures.is_empty());

        let champions = page.top_champions();
        assert_eq!(champions[0].champion_name, "Ahri");
        assert_eq!(champions[0].win_rate(), 60);
        assert_eq!(champions[1].champion_name, "Lux");

        assert_eq!(page.ranked.len(), 3);
        let badges: Vec<&str> = page.ranked_badges().iter().map(|e| e.tier.as_str()).collect();
        assert_eq!(badges, vec!["CHALLENGER", "DIAMOND"]);
    }

    #[tokio::test]
    async fn account_failure_stops_before_fan_out() {
        let backend = FakeBackend::default();
        let orchestrator = orchestrator(backend.clone());

        let err = orchestrator
            .load(PlayerRequest::new(Region::Euw, "Nobody", "000"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Riot account not found.");
        let page = orchestrator.page().await;
        assert_eq!(page.status, LoadStatus::Error("Riot account not found.".into()));
        assert!(page.account.is_none());
        assert_eq!(backend.calls(), vec!["account:Nobody".to_string()]);
    }

    #[tokio::test]
    async fn fan_out_failures_fall_back_independently() {
        let backend = FakeBackend::default()
            .with_player("Caps", "EUW", "p-caps")
            .with_matches("p-caps", ahri_lux_matches());
        backend.update(|s| {
            s.fail_stats = true;
            s.fail_ranked = true;
        });
        let orchestrator = orchestrator(backend);

        let page = orchestrator
            .load(PlayerRequest::new(Region::Euw, "Caps", "EUW"))
            .await
            .unwrap();

        assert_eq!(page.status, LoadStatus::Done);
        assert!(page.ranked.is_empty());
        assert_eq!(page.stats, Some(aggregate_stats(&page.matches)));
        assert_eq!(page.failures.len(), 2);
        assert_eq!(
            page.failure(FanOutSource::Stats).unwrap().message,
            "Stats unavailable"
        );
        assert!(page.failure(FanOutSource::Ranked).is_some());
        assert!(page.failure(FanOutSource::Matches).is_none());
    }

    #[tokio::test]
    async fn failed_matches_leave_an_empty_page() {
        let backend = FakeBackend::default().with_player("Caps", "EUW", "p-caps");
        backend.update(|s| {
            s.fail_matches = true;
            s.fail_stats = true;
        });
        let orchestrator = orchestrator(backend);

        let page = orchestrator
            .load(PlayerRequest::new(Region::Euw, "Caps", "EUW"))
            .await
            .unwrap();

        assert!(page.matches.is_empty());
        assert_eq!(page.stats, Some(PlayerStats::default()));
        assert!(page.stats.as_ref().unwrap().is_empty());
        assert_eq!(page.failure(FanOutSource::Matches).unwrap().message, "Riot API unavailable");
    }

    #[tokio::test(start_paused = true)]
    async fn newer_navigation_wins() {
        let backend = FakeBackend::default()
            .with_player("Slow", "EUW", "p-a")
            .with_player("Fast", "EUW", "p-b")
            .with_matches("p-a", vec![summary("A_1", "Zed", 10, 0, 0, true)])
            .with_matches("p-b", vec![summary("B_1", "Lux", 1, 1, 1, false)])
            .with_delay("p-a", Duration::from_secs(3))
            .with_delay("Fast", Duration::from_secs(1));
        let orchestrator = orchestrator(backend);

        let (a, b) = tokio::join!(
            orchestrator.load(PlayerRequest::new(Region::Euw, "Slow", "EUW")),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                orchestrator
                    .load(PlayerRequest::new(Region::Euw, "Fast", "EUW"))
                    .await
            }
        );

        assert!(matches!(a, Err(AppError::Superseded)));
        let b = b.unwrap();
        assert_eq!(b.account.as_ref().unwrap().puuid, "p-b");

        let page = orchestrator.page().await;
        assert_eq!(page.account.as_ref().unwrap().puuid, "p-b");
        assert_eq!(page.matches.len(), 1);
        assert_eq!(page.matches[0].match_id, "B_1");
    }

    #[tokio::test(start_paused = true)]
    async fn loading_clears_previous_player() {
        let backend = FakeBackend::default()
            .with_player("First", "EUW", "p-1")
            .with_player("Second", "EUW", "p-2")
            .with_matches("p-1", ahri_lux_matches())
            .with_delay("Second", Duration::from_secs(5));
        let orchestrator = Arc::new(orchestrator(backend));

        orchestrator
            .load(PlayerRequest::new(Region::Euw, "First", "EUW"))
            .await
            .unwrap();

        let pending = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move {
                orchestrator
                    .load(PlayerRequest::new(Region::Euw, "Second", "EUW"))
                    .await
            }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;

        let page = orchestrator.page().await;
        assert_eq!(page.status, LoadStatus::Loading);
        assert!(page.account.is_none());
        assert!(page.matches.is_empty());
        assert!(page.stats.is_none());

        pending.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn favorite_round_trip() {
        let backend = FakeBackend::default().with_player("Caps", "EUW", "p-caps");
        let orchestrator = orchestrator(backend.clone());
        let request = PlayerRequest::new(Region::Euw, "Caps", "EUW");

        assert!(!orchestrator.load(request.clone()).await.unwrap().is_favorite);

        assert!(orchestrator.toggle_favorite().await.unwrap());
        assert!(orchestrator.page().await.is_favorite);
        assert!(orchestrator.load(request.clone()).await.unwrap().is_favorite);

        assert!(!orchestrator.toggle_favorite().await.unwrap());
        assert!(!orchestrator.load(request).await.unwrap().is_favorite);
        assert!(backend.calls().contains(&"favorites:remove:p-caps".to_string()));
    }

    #[tokio::test]
    async fn failed_toggle_keeps_flag() {
        let backend = FakeBackend::default().with_player("Caps", "EUW", "p-caps");
        backend.update(|s| s.fail_favorite_add = true);
        let orchestrator = orchestrator(backend);

        orchestrator
            .load(PlayerRequest::new(Region::Euw, "Caps", "EUW"))
            .await
            .unwrap();

        let err = orchestrator.toggle_favorite().await.unwrap_err();
        assert_eq!(err.to_string(), "Favorites store offline");
        assert!(!orchestrator.page().await.is_favorite);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_toggles_run_in_order() {
        let backend = FakeBackend::default()
            .with_player("Caps", "EUW", "p-caps")
            .with_delay("favorites:add:p-caps", Duration::from_secs(2));
        let orchestrator = orchestrator(backend.clone());
        orchestrator
            .load(PlayerRequest::new(Region::Euw, "Caps", "EUW"))
            .await
            .unwrap();

        let (first, second) = tokio::join!(orchestrator.toggle_favorite(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            orchestrator.toggle_favorite().await
        });

        assert!(first.unwrap());
        assert!(!second.unwrap());
        let stored = backend.state.lock().unwrap().favorites.len();
        assert_eq!(stored, 0);
        assert!(!orchestrator.page().await.is_favorite);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_after_other_player_loaded_keeps_new_page() {
        let backend = FakeBackend::default()
            .with_player("Caps", "EUW", "p-caps")
            .with_player("Rekkles", "EUW", "p-rekkles")
            .with_delay("favorites:add:p-caps", Duration::from_secs(2));
        let orchestrator = orchestrator(backend.clone());
        orchestrator
            .load(PlayerRequest::new(Region::Euw, "Caps", "EUW"))
            .await
            .unwrap();

        let (toggled, _) = tokio::join!(orchestrator.toggle_favorite(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            orchestrator
                .load(PlayerRequest::new(Region::Euw, "Rekkles", "EUW"))
                .await
        });

        assert!(toggled.unwrap());
        let page = orchestrator.page().await;
        assert_eq!(page.account.as_ref().unwrap().puuid, "p-rekkles");
        assert!(!page.is_favorite);
    }

    #[tokio::test]
    async fn failed_favorite_check_falls_back_to_not_favorite() {
        let backend = FakeBackend::default().with_player("Caps", "EUW", "p-caps");
        backend.add_favorite_directly("p-caps");
        backend.update(|s| s.favorite_check_errors = true);
        let orchestrator = orchestrator(backend);

        let page = orchestrator
            .load(PlayerRequest::new(Region::Euw, "Caps", "EUW"))
            .await
            .unwrap();

        assert_eq!(page.status, LoadStatus::Done);
        assert!(!page.is_favorite);
        assert_eq!(
            page.failure(FanOutSource::Favorite).unwrap().message,
            "Favorites store offline"
        );
        assert_eq!(page.failures.len(), 1);
    }

    #[tokio::test]
    async fn toggle_requires_a_loaded_player() {
        let orchestrator = orchestrator(FakeBackend::default());
        assert!(matches!(
            orchestrator.toggle_favorite().await,
            Err(AppError::NoPlayerLoaded)
        ));
    }
}
