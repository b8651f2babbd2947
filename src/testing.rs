//! In-memory backend used by the orchestration tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use matchlens_backend_api::{
    ApiResponse, BackendApiError, BackendApiFull,
    api::{AccountApi, ApiRequest, FavoritesApi, MatchApi, RankedApi, StatsApi},
};
use matchlens_shared::{
    Account, FavoritePlayer, NewFavorite, RankedEntry, Region,
    lol_match::{MatchDetail, MatchSummary},
    stats::{PlayerStats, aggregate_stats},
};
use reqwest::{Method, StatusCode};
use serde_json::Value;

#[derive(Debug, Default)]
pub struct FakeState {
    pub accounts: HashMap<String, Account>,
    pub matches: HashMap<String, Vec<MatchSummary>>,
    pub stats: HashMap<String, PlayerStats>,
    pub ranked: HashMap<String, Vec<RankedEntry>>,
    pub details: HashMap<String, MatchDetail>,
    pub favorites: Vec<FavoritePlayer>,
    /// Keyed by game name, puuid, match id or favorites call.
    pub delays: HashMap<String, Duration>,
    pub fail_matches: bool,
    pub fail_stats: bool,
    pub fail_ranked: bool,
    /// Check answers non-2xx, which the client reads as "not a favorite".
    pub fail_favorite_check: bool,
    /// Check fails outright, as on a dropped connection.
    pub favorite_check_errors: bool,
    pub fail_favorite_add: bool,
    /// Every endpoint hit, in order.
    pub calls: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<FakeState>>,
}

fn status(code: StatusCode, message: &str) -> BackendApiError {
    BackendApiError::Status {
        status: code,
        message: message.to_string(),
    }
}

fn account_key(game_name: &str, tag_line: &str) -> String {
    format!("{}#{}", game_name.to_lowercase(), tag_line.to_lowercase())
}

pub fn summary(match_id: &str, champion: &str, k: u32, d: u32, a: u32, win: bool) -> MatchSummary {
    MatchSummary {
        match_id: match_id.to_string(),
        champion_name: champion.to_string(),
        kills: k,
        deaths: d,
        assists: a,
        win,
        queue_id: 420,
        team_total_kills: 20,
        game_duration_sec: 1_800,
        ..Default::default()
    }
}

impl FakeBackend {
    pub fn with_player(self, game_name: &str, tag_line: &str, puuid: &str) -> Self {
        self.state.lock().unwrap().accounts.insert(
            account_key(game_name, tag_line),
            Account {
                puuid: puuid.to_string(),
                game_name: game_name.to_string(),
                tag_line: tag_line.to_string(),
                profile_icon_id: Some(1),
            },
        );
        self
    }

    pub fn with_matches(self, puuid: &str, matches: Vec<MatchSummary>) -> Self {
        self.state
            .lock()
            .unwrap()
            .matches
            .insert(puuid.to_string(), matches);
        self
    }

    pub fn with_ranked(self, puuid: &str, ranked: Vec<RankedEntry>) -> Self {
        self.state
            .lock()
            .unwrap()
            .ranked
            .insert(puuid.to_string(), ranked);
        self
    }

    pub fn with_detail(self, detail: MatchDetail) -> Self {
        self.state
            .lock()
            .unwrap()
            .details
            .insert(detail.match_id.clone(), detail);
        self
    }

    pub fn with_delay(self, key: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(key.to_string(), delay);
        self
    }

    pub fn update(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn fail_favorite_check(&self, fail: bool) {
        self.update(|s| s.fail_favorite_check = fail);
    }

    pub fn add_favorite_directly(&self, puuid: &str) {
        self.update(|s| s.favorites.push(favorite_record(s.favorites.len() as i64 + 1, puuid)));
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String, delay_key: &str) -> Option<Duration> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.delays.get(delay_key).copied()
    }

    async fn pause(&self, call: String, delay_key: &str) {
        if let Some(delay) = self.record(call, delay_key) {
            tokio::time::sleep(delay).await;
        }
    }
}

fn favorite_record(id: i64, puuid: &str) -> FavoritePlayer {
    FavoritePlayer {
        id,
        puuid: puuid.to_string(),
        game_name: "Faker".to_string(),
        tag_line: "KR1".to_string(),
        region: "KR".to_string(),
        saved_at: NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap(),
    }
}

#[async_trait]
impl ApiRequest for FakeBackend {
    async fn request(
        &self,
        _method: Method,
        path: String,
        _body: Option<Value>,
    ) -> ApiResponse<Bytes> {
        Err(status(StatusCode::NOT_IMPLEMENTED, &format!("unrouted {path}")))
    }
}

#[async_trait]
impl AccountApi for FakeBackend {
    async fn get_account(
        &self,
        game_name: &str,
        tag_line: &str,
        _region: Region,
    ) -> ApiResponse<Account> {
        self.pause(format!("account:{game_name}"), game_name).await;

        self.state
            .lock()
            .unwrap()
            .accounts
            .get(&account_key(game_name, tag_line))
            .cloned()
            .ok_or_else(|| status(StatusCode::NOT_FOUND, "Riot account not found."))
    }
}

#[async_trait]
impl MatchApi for FakeBackend {
    async fn get_match_summaries(
        &self,
        puuid: &str,
        _region: Region,
        count: usize,
    ) -> ApiResponse<Vec<MatchSummary>> {
        self.pause(format!("matches:{puuid}"), puuid).await;

        let state = self.state.lock().unwrap();
        if state.fail_matches {
            return Err(status(StatusCode::BAD_GATEWAY, "Riot API unavailable"));
        }
        let mut matches = state.matches.get(puuid).cloned().unwrap_or_default();
        matches.truncate(count);
        Ok(matches)
    }

    async fn get_match_detail(&self, match_id: &str, _region: Region) -> ApiResponse<MatchDetail> {
        self.pause(format!("detail:{match_id}"), match_id).await;

        self.state
            .lock()
            .unwrap()
            .details
            .get(match_id)
            .cloned()
            .ok_or_else(|| status(StatusCode::NOT_FOUND, "Match not found."))
    }
}

#[async_trait]
impl StatsApi for FakeBackend {
    async fn get_stats(&self, puuid: &str, _region: Region, count: usize) -> ApiResponse<PlayerStats> {
        self.record(format!("stats:{puuid}"), "");

        let state = self.state.lock().unwrap();
        if state.fail_stats {
            return Err(status(StatusCode::INTERNAL_SERVER_ERROR, "Stats unavailable"));
        }
        match state.stats.get(puuid) {
            Some(stats) => Ok(stats.clone()),
            None => {
                let matches = state.matches.get(puuid).cloned().unwrap_or_default();
                let window = &matches[..matches.len().min(count)];
                Ok(aggregate_stats(window))
            }
        }
    }
}

#[async_trait]
impl RankedApi for FakeBackend {
    async fn get_ranked(&self, puuid: &str, _region: Region) -> ApiResponse<Vec<RankedEntry>> {
        self.record(format!("ranked:{puuid}"), "");

        let state = self.state.lock().unwrap();
        if state.fail_ranked {
            return Err(status(StatusCode::TOO_MANY_REQUESTS, "Rate limited"));
        }
        Ok(state.ranked.get(puuid).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl FavoritesApi for FakeBackend {
    async fn list_favorites(&self) -> ApiResponse<Vec<FavoritePlayer>> {
        self.record("favorites:list".to_string(), "");
        Ok(self.state.lock().unwrap().favorites.clone())
    }

    async fn check_favorite(&self, puuid: &str) -> ApiResponse<bool> {
        self.record(format!("favorites:check:{puuid}"), "");

        let state = self.state.lock().unwrap();
        if state.favorite_check_errors {
            return Err(status(StatusCode::SERVICE_UNAVAILABLE, "Favorites store offline"));
        }
        if state.fail_favorite_check {
            return Ok(false);
        }
        Ok(state.favorites.iter().any(|f| f.puuid == puuid))
    }

    async fn add_favorite(&self, favorite: &NewFavorite) -> ApiResponse<FavoritePlayer> {
        let call = format!("favorites:add:{}", favorite.puuid);
        self.pause(call.clone(), &call).await;

        let mut state = self.state.lock().unwrap();
        if state.fail_favorite_add {
            return Err(status(StatusCode::SERVICE_UNAVAILABLE, "Favorites store offline"));
        }
        if state.favorites.iter().any(|f| f.puuid == favorite.puuid) {
            return Err(status(StatusCode::CONFLICT, "Player is already in favorites"));
        }

        let mut saved = favorite_record(state.favorites.len() as i64 + 1, &favorite.puuid);
        saved.game_name = favorite.game_name.clone();
        saved.tag_line = favorite.tag_line.clone();
        saved.region = favorite.region.to_string();
        state.favorites.push(saved.clone());
        Ok(saved)
    }

    async fn remove_favorite(&self, puuid: &str) -> ApiResponse<()> {
        self.record(format!("favorites:remove:{puuid}"), "");

        let mut state = self.state.lock().unwrap();
        let before = state.favorites.len();
        state.favorites.retain(|f| f.puuid != puuid);
        if state.favorites.len() == before {
            return Err(status(StatusCode::NOT_FOUND, "Favorite not found"));
        }
        Ok(())
    }
}

impl BackendApiFull for FakeBackend {}
