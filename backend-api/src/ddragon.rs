//! Versioned CDN metadata shared by every icon URL.
//!
//! [`AssetVersionResolver`] fetches the current Data Dragon patch version and
//! the CommunityDragon Arena augment table at most once per process. While a
//! fetch is running, every caller awaits the same pending future. A failed
//! fetch is never cached: callers get the last known value (or the built-in
//! fallback) and the next call tries again.

use std::{collections::HashMap, fmt::Debug, sync::Arc};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const DEFAULT_VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

pub const DEFAULT_AUGMENTS_URL: &str = "https://raw.communitydragon.org/latest/plugins/rcp-be-lol-game-data/global/default/v1/cherry-augments.json";

/// Used whenever the versions document cannot be fetched.
pub const DEFAULT_FALLBACK_VERSION: &str = "15.1.1";

const CDRAGON_GAME_DATA_BASE: &str =
    "https://raw.communitydragon.org/latest/plugins/rcp-be-lol-game-data/global/default/";

const GAME_DATA_ASSETS_PREFIX: &str = "/lol-game-data/assets/";

pub type AugmentIconTable = Arc<HashMap<u32, String>>;

/// Where the resolver looks things up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSources {
    pub versions_url: String,
    pub augments_url: String,
    pub fallback_version: String,
}

impl Default for AssetSources {
    fn default() -> Self {
        Self {
            versions_url: DEFAULT_VERSIONS_URL.to_string(),
            augments_url: DEFAULT_AUGMENTS_URL.to_string(),
            fallback_version: DEFAULT_FALLBACK_VERSION.to_string(),
        }
    }
}

type Pending<T> = Shared<BoxFuture<'static, Option<T>>>;

struct MemoState<T> {
    value: Option<T>,
    last_known: Option<T>,
    pending: Option<Pending<T>>,
}

/// Single-flight cache of one artifact.
struct Memo<T: Clone> {
    state: Mutex<MemoState<T>>,
}

impl<T> Memo<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn new() -> Self {
        Self {
            state: Mutex::new(MemoState {
                value: None,
                last_known: None,
                pending: None,
            }),
        }
    }

    /// Cached value, or the result of the in-flight fetch, or a new fetch.
    /// `None` only when the fetch failed and nothing was ever resolved.
    async fn get_or_fetch<F>(&self, fetch: F) -> Option<T>
    where
        F: FnOnce() -> BoxFuture<'static, Option<T>>,
    {
        let pending = {
            let mut state = self.state.lock().await;
            if let Some(value) = &state.value {
                return Some(value.clone());
            }
            match &state.pending {
                Some(pending) => pending.clone(),
                None => {
                    let pending = fetch().shared();
                    state.pending = Some(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut state = self.state.lock().await;
        // Only the owner of the current flight may settle it; an invalidate
        // in between may already have started another one.
        if state.pending.as_ref().is_some_and(|p| p.ptr_eq(&pending)) {
            state.pending = None;
            if let Some(value) = &result {
                state.value = Some(value.clone());
                state.last_known = Some(value.clone());
            }
        }

        result.or_else(|| state.last_known.clone())
    }

    async fn peek(&self) -> Option<T> {
        let state = self.state.lock().await;
        state.value.clone().or_else(|| state.last_known.clone())
    }

    async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.value = None;
        state.pending = None;
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AugmentDto {
    id: u32,
    #[serde(default)]
    augment_small_icon_path: Option<String>,
}

/// Turn a game-data asset path into its CommunityDragon URL.
pub fn augment_asset_url(game_data_path: &str) -> String {
    let path = game_data_path
        .to_lowercase()
        .replacen(GAME_DATA_ASSETS_PREFIX, "", 1);
    format!("{CDRAGON_GAME_DATA_BASE}{path}")
}

fn augment_table(entries: Vec<AugmentDto>) -> HashMap<u32, String> {
    entries
        .into_iter()
        .filter_map(|entry| {
            entry
                .augment_small_icon_path
                .filter(|path| !path.is_empty())
                .map(|path| (entry.id, augment_asset_url(&path)))
        })
        .collect()
}

/// Resolves and caches CDN metadata. Cheap to share behind an [`Arc`].
pub struct AssetVersionResolver {
    client: reqwest::Client,
    sources: AssetSources,
    version: Memo<String>,
    augments: Memo<AugmentIconTable>,
}

impl Debug for AssetVersionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetVersionResolver")
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

impl Default for AssetVersionResolver {
    fn default() -> Self {
        Self::new(AssetSources::default())
    }
}

impl AssetVersionResolver {
    pub fn new(sources: AssetSources) -> Self {
        Self::with_client(reqwest::Client::new(), sources)
    }

    pub fn with_client(client: reqwest::Client, sources: AssetSources) -> Self {
        Self {
            client,
            sources,
            version: Memo::new(),
            augments: Memo::new(),
        }
    }

    pub fn sources(&self) -> &AssetSources {
        &self.sources
    }

    /// Latest patch version, e.g. `15.3.1`. Never fails.
    pub async fn patch_version(&self) -> String {
        let client = self.client.clone();
        let url = self.sources.versions_url.clone();

        let resolved = self
            .version
            .get_or_fetch(move || fetch_latest_version(client, url).boxed())
            .await;

        resolved.unwrap_or_else(|| self.sources.fallback_version.clone())
    }

    /// Augment id to icon URL. Empty when the table could not be fetched;
    /// a missing key means the icon is unavailable.
    pub async fn augment_icon_table(&self) -> AugmentIconTable {
        let client = self.client.clone();
        let url = self.sources.augments_url.clone();

        let resolved = self
            .augments
            .get_or_fetch(move || fetch_augment_table(client, url).boxed())
            .await;

        resolved.unwrap_or_default()
    }

    /// Best version known right now without touching the network.
    pub async fn current_patch_version(&self) -> String {
        self.version
            .peek()
            .await
            .unwrap_or_else(|| self.sources.fallback_version.clone())
    }

    /// Forget resolved values so the next call fetches again. Last known
    /// values are kept as the failure fallback.
    pub async fn invalidate(&self) {
        self.version.invalidate().await;
        self.augments.invalidate().await;
        debug!("🗑️ [DDRAGON] cache invalidated");
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, reqwest::Error> {
    client.get(url).send().await?.error_for_status()?.json().await
}

async fn fetch_latest_version(client: reqwest::Client, url: String) -> Option<String> {
    match fetch_json::<Vec<String>>(&client, &url).await {
        Ok(versions) => match versions.into_iter().next() {
            Some(version) => {
                info!(%version, "🆕 [DDRAGON] using assets version");
                Some(version)
            }
            None => {
                warn!(%url, "⚠️ [DDRAGON] versions document is empty");
                None
            }
        },
        Err(e) => {
            warn!(%url, error = %e, "⚠️ [DDRAGON] failed to fetch versions");
            None
        }
    }
}

async fn fetch_augment_table(client: reqwest::Client, url: String) -> Option<AugmentIconTable> {
    match fetch_json::<Vec<AugmentDto>>(&client, &url).await {
        Ok(entries) => {
            let table = augment_table(entries);
            info!(count = table.len(), "🧩 [DDRAGON] augment icons loaded");
            Some(Arc::new(table))
        }
        Err(e) => {
            warn!(%url, error = %e, "⚠️ [DDRAGON] failed to fetch augment icons");
            None
        }
    }
}
