//! Loading of the full scoreboard of one match.

use std::sync::Arc;

use matchlens_backend_api::api::MatchApi;
use matchlens_shared::{Region, lol_match::MatchDetail};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::{error::AppError, generation::RequestGeneration, player::LoadStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    pub status: LoadStatus,
    pub match_id: Option<String>,
    pub detail: Option<MatchDetail>,
}

/// Expanding another match, or collapsing, makes any pending load stale.
#[derive(Debug)]
pub struct MatchDetailLoader<Api> {
    api: Arc<Api>,
    view: RwLock<DetailView>,
    generation: RequestGeneration,
}

impl<Api: MatchApi> MatchDetailLoader<Api> {
    pub fn new(api: Arc<Api>) -> Self {
        Self {
            api,
            view: RwLock::new(DetailView::default()),
            generation: RequestGeneration::new(),
        }
    }

    pub async fn view(&self) -> DetailView {
        self.view.read().await.clone()
    }

    #[instrument(skip(self))]
    pub async fn load(&self, match_id: &str, region: Region) -> Result<MatchDetail, AppError> {
        let ticket = self.generation.next();
        *self.view.write().await = DetailView {
            status: LoadStatus::Loading,
            match_id: Some(match_id.to_string()),
            detail: None,
        };

        let result = self.api.get_match_detail(match_id, region).await;

        let mut view = self.view.write().await;
        if !self.generation.is_current(ticket) {
            debug!("detail load superseded");
            return Err(AppError::Superseded);
        }

        match result {
            Ok(detail) => {
                view.status = LoadStatus::Done;
                view.detail = Some(detail.clone());
                Ok(detail)
            }
            Err(e) => {
                warn!(error = %e, "⚠️ match detail failed");
                view.status = LoadStatus::Error(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn collapse(&self) {
        self.generation.next();
        *self.view.write().await = DetailView::default();
    }
}
