use std::{fmt::Debug, num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use bytes::Bytes;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::{Method, Response, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{trace, warn};

use crate::types::{ApiResponse, BackendApiError};

use super::metrics::RequestMetrics;

/// Trait implemented by structures capable of performing raw HTTP requests to the backend.
#[async_trait]
pub trait ApiRequest: Send + Sync + Debug {
    /// `path` is relative to the backend base URL and already carries its
    /// query string.
    async fn request(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> ApiResponse<Bytes>;
}

/// Shared HTTP plumbing: paced, counted requests against one base URL.
#[derive(Debug)]
pub struct ApiClientBase {
    pub client: reqwest::Client,
    pub limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    base_url: String,
    pub metrics: Arc<RequestMetrics>,
}

impl ApiClientBase {
    pub fn new(base_url: impl Into<String>, requests_per_second: NonZeroU32) -> Self {
        let base_url: String = base_url.into();

        Self {
            client: reqwest::Client::new(),
            limiter: RateLimiter::direct(Quota::per_second(requests_per_second)),
            base_url: base_url.trim_end_matches('/').to_string(),
            metrics: RequestMetrics::new("backend"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn request(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> ApiResponse<Bytes> {
        self.limiter.until_ready().await;
        self.metrics.inc();

        let url = format!("{}{}", self.base_url, path);
        trace!(%method, %url, "[BACKEND::CLIENT] request");

        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let res = req.send().await.map_err(BackendApiError::Reqwest)?;
        if res.status().is_success() {
            res.bytes().await.map_err(BackendApiError::Reqwest)
        } else {
            Err(status_error(res).await)
        }
    }
}

async fn status_error(res: Response) -> BackendApiError {
    let status = res.status();
    let is_json = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let message = match res.bytes().await {
        Ok(body) => error_message(status, is_json, &body),
        Err(_) => "An unknown network error occurred.".to_string(),
    };

    BackendApiError::Status { status, message }
}

/// Human readable message of a failed response: the JSON `message` or
/// `error` field, the plain text body, or a generic status line.
pub(crate) fn error_message(status: StatusCode, is_json: bool, body: &[u8]) -> String {
    if is_json {
        let from_body = serde_json::from_slice::<Value>(body).ok().and_then(|v| {
            ["message", "error"].iter().find_map(|key| {
                v.get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        });

        return from_body.unwrap_or_else(|| {
            format!(
                "Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        format!("Status {}", status.as_u16())
    } else {
        text
    }
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ApiResponse<T> {
    serde_json::from_slice(bytes).map_err(BackendApiError::Serde)
}

/// Decode a JSON array. A body that is not an array at all is treated as an
/// empty collection.
pub(crate) fn decode_list<T: DeserializeOwned>(bytes: &[u8], what: &str) -> ApiResponse<Vec<T>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Array(items)) => {
            serde_json::from_value(Value::Array(items)).map_err(BackendApiError::Serde)
        }
        _ => {
            warn!(kind = what, "⚠️ [BACKEND] expected a list, using an empty one");
            Ok(Vec::new())
        }
    }
}
