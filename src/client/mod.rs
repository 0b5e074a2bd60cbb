use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::classifier::Platform;
use crate::relay::models::ErrorResponse;
use crate::relay::providers::random_token;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/download";
const GENERIC_FAILURE: &str = "Failed to process video";

/// Uniform failure for extraction requests
///
/// Transport errors, non-success statuses, and malformed bodies all fold into
/// this one kind; callers only ever see a single human-readable message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExtractionError {
    pub message: String,
}

impl ExtractionError {
    fn generic() -> Self {
        Self {
            message: GENERIC_FAILURE.to_string(),
        }
    }
}

/// The uniform extraction contract handed to the presentation layer
///
/// `url` and `platform` always come from the original request; `video_url`
/// and `thumbnail_url` are never empty in a successful result.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub id: String,
    pub url: String,
    pub platform: Platform,
    pub thumbnail_url: String,
    pub video_url: String,
    pub author: String,
    pub title: String,
}

/// Relay success body; `id`, `author`, and `title` may be absent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayPayload {
    id: Option<String>,
    thumbnail_url: String,
    video_url: String,
    author: Option<String>,
    title: Option<String>,
}

/// Configuration for the extraction client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay endpoint receiving extraction requests
    pub endpoint: String,

    /// Timeout for the client-to-relay round trip
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl ClientConfig {
    /// Builds the client configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("REELGRAB_ENDPOINT")
                .ok()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            ..Self::default()
        }
    }
}

/// Sends normalized extraction requests to the relay
///
/// Returns typed results only; user-visible notification is owned by the
/// presentation layer. No retries, no state beyond the HTTP client.
pub struct ExtractionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ExtractionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build relay HTTP client")?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    /// Requests extraction of a post URL, suspending until the relay answers
    pub async fn request_extraction(
        &self,
        url: &str,
        platform: Platform,
    ) -> Result<ExtractionResult, ExtractionError> {
        debug!("Requesting {} extraction for URL: {}", platform, url);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "url": url, "platform": platform }))
            .send()
            .await
            .map_err(|e| {
                warn!("Relay request failed: {}", e);
                ExtractionError::generic()
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
            warn!("Relay returned status {}: {}", status, message);
            return Err(ExtractionError { message });
        }

        let payload = response.json::<RelayPayload>().await.map_err(|e| {
            warn!("Failed to decode relay response: {}", e);
            ExtractionError::generic()
        })?;

        Ok(ExtractionResult {
            id: payload.id.filter(|id| !id.is_empty()).unwrap_or_else(random_token),
            url: url.to_string(),
            platform,
            thumbnail_url: payload.thumbnail_url,
            video_url: payload.video_url,
            author: payload
                .author
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| format!("@{}_user", platform)),
            title: payload
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| default_title(platform)),
        })
    }
}

fn default_title(platform: Platform) -> String {
    match platform {
        Platform::Instagram => "Instagram video".to_string(),
        Platform::Tiktok => "TikTok video".to_string(),
    }
}
