use anyhow::{bail, Context, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

use crate::classifier::{extract_video_id, Platform};
use crate::relay::config::RelayConfig;
use crate::relay::models::VideoPayload;

const INSTAGRAM_THUMBNAIL: &str = "https://picsum.photos/seed/insta/640/640";
const INSTAGRAM_VIDEO: &str = "https://example.com/mock-instagram-video.mp4";
const INSTAGRAM_AUTHOR: &str = "@instagram_user";
const INSTAGRAM_TITLE: &str = "Check out this amazing Instagram video!";

const TIKTOK_THUMBNAIL: &str = "https://picsum.photos/seed/tiktok/640/640";
const TIKTOK_VIDEO: &str = "https://example.com/mock-tiktok-video.mp4";
const TIKTOK_AUTHOR: &str = "@tiktok_user";
const TIKTOK_TITLE: &str = "Trending TikTok video #fyp";

/// Resolves post URLs into video payloads via the upstream providers
///
/// Holds the outbound HTTP client and the provider credentials. The contract
/// to callers: once the platform and URL are valid, `extract` always produces
/// a payload. Upstream unavailability degrades to deterministic placeholder
/// data instead of an error.
pub struct VideoExtractor {
    http: reqwest::Client,
    config: RelayConfig,
}

impl VideoExtractor {
    pub fn new(config: RelayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("Failed to build upstream HTTP client")?;
        Ok(Self { http, config })
    }

    pub fn has_instagram_credential(&self) -> bool {
        self.config.instagram_api_key.is_some()
    }

    pub fn has_tiktok_credential(&self) -> bool {
        self.config.tiktok_api_key.is_some()
    }

    /// Resolves a post URL into a normalized payload, never failing
    pub async fn extract(&self, platform: Platform, url: &str) -> VideoPayload {
        let attempt = match platform {
            Platform::Instagram => match &self.config.instagram_api_key {
                None => {
                    warn!("INSTAGRAM_API_KEY is missing, serving placeholder data");
                    return placeholder(platform, url);
                }
                Some(key) => {
                    self.call_provider(&self.config.instagram_api_url, key, url)
                        .await
                        .map(|body| reshape_instagram(&body, url))
                }
            },
            Platform::Tiktok => match &self.config.tiktok_api_key {
                None => {
                    warn!("TIKTOK_API_KEY is missing, serving placeholder data");
                    return placeholder(platform, url);
                }
                Some(key) => {
                    self.call_provider(&self.config.tiktok_api_url, key, url)
                        .await
                        .map(|body| reshape_tiktok(&body, url))
                }
            },
        };

        match attempt {
            Ok(payload) => {
                info!("Upstream extraction succeeded for {} URL", platform);
                payload
            }
            Err(e) => {
                warn!("{} upstream failed: {}, serving placeholder data", platform, e);
                placeholder(platform, url)
            }
        }
    }

    /// Issues the upstream call and returns the raw provider body
    async fn call_provider(&self, api_url: &str, api_key: &str, url: &str) -> Result<Value> {
        debug!("Calling upstream provider at {}", api_url);

        let mut request = self
            .http
            .post(api_url)
            .header("X-RapidAPI-Key", api_key)
            .json(&json!({ "url": url }));
        if let Some(host) = Url::parse(api_url).ok().and_then(|u| u.host_str().map(String::from)) {
            request = request.header("X-RapidAPI-Host", host);
        }

        let response = request
            .send()
            .await
            .context("Upstream request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Upstream returned status: {}", status);
        }

        response
            .json::<Value>()
            .await
            .context("Failed to decode upstream response body")
    }
}

/// Deterministic stand-in payload for a platform
///
/// Returned when no credential is configured or the upstream call fails.
pub fn placeholder(platform: Platform, url: &str) -> VideoPayload {
    match platform {
        Platform::Instagram => VideoPayload {
            id: derive_id(None, platform, url),
            thumbnail_url: INSTAGRAM_THUMBNAIL.to_string(),
            video_url: INSTAGRAM_VIDEO.to_string(),
            author: INSTAGRAM_AUTHOR.to_string(),
            title: INSTAGRAM_TITLE.to_string(),
        },
        Platform::Tiktok => VideoPayload {
            id: derive_id(None, platform, url),
            thumbnail_url: TIKTOK_THUMBNAIL.to_string(),
            video_url: TIKTOK_VIDEO.to_string(),
            author: TIKTOK_AUTHOR.to_string(),
            title: TIKTOK_TITLE.to_string(),
        },
    }
}

fn reshape_instagram(body: &Value, url: &str) -> VideoPayload {
    VideoPayload {
        id: derive_id(str_field(body, "id"), Platform::Instagram, url),
        thumbnail_url: str_field(body, "thumbnail")
            .unwrap_or(INSTAGRAM_THUMBNAIL)
            .to_string(),
        video_url: str_field(body, "media")
            .unwrap_or(INSTAGRAM_VIDEO)
            .to_string(),
        author: str_field(body, "username")
            .unwrap_or(INSTAGRAM_AUTHOR)
            .to_string(),
        title: str_field(body, "title")
            .unwrap_or("Instagram video")
            .to_string(),
    }
}

fn reshape_tiktok(body: &Value, url: &str) -> VideoPayload {
    VideoPayload {
        id: derive_id(str_field(body, "id"), Platform::Tiktok, url),
        thumbnail_url: str_field(body, "cover")
            .unwrap_or(TIKTOK_THUMBNAIL)
            .to_string(),
        video_url: str_field(body, "video").unwrap_or(TIKTOK_VIDEO).to_string(),
        author: str_field(body, "author").unwrap_or(TIKTOK_AUTHOR).to_string(),
        title: str_field(body, "title").unwrap_or("TikTok video").to_string(),
    }
}

/// Reads a non-empty string field from a provider body
fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Unified id strategy: provider-supplied id, else a segment derived from the
/// URL path, else a random token
fn derive_id(provider_id: Option<&str>, platform: Platform, url: &str) -> String {
    if let Some(id) = provider_id {
        return id.to_string();
    }
    if let Some(id) = extract_video_id(url, platform) {
        return id;
    }
    if let Some(segment) = last_path_segment(url) {
        return segment;
    }
    random_token()
}

fn last_path_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(String::from)
}

/// Short random token, used when nothing better is available
pub fn random_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}
