use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// TikTok video pages: /video/{id} or /@{user}/video/{id}
static TIKTOK_VIDEO_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(@[\w.-]+/)?video/(\d+)").unwrap());

// Instagram post/reel/tv pages: /p/{id}, /reel/{id}, /tv/{id}
static INSTAGRAM_POST_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(p|reel|tv)/([^/]+)").unwrap());

/// A supported social-media platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
        }
    }

    /// Parses the wire-format platform name ("instagram" / "tiktok")
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "instagram" => Some(Platform::Instagram),
            "tiktok" => Some(Platform::Tiktok),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a raw input string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_valid: bool,
    pub platform: Option<Platform>,
}

impl Classification {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            platform: None,
        }
    }

    fn valid(platform: Platform) -> Self {
        Self {
            is_valid: true,
            platform: Some(platform),
        }
    }
}

/// Classifies a raw string as a supported social-media video URL
///
/// Strict policy: the host must belong to a supported platform *and* the path
/// must look like a post/reel/video page. Host-only matching would accept
/// profile roots and search pages, which are not downloadable.
///
/// Pure and synchronous; safe to call on every input change.
pub fn classify(raw: &str) -> Classification {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Classification::invalid();
    }

    let parsed = match Url::parse(trimmed) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Not a parseable URL: {} ({})", trimmed, e);
            return Classification::invalid();
        }
    };

    let host = match parsed.host_str() {
        Some(host) => host,
        None => {
            warn!("URL has no host component: {}", trimmed);
            return Classification::invalid();
        }
    };
    let path = parsed.path();

    if host.contains("instagram.com") || host.contains("instagr.am") {
        if INSTAGRAM_POST_PATH.is_match(path) {
            return Classification::valid(Platform::Instagram);
        }
        debug!("Instagram host but not a post/reel path: {}", path);
    } else if host.contains("tiktok.com") || host.contains("vm.tiktok.com") {
        if TIKTOK_VIDEO_PATH.is_match(path) {
            return Classification::valid(Platform::Tiktok);
        }
        debug!("TikTok host but not a video path: {}", path);
    }

    Classification::invalid()
}

/// Extracts the platform-specific video identifier from a URL
///
/// Best-effort metadata only; `None` when the path does not match the known
/// pattern for the platform.
pub fn extract_video_id(url: &str, platform: Platform) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path();

    match platform {
        Platform::Instagram => INSTAGRAM_POST_PATH
            .captures(path)
            .map(|caps| caps[2].to_string()),
        Platform::Tiktok => TIKTOK_VIDEO_PATH
            .captures(path)
            .map(|caps| caps[2].to_string()),
    }
}
