use std::env;
use std::time::Duration;

const INSTAGRAM_API_URL: &str =
    "https://instagram-downloader-download-instagram-videos-stories.p.rapidapi.com/index";
const TIKTOK_API_URL: &str =
    "https://tiktok-downloader-download-tiktok-videos-without-watermark.p.rapidapi.com/vid/index";

/// Configuration for the extraction relay
///
/// Read once at startup and fixed for the process lifetime. A missing
/// credential is not an error: the matching provider runs in placeholder
/// mode, which keeps the relay usable end-to-end without upstream access.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Credential for the Instagram extraction provider
    pub instagram_api_key: Option<String>,

    /// Credential for the TikTok extraction provider
    pub tiktok_api_key: Option<String>,

    /// Instagram provider endpoint, overridable for tests
    pub instagram_api_url: String,

    /// TikTok provider endpoint, overridable for tests
    pub tiktok_api_url: String,

    /// Timeout for relay-to-upstream calls
    pub upstream_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            instagram_api_key: None,
            tiktok_api_key: None,
            instagram_api_url: INSTAGRAM_API_URL.to_string(),
            tiktok_api_url: TIKTOK_API_URL.to_string(),
            upstream_timeout: Duration::from_secs(10),
        }
    }
}

impl RelayConfig {
    /// Builds the relay configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            instagram_api_key: env::var("INSTAGRAM_API_KEY").ok().filter(|k| !k.is_empty()),
            tiktok_api_key: env::var("TIKTOK_API_KEY").ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }
}
