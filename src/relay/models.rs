use serde::{Deserialize, Serialize};

/// Incoming extraction request body
///
/// Fields are optional so the handler can shape its own 400 responses instead
/// of surfacing a deserialization error.
#[derive(Debug, Deserialize, Clone)]
pub struct DownloadRequest {
    pub url: Option<String>,
    pub platform: Option<String>,
}

/// Normalized video payload returned to the client
///
/// Every field is populated; provider gaps are filled with platform defaults
/// before the payload leaves the relay.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoPayload {
    /// Provider-assigned id, or derived from the URL path, or a random token
    pub id: String,

    /// Preview image location, never empty
    pub thumbnail_url: String,

    /// Directly fetchable media location, never empty
    pub video_url: String,

    /// Display handle, `@{platform}_user` when the provider omits it
    pub author: String,

    /// Display caption, a platform-labeled generic when the provider omits it
    pub title: String,
}

/// Error response for relay endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Response for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status indicator, always "ok" while the process is serving
    pub status: String,

    /// "live" when an Instagram credential is configured, else "placeholder"
    pub instagram: String,

    /// "live" when a TikTok credential is configured, else "placeholder"
    pub tiktok: String,
}
