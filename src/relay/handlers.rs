use actix_web::{web, HttpResponse, Responder};
use tracing::{debug, info, instrument, warn};

use crate::classifier::Platform;
use crate::relay::models::{DownloadRequest, ErrorResponse, HealthStatus};
use crate::relay::providers::VideoExtractor;

/// HTTP handler for extraction requests
///
/// Validates the request body, dispatches to the platform provider, and
/// returns the normalized payload. Once `url` and `platform` are valid this
/// handler never fails: upstream trouble is absorbed inside the extractor.
///
/// # Arguments
/// * `request` - JSON request containing the post URL and platform
/// * `extractor` - Shared video extractor instance
///
/// # Returns
/// * HTTP response with the video payload or error information
#[instrument(skip(extractor))]
pub async fn download_handler(
    request: web::Json<DownloadRequest>,
    extractor: web::Data<VideoExtractor>,
) -> impl Responder {
    let url = match request.url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => url,
        None => {
            warn!("Rejected request with missing URL");
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "URL and platform are required".to_string(),
            });
        }
    };

    let platform = match request.platform.as_deref() {
        None | Some("") => {
            warn!("Rejected request with missing platform");
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "URL and platform are required".to_string(),
            });
        }
        Some(name) => match Platform::from_str_opt(name) {
            Some(platform) => platform,
            None => {
                warn!("Rejected request for unsupported platform: {}", name);
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Unsupported platform".to_string(),
                });
            }
        },
    };

    info!("Processing {} extraction request for URL: {}", platform, url);
    let payload = extractor.extract(platform, url).await;
    debug!("Extraction complete, id={}", payload.id);
    HttpResponse::Ok().json(payload)
}

/// Health check endpoint for monitoring service status
///
/// Reports, per provider, whether the relay runs against the live upstream or
/// in placeholder mode.
#[instrument(skip(extractor))]
pub async fn health_check(extractor: web::Data<VideoExtractor>) -> impl Responder {
    debug!("Processing health check request");

    let mode = |live: bool| if live { "live" } else { "placeholder" };
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        instagram: mode(extractor.has_instagram_credential()).to_string(),
        tiktok: mode(extractor.has_tiktok_credential()).to_string(),
    })
}
