pub mod config;
pub mod handlers;
pub mod models;
pub mod providers;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument};

use crate::relay::config::RelayConfig;
use crate::relay::handlers::{download_handler, health_check};
use crate::relay::providers::VideoExtractor;

/// Starts the relay server with the specified configuration
///
/// Each request is handled independently and statelessly; the only shared
/// state is the extractor, which is read-only after startup.
///
/// # Arguments
/// * `host` - Host address to bind to (e.g., "127.0.0.1")
/// * `port` - Port to listen on
/// * `config` - Optional relay configuration (uses defaults if None)
///
/// # Returns
/// * `Result<()>` - Success or an error
#[instrument(skip(config))]
pub async fn start_server(host: &str, port: u16, config: Option<RelayConfig>) -> Result<()> {
    info!("Starting extraction relay on {}:{}", host, port);

    let config = config.unwrap_or_else(|| {
        debug!("Using default relay configuration");
        RelayConfig::default()
    });

    let extractor = web::Data::new(VideoExtractor::new(config)?);

    HttpServer::new(move || {
        App::new()
            .app_data(extractor.clone())
            .service(web::resource("/download").route(web::post().to(download_handler)))
            .service(web::resource("/health").route(web::get().to(health_check)))
    })
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", host, port, e);
        e
    })
    .context("Failed to bind relay server")?
    .run()
    .await
    .context("Relay server error")?;

    info!("Relay shutdown complete");
    Ok(())
}
