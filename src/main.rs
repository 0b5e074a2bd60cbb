use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use reelgrab::classifier::{classify, extract_video_id};
use reelgrab::client::{ClientConfig, ExtractionClient};
use reelgrab::download;
use reelgrab::relay::config::RelayConfig;
use reelgrab::relay::start_server;
use reelgrab::utils::logger::{init_file_logger, init_stderr_logger};
use reelgrab::utils::suggested_filename;

#[derive(Parser)]
#[command(name = "reelgrab", about = "Download Instagram and TikTok videos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the extraction relay server
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Resolve a post URL and save the video
    Fetch {
        /// Instagram or TikTok post URL
        url: String,

        /// Relay endpoint (defaults to REELGRAB_ENDPOINT or localhost)
        #[arg(long)]
        endpoint: Option<String>,

        /// Directory to save the video into
        #[arg(long, default_value = "downloads")]
        out_dir: PathBuf,

        /// Print metadata only, skip the download
        #[arg(long)]
        no_save: bool,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            let _ = init_file_logger("logs");
            let config = RelayConfig::from_env();
            start_server(&host, port, Some(config)).await
        }
        Command::Fetch {
            url,
            endpoint,
            out_dir,
            no_save,
        } => {
            let _ = init_stderr_logger();
            fetch(&url, endpoint, &out_dir, no_save).await
        }
    }
}

/// Presentation flow: classify, extract, report, download
///
/// All user-visible messaging lives here; the service modules below only
/// return typed results.
async fn fetch(url: &str, endpoint: Option<String>, out_dir: &Path, no_save: bool) -> Result<()> {
    let classification = classify(url);
    let platform = match classification.platform {
        Some(platform) if classification.is_valid => platform,
        _ => bail!("Not a supported Instagram or TikTok video URL: {}", url),
    };

    if let Some(id) = extract_video_id(url, platform) {
        println!("Detected {} video {}", platform, id);
    } else {
        println!("Detected {} video", platform);
    }

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    let client = ExtractionClient::new(config)?;

    let result = match client.request_extraction(url, platform).await {
        Ok(result) => result,
        Err(e) => bail!("{}", e),
    };

    println!("Author:    {}", result.author);
    println!("Title:     {}", result.title);
    println!("Thumbnail: {}", result.thumbnail_url);
    println!("Video:     {}", result.video_url);

    if no_save {
        return Ok(());
    }

    let filename = suggested_filename(&result);
    let saved = download::trigger(&result.video_url, &filename, out_dir).await?;
    println!("Saved to {}", saved.display());
    Ok(())
}
