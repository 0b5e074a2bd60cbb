use anyhow::{bail, Context, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Saves the resource at `video_url` into `dest_dir` under `filename`
///
/// Streams into a `.part` file which is renamed into place on success and
/// removed on failure, so no partial state survives the call.
///
/// # Arguments
/// * `video_url` - Resolved, directly fetchable media location
/// * `filename` - Suggested file name; sanitized before use
/// * `dest_dir` - Directory to save into, created if missing
///
/// # Returns
/// * `Result<PathBuf>` - Path of the saved file or an error
pub async fn trigger(video_url: &str, filename: &str, dest_dir: &Path) -> Result<PathBuf> {
    let safe_name = sanitize_filename::sanitize(filename);
    if safe_name.is_empty() {
        bail!("Filename is empty after sanitization");
    }

    fs::create_dir_all(dest_dir)
        .await
        .with_context(|| format!("Failed to create directory {}", dest_dir.display()))?;

    let final_path = dest_dir.join(&safe_name);
    let part_path = dest_dir.join(format!("{}.part", safe_name));

    info!("Downloading {} to {}", video_url, final_path.display());
    match stream_to_file(video_url, &part_path).await {
        Ok(()) => {
            fs::rename(&part_path, &final_path)
                .await
                .with_context(|| format!("Failed to move {} into place", part_path.display()))?;
            info!("Download complete: {}", final_path.display());
            Ok(final_path)
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&part_path).await {
                warn!(
                    "Failed to remove partial file {}: {}",
                    part_path.display(),
                    cleanup
                );
            }
            Err(e)
        }
    }
}

async fn stream_to_file(video_url: &str, path: &Path) -> Result<()> {
    let response = reqwest::get(video_url)
        .await
        .context("Download request failed")?;

    let status = response.status();
    if !status.is_success() {
        bail!("Download returned status: {}", status);
    }

    let mut file = fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Download stream interrupted")?;
        file.write_all(&chunk)
            .await
            .context("Failed to write download chunk")?;
        written += chunk.len() as u64;
    }
    file.flush().await.context("Failed to flush download")?;

    debug!("Wrote {} bytes to {}", written, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    fn temp_dir() -> PathBuf {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect();
        std::env::temp_dir().join(format!("reelgrab_test_{}", suffix))
    }

    #[tokio::test]
    async fn test_trigger_saves_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/clip.mp4")
            .with_status(200)
            .with_body(b"fake video bytes".to_vec())
            .create_async()
            .await;

        let dir = temp_dir();
        let saved = trigger(&format!("{}/clip.mp4", server.url()), "my clip.mp4", &dir)
            .await
            .unwrap();

        let contents = fs::read(&saved).await.unwrap();
        assert_eq!(contents, b"fake video bytes");
        assert!(!fs::try_exists(dir.join("my clip.mp4.part")).await.unwrap());

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_trigger_cleans_up_on_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.mp4")
            .with_status(404)
            .create_async()
            .await;

        let dir = temp_dir();
        let result = trigger(&format!("{}/missing.mp4", server.url()), "missing.mp4", &dir).await;
        assert!(result.is_err());
        assert!(!fs::try_exists(dir.join("missing.mp4")).await.unwrap());
        assert!(!fs::try_exists(dir.join("missing.mp4.part")).await.unwrap());

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_trigger_rejects_empty_filename() {
        let dir = temp_dir();
        let result = trigger("http://127.0.0.1:1/x", "", &dir).await;
        assert!(result.is_err());
    }
}
