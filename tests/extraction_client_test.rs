use reelgrab::classifier::Platform;
use reelgrab::client::{ClientConfig, ExtractionClient};
use std::time::Duration;

fn client_for(endpoint: String) -> ExtractionClient {
    ExtractionClient::new(ClientConfig {
        endpoint,
        request_timeout: Duration::from_secs(5),
    })
    .expect("Failed to build client")
}

#[tokio::test]
async fn test_success_response_is_mapped() {
    let mut server = mockito::Server::new_async().await;
    let relay = server
        .mock("POST", "/download")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "url": "https://www.tiktok.com/@someuser/video/1234567890",
            "platform": "tiktok"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "id": "1234567890",
                "thumbnailUrl": "https://cdn.example.com/cover.jpg",
                "videoUrl": "https://cdn.example.com/clip.mp4",
                "author": "@someuser",
                "title": "A caption"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(format!("{}/download", server.url()));
    let result = client
        .request_extraction(
            "https://www.tiktok.com/@someuser/video/1234567890",
            Platform::Tiktok,
        )
        .await
        .unwrap();

    assert_eq!(result.id, "1234567890");
    assert_eq!(result.url, "https://www.tiktok.com/@someuser/video/1234567890");
    assert_eq!(result.platform, Platform::Tiktok);
    assert_eq!(result.video_url, "https://cdn.example.com/clip.mp4");
    assert_eq!(result.author, "@someuser");
    relay.assert_async().await;
}

#[tokio::test]
async fn test_missing_optional_fields_get_defaults() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/download")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "thumbnailUrl": "https://cdn.example.com/t.jpg",
                "videoUrl": "https://cdn.example.com/v.mp4"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(format!("{}/download", server.url()));
    let result = client
        .request_extraction("https://www.instagram.com/p/ABC123/", Platform::Instagram)
        .await
        .unwrap();

    assert!(!result.id.is_empty());
    assert_eq!(result.author, "@instagram_user");
    assert_eq!(result.title, "Instagram video");
    // Echoed fields always come from the request, never the response
    assert_eq!(result.url, "https://www.instagram.com/p/ABC123/");
    assert_eq!(result.platform, Platform::Instagram);
}

#[tokio::test]
async fn test_relay_error_message_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/download")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({ "error": "Unsupported platform" }).to_string())
        .create_async()
        .await;

    let client = client_for(format!("{}/download", server.url()));
    let err = client
        .request_extraction("https://www.instagram.com/p/ABC123/", Platform::Instagram)
        .await
        .unwrap_err();

    assert_eq!(err.message, "Unsupported platform");
}

#[tokio::test]
async fn test_unparseable_error_body_becomes_generic_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/download")
        .with_status(500)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = client_for(format!("{}/download", server.url()));
    let err = client
        .request_extraction("https://www.instagram.com/p/ABC123/", Platform::Instagram)
        .await
        .unwrap_err();

    assert_eq!(err.message, "Failed to process video");
}

#[tokio::test]
async fn test_malformed_success_body_is_an_extraction_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/download")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({ "id": "x" }).to_string())
        .create_async()
        .await;

    let client = client_for(format!("{}/download", server.url()));
    let err = client
        .request_extraction("https://www.instagram.com/p/ABC123/", Platform::Instagram)
        .await
        .unwrap_err();

    assert_eq!(err.message, "Failed to process video");
}

#[tokio::test]
async fn test_unreachable_relay_is_an_extraction_error() {
    // Nothing listens here; the call must fold into an ExtractionError
    let client = client_for("http://127.0.0.1:9/download".to_string());
    let err = client
        .request_extraction("https://www.instagram.com/p/ABC123/", Platform::Instagram)
        .await
        .unwrap_err();

    assert_eq!(err.message, "Failed to process video");
}
