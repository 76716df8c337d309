//! End-to-end command tests against a mock API.

use clap::Parser;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use certview_cli::{run, Cli, EXIT_NOT_FOUND};

fn record(srn: &str, event: &str, image_url: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": "6f1c2a52-2f0e-4c1a-9d0b-3c7c1e0f0a11",
        "srn": srn,
        "event": event,
        "imageUrl": image_url,
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

async fn run_args(mock_server: &MockServer, args: &[&str]) -> u8 {
    let uri = mock_server.uri();
    let mut argv = vec!["certview", "--api-url", uri.as_str()];
    argv.extend_from_slice(args);
    run(Cli::try_parse_from(argv).unwrap()).await.unwrap()
}

#[tokio::test]
async fn find_exit_codes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/certificates/PES1/codefest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(record("PES1", "Code Fest", "https://i/c.png")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/certificates/PES1/ideathon"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    assert_eq!(run_args(&mock_server, &["find", "PES1", "codefest"]).await, 0);
    assert_eq!(
        run_args(&mock_server, &["find", "PES1", "ideathon"]).await,
        EXIT_NOT_FOUND
    );
}

#[tokio::test]
async fn show_resolves_page_path_by_scanning() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/certificates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            record("PES1UG20CS001", "Code Fest 2025", "https://i/c.png")
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    assert_eq!(
        run_args(&mock_server, &["show", "/certificate/PES1UG20CS001/codefest2025"]).await,
        0
    );
    assert_eq!(
        run_args(&mock_server, &["show", "PES1UG20CS001", "hackathon"]).await,
        EXIT_NOT_FOUND
    );
}

#[tokio::test]
async fn show_resolves_gallery_link_with_slash_in_event() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/certificates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            record("PES1UG20CS003", "AI/ML Day", "https://i/a.png")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert_eq!(
        run_args(&mock_server, &["show", "/certificate/PES1UG20CS003/ai%2Fmlday"]).await,
        0
    );
}

#[tokio::test]
async fn show_without_slug_is_invalid() {
    let mock_server = MockServer::start().await;
    assert_eq!(run_args(&mock_server, &["show", "PES1UG20CS001"]).await, 1);
}

#[tokio::test]
async fn list_fails_when_api_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/certificates"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    assert_eq!(run_args(&mock_server, &["list"]).await, 1);
}

#[tokio::test]
async fn download_saves_into_directory() {
    let mock_server = MockServer::start().await;
    let image_url = format!("{}/img/c.png", mock_server.uri());
    Mock::given(method("GET"))
        .and(path("/api/resolve/PES1/ideathon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record("PES1", "Ideathon", &image_url)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/c.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();
    let code = run_args(
        &mock_server,
        &["download", "PES1", "ideathon", "--server", "--dir", dir_arg],
    )
    .await;
    assert_eq!(code, 0);
    assert!(dir.path().join("Ideathon_Certificate.png").exists());
}
