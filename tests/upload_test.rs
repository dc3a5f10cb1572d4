//! Upload validation and the multipart request.

mod common;

use common::TestApp;
use paper_killer::shared::models::PaperUpload;
use paper_killer::shared::ApiError;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const TEN_MB: usize = 10 * 1024 * 1024;

fn write_pdf(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let file = dir.join(name);
    std::fs::write(&file, b"%PDF-1.7\n%test").unwrap();
    file
}

#[tokio::test]
async fn test_non_pdf_is_rejected_without_request() {
    let app = TestApp::signed_in("tok").await;
    let upload = PaperUpload::new("notes.txt", Some("text/plain".to_string()), b"hello".to_vec());

    let err = app.client.papers().upload(upload).await.unwrap_err();

    match err {
        ApiError::Validation(e) => {
            assert_eq!(e.field, "file");
            assert!(e.message.contains("notes.txt"));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
    assert_eq!(app.request_count().await, 0);
}

#[tokio::test]
async fn test_oversized_pdf_is_rejected_without_request() {
    let app = TestApp::signed_in("tok").await;
    let upload = PaperUpload::new("huge.pdf", Some("application/pdf".to_string()), vec![0u8; TEN_MB]);

    let err = app.client.papers().upload(upload).await.unwrap_err();

    assert!(matches!(&err, ApiError::Validation(e) if e.message.contains("huge.pdf")));
    assert_eq!(app.request_count().await, 0);
}

#[tokio::test]
async fn test_pdf_is_posted_as_multipart() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/upload"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77,
            "title": "Extracted title",
            "message": "uploaded"
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("paper.pdf");
    std::fs::write(&file, b"%PDF-1.7\n%test").unwrap();

    let receipt = app.client.papers().upload_path(&file).await.unwrap();
    assert_eq!(receipt.paper_id.to_string(), "77");
    assert_eq!(receipt.title.as_deref(), Some("Extracted title"));

    let requests = app.server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"paper.pdf\""));
    assert!(body.contains("%PDF-1.7"));
}

#[tokio::test]
async fn test_upload_with_expired_session_redirects() {
    let app = TestApp::signed_in("stale").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/upload"))
        .respond_with(ResponseTemplate::new(401).set_body_json(common::unauthorized_body()))
        .mount(&app.server)
        .await;

    let upload = PaperUpload::new("paper.pdf", Some("application/pdf".to_string()), b"%PDF".to_vec());
    let err = app.client.papers().upload(upload).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!app.client.session().is_authenticated());
    assert_eq!(app.persisted_token(), None);
    assert_eq!(app.redirects.take(), Some(paper_killer::client::Route::Login));
}

#[tokio::test]
async fn test_oversized_file_on_disk_is_rejected_from_metadata() {
    let app = TestApp::signed_in("tok").await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("huge.pdf");
    std::fs::File::create(&file)
        .unwrap()
        .set_len(TEN_MB as u64 + 1)
        .unwrap();

    let err = app.client.papers().upload_path(&file).await.unwrap_err();

    assert!(matches!(&err, ApiError::Validation(e) if e.message == "huge.pdf is larger than 10MB"));
    assert_eq!(app.request_count().await, 0);
}

#[tokio::test]
async fn test_multi_upload_reports_each_file() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/upload"))
        .and(body_string_contains("filename=\"good.pdf\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "paper_id": 5,
            "title": "Good paper"
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/papers/upload"))
        .and(body_string_contains("filename=\"broken.pdf\""))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "Could not parse PDF" })),
        )
        .mount(&app.server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, b"hello").unwrap();
    let paths = vec![
        write_pdf(dir.path(), "good.pdf"),
        notes,
        write_pdf(dir.path(), "broken.pdf"),
    ];

    let outcomes = app.client.papers().upload_files(&paths).await;

    let names: Vec<&str> = outcomes.iter().map(|o| o.file_name.as_str()).collect();
    assert_eq!(names, vec!["good.pdf", "notes.txt", "broken.pdf"]);
    let receipt = outcomes[0].result.as_ref().unwrap();
    assert_eq!(receipt.title.as_deref(), Some("Good paper"));
    assert!(matches!(&outcomes[1].result, Err(ApiError::Validation(_))));
    match &outcomes[2].result {
        Err(err) => assert_eq!(err.user_message(), "Could not parse PDF"),
        Ok(receipt) => panic!("expected a failure, got {receipt:?}"),
    }
    // The text file never reached the backend.
    assert_eq!(app.request_count().await, 2);
}

#[tokio::test]
async fn test_multi_upload_stops_when_session_expires() {
    let app = TestApp::signed_in("stale").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/upload"))
        .respond_with(ResponseTemplate::new(401).set_body_json(common::unauthorized_body()))
        .mount(&app.server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let paths = vec![write_pdf(dir.path(), "a.pdf"), write_pdf(dir.path(), "b.pdf")];

    let outcomes = app.client.papers().upload_files(&paths).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].result.as_ref().is_err_and(ApiError::is_unauthorized));
    assert_eq!(app.request_count().await, 1);
    assert_eq!(app.redirects.take(), Some(paper_killer::client::Route::Login));
}
