//! Resource-access functions: paths, payloads and independent outcomes.

mod common;

use common::{paper_json, TestApp};
use paper_killer::client::ApiClient;
use paper_killer::shared::models::{
    BatchOperation, ConferenceDraft, ExperimentRequest, PaperStatus, PaperUpdate, RecordId, ShareRequest,
    SubmissionData,
};
use paper_killer::shared::{ApiError, AppConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_dashboard_outcomes_are_independent() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/papers/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "stats exploded" })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/papers/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([paper_json(3, "Recent")])))
        .mount(&app.server)
        .await;

    let dashboard = app.client.papers().dashboard().await;

    let err = dashboard.stats.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), "stats exploded");
    let recent = dashboard.recent.unwrap();
    assert_eq!(recent[0].title, "Recent");
    assert!(app.client.session().is_authenticated());
}

#[tokio::test]
async fn test_paper_crud_paths() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/papers/42"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paper_json(42, "Answer")))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/papers/42"))
        .and(body_json(json!({ "title": "Renamed", "status": "submitted" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(paper_json(42, "Renamed")))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/papers/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let id = RecordId::from(42);
    let paper = app.client.papers().get(&id).await.unwrap();
    assert_eq!(paper.keywords, vec!["nlp", "transformers"]);
    assert_eq!(paper.status, PaperStatus::Draft);

    let update = PaperUpdate {
        title: Some("Renamed".to_string()),
        status: Some(PaperStatus::Submitted),
        ..PaperUpdate::default()
    };
    let updated = app.client.papers().update(&id, &update).await.unwrap();
    assert_eq!(updated.title, "Renamed");

    app.client.papers().delete(&id).await.unwrap();
}

#[tokio::test]
async fn test_search_sends_query() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/papers/search"))
        .and(query_param("q", "graph neural"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([paper_json(5, "GNNs")])))
        .expect(1)
        .mount(&app.server)
        .await;

    let results = app.client.papers().search("graph neural").await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_batch_operation_body() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/batch"))
        .and(body_json(json!({ "operation": "favorite", "ids": [1, "b2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updated": 2 })))
        .expect(1)
        .mount(&app.server)
        .await;

    let result = app
        .client
        .papers()
        .batch(BatchOperation::Favorite, vec![RecordId::from(1), RecordId::from("b2")])
        .await
        .unwrap();
    assert_eq!(result["updated"], 2);
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/papers/9/file"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 fake".to_vec()))
        .mount(&app.server)
        .await;

    let bytes = app.client.papers().download(&RecordId::from(9)).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.7 fake".to_vec());
}

#[tokio::test]
async fn test_tag_paths_are_encoded() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/1/tags"))
        .and(body_json(json!({ "tag": "deep learning" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/papers/1/tags/deep%20learning"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/papers/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["nlp", { "name": "cv", "count": 3 }])))
        .mount(&app.server)
        .await;

    let id = RecordId::from(1);
    app.client.library().add_tag(&id, "deep learning").await.unwrap();
    app.client.library().remove_tag(&id, "deep learning").await.unwrap();

    let tags = app.client.library().tags().await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "nlp");
    assert_eq!(tags[1].count, Some(3));
}

#[tokio::test]
async fn test_favorite_toggle_paths() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/3/favorite"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/papers/3/favorite"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let id = RecordId::from(3);
    app.client.library().favorite(&id).await.unwrap();
    app.client.library().unfavorite(&id).await.unwrap();
}

#[tokio::test]
async fn test_comment_thread_paths() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/papers/2/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 10,
            "content": "Nice work",
            "username": "bob",
            "replies": [{ "id": 11, "content": "Thanks" }]
        }])))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/papers/2/comments/10/reply"))
        .and(body_json(json!({ "content": "You're welcome" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 12, "content": "You're welcome" })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/papers/2/comments/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let paper = RecordId::from(2);
    let comments = app.client.comments().list(&paper).await.unwrap();
    assert_eq!(comments[0].author.as_deref(), Some("bob"));
    assert_eq!(comments[0].thread_len(), 2);

    let reply = app
        .client
        .comments()
        .reply(&paper, &comments[0].id, "You're welcome")
        .await
        .unwrap();
    assert_eq!(reply.id, RecordId::from(12));

    app.client
        .comments()
        .delete(&paper, &comments[0].replies[0].id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_share_link_lifecycle() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/4/share"))
        .and(body_json(json!({ "permission": "read", "expires_in_days": 7 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://papers.example/s/abc",
            "expires_at": "2024-05-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/papers/4/share"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    let id = RecordId::from(4);
    let request = ShareRequest {
        permission: Some("read".to_string()),
        expires_in_days: Some(7),
    };
    let link = app.client.sharing().share(&id, &request).await.unwrap();
    assert_eq!(link.share_link, "https://papers.example/s/abc");
    assert!(link.expires_at.is_some());

    app.client.sharing().unshare(&id).await.unwrap();
}

#[tokio::test]
async fn test_analysis_endpoints() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/8/analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "paper_id": 8,
            "keywords": "attention; transformers",
            "summary": "Short summary",
            "innovation_points": ["first", "second"],
            "confidence": 0.9
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/papers/8/experiments"))
        .and(body_json(json!({ "epochs": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "exp-1",
            "name": "baseline",
            "metrics": { "accuracy": 0.91 }
        }])))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/papers/8/submissions"))
        .and(body_json(json!({
            "conference": "NeurIPS",
            "track": "main",
            "abstract": "A",
            "keywords": "k"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/papers/8/submission/suggest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "conferences": ["ICML"] })))
        .expect(1)
        .mount(&app.server)
        .await;

    let id = RecordId::from(8);
    let analysis = app.client.analysis().create(&id).await.unwrap();
    assert_eq!(analysis.keywords, vec!["attention", "transformers"]);
    assert_eq!(analysis.innovation_points.len(), 2);
    assert_eq!(analysis.extra.get("confidence"), Some(&json!(0.9)));

    let mut parameters = serde_json::Map::new();
    parameters.insert("epochs".to_string(), json!(3));
    let results = app
        .client
        .analysis()
        .run_experiments(&id, &ExperimentRequest { parameters })
        .await
        .unwrap();
    assert_eq!(results[0].metrics.get("accuracy"), Some(&0.91));

    let submission = SubmissionData {
        conference: "NeurIPS".to_string(),
        track: "main".to_string(),
        abstract_text: "A".to_string(),
        keywords: "k".to_string(),
    };
    app.client.analysis().submit(&id, &submission).await.unwrap();

    let suggestion = app.client.analysis().suggest_conference(&id).await.unwrap();
    assert_eq!(suggestion["conferences"][0], "ICML");
}

#[tokio::test]
async fn test_user_endpoints() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/users/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalPapers": 4,
            "favorite_papers": 1
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/interests"))
        .and(body_json(json!({ "interests": ["nlp", "vision"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "interests": ["nlp", "vision"] })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "u-1", "email": "ada@example.com" })))
        .mount(&app.server)
        .await;

    let stats = app.client.users().stats().await.unwrap();
    assert_eq!(stats.total_papers, 4);
    assert_eq!(stats.favorite_papers, 1);

    let saved = app
        .client
        .users()
        .update_interests(vec!["nlp".to_string(), "vision".to_string()])
        .await
        .unwrap();
    assert_eq!(saved, vec!["nlp", "vision"]);

    let profile = app.client.account().profile().await.unwrap();
    assert_eq!(profile.id, Some(RecordId::from("u-1")));
}

#[tokio::test]
async fn test_non_auth_failure_keeps_session() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/papers/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Paper not found" })))
        .mount(&app.server)
        .await;

    let err = app.client.papers().get(&RecordId::from(404)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(app.client.session().is_authenticated());
    assert_eq!(app.redirects.issued(), 0);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let app = TestApp::signed_in("tok").await;
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = AppConfig::builder()
        .server_url(format!("http://127.0.0.1:{port}/api"))
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();
    let client = ApiClient::new(&config, app.client.session().clone(), app.redirects.clone()).unwrap();

    let err = client.papers().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_) | ApiError::Timeout));
    assert!(client.session().is_authenticated());
    assert_eq!(app.redirects.issued(), 0);
}

#[tokio::test]
async fn test_slow_backend_maps_to_timeout() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/papers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&app.server)
        .await;

    let config = AppConfig::builder()
        .server_url(format!("{}/api", app.server.uri()))
        .timeout(std::time::Duration::from_millis(300))
        .build()
        .unwrap();
    let client = ApiClient::new(&config, app.client.session().clone(), app.redirects.clone()).unwrap();

    let err = client.papers().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout), "expected a timeout, got {err:?}");
    assert_eq!(err.user_message(), "The server took too long to respond");
    assert!(client.session().is_authenticated());
    assert_eq!(app.redirects.issued(), 0);
}

#[tokio::test]
async fn test_conference_listing_and_filters() {
    let app = TestApp::new().await;
    let paper = json!({
        "id": "abc",
        "title": "Sparse attention",
        "authors": ["Ada", "Grace"],
        "abstract": "We study sparsity.",
        "tags": ["attention"],
        "track": "oral",
        "similarityScore": 0.8
    });
    Mock::given(method("GET"))
        .and(path("/api/papers/iclr2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([paper.clone()])))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/papers/iclr2025/search"))
        .and(query_param("q", "sparse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([paper.clone()])))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/papers/iclr2025/topic/graph%20learning"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/papers/iclr2025/track/oral"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([paper.clone()])))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/papers/iclr2025/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paper))
        .expect(1)
        .mount(&app.server)
        .await;

    let conference = app.client.conference();
    let all = conference.papers().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].authors, vec!["Ada", "Grace"]);
    assert_eq!(all[0].similarity_score, Some(0.8));

    assert_eq!(conference.search("sparse").await.unwrap().len(), 1);
    assert!(conference.by_topic("graph learning").await.unwrap().is_empty());
    assert_eq!(conference.by_track("oral").await.unwrap()[0].title, "Sparse attention");
    let one = conference.paper(&RecordId::from("abc")).await.unwrap();
    assert_eq!(one.abstract_text.as_deref(), Some("We study sparsity."));

    // Signed out: nothing is attached.
    assert!(app.auth_headers().await.iter().all(Option::is_none));
}

#[tokio::test]
async fn test_conference_refresh_and_draft() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/iclr2025/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Updated 12 papers" })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/papers/iclr2025/create"))
        .and(body_json(json!({
            "topic": "Efficient attention",
            "innovations": "Linear cost",
            "datasets": ["WikiText"],
            "metrics": ["ppl"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "created",
            "paper": { "id": "13", "title": "Efficient attention", "innovations": ["Linear cost"] }
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let conference = app.client.conference();
    assert_eq!(conference.refresh().await.unwrap(), "Updated 12 papers");

    let draft = ConferenceDraft {
        topic: "Efficient attention".to_string(),
        innovations: "Linear cost".to_string(),
        datasets: vec!["WikiText".to_string()],
        metrics: vec!["ppl".to_string()],
    };
    let created = conference.draft(&draft).await.unwrap();
    assert_eq!(created.paper.id, RecordId::Text("13".to_string()));
    assert_eq!(created.paper.innovations, vec!["Linear cost"]);
}

#[tokio::test]
async fn test_file_storage_and_listing() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("GET"))
        .and(path("/api/storage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_size": 3072,
            "file_count": 2,
            "max_size": 1073741824,
            "used_percentage": 0.0003
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/files"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "20"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{
                "name": "a.pdf",
                "size": 1024,
                "created_at": "2024-03-01T10:00:00",
                "modified_at": "2024-03-02T10:00:00",
                "path": "uploads/a.pdf"
            }],
            "total": 21,
            "page": 2,
            "page_size": 20
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let files = app.client.files();
    let storage = files.storage().await.unwrap();
    assert_eq!(storage.file_count, 2);
    assert_eq!(storage.total_size, 3072);

    let listing = files.list(2, 20).await.unwrap();
    assert_eq!(listing.files[0].path, "uploads/a.pdf");
    assert_eq!(listing.page_count(), 2);
}

#[tokio::test]
async fn test_file_listing_bounds_are_checked_locally() {
    let app = TestApp::signed_in("tok").await;
    let files = app.client.files();

    assert!(matches!(files.list(0, 20).await, Err(ApiError::Validation(_))));
    assert!(matches!(files.list(1, 101).await, Err(ApiError::Validation(_))));
    assert!(matches!(files.cleanup(0).await, Err(ApiError::Validation(_))));
    assert!(matches!(files.move_file("a.pdf", "  ").await, Err(ApiError::Validation(_))));
    assert_eq!(app.request_count().await, 0);
}

#[tokio::test]
async fn test_file_housekeeping_requests() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("DELETE"))
        .and(path("/api/files/uploads%2Fold%20draft.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/files/move"))
        .and(query_param("source_path", "uploads/a.pdf"))
        .and(query_param("target_path", "archive/a.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "moved" })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/cleanup"))
        .and(query_param("days", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Removed 3 files",
            "cleaned_count": 3
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let files = app.client.files();
    assert_eq!(files.delete("uploads/old draft.pdf").await.unwrap(), "deleted");
    assert_eq!(files.move_file("uploads/a.pdf", " archive/a.pdf ").await.unwrap(), "moved");
    let report = files.cleanup(30).await.unwrap();
    assert_eq!(report.cleaned_count, 3);
}

#[tokio::test]
async fn test_optimize_returns_backend_suggestions() {
    let app = TestApp::signed_in("tok").await;
    Mock::given(method("POST"))
        .and(path("/api/papers/4/optimize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "structure": ["Move related work before method"]
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let suggestions = app.client.analysis().optimize(&RecordId::from(4)).await.unwrap();
    assert_eq!(suggestions["structure"][0], "Move related work before method");
}
