use std::time::Duration;

use board::{ClientConfig, HttpRemoteStore, RemoteError, RemoteStore};
use serde_json::json;
use shared::{SortOrder, Task, TaskFields, TaskStatus};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> HttpRemoteStore {
    HttpRemoteStore::new(&ClientConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn select_all_requests_the_order_and_reads_null_subtasks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "0192a0b1c2d34e5f8a9b0c1d2e3f4a5b",
                "title": "Write report",
                "description": "",
                "status": "in-progress",
                "createdAt": 1_700_000_000_000i64,
                "subtasks": null
            },
            {
                "id": "0192a0b1c2d34e5f8a9b0c1d2e3f4a5c",
                "title": "Review",
                "description": "team",
                "status": "pending",
                "createdAt": 1_600_000_000_000i64,
                "subtasks": [
                    { "id": "s1", "text": "read", "completed": true, "subtasks": [] }
                ]
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client(&server)
        .await
        .select_all(SortOrder::NewestFirst)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].status, TaskStatus::InProgress);
    assert!(rows[0].subtasks.is_empty());
    assert_eq!(rows[1].created_at, 1_600_000_000_000);
    assert!(rows[1].subtasks[0].completed);
}

#[tokio::test]
async fn insert_posts_the_row_and_maps_conflict() {
    let server = MockServer::start().await;
    let task = Task::new("A", "", TaskStatus::Pending);
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(&task))
        .respond_with(ResponseTemplate::new(201).set_body_json(&task))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "error": "exists" })))
        .mount(&server)
        .await;

    let store = client(&server).await;
    store.insert(&task).await.unwrap();
    let err = store.insert(&task).await.unwrap_err();

    assert!(matches!(err, RemoteError::Conflict(ref id) if *id == task.id));
}

#[tokio::test]
async fn update_puts_only_the_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/abc"))
        .and(body_json(json!({ "status": "completed" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let fields = TaskFields {
        status: Some(TaskStatus::Completed),
        ..TaskFields::default()
    };
    client(&server).await.update("abc", &fields).await.unwrap();
}

#[tokio::test]
async fn delete_of_a_missing_row_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "missing" })))
        .mount(&server)
        .await;

    let err = client(&server).await.delete("gone").await.unwrap_err();

    assert!(matches!(err, RemoteError::NotFound(ref id) if id == "gone"));
}

#[tokio::test]
async fn server_errors_carry_the_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let store = client(&server).await;
    match store.select_all(SortOrder::OldestFirst).await.unwrap_err() {
        RemoteError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
    match store.delete("x").await.unwrap_err() {
        RemoteError::Status { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_an_http_error() {
    let config = ClientConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2));
    let store = HttpRemoteStore::new(&config).unwrap();

    let err = store
        .insert(&Task::new("A", "", TaskStatus::Pending))
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Http(_)));
}
