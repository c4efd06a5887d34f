mod common;

use common::{TEST_KEY, png_of_size};
use todolink::{AppConfig, LocalImage, PendingImage, TaskBoard};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        service_url: server.uri(),
        service_key: TEST_KEY.to_string(),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_create_with_image_against_http_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/[0-9a-zA-Z]{32}$"))
        .and(header("x-upsert", "false"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Key": "images/uploaded",
            "Id": "00000000-0000-0000-0000-000000000001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/tasks"))
        .and(header("prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([{
            "id": 1,
            "task": "Buy milk",
            "created_at": "2023-03-01T09:00:00+00:00",
            "complete": false,
            "image": "placeholder"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("order", "id.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 1,
            "task": "Buy milk",
            "created_at": "2023-03-01T09:00:00+00:00",
            "complete": false,
            "image": "placeholder"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = config_for(&server).build_client().expect("client");
    let mut board = TaskBoard::new(client);
    let image = LocalImage::from_bytes("milk.png", png_of_size(128)).expect("png");

    let tasks = board
        .create("Buy milk", vec![PendingImage::Local(image)])
        .await
        .expect("create");
    assert_eq!(tasks.len(), 1);

    // The inserted row references the key the object was uploaded under
    let requests = server.received_requests().await.expect("recorded requests");
    let upload = requests
        .iter()
        .find(|r| r.url.path().starts_with("/storage/"))
        .expect("upload request");
    let uploaded_key = upload.url.path().rsplit('/').next().expect("key").to_string();
    assert_eq!(upload.body.len(), 128);

    let insert = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == "/rest/v1/tasks")
        .expect("insert request");
    let body: serde_json::Value = serde_json::from_slice(&insert.body).expect("insert body");
    assert_eq!(body, serde_json::json!([{ "task": "Buy milk", "image": uploaded_key }]));
}

#[tokio::test]
async fn test_remote_errors_are_swallowed_and_list_refetched() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "boom"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 5,
            "task": "Stays open",
            "created_at": "2023-03-01T09:00:00+00:00",
            "complete": false,
            "image": null
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = TaskBoard::new(config_for(&server).build_client().expect("client"));
    let tasks = board.set_complete(5, true).await;
    assert_eq!(tasks.len(), 1);
    assert!(!tasks[0].complete);
}
