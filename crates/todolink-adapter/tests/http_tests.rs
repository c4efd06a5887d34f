/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for the table client
[POS]:    Integration tests - table endpoints
[UPDATE]: When table endpoints change
*/

mod common;

use common::{TEST_KEY, client_for, setup_mock_server, task_row};
use std::time::Duration;
use todolink_adapter::{ClientConfig, NewTask, SupabaseClient, SupabaseError};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(SupabaseClient::new("https://abghecgrcejwvmgtliex.supabase.co", TEST_KEY));
    assert_eq!(client.table(), "tasks");
    assert_eq!(client.bucket(), "images");
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        table: "todos".to_string(),
        bucket: "attachments".to_string(),
    };
    let client = assert_ok!(SupabaseClient::with_config("https://example.org", TEST_KEY, config));
    assert_eq!(client.table(), "todos");
    assert_eq!(client.bucket(), "attachments");
}

#[test]
fn test_client_rejects_blank_table() {
    let config = ClientConfig {
        table: String::new(),
        ..ClientConfig::default()
    };
    let err = SupabaseClient::with_config("https://example.org", TEST_KEY, config).unwrap_err();
    assert!(matches!(err, SupabaseError::Config(_)));
}

#[tokio::test]
async fn test_custom_table_name_is_used_in_path() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        table: "todos".to_string(),
        ..ClientConfig::default()
    };
    let client = assert_ok!(SupabaseClient::with_config(&server.uri(), TEST_KEY, config));
    let tasks = assert_ok!(client.list_tasks().await);
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_insert_then_list_flow() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/tasks"))
        .and(body_json(serde_json::json!([{ "task": "Buy milk", "image": "K3y" }])))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!([task_row(5, "Buy milk", false, Some("K3y"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("order", "id.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            task_row(4, "Walk dog", true, None),
            task_row(5, "Buy milk", false, Some("K3y")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let inserted = assert_ok!(
        client
            .insert_task(&NewTask::new("Buy milk", Some("K3y".to_string())))
            .await
    );
    assert_eq!(inserted.id, 5);

    let tasks = assert_ok!(client.list_tasks().await);
    let ids: Vec<i64> = tasks.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![4, 5]);
    assert_eq!(tasks[1].image_key(), Some("K3y"));
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_task(1).await.unwrap_err();
    assert!(err.is_retryable());
    match err {
        SupabaseError::Api { code, message } => {
            assert_eq!(code, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("Expected Api error variant, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_tasks().await.unwrap_err();
    assert!(matches!(err, SupabaseError::Serialization(_)));
}
