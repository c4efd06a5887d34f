/*
[INPUT]:  wiremock server address, test API key
[OUTPUT]: Client wired to a mock backend, canned task rows and error bodies
[POS]:    Test infrastructure - shared by the adapter integration tests
[UPDATE]: When adding endpoints or fixtures the tests need
*/

use todolink_adapter::SupabaseClient;
use wiremock::MockServer;

pub const TEST_KEY: &str = "anon-test-key";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&server.uri(), TEST_KEY).expect("client init")
}

/// JSON row as the table API returns it
#[allow(dead_code)]
pub fn task_row(id: i64, task: &str, complete: bool, image: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "task": task,
        "created_at": "2023-03-04T12:00:00.000000+00:00",
        "complete": complete,
        "image": image,
    })
}
