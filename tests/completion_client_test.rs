//! Integration tests for the completion client against a mocked backend.

use std::time::Duration;

use commit_planner::error::{CompletionError, ConfigError};
use commit_planner::llm::{CompletionClient, Granularity, OpenAiClient, build_prompt};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(30);

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

async fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(
        format!("{}/v1", server.uri()),
        Some("test-key".to_string()),
        TIMEOUT,
    )
    .expect("Failed to build client")
}

#[tokio::test]
async fn test_complete_returns_message_content() {
    let server = MockServer::start().await;
    let content = r#"[{"message": "Add logging", "files": ["a.go"]}]"#;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let prompt = build_prompt("diff --git a/a.go b/a.go\n", false, Granularity::default());

    let result = client.complete("gpt-3.5-turbo", &prompt).await.unwrap();
    assert_eq!(result, content);
}

#[tokio::test]
async fn test_request_carries_model_and_both_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("[]")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let diff = "diff --git a/x b/x\n+hello\n";
    let prompt = build_prompt(diff, true, Granularity::new(0.8).unwrap());

    client.complete("gpt-4-32k", &prompt).await.unwrap();

    let requests = server.received_requests().await.expect("Request recording enabled");
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "gpt-4-32k");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], prompt.system.as_str());
    assert_eq!(body["messages"][1]["role"], "user");

    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains(diff));
    assert!(user.contains("multiline=true"));
    assert!(user.contains("granularity=0.8"));
}

#[tokio::test]
async fn test_missing_content_is_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let prompt = build_prompt("diff", false, Granularity::default());

    let result = client.complete("gpt-3.5-turbo", &prompt).await;
    assert!(matches!(result, Err(CompletionError::MissingContent)));
}

#[tokio::test]
async fn test_error_status_is_reported_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let prompt = build_prompt("diff", false, Granularity::default());

    match client.complete("gpt-3.5-turbo", &prompt).await {
        Err(CompletionError::BadStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected BadStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_request_failure() {
    // Bind then drop a server so the port is known to be closed
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = OpenAiClient::new(uri, Some("test-key".to_string()), TIMEOUT).unwrap();
    let prompt = build_prompt("diff", false, Granularity::default());

    let result = client.complete("gpt-3.5-turbo", &prompt).await;
    assert!(matches!(result, Err(CompletionError::RequestFailed(_))));
}

#[tokio::test]
async fn test_missing_api_key_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("[]")))
        .expect(0)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(server.uri(), None, TIMEOUT).unwrap();
    let prompt = build_prompt("diff", false, Granularity::default());

    let result = client.complete("gpt-3.5-turbo", &prompt).await;
    assert!(matches!(
        result,
        Err(CompletionError::Config(ConfigError::MissingApiKey))
    ));
}
