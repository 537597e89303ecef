use std::time::Duration;

use folio::inference::{
    CompletionProvider, CompletionRequest, GeminiProvider, ProviderError, StreamChunk,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const MODEL: &str = "gemini-test";
const STREAM_PATH: &str = "/models/gemini-test:streamGenerateContent";

fn request() -> CompletionRequest<'static> {
    CompletionRequest {
        prompt: "What is the tech stack?",
        model: MODEL,
        system_instruction: "You are a portfolio assistant.",
    }
}

fn provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(Some("test-key".to_string()), Some(server.uri()))
}

/// Formats `texts` as one SSE event each.
fn sse_body(texts: &[&str]) -> String {
    texts
        .iter()
        .map(|t| {
            format!(
                "data: {}\r\n\r\n",
                serde_json::json!({
                    "candidates": [{ "content": { "parts": [{ "text": t }], "role": "model" } }]
                })
            )
        })
        .collect()
}

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}

/// Runs the request to completion and collects the text chunks.
async fn run(
    provider: &GeminiProvider,
    cancel: CancellationToken,
) -> (Result<(), ProviderError>, Vec<String>) {
    let (tx, mut rx) = mpsc::channel(100);
    let result = provider.stream_completion(request(), tx, cancel).await;
    let mut texts = Vec::new();
    while let Ok(chunk) = rx.try_recv() {
        if let StreamChunk::Text(text) = chunk {
            texts.push(text);
        }
    }
    (result, texts)
}

// ============================================================================
// Gemini Provider Tests
// ============================================================================

#[tokio::test]
async fn test_gemini_streams_chunks_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .and(query_param("alt", "sse"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "What is the tech stack?" }] }],
            "systemInstruction": { "parts": [{ "text": "You are a portfolio assistant." }] }
        })))
        .respond_with(sse_response(sse_body(&["Hel", "lo", "!"])))
        .expect(1)
        .mount(&server)
        .await;

    let (result, texts) = run(&provider(&server), CancellationToken::new()).await;

    assert!(result.is_ok(), "Expected success, got {:?}", result);
    assert_eq!(texts, vec!["Hel", "lo", "!"]);
}

#[tokio::test]
async fn test_gemini_finish_reason_is_reported() {
    let server = MockServer::start().await;
    let body = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"done\"}]},\"finishReason\":\"STOP\"}]}\n\n";

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(sse_response(body.to_string()))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::channel(100);
    let result = provider(&server)
        .stream_completion(request(), tx, CancellationToken::new())
        .await;
    assert!(result.is_ok());

    assert_eq!(rx.recv().await, Some(StreamChunk::Text("done".to_string())));
    assert_eq!(rx.recv().await, Some(StreamChunk::Finished("STOP".to_string())));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_gemini_http_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let (result, texts) = run(&provider(&server), CancellationToken::new()).await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
    assert!(texts.is_empty());
}

#[tokio::test]
async fn test_gemini_error_in_stream_after_text() {
    let server = MockServer::start().await;
    let mut body = sse_body(&["partial"]);
    body.push_str("data: {\"error\":{\"code\":503,\"message\":\"overloaded\"}}\n\n");

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(sse_response(body))
        .mount(&server)
        .await;

    let (result, texts) = run(&provider(&server), CancellationToken::new()).await;

    assert!(
        matches!(result, Err(ProviderError::Api { status: 503, .. })),
        "Expected in-stream Api error, got {:?}",
        result
    );
    assert_eq!(texts, vec!["partial"]);
}

#[tokio::test]
async fn test_gemini_empty_stream_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(sse_response(String::new()))
        .mount(&server)
        .await;

    let (result, _) = run(&provider(&server), CancellationToken::new()).await;
    assert!(matches!(result, Err(ProviderError::Parse(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_gemini_malformed_chunk_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(sse_response("data: {not json\n\n".to_string()))
        .mount(&server)
        .await;

    let (result, _) = run(&provider(&server), CancellationToken::new()).await;
    assert!(matches!(result, Err(ProviderError::Parse(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_gemini_missing_key_is_config_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(sse_response(sse_body(&["unused"])))
        .expect(0)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(None, Some(server.uri()));
    let (result, _) = run(&provider, CancellationToken::new()).await;
    assert!(matches!(result, Err(ProviderError::Config(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_gemini_cancel_before_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(sse_response(sse_body(&["late"])).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let provider = provider(&server);
    let (result, texts) = tokio::time::timeout(Duration::from_secs(5), run(&provider, cancel))
        .await
        .expect("cancellation should end the request promptly");
    assert!(matches!(result, Err(ProviderError::Cancelled)), "got {:?}", result);
    assert!(texts.is_empty());
}
