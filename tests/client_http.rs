//! HTTP-level client tests against a mock server

use std::io::Write;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openai_rs::api::{
    ChatCompletionRequest, ChatMessage, FileId, FileSource, FileUpload, ModelId,
    TranscriptionRequest,
};
use openai_rs::client::{Client, ClientConfig};
use openai_rs::OpenAIError;

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::builder("sk-test")
        .base_url(format!("{}/v1", server.uri()))
        .max_retries(0)
        .build();
    Client::new(config).unwrap()
}

fn chat_completion_body() -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_677_652_288u64,
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Hi!"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
    })
}

#[tokio::test]
async fn chat_completion_sends_auth_and_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": "Hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body()))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatCompletionRequest::builder()
        .model(ModelId::from("gpt-4"))
        .message(ChatMessage::user("Hello"))
        .build()
        .unwrap();

    let completion = client_for(&server).chat_completion(&request).await.unwrap();
    assert_eq!(completion.id, "chatcmpl-123");
    assert_eq!(
        completion.choices[0].message.content.as_deref(),
        Some("Hi!")
    );
}

#[tokio::test]
async fn organization_header_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("OpenAI-Organization", "org-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "gpt-4", "object": "model", "owned_by": "openai"}]
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::builder("sk-test")
        .base_url(format!("{}/v1", server.uri()))
        .organization("org-123")
        .max_retries(0)
        .build();
    let models = Client::new(config).unwrap().models().await.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].id, ModelId::from("gpt-4"));
}

#[tokio::test]
async fn api_error_envelope_is_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "message": "The model `gpt-nonexistent` does not exist",
                "type": "invalid_request_error",
                "param": "model",
                "code": "model_not_found"
            }
        })))
        .mount(&server)
        .await;

    let request = ChatCompletionRequest::new(
        ModelId::from("gpt-nonexistent"),
        vec![ChatMessage::user("Hello")],
    );

    let err = client_for(&server).chat_completion(&request).await.unwrap_err();
    match err {
        OpenAIError::Api { status, message, body } => {
            assert_eq!(status, 404);
            assert!(message.contains("does not exist"));
            assert_eq!(body.unwrap().param.as_deref(), Some("model"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder("sk-test")
        .base_url(format!("{}/v1", server.uri()))
        .max_retries(2)
        .build();
    let client = Client::new(config).unwrap();

    let request =
        ChatCompletionRequest::new(ModelId::from("gpt-4"), vec![ChatMessage::user("Hello")]);
    let completion = client.chat_completion(&request).await.unwrap();
    assert_eq!(completion.id, "chatcmpl-123");
}

#[tokio::test]
async fn exhausted_retry_budget_reports_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig::builder("sk-test")
        .base_url(format!("{}/v1", server.uri()))
        .max_retries(1)
        .build();
    let client = Client::new(config).unwrap();

    let request =
        ChatCompletionRequest::new(ModelId::from("gpt-4"), vec![ChatMessage::user("Hello")]);
    let err = client.chat_completion(&request).await.unwrap_err();
    match err {
        OpenAIError::Timeout(message) => {
            assert!(message.contains("2 attempts"));
            assert!(message.contains("503"));
        }
        other => panic!("expected Timeout error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "bad request", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder("sk-test")
        .base_url(format!("{}/v1", server.uri()))
        .max_retries(3)
        .build();
    let client = Client::new(config).unwrap();

    let request =
        ChatCompletionRequest::new(ModelId::from("gpt-4"), vec![ChatMessage::user("Hello")]);
    let err = client.chat_completion(&request).await.unwrap_err();
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn transcription_uploads_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(header("Authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "And the Mel 9000 laser blaster!"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TranscriptionRequest::builder()
        .audio(FileSource::bytes("micro-machines.wav", vec![0u8; 16]))
        .model(ModelId::from("whisper-1"))
        .build()
        .unwrap();

    let transcription = client_for(&server).transcription(&request).await.unwrap();
    assert_eq!(transcription.text, "And the Mel 9000 laser blaster!");
}

#[tokio::test]
async fn file_upload_reads_path_backed_source() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-abc",
            "object": "file",
            "bytes": 11,
            "created_at": 1_677_610_602u64,
            "filename": "train.jsonl",
            "purpose": "fine-tune"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("train.jsonl");
    let mut handle = std::fs::File::create(&file_path).unwrap();
    handle.write_all(b"{\"a\": 1}\n").unwrap();

    let upload = FileUpload::builder()
        .file(FileSource::path(&file_path))
        .purpose("fine-tune")
        .build()
        .unwrap();

    let file = client_for(&server).upload_file(&upload).await.unwrap();
    assert_eq!(file.id, FileId::from("file-abc"));
    assert_eq!(file.filename, "train.jsonl");
}

#[tokio::test]
async fn delete_file_reports_deletion() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/files/file-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-abc",
            "object": "file",
            "deleted": true
        })))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .delete_file(&FileId::from("file-abc"))
        .await
        .unwrap();
    assert!(response.deleted);
}
