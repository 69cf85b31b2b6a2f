//! OpenAI-compatible client tests against an in-process HTTP server.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use ecomarket_config::{GeneralSettings, TemperatureSettings};
use ecomarket_core::{CompletionError, CompletionProvider, CompletionRequest, Message, OpenAiClient};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// Serve `reply` for every chat-completions call and record what was sent.
async fn spawn_server(status: StatusCode, reply: Value) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let handler = move |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| {
        let reply = reply.clone();
        async move {
            let auth = headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            seen.lock().expect("lock").push((auth, body));
            (status, Json(reply)).into_response()
        }
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(handler))
        .with_state(seen.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/v1"), seen)
}

fn general(base_url: String, api_key: Option<&str>) -> GeneralSettings {
    GeneralSettings {
        model: "mistral".to_string(),
        base_url,
        api_key: api_key.map(str::to_string),
        temperature: TemperatureSettings::default(),
    }
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "mistral".to_string(),
        messages: vec![
            Message::system("Eres un agente de EcoMarket."),
            Message::user("¿Dónde está mi pedido 12345?"),
        ],
        temperature: 0.5,
    }
}

#[tokio::test]
async fn returns_first_choice_and_sends_openai_body() {
    let (base_url, seen) = spawn_server(
        StatusCode::OK,
        json!({
            "choices": [
                {"message": {"role": "assistant", "content": "En tránsito."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }),
    )
    .await;
    let client = OpenAiClient::from_settings(&general(base_url, Some("ollama"))).expect("client");

    let text = client.complete(&request()).await.expect("completion");
    assert_eq!(text, "En tránsito.");

    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer ollama"));
    assert_eq!(
        body,
        &json!({
            "model": "mistral",
            "messages": [
                {"role": "system", "content": "Eres un agente de EcoMarket."},
                {"role": "user", "content": "¿Dónde está mi pedido 12345?"}
            ],
            "temperature": 0.5
        })
    );
}

#[tokio::test]
async fn empty_api_key_sends_no_authorization() {
    let (base_url, seen) = spawn_server(
        StatusCode::OK,
        json!({"choices": [{"message": {"content": "ok"}}]}),
    )
    .await;
    let client = OpenAiClient::from_settings(&general(base_url, Some(""))).expect("client");

    client.complete(&request()).await.expect("completion");
    assert_eq!(seen.lock().expect("lock")[0].0, None);
}

#[tokio::test]
async fn error_status_is_reported_with_body() {
    let (base_url, _seen) = spawn_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "model not loaded"}),
    )
    .await;
    let client = OpenAiClient::from_settings(&general(base_url, None)).expect("client");

    match client.complete(&request()).await {
        Err(CompletionError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("model not loaded"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn missing_choices_is_empty_response() {
    let (base_url, _seen) = spawn_server(StatusCode::OK, json!({"choices": []})).await;
    let client = OpenAiClient::from_settings(&general(base_url, None)).expect("client");

    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::EmptyResponse), "{err:?}");
}

#[tokio::test]
async fn non_completion_body_is_decode_error() {
    let (base_url, _seen) = spawn_server(StatusCode::OK, json!("not a completion")).await;
    let client = OpenAiClient::from_settings(&general(base_url, None)).expect("client");

    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client =
        OpenAiClient::from_settings(&general(format!("http://{addr}/v1"), None)).expect("client");
    assert_eq!(
        client.endpoint(),
        format!("http://{addr}/v1/chat/completions")
    );

    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Transport { .. }), "{err:?}");
}
