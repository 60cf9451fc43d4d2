use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use hearth_advisory::{
    AdvisoryError, AdvisoryStats, HttpGeneratorConfig, HttpNarrativeGenerator, NarrativeGenerator,
    Narrator, RuleBasedNarrator,
};

struct StubServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    /// Serve a fixed chat-completions reply on `/v1/chat/completions`.
    async fn spawn(status: StatusCode, body: Value) -> Self {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    fn generator(&self) -> HttpNarrativeGenerator {
        HttpNarrativeGenerator::new(HttpGeneratorConfig {
            endpoint: format!("{}/v1/chat/completions", self.base_url),
            api_key: Some("test-key".into()),
            model: "test-model".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn completion(content: &str) -> Value {
    json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

fn stats() -> AdvisoryStats {
    AdvisoryStats {
        avg_income: Decimal::from(5000),
        avg_expense: Decimal::from(3500),
        current_commitment_percentage: "84.2".parse().unwrap(),
        average_commitment_percentage: Decimal::from(70),
        active_installments: 3,
        recurring_items: 5,
        negative_surplus_months: 1,
        next_months: vec![],
        top_expense_categories: vec![],
    }
}

#[tokio::test]
async fn parses_plain_json_reply() {
    let srv = StubServer::spawn(
        StatusCode::OK,
        completion(r#"{"tips":["one","two","three"],"alert":"Too much committed","recommendation":"Pay down the car"}"#),
    )
    .await;

    let n = srv.generator().generate(&stats()).await.unwrap();
    assert_eq!(n.tips.len(), 3);
    assert_eq!(n.alert.as_deref(), Some("Too much committed"));
    assert_eq!(n.recommendation, "Pay down the car");
}

#[tokio::test]
async fn parses_fenced_json_reply() {
    let srv = StubServer::spawn(
        StatusCode::OK,
        completion("Here you go:\n```json\n{\"tips\":[\"save\"],\"alert\":null,\"recommendation\":\"ok\"}\n```"),
    )
    .await;

    let n = srv.generator().generate(&stats()).await.unwrap();
    assert_eq!(n.tips, vec!["save"]);
    assert_eq!(n.alert, None);
}

#[tokio::test]
async fn prose_without_object_is_missing_json() {
    let srv = StubServer::spawn(StatusCode::OK, completion("I cannot help with that.")).await;
    let err = srv.generator().generate(&stats()).await.unwrap_err();
    assert!(matches!(err, AdvisoryError::MissingJson));
}

#[tokio::test]
async fn malformed_object_is_rejected() {
    let srv = StubServer::spawn(StatusCode::OK, completion(r#"{"tips": "not a list"}"#)).await;
    let err = srv.generator().generate(&stats()).await.unwrap_err();
    assert!(matches!(err, AdvisoryError::Malformed(_)));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let srv = StubServer::spawn(StatusCode::TOO_MANY_REQUESTS, json!({ "error": "rate limited" })).await;
    let err = srv.generator().generate(&stats()).await.unwrap_err();
    assert!(matches!(err, AdvisoryError::Status(429)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let generator = HttpNarrativeGenerator::new(HttpGeneratorConfig {
        endpoint: "http://127.0.0.1:9/v1/chat/completions".into(),
        api_key: None,
        model: "test-model".into(),
        timeout: Duration::from_millis(500),
    })
    .unwrap();
    let err = generator.generate(&stats()).await.unwrap_err();
    assert!(matches!(err, AdvisoryError::Transport(_)));
}

#[tokio::test]
async fn narrator_falls_back_on_failing_endpoint() {
    let srv = StubServer::spawn(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;
    let narrator = Narrator::new(Some(std::sync::Arc::new(srv.generator())));

    let n = narrator.narrate(&stats(), true).await;
    assert_eq!(n, RuleBasedNarrator.narrative(&stats()));
    assert!(n.alert.unwrap().contains("84.2%"));
}
