//! Integration tests for the postgen-web server.
//!
//! These tests start a real axum server on a random port, backed by stub
//! generators, and exercise the REST endpoints.

use std::sync::{Arc, Mutex};

use postgen::error::PostError;
use postgen::generation::{GenerateFuture, Generator};
use postgen::session::SessionState;
use postgen_web::{WebConfig, spawn_web};

/// Replies with a fixed post and records the token budget it was given.
struct Fixed {
    reply: &'static str,
    budgets: Mutex<Vec<u32>>,
}

impl Generator for Fixed {
    fn generate(&self, _prompt: &str, max: u32, _temp: f32) -> GenerateFuture<'_> {
        self.budgets.lock().unwrap().push(max);
        let out = self.reply.to_string();
        Box::pin(async move { Ok(out) })
    }
}

struct Failing;

impl Generator for Failing {
    fn generate(&self, _prompt: &str, _max: u32, _temp: f32) -> GenerateFuture<'_> {
        Box::pin(async { Err(PostError::Generation("HTTP 401 Unauthorized".into())) })
    }
}

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server(generator: Arc<dyn Generator>) -> (Arc<Mutex<SessionState>>, String) {
    let session = Arc::new(Mutex::new(SessionState::new()));
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(session.clone(), generator, config).await.unwrap();
    (session, format!("http://{addr}"))
}

fn fixed(reply: &'static str) -> Arc<Fixed> {
    Arc::new(Fixed {
        reply,
        budgets: Mutex::new(Vec::new()),
    })
}

// ── Page / state ─────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_form() {
    let (_session, base) = spawn_test_server(fixed("x")).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("post generator"));
    assert!(html.contains("/api/generate"));
}

#[tokio::test]
async fn get_state_starts_empty() {
    let (_session, base) = spawn_test_server(fixed("x")).await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/state"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["post"], "");
    assert_eq!(json["preview_html"], "");
    assert_eq!(json["has_content"], false);
    assert_eq!(json["generating"], false);
    assert_eq!(json["platforms"], serde_json::json!(["LinkedIn", "Facebook"]));
    assert_eq!(json["length"]["default"], 350);
}

// ── Generation ───────────────────────────────────────────────────────

#[tokio::test]
async fn generate_updates_session() {
    let generator = fixed("**Hello** #IA");
    let (session, base) = spawn_test_server(generator.clone()).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate"))
        .json(&serde_json::json!({
            "keywords": ["IA", "innovation"],
            "platform": "LinkedIn",
            "length": 200
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["post"], "**Hello** #IA");
    assert_eq!(json["preview_html"], "<p><strong>Hello</strong> #IA</p>\n");
    assert_eq!(session.lock().unwrap().get(), "**Hello** #IA");
    assert_eq!(*generator.budgets.lock().unwrap(), vec![200]);
}

#[tokio::test]
async fn generate_rejects_empty_keywords() {
    let generator = fixed("never");
    let (session, base) = spawn_test_server(generator.clone()).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate"))
        .json(&serde_json::json!({"keywords": [], "platform": "LinkedIn", "length": 350}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["kind"], "invalid_input");
    assert_eq!(session.lock().unwrap().get(), "");
    assert!(generator.budgets.lock().unwrap().is_empty(), "no call attempted");
}

#[tokio::test]
async fn generate_rejects_unknown_platform() {
    let (_session, base) = spawn_test_server(fixed("never")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate"))
        .json(&serde_json::json!({"keywords": ["IA"], "platform": "Myspace"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["kind"], "unsupported_platform");
}

#[tokio::test]
async fn failed_generation_keeps_previous_post() {
    let (session, base) = spawn_test_server(Arc::new(Failing)).await;
    session.lock().unwrap().set("Earlier post");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/generate"))
        .json(&serde_json::json!({"keywords": ["IA"], "platform": "Facebook", "length": 150}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["kind"], "generation");
    assert_eq!(session.lock().unwrap().get(), "Earlier post");
}

// ── Export ───────────────────────────────────────────────────────────

#[tokio::test]
async fn export_session_post_as_attachment() {
    let (session, base) = spawn_test_server(fixed("x")).await;
    session.lock().unwrap().set("Hello #IA");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/export"))
        .json(&serde_json::json!({"platform": "Facebook"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let headers = resp.headers();
    assert!(
        headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(
        headers["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"post-Facebook.txt\""
    );
    assert_eq!(resp.text().await.unwrap(), "Hello #IA");
}

#[tokio::test]
async fn export_prefers_edited_text() {
    let (session, base) = spawn_test_server(fixed("x")).await;
    session.lock().unwrap().set("Generated");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/export"))
        .json(&serde_json::json!({"platform": "LinkedIn", "text": "Edited by hand"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "Edited by hand");
    assert_eq!(session.lock().unwrap().get(), "Generated");
}

#[tokio::test]
async fn export_without_post_is_rejected() {
    let (_session, base) = spawn_test_server(fixed("x")).await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/export"))
        .json(&serde_json::json!({"platform": "LinkedIn"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
}
