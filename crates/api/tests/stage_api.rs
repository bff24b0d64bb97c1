//! HTTP-level tests for the LLM-backed stage endpoints.
//!
//! A scripted completer stands in for the provider and the pool is lazy, so
//! these run without network access or a database.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, build_test_app, get, lazy_pool, post_json};
use screenplay_llm::messages::{ChatRequest, Role};
use screenplay_llm::scripted::ScriptedCompleter;
use screenplay_llm::{ChatCompleter, LlmError};
use serde_json::json;

fn sheet(n: usize) -> String {
    let beats: Vec<_> = (1..=n)
        .map(|i| json!({"num": i, "label": format!("Beat {i}"), "summary": "Something turns."}))
        .collect();
    json!({ "beats": beats }).to_string()
}

/// Replays scripted replies, each after a fixed delay.
struct SlowCompleter {
    inner: ScriptedCompleter,
    delay: Duration,
}

#[async_trait]
impl ChatCompleter for SlowCompleter {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, LlmError> {
        tokio::time::sleep(self.delay).await;
        self.inner.complete(request).await
    }
}

// ---------------------------------------------------------------------------
// Logline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refine_logline_returns_text_result() {
    let llm = Arc::new(ScriptedCompleter::new([Some("1. A driver...\n2. ...")]));
    let app = build_test_app(lazy_pool(), Some(llm.clone()));

    let response = post_json(
        app,
        "/api/refine-logline",
        json!({"idea": "A delivery driver witnesses a hit", "genre": "Thriller", "tone": "Grounded"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], "1. A driver...\n2. ...");

    let request = &llm.requests()[0];
    assert_eq!(request.model, "test-model");
    assert!(request.response_format.is_none());
    assert!(request.messages[1].content.contains("Idea: A delivery driver witnesses a hit"));
}

#[tokio::test]
async fn missing_api_key_returns_500() {
    let app = build_test_app(lazy_pool(), None);
    let response = post_json(app, "/api/refine-logline", json!({"idea": "x"})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing OPENAI_API_KEY");
}

#[tokio::test]
async fn get_on_post_route_is_405() {
    let app = build_test_app(lazy_pool(), None);
    let response = get(app, "/api/refine-beats").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Ingredients and characters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refine_ingredients_returns_structured_document() {
    let llm = Arc::new(ScriptedCompleter::new([Some(
        json!({
            "theme_equation": "Because belonging is earned, stay, even at the cost of pride.",
            "world_brief": "A terminal with its own economy.",
            "genre_obligations": ["meet-cute"],
            "conventions": ["ticking clock"],
            "motifs": [{"name": "Peanut tin", "meaning": "A promise"}]
        })
        .to_string(),
    )]));
    let app = build_test_app(lazy_pool(), Some(llm.clone()));

    let response = post_json(
        app,
        "/api/refine-ingredients",
        json!({"logline": "L", "genre": "Dramedy", "tone": "Warm"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["motifs"][0]["name"], "Peanut tin");
    assert_eq!(body["genre_obligations"], json!(["meet-cute"]));

    let request = &llm.requests()[0];
    assert_eq!(request.temperature, Some(0.5));
    assert!(request.response_format.is_some());
}

#[tokio::test]
async fn refine_characters_without_content_returns_empty_cast() {
    let llm = Arc::new(ScriptedCompleter::new([None::<&str>]));
    let app = build_test_app(lazy_pool(), Some(llm));

    let response = post_json(app, "/api/refine-characters", json!({"logline": "L"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"characters": []}));
}

#[tokio::test]
async fn invalid_json_from_model_is_502() {
    let llm = Arc::new(ScriptedCompleter::new([Some("Here you go!")]));
    let app = build_test_app(lazy_pool(), Some(llm));

    let response = post_json(app, "/api/refine-ingredients", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "UPSTREAM_INVALID_JSON");
}

#[tokio::test]
async fn provider_error_message_is_forwarded() {
    let llm = Arc::new(ScriptedCompleter::failing(401, "Incorrect API key provided"));
    let app = build_test_app(lazy_pool(), Some(llm));

    let response = post_json(app, "/api/refine-characters", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Incorrect API key provided");
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

// ---------------------------------------------------------------------------
// Beats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refine_beats_repairs_short_sheet() {
    let llm = Arc::new(ScriptedCompleter::new([Some(sheet(25)), Some(sheet(40))]));
    let app = build_test_app(lazy_pool(), Some(llm.clone()));

    let response = post_json(
        app,
        "/api/refine-beats",
        json!({"logline": "Use project premise"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["beats"].as_array().unwrap().len(), 40);
    assert_eq!(body["beats"][39]["num"], 40);

    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].messages[2].role, Role::Assistant);
}

#[tokio::test]
async fn refine_beats_gives_up_with_502() {
    let llm = Arc::new(ScriptedCompleter::new([
        Some(sheet(12)),
        Some(sheet(30)),
        Some(sheet(38)),
    ]));
    let app = build_test_app(lazy_pool(), Some(llm.clone()));

    let response = post_json(app, "/api/refine-beats", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Model did not return 40 beats after retries.");
    assert_eq!(llm.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn slow_beat_repair_finishes_within_request_timeout() {
    let llm = Arc::new(SlowCompleter {
        inner: ScriptedCompleter::new([Some(sheet(12)), Some(sheet(30)), Some(sheet(40))]),
        delay: Duration::from_secs(100),
    });
    let app = build_test_app(lazy_pool(), Some(llm.clone()));
    let started = tokio::time::Instant::now();

    let response = post_json(app, "/api/refine-beats", json!({"logline": "L"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(llm.inner.calls(), 3);
    assert!(started.elapsed() >= Duration::from_secs(300));
    let body = body_json(response).await;
    assert_eq!(body["beats"].as_array().unwrap().len(), 40);
}

// ---------------------------------------------------------------------------
// Coaching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validate_beat_returns_evaluation() {
    let llm = Arc::new(ScriptedCompleter::new([Some(
        json!({
            "score": {"purpose": 4, "stakes": 2, "causality": 3, "freshness": 3, "clarity": 5, "overall": 3.4},
            "diagnostics": {"is_scene_worthy": true, "missing": ["stakes"], "conflicts_with_theme": false},
            "notes": ["Raise the cost of failure."],
            "rewrite_suggestion": "He trades his last coin for a phone call home."
        })
        .to_string(),
    )]));
    let app = build_test_app(lazy_pool(), Some(llm.clone()));

    let response = post_json(
        app,
        "/api/validate-beat",
        json!({"logline": "L", "theme": "T", "beat": {"label": "Catalyst", "summary": "The border closes."}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["score"]["clarity"], 5.0);
    assert_eq!(body["diagnostics"]["missing"], json!(["stakes"]));
    assert!(body["rewrite_suggestion"].as_str().unwrap().starts_with("He trades"));

    let user = &llm.requests()[0].messages[1].content;
    assert!(user.contains("Label: Catalyst"));
    assert_eq!(llm.requests()[0].temperature, Some(0.2));
}

#[tokio::test]
async fn scene_expectations_fills_missing_keys() {
    let llm = Arc::new(ScriptedCompleter::new([Some(
        r#"{"what_must_happen": ["He is refused entry"]}"#,
    )]));
    let app = build_test_app(lazy_pool(), Some(llm));

    let response = post_json(
        app,
        "/api/scene-expectations",
        json!({"beat": {"label": "Catalyst", "summary": "The border closes."}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["what_must_happen"], json!(["He is refused entry"]));
    assert_eq!(body["checklist"], json!([]));
    assert_eq!(body["micro_prompts"]["open"], "");
}
