//! API endpoint integration tests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use reaction_translator::api::{ApiState, router};
use reaction_translator::slack::{
    AcceptAll, RequestVerifier, SIGNATURE_HEADER, SlackSignatureVerifier, TIMESTAMP_HEADER,
};
use secrecy::SecretString;
use tower::ServiceExt;

mod common;
use common::{Harness, MockFetcher, MockPoster, MockTranslator, root_message};

const SIGNING_SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

const REACTION_CALLBACK: &str = r#"{
    "type": "event_callback",
    "team_id": "T1",
    "event": {
        "type": "reaction_added",
        "user": "U1",
        "reaction": "flag-jp",
        "item": {"type": "message", "channel": "C1", "ts": "100.1"},
        "event_ts": "200.2"
    }
}"#;

fn harness() -> Harness {
    Harness::new(
        MockFetcher::with_thread(vec![root_message("Hello", "100.1")]),
        MockTranslator::returning("こんにちは"),
        MockPoster::default(),
    )
}

fn verifier() -> SlackSignatureVerifier {
    SlackSignatureVerifier::new(SecretString::from(SIGNING_SECRET))
}

/// Build a test API router with signature verification on
fn build_test_router(h: &Harness) -> axum::Router {
    let verifier: Arc<dyn RequestVerifier> = Arc::new(verifier());
    router(ApiState {
        dispatcher: h.dispatcher.clone(),
        verifier,
    })
}

fn signed_request(body: &str) -> Request<Body> {
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let signature = verifier().sign(&timestamp, body.as_bytes());

    Request::builder()
        .method("POST")
        .uri("/slack/events")
        .header("content-type", "application/json")
        .header(TIMESTAMP_HEADER, timestamp)
        .header(SIGNATURE_HEADER, signature)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn unsigned_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/slack/events")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let h = harness();
    let app = build_test_router(&h);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_url_verification_echoes_challenge() {
    let h = harness();
    let app = build_test_router(&h);

    let body = r#"{"token":"t","challenge":"3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P","type":"url_verification"}"#;
    let response = app.oneshot(unsigned_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
    );
}

#[tokio::test]
async fn test_signed_callback_dispatches() {
    let h = harness();
    let app = build_test_router(&h);

    let response = app.oneshot(signed_request(REACTION_CALLBACK)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");

    assert!(h.poster.wait_for_post(Duration::from_secs(5)).await);
    let posted = h.poster.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].channel_id, "C1");
    assert_eq!(posted[0].thread_ts, "100.1");
    assert_eq!(posted[0].attachment.body_text.as_deref(), Some("こんにちは"));
}

#[tokio::test]
async fn test_unsigned_callback_rejected() {
    let h = harness();
    let app = build_test_router(&h);

    let response = app.oneshot(unsigned_request(REACTION_CALLBACK)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "bad request");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_tampered_callback_rejected() {
    let h = harness();
    let app = build_test_router(&h);

    let mut request = signed_request(REACTION_CALLBACK);
    *request.body_mut() = Body::from(REACTION_CALLBACK.replace("flag-jp", "flag-fr"));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stale_signature_rejected() {
    let h = harness();
    let app = build_test_router(&h);

    let timestamp = (chrono::Utc::now().timestamp() - 3600).to_string();
    let signature = verifier().sign(&timestamp, REACTION_CALLBACK.as_bytes());
    let request = Request::builder()
        .method("POST")
        .uri("/slack/events")
        .header(TIMESTAMP_HEADER, timestamp)
        .header(SIGNATURE_HEADER, signature)
        .body(Body::from(REACTION_CALLBACK))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_payload_type_rejected() {
    let h = harness();
    let app = build_test_router(&h);

    let body = r#"{"type":"app_rate_limited","team_id":"T1","minute_rate_limited":1518467820}"#;
    let response = app.oneshot(signed_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "bad request");
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let h = harness();
    let app = build_test_router(&h);

    let response = app.oneshot(signed_request("not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redelivery_is_accepted() {
    let h = harness();
    let app = build_test_router(&h);

    let mut request = signed_request(REACTION_CALLBACK);
    request
        .headers_mut()
        .insert("x-slack-retry-num", "1".parse().unwrap());
    request
        .headers_mut()
        .insert("x-slack-retry-reason", "http_timeout".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(h.poster.wait_for_post(Duration::from_secs(5)).await);
}

#[tokio::test]
async fn test_verification_disabled_accepts_unsigned() {
    let h = harness();
    let app = router(ApiState {
        dispatcher: h.dispatcher.clone(),
        verifier: Arc::new(AcceptAll),
    });

    let response = app.oneshot(unsigned_request(REACTION_CALLBACK)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(h.poster.wait_for_post(Duration::from_secs(5)).await);
}

#[tokio::test]
async fn test_unmapped_reaction_acknowledged_without_calls() {
    let h = harness();
    let app = build_test_router(&h);

    let body = REACTION_CALLBACK.replace("flag-jp", "thumbsup");
    let response = app.oneshot(signed_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(!h.poster.wait_for_post(Duration::from_millis(100)).await);
    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_authentic_callback_with_foreign_event_shape_acknowledged() {
    let h = harness();
    let app = build_test_router(&h);

    let body = r#"{"type":"event_callback","event":{"type":"user_change","user":{"id":"U1"}}}"#;
    let response = app.oneshot(signed_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_foreign_event_shape_still_requires_signature() {
    let h = harness();
    let app = build_test_router(&h);

    let body = r#"{"type":"event_callback","event":{"type":"team_join","user":{"id":"U1"}}}"#;
    let response = app.oneshot(unsigned_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "bad request");
}
