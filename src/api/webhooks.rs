//! Slack Events API webhook
//!
//! Answers the `url_verification` handshake and hands verified
//! `event_callback` deliveries to the dispatcher on a background task, so
//! Slack gets its 200 long before the translation is posted.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};

use super::ApiState;
use crate::slack::{ReactionEvent, SlackPayload};

/// Header carrying Slack's redelivery attempt number
pub const RETRY_NUM_HEADER: &str = "x-slack-retry-num";

/// Header carrying the reason for a redelivery
pub const RETRY_REASON_HEADER: &str = "x-slack-retry-reason";

const BAD_REQUEST_BODY: &str = "bad request";

/// Build the Slack events router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/slack/events", post(handle_events))
        .with_state(state)
}

/// Handle one Events API delivery
pub async fn handle_events(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payload: SlackPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable Slack payload");
            return bad_request();
        }
    };

    match payload {
        SlackPayload::UrlVerification { challenge } => {
            tracing::info!("answering Slack url_verification");
            (StatusCode::OK, challenge).into_response()
        }
        SlackPayload::EventCallback { event } => {
            if !state.verifier.verify(&headers, &body) {
                tracing::warn!("rejected Slack request: invalid signature");
                return bad_request();
            }

            if let Some(attempt) = header_str(&headers, RETRY_NUM_HEADER) {
                tracing::info!(
                    attempt,
                    reason = header_str(&headers, RETRY_REASON_HEADER).unwrap_or("unknown"),
                    "Slack redelivery"
                );
            }

            let Some(event) = ReactionEvent::from_value(event) else {
                tracing::debug!("ignoring event of an unrelated shape");
                return StatusCode::OK.into_response();
            };

            let dispatcher = state.dispatcher.clone();
            tokio::spawn(async move {
                let outcome = dispatcher.handle(&event).await;
                tracing::debug!(?outcome, "event handled");
            });

            StatusCode::OK.into_response()
        }
        SlackPayload::Unknown => {
            tracing::debug!("ignoring unsupported Slack payload type");
            bad_request()
        }
    }
}

fn bad_request() -> Response {
    (StatusCode::NOT_FOUND, BAD_REQUEST_BODY).into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
