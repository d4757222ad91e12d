//! HTTP route handlers for the support bot API.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use crate::analytics::{AnalyticsSnapshot, SessionSummary};
use crate::error::SupportError;
use crate::escalation::EscalationReason;
use crate::session::{ChatMessage, EscalationId, Role, SessionId};

use super::state::AppState;

/// Notice returned when a conversation is handed to a human.
const ESCALATION_NOTICE: &str = "A human agent will join shortly.";

const MISSING_FIELDS: &str = "Missing sessionId or message";

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Parse a JSON request body, treating an empty body as all fields missing.
///
/// Content type is not checked and every parse failure is a 400 with an
/// `{error}` body.
fn parse_json_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Rejected request body: {e}");
        api_error(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {e}"))
    })
}

/// Map a library error to a response, hiding internal details from clients.
fn map_support_error(err: &SupportError) -> ApiError {
    if err.is_client_error() {
        tracing::warn!("Rejected request: {err}");
        api_error(StatusCode::BAD_REQUEST, err.to_string())
    } else {
        tracing::error!("Chat handler error: {err}");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/health", get(health_check))
        .route("/api/session", post(create_session))
        .route("/api/session/{session_id}", get(session_history))
        .route("/api/session/{session_id}/summary", get(session_summary))
        .route("/api/chat", post(chat))
        .route("/api/escalate", post(escalate))
        .route("/api/analytics", get(analytics))
        .fallback_service(static_files)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "support-bot",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// New session response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Identifier to send with every chat message.
    pub session_id: SessionId,
}

/// Start a new session.
async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session_id = state.sessions.create();
    tracing::info!(%session_id, "Session started");
    Json(SessionResponse { session_id })
}

/// Chat request. Fields are optional so that missing ones produce a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Session the message belongs to.
    pub session_id: Option<String>,
    /// The user's message.
    pub message: Option<String>,
}

/// Chat response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The assistant's reply.
    pub response: String,
    /// Escalation suggested to the user, if any.
    pub escalation: Option<EscalationReason>,
    /// FAQ match confidence, when the FAQ was consulted.
    pub confidence: Option<f64>,
    /// Category of the matched FAQ entry.
    pub category: Option<String>,
}

/// Answer a chat message.
async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let request: ChatRequest = parse_json_body(&body)?;
    let (Some(raw_id), Some(message)) = (request.session_id, request.message) else {
        return Err(api_error(StatusCode::BAD_REQUEST, MISSING_FIELDS));
    };
    if message.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, MISSING_FIELDS));
    }
    let session_id: SessionId = raw_id
        .parse()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, MISSING_FIELDS))?;

    let outcome = state
        .pipeline
        .handle_turn(&state.sessions, &session_id, &message)
        .map_err(|e| map_support_error(&e))?;

    Ok(Json(ChatResponse {
        response: outcome.content,
        escalation: outcome.escalation,
        confidence: outcome.confidence,
        category: outcome.category,
    }))
}

/// Escalation request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateRequest {
    /// Session to hand over.
    pub session_id: Option<String>,
    /// Reason shown to the agent.
    pub reason: Option<String>,
}

/// Simulated escalation response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateResponse {
    /// Always `escalated`.
    pub status: String,
    /// Notice for the user.
    pub message: String,
    /// Reason recorded for the escalation.
    pub reason: String,
    /// Ticket identifier.
    pub escalation_id: String,
    /// Position in the simulated agent queue.
    pub queue_position: usize,
}

/// Hand a session over to a (simulated) human agent.
async fn escalate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<EscalateResponse>, ApiError> {
    let request: EscalateRequest = parse_json_body(&body)?;
    let session_id = request
        .session_id
        .as_deref()
        .and_then(|raw| raw.parse::<SessionId>().ok());

    let pending = session_id
        .as_ref()
        .and_then(|id| state.sessions.with_session(id, |s| s.pending_escalation))
        .flatten();
    let reason = request
        .reason
        .filter(|r| !r.trim().is_empty())
        .or_else(|| pending.map(|r| r.as_str().to_string()))
        .unwrap_or_else(|| "unspecified".to_string());

    let escalation_id = EscalationId::new();
    if let Some(id) = &session_id {
        match state.sessions.mark_escalated(id, &reason) {
            Ok(()) => {
                if let Err(e) = state.sessions.append(id, Role::Assistant, ESCALATION_NOTICE) {
                    tracing::warn!("Could not record escalation notice: {e}");
                }
            }
            Err(e) => tracing::warn!("Escalating unknown session: {e}"),
        }
    }

    let queue_position = state.sessions.escalated_count().max(1);
    tracing::info!(
        session_id = session_id.as_ref().map_or("none", SessionId::as_str),
        %escalation_id,
        %reason,
        queue_position,
        "Session escalated"
    );

    Ok(Json(EscalateResponse {
        status: "escalated".to_string(),
        message: ESCALATION_NOTICE.to_string(),
        reason,
        escalation_id: escalation_id.to_string(),
        queue_position,
    }))
}

/// Session history response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Messages in arrival order.
    pub history: Vec<ChatMessage>,
}

/// Raw message history for a session; empty for unknown ids.
async fn session_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<HistoryResponse> {
    let history = session_id
        .parse::<SessionId>()
        .map(|id| state.sessions.history(&id))
        .unwrap_or_default();
    Json(HistoryResponse { history })
}

/// Summary of one session.
async fn session_summary(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    let not_found = || api_error(StatusCode::NOT_FOUND, format!("Unknown session: {session_id}"));
    let id: SessionId = session_id.parse().map_err(|_| not_found())?;
    state
        .sessions
        .with_session(&id, |s| state.analytics.summarize(s))
        .map(Json)
        .ok_or_else(not_found)
}

/// Dashboard metrics over all live sessions.
async fn analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsSnapshot> {
    let sessions = state.sessions.snapshot_all();
    Json(state.analytics.snapshot(&sessions, chrono::Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    use crate::config::SupportConfig;
    use crate::faq::FaqCorpus;

    fn test_state() -> Option<Arc<AppState>> {
        AppState::new(&SupportConfig::default(), FaqCorpus::builtin(), "static").ok()
    }

    async fn call(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let body = body.map(|v| v.to_string()).unwrap_or_default();
        send(state, method, uri, Some("application/json"), body).await
    }

    async fn send(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let Ok(request) = builder.body(Body::from(body)) else {
            return (StatusCode::IM_A_TEAPOT, Vec::new());
        };
        let Ok(response) = create_router(Arc::clone(state)).oneshot(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .map(|b| b.to_vec())
            .unwrap_or_default();
        (status, bytes)
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
        serde_json::from_slice(bytes).ok()
    }

    #[tokio::test]
    async fn test_health() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let (status, body) = call(&state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let body: Option<serde_json::Value> = parse(&body);
        assert_eq!(body.and_then(|b| b["status"].as_str().map(String::from)), Some("ok".to_string()));
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_fields() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let (status, body) = call(
            &state,
            Method::POST,
            "/api/chat",
            Some(serde_json::json!({ "message": "hello" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Option<ErrorResponse> = parse(&body);
        assert_eq!(body.map(|b| b.error), Some(MISSING_FIELDS.to_string()));
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_chat_without_content_type_is_parsed() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let body = r#"{"sessionId":"session-plain","message":"how do i export my data"}"#;
        let (status, body) =
            send(&state, Method::POST, "/api/chat", None, body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let reply: Option<ChatResponse> = parse(&body);
        assert_eq!(
            reply.and_then(|r| r.category),
            Some("technical".to_string())
        );
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_bodies_with_json_errors() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        for raw in [
            r#"{"sessionId":123,"message":"hi"}"#,
            r#"{"sessionId":"session-x","message":"#,
            "not json",
        ] {
            let (status, body) = send(
                &state,
                Method::POST,
                "/api/chat",
                Some("application/json"),
                raw.to_string(),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
            let body: Option<ErrorResponse> = parse(&body);
            assert!(body.is_some_and(|b| !b.error.is_empty()), "{raw}");
        }

        let (status, body) =
            send(&state, Method::POST, "/api/chat", None, String::new()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Option<ErrorResponse> = parse(&body);
        assert_eq!(body.map(|b| b.error), Some(MISSING_FIELDS.to_string()));
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_session_chat_and_history() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let (status, body) = call(&state, Method::POST, "/api/session", None).await;
        assert_eq!(status, StatusCode::OK);
        let session: Option<SessionResponse> = parse(&body);
        let Some(session) = session else {
            unreachable!("session response parses");
        };

        let (status, body) = call(
            &state,
            Method::POST,
            "/api/chat",
            Some(serde_json::json!({
                "sessionId": session.session_id,
                "message": "How do I cancel my subscription? I want to unsubscribe."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reply: Option<ChatResponse> = parse(&body);
        let Some(reply) = reply else {
            unreachable!("chat response parses");
        };
        assert!(reply.response.contains("Cancel Subscription"));
        assert_eq!(reply.escalation, None);
        assert_eq!(reply.category.as_deref(), Some("billing"));

        let uri = format!("/api/session/{}", session.session_id);
        let (status, body) = call(&state, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let history: Option<HistoryResponse> = parse(&body);
        let roles: Vec<Role> = history
            .map(|h| h.history.into_iter().map(|m| m.role).collect())
            .unwrap_or_default();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[tokio::test]
    async fn test_chat_surfaces_escalation() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let (status, body) = call(
            &state,
            Method::POST,
            "/api/chat",
            Some(serde_json::json!({
                "sessionId": "session-local-1",
                "message": "Let me talk to a supervisor"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reply: Option<ChatResponse> = parse(&body);
        assert_eq!(
            reply.and_then(|r| r.escalation),
            Some(EscalationReason::UserRequest)
        );
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_escalate_uses_pending_reason() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let _ = call(
            &state,
            Method::POST,
            "/api/chat",
            Some(serde_json::json!({ "sessionId": "session-a", "message": "qwerty zxcv" })),
        )
        .await;

        let (status, body) = call(
            &state,
            Method::POST,
            "/api/escalate",
            Some(serde_json::json!({ "sessionId": "session-a" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reply: Option<EscalateResponse> = parse(&body);
        let Some(reply) = reply else {
            unreachable!("escalate response parses");
        };
        assert_eq!(reply.status, "escalated");
        assert_eq!(reply.reason, "low_confidence");
        assert_eq!(reply.queue_position, 1);
        assert_eq!(state.sessions.escalated_count(), 1);
    }

    #[tokio::test]
    async fn test_escalate_without_session() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let (status, body) =
            call(&state, Method::POST, "/api/escalate", Some(serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        let reply: Option<EscalateResponse> = parse(&body);
        assert_eq!(reply.map(|r| r.reason), Some("unspecified".to_string()));
    }

    #[tokio::test]
    async fn test_escalate_accepts_empty_body() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let (status, body) = call(&state, Method::POST, "/api/escalate", None).await;
        assert_eq!(status, StatusCode::OK);
        let reply: Option<EscalateResponse> = parse(&body);
        assert_eq!(reply.map(|r| r.message), Some(ESCALATION_NOTICE.to_string()));
    }

    #[tokio::test]
    async fn test_unknown_session_history_is_empty() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let (status, body) = call(&state, Method::GET, "/api/session/nope", None).await;
        assert_eq!(status, StatusCode::OK);
        let history: Option<HistoryResponse> = parse(&body);
        assert_eq!(history.map(|h| h.history.len()), Some(0));

        let (status, _) = call(&state, Method::GET, "/api/session/nope/summary", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summary_and_analytics() {
        let Some(state) = test_state() else {
            unreachable!("default state builds");
        };
        let _ = call(
            &state,
            Method::POST,
            "/api/chat",
            Some(serde_json::json!({ "sessionId": "session-b", "message": "how do I export my data" })),
        )
        .await;

        let (status, body) = call(&state, Method::GET, "/api/session/session-b/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        let summary: Option<serde_json::Value> = parse(&body);
        assert_eq!(
            summary.as_ref().and_then(|s| s["totalMessages"].as_u64()),
            Some(2)
        );

        let (status, body) = call(&state, Method::GET, "/api/analytics", None).await;
        assert_eq!(status, StatusCode::OK);
        let snapshot: Option<serde_json::Value> = parse(&body);
        assert_eq!(
            snapshot.as_ref().and_then(|s| s["totalSessions"].as_u64()),
            Some(1)
        );
        assert_eq!(
            snapshot
                .as_ref()
                .and_then(|s| s["sessionsPerHour"].as_array().map(Vec::len)),
            Some(24)
        );
    }
}
