//! Route handler functions for all API endpoints.
//!
//! Each handler extracts query/path parameters via axum extractors,
//! interacts with AppState services, and returns JSON responses. Data
//! endpoints never turn a backend failure into a 5xx: a failed dashboard
//! fetch is a `null` body and a failed series fetch is an empty array, so
//! clients render "no data" instead of an error page.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oceanmind_chat::ConversationSession;
use oceanmind_core::{
    ChatMessage, DashboardSnapshot, MetricKind, StakeholderView, TimeSeriesPoint,
};
use oceanmind_data::{INSIGHT_UNAVAILABLE, NO_CREDENTIAL_INSIGHT};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Query parameter types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LocationParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

// =============================================================================
// Request/response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub backend_enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
    pub view: String,
    pub insight: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    /// The messages this turn appended: the user message and the reply.
    pub messages: Vec<ChatMessage>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        backend_enabled: state.fetcher.is_enabled(),
    })
}

/// GET /api/dashboard?lat&lng — snapshot for the given (or default) location.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Json<Option<DashboardSnapshot>> {
    let lat = params.lat.unwrap_or(state.config.dashboard.default_lat);
    let lng = params.lng.unwrap_or(state.config.dashboard.default_lng);
    Json(state.fetcher.fetch_dashboard(lat, lng).await)
}

/// GET /api/analysis/{metric} — 24-hour series for one metric.
pub async fn analysis(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> Result<Json<Vec<TimeSeriesPoint>>, ApiError> {
    let metric: MetricKind = metric.parse().map_err(ApiError::BadRequest)?;
    Ok(Json(state.fetcher.fetch_time_series(metric).await))
}

/// GET /api/insight/{view}?lat&lng — stakeholder insight for a fresh snapshot.
pub async fn insight(
    State(state): State<AppState>,
    Path(view): Path<String>,
    Query(params): Query<LocationParams>,
) -> Result<Json<InsightResponse>, ApiError> {
    let view: StakeholderView = view.parse().map_err(ApiError::BadRequest)?;
    let lat = params.lat.unwrap_or(state.config.dashboard.default_lat);
    let lng = params.lng.unwrap_or(state.config.dashboard.default_lng);

    let insight = match state.fetcher.fetch_dashboard(lat, lng).await {
        Some(snapshot) => state.fetcher.fetch_insight(view, &snapshot).await,
        None if state.fetcher.is_enabled() => INSIGHT_UNAVAILABLE.to_string(),
        None => NO_CREDENTIAL_INSIGHT.to_string(),
    };

    Ok(Json(InsightResponse {
        view: view.as_str().to_string(),
        insight,
    }))
}

/// POST /api/chat — one conversation turn.
///
/// Creates a session when `session_id` is absent. The response carries the
/// two messages the turn appended; fetch-side failures surface as normal
/// reply text, never as an error status.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }
    let limit = state.config.chat.max_message_length;
    if limit > 0 && message.chars().count() > limit {
        return Err(ApiError::BadRequest(format!(
            "message exceeds {} characters",
            limit
        )));
    }

    // Registry lock covers lookup/insert only; the turn itself runs under
    // the session's own lock so other sessions keep making progress.
    let session = match req.session_id {
        Some(id) => {
            let sessions = state.sessions.lock().await;
            sessions
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("unknown session: {}", id)))?
        }
        None => {
            let session = ConversationSession::new(
                state.client.clone(),
                state.config.chat.history_window,
            );
            let id = session.id();
            tracing::info!(session = %id, "chat session created");
            let session = std::sync::Arc::new(tokio::sync::Mutex::new(session));
            state
                .sessions
                .lock()
                .await
                .insert(id, std::sync::Arc::clone(&session));
            session
        }
    };

    let mut session = session.lock().await;
    session.request_reply(message).await;
    let transcript = session.messages();
    let messages = transcript[transcript.len() - 2..].to_vec();

    Ok(Json(ChatResponse {
        session_id: session.id(),
        messages,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use oceanmind_chat::{CREDENTIAL_MISSING_REPLY, WELCOME_MESSAGE};
    use oceanmind_core::{OceanMindConfig, Role};
    use oceanmind_data::SnapshotFetcher;
    use oceanmind_genai::{GenAiError, GenerativeClient, HistoryTurn, SchemaDescriptor};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct ReplayClient(String);

    #[async_trait]
    impl GenerativeClient for ReplayClient {
        async fn generate(
            &self,
            _prompt: &str,
            _schema: Option<&SchemaDescriptor>,
        ) -> Result<String, GenAiError> {
            Ok(self.0.clone())
        }

        async fn converse(
            &self,
            _history: &[HistoryTurn],
            _message: &str,
        ) -> Result<String, GenAiError> {
            Ok(self.0.clone())
        }
    }

    fn disabled_state() -> AppState {
        AppState::new(OceanMindConfig::default(), SnapshotFetcher::disabled(), None)
    }

    fn replaying_state(text: &str) -> AppState {
        let client: Arc<dyn GenerativeClient> = Arc::new(ReplayClient(text.to_string()));
        AppState::new(
            OceanMindConfig::default(),
            SnapshotFetcher::new(client.clone(), 3),
            Some(client),
        )
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ---- health ----

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend_enabled"], false);
    }

    // ---- dashboard ----

    #[tokio::test]
    async fn test_dashboard_without_backend_is_null() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(
                Request::get("/api/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_json(resp).await.is_null());
    }

    // ---- analysis ----

    #[tokio::test]
    async fn test_analysis_unknown_metric_is_400() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(
                Request::get("/api/analysis/chlorophyll")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_analysis_without_backend_is_empty_array() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(
                Request::get("/api/analysis/temperature")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!([]));
    }

    // ---- insight ----

    #[tokio::test]
    async fn test_insight_unknown_view_is_400() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(
                Request::get("/api/insight/tourists")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_insight_without_backend_reports_missing_credential() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(
                Request::get("/api/insight/citizens")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["view"], "Citizens");
        assert_eq!(body["insight"], super::NO_CREDENTIAL_INSIGHT);
    }

    // ---- chat ----

    #[tokio::test]
    async fn test_chat_empty_message_is_400() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({"message": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_oversized_message_is_400() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({"message": "x".repeat(2001)}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_unknown_session_is_404() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({
                    "session_id": Uuid::new_v4(),
                    "message": "hello"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chat_creates_session_and_returns_turn() {
        let app = create_router(disabled_state());
        let resp = app
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({"message": "what is the pH?"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body: ChatResponse = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, Role::User);
        assert_eq!(body.messages[0].text, "what is the pH?");
        assert_eq!(body.messages[1].role, Role::Model);
        assert_eq!(body.messages[1].text, CREDENTIAL_MISSING_REPLY);
    }

    #[tokio::test]
    async fn test_chat_continues_existing_session() {
        let state = replaying_state("Stable conditions.");
        let app = create_router(state.clone());

        let resp = app
            .clone()
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({"message": "first"}),
            ))
            .await
            .unwrap();
        let first: ChatResponse = serde_json::from_value(body_json(resp).await).unwrap();

        let resp = app
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({
                    "session_id": first.session_id,
                    "message": "second"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let second: ChatResponse = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(second.session_id, first.session_id);
        assert_eq!(second.messages[1].text, "Stable conditions.");

        // Full transcript: welcome + two turns of two messages each.
        let sessions = state.sessions.lock().await;
        let session = sessions.get(&first.session_id).unwrap().lock().await;
        assert_eq!(session.message_count(), 5);
        assert_eq!(session.messages()[0].text, WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_slow_turn_does_not_block_other_sessions() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use tokio::sync::{Notify, Semaphore};

        // Blocks the first conversational call until released; later calls
        // reply immediately.
        struct StallingClient {
            calls: AtomicUsize,
            entered: Arc<Notify>,
            release: Arc<Semaphore>,
        }

        #[async_trait]
        impl GenerativeClient for StallingClient {
            async fn generate(
                &self,
                _prompt: &str,
                _schema: Option<&SchemaDescriptor>,
            ) -> Result<String, GenAiError> {
                Ok(String::new())
            }

            async fn converse(
                &self,
                _history: &[HistoryTurn],
                _message: &str,
            ) -> Result<String, GenAiError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    self.entered.notify_one();
                    let _permit = self.release.acquire().await;
                }
                Ok("ok".to_string())
            }
        }

        let entered = Arc::new(Notify::new());
        let release = Arc::new(Semaphore::new(0));
        let client: Arc<dyn GenerativeClient> = Arc::new(StallingClient {
            calls: AtomicUsize::new(0),
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        });
        let state = AppState::new(
            OceanMindConfig::default(),
            SnapshotFetcher::disabled(),
            Some(client),
        );
        let app = create_router(state);

        // First session's turn parks inside the backend call.
        let slow = tokio::spawn(
            app.clone()
                .oneshot(post_json("/api/chat", serde_json::json!({"message": "a"}))),
        );
        entered.notified().await;

        // A second session must still complete while the first is in flight.
        let resp = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            app.clone()
                .oneshot(post_json("/api/chat", serde_json::json!({"message": "b"}))),
        )
        .await
        .expect("second session stalled behind an unrelated turn")
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        release.add_permits(1);
        let resp = slow.await.unwrap().unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
