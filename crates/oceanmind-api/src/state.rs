//! Application state shared across all route handlers.
//!
//! AppState holds references to all services and shared resources.
//! It is passed to handlers via axum's State extractor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use uuid::Uuid;

use oceanmind_chat::ConversationSession;
use oceanmind_core::OceanMindConfig;
use oceanmind_data::SnapshotFetcher;
use oceanmind_genai::GenerativeClient;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The session
/// registry lock is held only for lookup and insertion; each session carries
/// its own `Mutex`, held across the backend call, so turns serialize per
/// session without stalling other sessions.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<OceanMindConfig>,
    /// Dashboard and series retrieval.
    pub fetcher: Arc<SnapshotFetcher>,
    /// Generative backend for chat sessions; `None` when no credential is
    /// configured.
    pub client: Option<Arc<dyn GenerativeClient>>,
    /// Live conversation sessions keyed by session id.
    pub sessions: Arc<Mutex<HashMap<Uuid, Arc<Mutex<ConversationSession>>>>>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: OceanMindConfig,
        fetcher: SnapshotFetcher,
        client: Option<Arc<dyn GenerativeClient>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            client,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            start_time: Instant::now(),
        }
    }
}
