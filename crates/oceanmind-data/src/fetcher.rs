//! Snapshot and series retrieval on top of a [`GenerativeClient`].
//!
//! The fetcher never surfaces backend errors to its callers. A failed or
//! unparseable dashboard fetch yields `None`, a failed series fetch yields an
//! empty vector and a failed insight fetch yields a fixed fallback string, so
//! view code can treat every outcome as normal data.

use std::sync::Arc;

use oceanmind_core::{DashboardSnapshot, MetricKind, StakeholderView, TimeSeriesPoint};
use oceanmind_genai::{dashboard_schema, time_series_schema, GenAiError, GenerativeClient};

use crate::prompt;

/// Insight text when no API credential is configured.
pub const NO_CREDENTIAL_INSIGHT: &str = "System initialization: API key required for analysis.";

/// Insight text when the backend call fails.
pub const INSIGHT_UNAVAILABLE: &str = "Analysis unavailable.";

/// Insight text when the backend replies with empty text.
pub const EMPTY_INSIGHT: &str = "Data processing complete.";

/// Retrieves structured ocean data from the generative backend.
///
/// Constructed with [`SnapshotFetcher::new`] when a credential is available,
/// or [`SnapshotFetcher::disabled`] otherwise. A disabled fetcher short
/// circuits every operation to its fallback value without touching the
/// network.
pub struct SnapshotFetcher {
    client: Option<Arc<dyn GenerativeClient>>,
    alert_count: usize,
}

impl SnapshotFetcher {
    pub fn new(client: Arc<dyn GenerativeClient>, alert_count: usize) -> Self {
        Self {
            client: Some(client),
            alert_count,
        }
    }

    /// A fetcher with no backend. Every fetch returns its fallback.
    pub fn disabled() -> Self {
        Self {
            client: None,
            alert_count: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Fetches a dashboard snapshot for the given coordinates.
    ///
    /// Returns `None` when the fetcher is disabled, the backend fails, or the
    /// response does not decode as a complete snapshot.
    pub async fn fetch_dashboard(&self, lat: f64, lng: f64) -> Option<DashboardSnapshot> {
        let client = match &self.client {
            Some(client) => client,
            None => {
                tracing::warn!("dashboard fetch skipped: no generative backend configured");
                return None;
            }
        };
        let prompt = prompt::dashboard_prompt(lat, lng, self.alert_count);
        let schema = dashboard_schema();
        let text = match client.generate(&prompt, Some(&schema)).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "dashboard fetch failed");
                return None;
            }
        };
        match serde_json::from_str::<DashboardSnapshot>(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::error!(error = %err, "dashboard response did not decode");
                None
            }
        }
    }

    /// Fetches a 24-point hourly series for one metric.
    ///
    /// Returns an empty vector on any failure.
    pub async fn fetch_time_series(&self, metric: MetricKind) -> Vec<TimeSeriesPoint> {
        let client = match &self.client {
            Some(client) => client,
            None => {
                tracing::warn!(metric = metric.label(), "series fetch skipped: no backend");
                return Vec::new();
            }
        };
        let prompt = prompt::time_series_prompt(metric);
        let schema = time_series_schema();
        let text = match client.generate(&prompt, Some(&schema)).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(metric = metric.label(), error = %err, "series fetch failed");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<TimeSeriesPoint>>(&text) {
            Ok(points) => points,
            Err(err) => {
                tracing::error!(metric = metric.label(), error = %err, "series did not decode");
                Vec::new()
            }
        }
    }

    /// Produces a one-sentence insight for a stakeholder group.
    ///
    /// Always returns displayable text; failures map onto the fixed fallback
    /// strings rather than errors.
    pub async fn fetch_insight(
        &self,
        view: StakeholderView,
        snapshot: &DashboardSnapshot,
    ) -> String {
        let client = match &self.client {
            Some(client) => client,
            None => return NO_CREDENTIAL_INSIGHT.to_string(),
        };
        let prompt = prompt::insight_prompt(view, snapshot);
        match client.generate(&prompt, None).await {
            Ok(text) if text.trim().is_empty() => EMPTY_INSIGHT.to_string(),
            Ok(text) => text,
            Err(GenAiError::MissingCredential) => NO_CREDENTIAL_INSIGHT.to_string(),
            Err(err) => {
                tracing::error!(view = view.as_str(), error = %err, "insight fetch failed");
                INSIGHT_UNAVAILABLE.to_string()
            }
        }
    }
}
