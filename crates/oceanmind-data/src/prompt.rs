//! Prompt builders for the generative backend.
//!
//! Each builder produces the full prompt text for one fetch operation.
//! Keeping them as plain functions makes the exact wording testable
//! without touching the network layer.

use oceanmind_core::{DashboardSnapshot, MetricKind, StakeholderView};

/// Prompt for a full dashboard snapshot around the given coordinates.
pub fn dashboard_prompt(lat: f64, lng: f64, alert_count: usize) -> String {
    format!(
        "Generate a realistic real-time snapshot of ocean conditions for the area \
         around latitude {lat:.4}, longitude {lng:.4}. Include: \
         1. Current readings for temperature (°C), pH level, dissolved oxygen (mg/L), \
         salinity (PSU), turbidity (NTU) and a plastic pollution index (0-100), each \
         with a trend (up, down or stable) and a status (good, warning or critical). \
         2. {alert_count} active environmental alerts with plausible nearby locations \
         and recent ISO timestamps. \
         3. A one-paragraph executive summary of the overall situation. \
         The data should be scientifically plausible for this location and season."
    )
}

/// Prompt for a 24-hour hourly series of a single metric.
pub fn time_series_prompt(metric: MetricKind) -> String {
    format!(
        "Generate 24 hourly data points (times \"00:00\" through \"23:00\") showing a \
         realistic diurnal trend of {} in a coastal marine environment. Each point has \
         a time label and a numeric value; include a secondary value only where a \
         comparison baseline is meaningful.",
        metric.label()
    )
}

/// Prompt for a stakeholder-specific insight derived from a snapshot.
pub fn insight_prompt(view: StakeholderView, snapshot: &DashboardSnapshot) -> String {
    let metrics = serde_json::to_string(&snapshot.metrics).unwrap_or_default();
    let alerts = serde_json::to_string(&snapshot.alerts).unwrap_or_default();
    format!(
        "You are advising the {} stakeholder group. Current ocean metrics: {metrics}. \
         Active alerts: {alerts}. Provide one concise, actionable strategic insight \
         tailored to this audience. Respond with a single sentence of plain text.",
        view.as_str()
    )
}
