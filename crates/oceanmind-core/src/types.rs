use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Direction a metric is moving relative to its recent baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Qualitative health assessment of a single metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Critical,
}

/// Category of a reported incident.
///
/// Wire values match the human-readable labels the generative backend emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    #[serde(rename = "Oil Spill")]
    OilSpill,
    #[serde(rename = "Coral Bleaching")]
    CoralBleaching,
    #[serde(rename = "Plastic Hotspot")]
    PlasticHotspot,
    #[serde(rename = "Temperature Spike")]
    TemperatureSpike,
    #[serde(rename = "Harmful Algal Bloom")]
    HarmfulAlgalBloom,
}

/// Severity ranking of an alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Response state of an alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Investigating,
    Resolved,
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Metric selectable in the analysis view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Temperature,
    Ph,
    DissolvedOxygen,
    Salinity,
    Turbidity,
    PlasticIndex,
}

impl MetricKind {
    /// Human-readable name used in generation prompts.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "temperature",
            MetricKind::Ph => "pH level",
            MetricKind::DissolvedOxygen => "dissolved oxygen",
            MetricKind::Salinity => "salinity",
            MetricKind::Turbidity => "turbidity",
            MetricKind::PlasticIndex => "plastic index",
        }
    }
}

impl std::str::FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(MetricKind::Temperature),
            "ph" => Ok(MetricKind::Ph),
            "dissolved_oxygen" => Ok(MetricKind::DissolvedOxygen),
            "salinity" => Ok(MetricKind::Salinity),
            "turbidity" => Ok(MetricKind::Turbidity),
            "plastic_index" => Ok(MetricKind::PlasticIndex),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}

/// Audience perspective for generated insights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakeholderView {
    Citizens,
    Government,
    #[serde(rename = "NGOs")]
    Ngos,
    Researchers,
}

impl StakeholderView {
    pub fn as_str(&self) -> &'static str {
        match self {
            StakeholderView::Citizens => "Citizens",
            StakeholderView::Government => "Government",
            StakeholderView::Ngos => "NGOs",
            StakeholderView::Researchers => "Researchers",
        }
    }
}

impl std::str::FromStr for StakeholderView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "citizens" => Ok(StakeholderView::Citizens),
            "government" => Ok(StakeholderView::Government),
            "ngos" => Ok(StakeholderView::Ngos),
            "researchers" => Ok(StakeholderView::Researchers),
            other => Err(format!("unknown stakeholder view: {}", other)),
        }
    }
}

// =============================================================================
// Dashboard snapshot
// =============================================================================

/// One generated metric value with its unit, trend, and status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub value: f64,
    pub unit: String,
    pub trend: Trend,
    pub status: MetricStatus,
}

/// The six named readings every snapshot carries.
///
/// Field names match the JSON keys the backend is asked to produce. There is
/// no optional field here: a response missing any reading fails decoding, so
/// a partially populated snapshot can never reach the view layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    pub temperature: MetricReading,
    pub ph_level: MetricReading,
    pub dissolved_oxygen: MetricReading,
    pub salinity: MetricReading,
    pub turbidity: MetricReading,
    pub plastic_index: MetricReading,
}

/// An active incident owned by the snapshot that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub location: String,
    pub timestamp: String,
    pub status: AlertStatus,
}

/// One complete, atomically generated set of conditions for a coordinate pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub metrics: MetricSet,
    pub alerts: Vec<Alert>,
    pub summary: String,
}

// =============================================================================
// Time series
// =============================================================================

/// One hourly sample in an analysis time series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub time: String,
    pub value: f64,
    #[serde(
        rename = "secondaryValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_value: Option<f64>,
}

// =============================================================================
// Chat
// =============================================================================

/// A single turn in a conversation session. Created once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// Geography
// =============================================================================

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

// =============================================================================
// Tests
// =============================================================================
