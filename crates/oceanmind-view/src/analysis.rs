//! Analysis view coordination.

use std::sync::Arc;

use oceanmind_core::{MetricKind, TimeSeriesPoint};
use oceanmind_data::SnapshotFetcher;

use crate::lifecycle::RequestLifecycle;

/// Summary figures rendered alongside the series chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl TimeSeriesStats {
    /// `None` for an empty series.
    pub fn compute(points: &[TimeSeriesPoint]) -> Option<Self> {
        let first = points.first()?.value;
        let mut min = first;
        let mut max = first;
        let mut sum = 0.0;
        for point in points {
            min = min.min(point.value);
            max = max.max(point.value);
            sum += point.value;
        }
        Some(Self {
            min,
            max,
            mean: sum / points.len() as f64,
        })
    }
}

/// Drives the per-metric time-series load cycle.
///
/// Same ticketing discipline as the dashboard: only the latest trigger's
/// result is applied. An empty series still resolves to `Succeeded` since an
/// empty chart is valid data.
pub struct AnalysisCoordinator {
    fetcher: Arc<SnapshotFetcher>,
    metric: MetricKind,
    state: RequestLifecycle<Vec<TimeSeriesPoint>>,
    seq: u64,
}

impl AnalysisCoordinator {
    pub fn new(fetcher: Arc<SnapshotFetcher>, initial_metric: MetricKind) -> Self {
        Self {
            fetcher,
            metric: initial_metric,
            state: RequestLifecycle::Idle,
            seq: 0,
        }
    }

    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn state(&self) -> &RequestLifecycle<Vec<TimeSeriesPoint>> {
        &self.state
    }

    /// Stats for the currently displayed series, if one has loaded.
    pub fn stats(&self) -> Option<TimeSeriesStats> {
        self.state.value().and_then(|p| TimeSeriesStats::compute(p))
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.seq += 1;
        self.state = RequestLifecycle::Loading;
        self.seq
    }

    /// Applies a fetch result; `false` means the ticket was stale.
    pub fn resolve(&mut self, ticket: u64, points: Vec<TimeSeriesPoint>) -> bool {
        if ticket != self.seq {
            tracing::debug!(ticket, latest = self.seq, "discarding stale series result");
            return false;
        }
        self.state = RequestLifecycle::Succeeded(points);
        true
    }

    /// One full load cycle for the current metric.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let points = self.fetcher.fetch_time_series(self.metric).await;
        self.resolve(ticket, points);
    }

    /// Switches the displayed metric and reloads.
    pub async fn select_metric(&mut self, metric: MetricKind) {
        self.metric = metric;
        self.refresh().await;
    }
}
