//! Dashboard view coordination.

use std::sync::Arc;

use oceanmind_core::{Coordinates, DashboardSnapshot};
use oceanmind_data::SnapshotFetcher;

use crate::geo::GeolocationProvider;
use crate::lifecycle::RequestLifecycle;

/// Drives the dashboard load cycle.
///
/// Every trigger (mount, location change, manual refresh) takes a numbered
/// ticket; a resolution carrying anything but the latest ticket is discarded,
/// so the displayed snapshot always belongs to the most recent trigger even
/// when responses arrive out of order.
pub struct DashboardCoordinator {
    fetcher: Arc<SnapshotFetcher>,
    location: Coordinates,
    state: RequestLifecycle<DashboardSnapshot>,
    seq: u64,
}

impl DashboardCoordinator {
    pub fn new(fetcher: Arc<SnapshotFetcher>, default_location: Coordinates) -> Self {
        Self {
            fetcher,
            location: default_location,
            state: RequestLifecycle::Idle,
            seq: 0,
        }
    }

    pub fn state(&self) -> &RequestLifecycle<DashboardSnapshot> {
        &self.state
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    /// Starts a new load cycle. Prior data is dropped immediately; the
    /// returned ticket must accompany the matching [`resolve`] call.
    ///
    /// [`resolve`]: Self::resolve
    pub fn begin_refresh(&mut self) -> u64 {
        self.seq += 1;
        self.state = RequestLifecycle::Loading;
        self.seq
    }

    /// Applies a fetch result. Returns `false` when the ticket is stale and
    /// the result was discarded. A `None` snapshot resolves to `Idle`: the
    /// dashboard renders placeholders, not an error.
    pub fn resolve(&mut self, ticket: u64, result: Option<DashboardSnapshot>) -> bool {
        if ticket != self.seq {
            tracing::debug!(ticket, latest = self.seq, "discarding stale dashboard result");
            return false;
        }
        self.state = match result {
            Some(snapshot) => RequestLifecycle::Succeeded(snapshot),
            None => RequestLifecycle::Idle,
        };
        true
    }

    /// One full load cycle for the current location.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let Coordinates { lat, lng } = self.location;
        let result = self.fetcher.fetch_dashboard(lat, lng).await;
        self.resolve(ticket, result);
    }

    /// Moves the dashboard to new coordinates and reloads.
    pub async fn set_location(&mut self, location: Coordinates) {
        self.location = location;
        self.refresh().await;
    }

    /// Mount-time startup: load for the default location, then ask the
    /// geolocation provider once. A position overwrites the default and
    /// triggers a second load; no position keeps the default silently.
    pub async fn mount(&mut self, geo: &dyn GeolocationProvider) {
        self.refresh().await;
        if let Some(position) = geo.current_position().await {
            self.set_location(position).await;
        }
    }
}
