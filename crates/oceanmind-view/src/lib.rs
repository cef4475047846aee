//! View-state coordinators for the OceanMind dashboard.

pub mod analysis;
pub mod dashboard;
pub mod geo;
pub mod lifecycle;

pub use analysis::{AnalysisCoordinator, TimeSeriesStats};
pub use dashboard::DashboardCoordinator;
pub use geo::{GeolocationProvider, UnavailableGeolocation};
pub use lifecycle::RequestLifecycle;
