//! Geolocation boundary.

use async_trait::async_trait;
use oceanmind_core::Coordinates;

/// Source of the viewer's position. Best effort: `None` means the position
/// could not be determined and callers keep their default location.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Option<Coordinates>;
}

/// Provider for environments with no position source.
pub struct UnavailableGeolocation;

#[async_trait]
impl GeolocationProvider for UnavailableGeolocation {
    async fn current_position(&self) -> Option<Coordinates> {
        None
    }
}
