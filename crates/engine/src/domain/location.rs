//! Best-effort device location capture.

use async_trait::async_trait;
use tracing::debug;

use super::error::LocationError;
use super::types::{LocationSample, PermissionStatus, PositionOptions};

/// Platform positioning service. Implemented by the host (via FFI) or by
/// test doubles.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// May show an interactive prompt the first time it is called.
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError>;

    /// A single position fix.
    async fn current_position(&self, options: &PositionOptions) -> Result<LocationSample, LocationError>;
}

/// Ask for permission, then for one fix bounded by `options.timeout`.
pub async fn capture_location(
    provider: &dyn LocationProvider,
    options: &PositionOptions,
) -> Result<LocationSample, LocationError> {
    match provider.request_permission().await? {
        PermissionStatus::Granted => {}
        PermissionStatus::Denied => return Err(LocationError::PermissionDenied),
    }

    let sample = tokio::time::timeout(options.timeout, provider.current_position(options))
        .await
        .map_err(|_| LocationError::Timeout)??;

    debug!(
        latitude = sample.latitude,
        longitude = sample.longitude,
        accuracy = ?sample.accuracy,
        "location captured"
    );
    Ok(sample)
}
