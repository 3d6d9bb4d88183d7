//! Camera device enumeration.

use super::types::{CameraError, CameraInfo};

/// List all available camera devices on the system.
///
/// If no cameras are found, returns an empty vector (not an error).
#[cfg(feature = "camera")]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    use nokhwa::query;
    use nokhwa::utils::ApiBackend;

    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;

    Ok(devices
        .into_iter()
        .map(|d| CameraInfo {
            index: d.index().as_index().unwrap_or(0),
            name: d.human_name(),
            description: d.description().to_string(),
        })
        .collect())
}

/// List all available camera devices on the system.
///
/// Without the `camera` feature there is no capture backend to ask.
#[cfg(not(feature = "camera"))]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    Err(CameraError::QueryFailed(
        "built without the `camera` feature".to_string(),
    ))
}
