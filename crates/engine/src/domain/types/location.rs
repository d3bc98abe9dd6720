use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single position fix from the device positioning service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Parameters for a single position request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Upper bound on the wait for a fix.
    pub timeout: Duration,
    /// A cached fix younger than this may be reused.
    pub maximum_age: Duration,
    /// Minimum movement in metres before a new fix is reported.
    pub distance_filter: f64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(30),
            maximum_age: Duration::from_secs(5),
            distance_filter: 0.0,
        }
    }
}

/// Body of the fire-and-forget tracking report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    pub barcode_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationReport {
    pub fn new(code: &super::ScanCode, sample: &LocationSample) -> Self {
        Self {
            barcode_id: code.as_str().to_string(),
            latitude: sample.latitude,
            longitude: sample.longitude,
        }
    }
}
