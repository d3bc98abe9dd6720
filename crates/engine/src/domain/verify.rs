// crates/engine/src/domain/verify.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::error::LocationError;
use super::types::{EngineDefaults, LocationSample, ProductRecord, VerificationStatus};

/// Display-ready outcome of one verification attempt.
///
/// Built once per attempt and never mutated afterwards. Serializes with the
/// camelCase names the result screen reads.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    /// Same value as `batch`, under the name the display expects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The registry has no origin field; this mirrors `brand`.
    pub origin: String,
    pub warranty: String,
    pub instructions: String,

    pub is_verified: bool,
    pub is_authentic: bool,
    pub is_expired: bool,
    pub is_suspicious: bool,
    pub status: VerificationStatus,
    /// Client capture time, RFC 3339 in UTC.
    pub verification_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_location: Option<LocationSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_error: Option<String>,

    /// Registry fields the engine does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire names of every field `VerificationResult` writes itself. Registry
/// keys with these names are dropped from `extra` so the derived values are
/// the only ones serialized.
const RESULT_KEYS: &[&str] = &[
    "id",
    "_id",
    "name",
    "brand",
    "sku",
    "batch",
    "batchNumber",
    "manufactureDate",
    "expiryDate",
    "price",
    "stock",
    "category",
    "description",
    "origin",
    "warranty",
    "instructions",
    "isVerified",
    "isAuthentic",
    "isExpired",
    "isSuspicious",
    "status",
    "verificationDate",
    "verificationLocation",
    "locationError",
];

/// What happened to the location step of an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Captured(LocationSample),
    Failed(LocationError),
    /// No provider configured or capture disabled.
    Skipped,
}

/// Turn a registry record into a result, as of `now`.
pub fn derive(record: ProductRecord, now: DateTime<Utc>, location: LocationOutcome) -> VerificationResult {
    let is_expired = is_expired(record.expiry_date.as_deref(), now);
    // Multi-scan detection needs a scan counter the registry no longer returns.
    let is_suspicious = false;
    let is_authentic = record.is_verified;
    let status = VerificationStatus::from_flags(is_authentic, is_expired, is_suspicious);

    let warranty = non_empty(record.warranty.as_deref())
        .unwrap_or(EngineDefaults::DEFAULT_WARRANTY)
        .to_string();
    let instructions = non_empty(record.instructions.as_deref())
        .or_else(|| non_empty(record.description.as_deref()))
        .unwrap_or(EngineDefaults::DEFAULT_INSTRUCTIONS)
        .to_string();

    let (verification_location, location_error) = match location {
        LocationOutcome::Captured(sample) => (Some(sample), None),
        LocationOutcome::Failed(err) => (None, Some(err.to_string())),
        LocationOutcome::Skipped => (None, None),
    };

    let mut extra = record.extra;
    for key in RESULT_KEYS {
        extra.remove(*key);
    }

    VerificationResult {
        id: record.id,
        origin: record.brand.clone(),
        name: record.name,
        brand: record.brand,
        sku: record.sku,
        batch_number: record.batch.clone(),
        batch: record.batch,
        manufacture_date: record.manufacture_date,
        expiry_date: record.expiry_date,
        price: record.price,
        stock: record.stock,
        category: record.category,
        description: record.description,
        warranty,
        instructions,
        is_verified: record.is_verified,
        is_authentic,
        is_expired,
        is_suspicious,
        status,
        verification_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        verification_location,
        location_error,
        extra,
    }
}

/// Expired only when `now` is strictly past the expiry instant.
/// A missing or unreadable expiry date never marks a product expired.
pub fn is_expired(expiry_date: Option<&str>, now: DateTime<Utc>) -> bool {
    let Some(raw) = expiry_date else {
        return false;
    };
    match parse_expiry(raw) {
        Some(expiry) => now > expiry,
        None => {
            warn!(expiry_date = raw, "unparseable expiry date, treating product as not expired");
            false
        }
    }
}

/// Date-only values resolve to UTC midnight of that calendar day.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
