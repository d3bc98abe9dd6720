use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use prodcheck_engine::domain::error::{EngineError, LocationError};
use prodcheck_engine::domain::types as dt;
use prodcheck_engine::{LocationProvider, ScanGate, VerificationResult, Verifier};

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    InvalidCode { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Network { message: String },
    #[error("{message}")]
    Config { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl From<EngineError> for FfiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidCode => FfiError::InvalidCode { message: e.user_message() },
            EngineError::NotFound => FfiError::NotFound { message: e.user_message() },
            EngineError::Network(_) => FfiError::Network { message: e.user_message() },
            EngineError::Config(_) | EngineError::Feature(_) => FfiError::Config { message: e.to_string() },
            EngineError::Internal(_) => FfiError::Internal { message: e.user_message() },
        }
    }
}

// ===== Location provider implemented by the host platform =====

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiLocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timeout")]
    Timeout,
    /// Raw platform failure; `code` uses the geolocation numbering.
    #[error("{message}")]
    Platform { code: i32, message: String },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for FfiLocationError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        FfiLocationError::Platform { code: -1, message: e.reason }
    }
}

impl From<FfiLocationError> for LocationError {
    fn from(e: FfiLocationError) -> Self {
        match e {
            FfiLocationError::PermissionDenied => LocationError::PermissionDenied,
            FfiLocationError::PositionUnavailable => LocationError::PositionUnavailable,
            FfiLocationError::Timeout => LocationError::Timeout,
            FfiLocationError::Platform { code, message } => LocationError::from_platform_code(code, message),
        }
    }
}

#[derive(uniffi::Record, Debug, Clone, Copy)]
pub struct FfiPositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
    pub distance_filter: f64,
}

impl From<dt::PositionOptions> for FfiPositionOptions {
    fn from(v: dt::PositionOptions) -> Self {
        FfiPositionOptions {
            high_accuracy: v.high_accuracy,
            timeout_ms: v.timeout.as_millis() as u64,
            maximum_age_ms: v.maximum_age.as_millis() as u64,
            distance_filter: v.distance_filter,
        }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiLocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub timestamp: SystemTime,
}

impl From<FfiLocationSample> for dt::LocationSample {
    fn from(v: FfiLocationSample) -> Self {
        dt::LocationSample {
            latitude: v.latitude,
            longitude: v.longitude,
            accuracy: v.accuracy,
            altitude: v.altitude,
            heading: v.heading,
            speed: v.speed,
            timestamp: DateTime::<Utc>::from(v.timestamp),
        }
    }
}

impl From<dt::LocationSample> for FfiLocationSample {
    fn from(v: dt::LocationSample) -> Self {
        FfiLocationSample {
            latitude: v.latitude,
            longitude: v.longitude,
            accuracy: v.accuracy,
            altitude: v.altitude,
            heading: v.heading,
            speed: v.speed,
            timestamp: SystemTime::from(v.timestamp),
        }
    }
}

/// Implemented in Kotlin/Swift on top of the platform positioning service.
/// Calls are made from a blocking worker thread, never from the UI thread.
#[uniffi::export(with_foreign)]
pub trait FfiLocationProvider: Send + Sync {
    /// Returns whether permission was granted; may prompt the user.
    fn request_permission(&self) -> Result<bool, FfiLocationError>;
    fn current_position(&self, options: FfiPositionOptions) -> Result<FfiLocationSample, FfiLocationError>;
}

struct ForeignLocationProvider(Arc<dyn FfiLocationProvider>);

#[async_trait]
impl LocationProvider for ForeignLocationProvider {
    async fn request_permission(&self) -> Result<dt::PermissionStatus, LocationError> {
        let provider = Arc::clone(&self.0);
        let granted = tokio::task::spawn_blocking(move || provider.request_permission())
            .await
            .map_err(|e| LocationError::Other(e.to_string()))??;
        Ok(if granted { dt::PermissionStatus::Granted } else { dt::PermissionStatus::Denied })
    }

    async fn current_position(&self, options: &dt::PositionOptions) -> Result<dt::LocationSample, LocationError> {
        let provider = Arc::clone(&self.0);
        let options = FfiPositionOptions::from(*options);
        let sample = tokio::task::spawn_blocking(move || provider.current_position(options))
            .await
            .map_err(|e| LocationError::Other(e.to_string()))??;
        Ok(sample.into())
    }
}

// ===== Configuration =====

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiRegistryConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub allow_insecure_http: bool,
    pub request_timeout_ms: Option<u64>,
    pub capture_location: bool,
}

impl From<&FfiRegistryConfig> for dt::RegistryConfig {
    fn from(v: &FfiRegistryConfig) -> Self {
        let mut cfg = dt::RegistryConfig::secure_default(v.base_url.clone());
        if let Some(token) = v.auth_token.clone() {
            cfg = cfg.with_token(token);
        }
        cfg.allow_insecure_http = v.allow_insecure_http;
        cfg.request_timeout = v.request_timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis);
        cfg
    }
}

// ===== Verification result mappings =====

#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus { Authentic, Warning }

impl From<dt::VerificationStatus> for FfiStatus {
    fn from(v: dt::VerificationStatus) -> Self {
        match v { dt::VerificationStatus::Authentic => FfiStatus::Authentic, dt::VerificationStatus::Warning => FfiStatus::Warning }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiVerificationResult {
    pub id: Option<String>,
    pub name: String,
    pub brand: String,
    pub sku: Option<String>,
    pub batch: Option<String>,
    pub batch_number: Option<String>,
    pub manufacture_date: Option<String>,
    pub expiry_date: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub origin: String,
    pub warranty: String,
    pub instructions: String,
    pub is_verified: bool,
    pub is_authentic: bool,
    pub is_expired: bool,
    pub is_suspicious: bool,
    pub status: FfiStatus,
    pub verification_date: String,
    pub verification_location: Option<FfiLocationSample>,
    pub location_error: Option<String>,
    /// Whole result as camelCase JSON, including registry fields not modelled above.
    pub json: String,
}

impl From<VerificationResult> for FfiVerificationResult {
    fn from(v: VerificationResult) -> Self {
        let json = serde_json::to_string(&v).unwrap_or_else(|e| {
            warn!(error = %e, "verification result did not serialize; json left empty");
            String::new()
        });
        FfiVerificationResult {
            id: v.id,
            name: v.name,
            brand: v.brand,
            sku: v.sku,
            batch: v.batch,
            batch_number: v.batch_number,
            manufacture_date: v.manufacture_date,
            expiry_date: v.expiry_date,
            price: v.price,
            stock: v.stock,
            category: v.category,
            description: v.description,
            origin: v.origin,
            warranty: v.warranty,
            instructions: v.instructions,
            is_verified: v.is_verified,
            is_authentic: v.is_authentic,
            is_expired: v.is_expired,
            is_suspicious: v.is_suspicious,
            status: v.status.into(),
            verification_date: v.verification_date,
            verification_location: v.verification_location.map(Into::into),
            location_error: v.location_error,
            json,
        }
    }
}

// ===== Verifier object =====

#[derive(uniffi::Object)]
pub struct ProductVerifier {
    inner: Verifier,
    gate: ScanGate,
}

#[uniffi::export(async_runtime = "tokio")]
impl ProductVerifier {
    #[uniffi::constructor]
    pub fn new(
        config: FfiRegistryConfig,
        location: Option<Arc<dyn FfiLocationProvider>>,
    ) -> Result<Arc<Self>, FfiError> {
        let inner = build_verifier(&config)?;
        let inner = inner.with_config(dt::VerifierConfig {
            capture_location: config.capture_location,
            ..dt::VerifierConfig::default()
        });
        let inner = match location {
            Some(provider) => inner.with_location_provider(Arc::new(ForeignLocationProvider(provider))),
            None => inner,
        };
        Ok(Arc::new(Self { inner, gate: ScanGate::new() }))
    }

    /// Verify a code regardless of any attempt already running (manual entry).
    pub async fn verify(&self, code: String) -> Result<FfiVerificationResult, FfiError> {
        let result = self.inner.verify(&code).await?;
        Ok(result.into())
    }

    /// Camera path: `None` when another scan is still being verified.
    pub async fn verify_scanned(&self, code: String) -> Result<Option<FfiVerificationResult>, FfiError> {
        let Some(_permit) = self.gate.try_acquire() else {
            debug!("scan ignored, verification already in flight");
            return Ok(None);
        };
        let result = self.inner.verify(&code).await?;
        Ok(Some(result.into()))
    }

    pub fn is_scanning(&self) -> bool {
        self.gate.is_scanning()
    }
}

#[cfg(feature = "http")]
fn build_verifier(config: &FfiRegistryConfig) -> Result<Verifier, FfiError> {
    let cfg = dt::RegistryConfig::from(config);
    prodcheck_engine::http_verifier(&cfg).map_err(FfiError::from)
}

#[cfg(not(feature = "http"))]
fn build_verifier(_config: &FfiRegistryConfig) -> Result<Verifier, FfiError> {
    Err(EngineError::Feature("http").into())
}

// ===== Presentation table for the result screen =====

#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct FfiStatusPresentation {
    pub color: String,
    pub gradient_start: String,
    pub gradient_end: String,
    pub icon: String,
    pub title: String,
    pub subtitle: String,
}

fn presentation(color: &str, gradient_end: &str, icon: &str, title: &str, subtitle: &str) -> FfiStatusPresentation {
    FfiStatusPresentation {
        color: color.to_string(),
        gradient_start: color.to_string(),
        gradient_end: gradient_end.to_string(),
        icon: icon.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
    }
}

#[uniffi::export]
pub fn status_presentation(status: FfiStatus) -> FfiStatusPresentation {
    match status {
        FfiStatus::Authentic => presentation("#10B981", "#059669", "verified", "Authentic Product", "This product is verified and authentic"),
        FfiStatus::Warning => presentation("#F59E0B", "#D97706", "warning", "Verification Warning", "Please review the product details carefully"),
    }
}

/// Shown for any failed attempt; not-found and network failures look the same.
#[uniffi::export]
pub fn failure_presentation() -> FfiStatusPresentation {
    presentation("#EF4444", "#DC2626", "error", "Verification Failed", "Product verification unsuccessful")
}

// ===== Misc helpers =====

#[uniffi::export]
pub fn supported_symbologies() -> Vec<String> {
    dt::SUPPORTED_SYMBOLOGIES.iter().map(|s| s.as_str().to_string()).collect()
}

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a fmt subscriber once. `filter` uses `EnvFilter` syntax; falls
/// back to `RUST_LOG`, then `info`.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    LOGGING.get_or_init(|| {
        let filter = filter
            .and_then(|f| tracing_subscriber::EnvFilter::try_new(f).ok())
            .or_else(|| tracing_subscriber::EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

uniffi::setup_scaffolding!();
