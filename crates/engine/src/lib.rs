// crates/engine/src/lib.rs

//! Public facade for the Prodcheck engine.
//! Exposes a stable API and re-exports types for consumers (mobile FFI, tools).

pub mod adapters;
pub mod domain;

#[cfg(feature = "http")]
use std::sync::Arc;

/// One-shot helper for the common "remote registry, no location" path.
/// Builds an HTTP registry from `cfg` and verifies a single code.
#[cfg(feature = "http")]
pub async fn verify_product(cfg: &RegistryConfig, code: &str) -> domain::error::EngineResult<VerificationResult> {
    let registry = adapters::http::HttpRegistry::new(cfg)?;
    Verifier::new(Arc::new(registry)).verify(code).await
}

/// Build a verifier backed by the HTTP registry described by `cfg`.
#[cfg(feature = "http")]
pub fn http_verifier(cfg: &RegistryConfig) -> domain::error::EngineResult<Verifier> {
    let registry = adapters::http::HttpRegistry::new(cfg)?;
    Ok(Verifier::new(Arc::new(registry)))
}

// Re-exports for convenience
pub use adapters::memory::InMemoryRegistry;
#[cfg(feature = "http")]
pub use adapters::http::HttpRegistry;
pub use domain::clock::{Clock, FixedClock, SystemClock};
pub use domain::error::{EngineError, EngineResult, LocationError};
pub use domain::location::{capture_location, LocationProvider};
pub use domain::pipeline::Verifier;
pub use domain::registry::ProductRegistry;
pub use domain::scan::{ScanGate, ScanPermit};
pub use domain::types::{
    EngineDefaults, LocationReport, LocationSample, PermissionStatus, PositionOptions,
    ProductRecord, RegistryConfig, ScanCode, Symbology, VerificationStatus, VerifierConfig, SUPPORTED_SYMBOLOGIES,
};
pub use domain::verify::{derive, LocationOutcome, VerificationResult};
