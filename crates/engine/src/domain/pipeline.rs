// crates/engine/src/domain/pipeline.rs

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::error::{EngineError, EngineResult};
use super::location::{capture_location, LocationProvider};
use super::registry::ProductRegistry;
use super::types::{LocationReport, ScanCode, VerifierConfig};
use super::verify::{derive, LocationOutcome, VerificationResult};

/// Runs one verification attempt per call: location, lookup, derivation.
///
/// Holds no state across attempts. Concurrent calls are not coordinated here;
/// hosts that feed camera reads should put a [`super::scan::ScanGate`] in front.
#[derive(Clone)]
pub struct Verifier {
    registry: Arc<dyn ProductRegistry>,
    location: Option<Arc<dyn LocationProvider>>,
    clock: Arc<dyn Clock>,
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(registry: Arc<dyn ProductRegistry>) -> Self {
        Self {
            registry,
            location: None,
            clock: Arc::new(SystemClock),
            config: VerifierConfig::default(),
        }
    }

    pub fn with_location_provider(mut self, provider: Arc<dyn LocationProvider>) -> Self {
        self.location = Some(provider);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_config(mut self, config: VerifierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a raw scanned or typed code. The code is trimmed first.
    pub async fn verify(&self, raw: &str) -> EngineResult<VerificationResult> {
        let code = ScanCode::parse(raw)?;
        self.verify_code(&code).await
    }

    pub async fn verify_code(&self, code: &ScanCode) -> EngineResult<VerificationResult> {
        // 1) Location first; any failure is absorbed into the result.
        let location = self.capture(code).await;

        // 2) Registry lookup.
        info!(code = %code, "looking up product");
        let record = match self.registry.lookup(code).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(code = %code, "product not found in registry");
                return Err(EngineError::NotFound);
            }
            Err(e) => {
                warn!(code = %code, error = %e, "registry lookup failed");
                return Err(e);
            }
        };
        debug!(?record, "registry record");

        // 3) Derivation.
        let result = derive(record, self.clock.now(), location);
        info!(code = %code, status = result.status.as_str(), expired = result.is_expired, "verification complete");
        Ok(result)
    }

    async fn capture(&self, code: &ScanCode) -> LocationOutcome {
        let provider = match (&self.location, self.config.capture_location) {
            (Some(provider), true) => provider,
            _ => return LocationOutcome::Skipped,
        };

        match capture_location(provider.as_ref(), &self.config.position).await {
            Ok(sample) => {
                self.report_location(LocationReport::new(code, &sample));
                LocationOutcome::Captured(sample)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "location unavailable, continuing without it");
                LocationOutcome::Failed(e)
            }
        }
    }

    /// Detached: the handle is dropped and the outcome only reaches the log.
    fn report_location(&self, report: LocationReport) {
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            let barcode_id = report.barcode_id.clone();
            match registry.track_location(report).await {
                Ok(()) => debug!(code = %barcode_id, "location report delivered"),
                Err(e) => warn!(code = %barcode_id, error = %e, "location report failed"),
            }
        });
    }
}
