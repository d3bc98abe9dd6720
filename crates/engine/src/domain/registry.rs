// crates/engine/src/domain/registry.rs

use async_trait::async_trait;

use super::error::EngineResult;
use super::types::{LocationReport, ProductRecord, ScanCode};

/// Trait implemented by product registries (HTTP backend, in-memory store).
///
/// The pipeline only talks to this seam, so it does not care whether the
/// backing store is the remote service or a local fixture.
#[async_trait]
pub trait ProductRegistry: Send + Sync {
    /// `Ok(None)` when the registry has no record for `code`.
    async fn lookup(&self, code: &ScanCode) -> EngineResult<Option<ProductRecord>>;

    /// Record where a code was scanned. Callers treat this as best-effort.
    async fn track_location(&self, report: LocationReport) -> EngineResult<()>;
}
