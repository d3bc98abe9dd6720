//! In-process registry for tests, demos, and offline hosts.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::registry::ProductRegistry;
use crate::domain::types::{LocationReport, ProductRecord, ScanCode};

#[derive(Debug, Default)]
struct State {
    products: HashMap<String, ProductRecord>,
    scan_counts: HashMap<String, u64>,
    reports: Vec<LocationReport>,
}

/// Records keyed by scan code. Scan counters and received location reports
/// are kept per instance.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: Mutex<State>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products<I, K>(products: I) -> Self
    where
        I: IntoIterator<Item = (K, ProductRecord)>,
        K: Into<String>,
    {
        let registry = Self::new();
        if let Ok(mut state) = registry.state.lock() {
            state.products.extend(products.into_iter().map(|(k, v)| (k.into(), v)));
        }
        registry
    }

    pub fn insert(&self, code: impl Into<String>, record: ProductRecord) -> EngineResult<()> {
        self.lock()?.products.insert(code.into(), record);
        Ok(())
    }

    /// Successful lookups of `code` so far.
    pub fn scan_count(&self, code: &str) -> u64 {
        self.lock()
            .map(|s| s.scan_counts.get(code).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn location_reports(&self) -> Vec<LocationReport> {
        self.lock().map(|s| s.reports.clone()).unwrap_or_default()
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| EngineError::Internal("registry mutex poisoned".into()))
    }
}

#[async_trait]
impl ProductRegistry for InMemoryRegistry {
    async fn lookup(&self, code: &ScanCode) -> EngineResult<Option<ProductRecord>> {
        let mut state = self.lock()?;
        let record = state.products.get(code.as_str()).cloned();
        if record.is_some() {
            *state.scan_counts.entry(code.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(record)
    }

    async fn track_location(&self, report: LocationReport) -> EngineResult<()> {
        self.lock()?.reports.push(report);
        Ok(())
    }
}
