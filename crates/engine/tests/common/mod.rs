#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use prodcheck_engine as pe;
use tokio::sync::mpsc;

/// 2025-06-01T12:00:00Z, the "current date" most scenarios run at.
pub fn now_2025() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> Arc<pe::FixedClock> {
    Arc::new(pe::FixedClock(now_2025()))
}

/// A registry record with the fields the backend normally fills in.
pub fn product(name: &str, is_verified: bool, expiry_date: &str) -> pe::ProductRecord {
    pe::ProductRecord {
        id: Some(format!("id-{name}")),
        name: name.to_string(),
        brand: "Acme".to_string(),
        sku: Some("SKU-1".to_string()),
        batch: Some("B-2024-07".to_string()),
        manufacture_date: Some("2024-01-15".to_string()),
        expiry_date: Some(expiry_date.to_string()),
        price: Some(19.99),
        stock: Some(42),
        category: Some("Pharma".to_string()),
        description: Some("Take one daily".to_string()),
        warranty: None,
        instructions: None,
        is_verified,
        ..Default::default()
    }
}

/// Registry seeded with the fixture codes used across scenarios.
pub fn seeded_registry() -> Arc<pe::InMemoryRegistry> {
    Arc::new(pe::InMemoryRegistry::with_products([
        ("PROD001", product("Vitamin C", true, "2026-01-15")),
        ("EXPIRED001", product("Old Syrup", false, "2024-01-15")),
    ]))
}

pub fn sample_at(latitude: f64, longitude: f64) -> pe::LocationSample {
    pe::LocationSample {
        latitude,
        longitude,
        accuracy: Some(5.0),
        altitude: None,
        heading: None,
        speed: None,
        timestamp: now_2025(),
    }
}

/// Scripted behaviour for [`MockLocation`].
#[derive(Debug, Clone)]
pub enum LocationScript {
    Fix(pe::LocationSample),
    Denied,
    PermissionFails(pe::LocationError),
    PositionFails(pe::LocationError),
    /// Never answers the position request.
    Hang,
}

pub struct MockLocation {
    script: LocationScript,
    pub permission_calls: AtomicUsize,
    pub position_calls: AtomicUsize,
}

impl MockLocation {
    pub fn new(script: LocationScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            permission_calls: AtomicUsize::new(0),
            position_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl pe::LocationProvider for MockLocation {
    async fn request_permission(&self) -> Result<pe::PermissionStatus, pe::LocationError> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            LocationScript::Denied => Ok(pe::PermissionStatus::Denied),
            LocationScript::PermissionFails(e) => Err(e.clone()),
            _ => Ok(pe::PermissionStatus::Granted),
        }
    }

    async fn current_position(
        &self,
        _options: &pe::PositionOptions,
    ) -> Result<pe::LocationSample, pe::LocationError> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            LocationScript::Fix(sample) => Ok(sample.clone()),
            LocationScript::PositionFails(e) => Err(e.clone()),
            LocationScript::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            _ => Err(pe::LocationError::Other("unexpected position call".into())),
        }
    }
}

/// Registry whose tracking endpoint always fails; every attempt is reported
/// on the returned channel so tests can wait for the detached task.
pub struct FailingTracker {
    inner: Arc<pe::InMemoryRegistry>,
    attempts: mpsc::UnboundedSender<pe::LocationReport>,
}

impl FailingTracker {
    pub fn new(inner: Arc<pe::InMemoryRegistry>) -> (Arc<Self>, mpsc::UnboundedReceiver<pe::LocationReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { inner, attempts: tx }), rx)
    }
}

#[async_trait]
impl pe::ProductRegistry for FailingTracker {
    async fn lookup(&self, code: &pe::ScanCode) -> pe::EngineResult<Option<pe::ProductRecord>> {
        self.inner.lookup(code).await
    }

    async fn track_location(&self, report: pe::LocationReport) -> pe::EngineResult<()> {
        let _ = self.attempts.send(report);
        Err(pe::EngineError::Network("tracking service down".into()))
    }
}

/// Registry whose lookups always fail at the transport level.
pub struct UnreachableRegistry;

#[async_trait]
impl pe::ProductRegistry for UnreachableRegistry {
    async fn lookup(&self, _code: &pe::ScanCode) -> pe::EngineResult<Option<pe::ProductRecord>> {
        Err(pe::EngineError::Network("connection refused".into()))
    }

    async fn track_location(&self, _report: pe::LocationReport) -> pe::EngineResult<()> {
        Ok(())
    }
}

/// Poll until the in-memory registry has received `n` location reports.
pub async fn wait_for_reports(registry: &pe::InMemoryRegistry, n: usize) -> Vec<pe::LocationReport> {
    for _ in 0..200 {
        let reports = registry.location_reports();
        if reports.len() >= n {
            return reports;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    registry.location_reports()
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/")
}

/// Registry config for a local test server.
pub fn local_config(base_url: &str) -> pe::RegistryConfig {
    let mut cfg = pe::RegistryConfig::secure_default(base_url);
    cfg.allow_insecure_http = true;
    cfg
}
