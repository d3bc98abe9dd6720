//! Debouncing between the scan capability and the pipeline.

use std::sync::atomic::{AtomicBool, Ordering};

/// Open while no verification attempt is in flight.
///
/// The camera keeps emitting codes; only the first one that finds the gate
/// open gets a permit. Dropping the permit reopens the gate, whether the
/// attempt succeeded or not.
#[derive(Debug)]
pub struct ScanGate {
    scanning: AtomicBool,
}

impl Default for ScanGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanGate {
    pub fn new() -> Self {
        Self { scanning: AtomicBool::new(true) }
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> Option<ScanPermit<'_>> {
        self.scanning
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScanPermit { gate: self })
    }
}

#[derive(Debug)]
pub struct ScanPermit<'a> {
    gate: &'a ScanGate,
}

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        self.gate.scanning.store(true, Ordering::Release);
    }
}
