//! Codec Metrics
//!
//! Atomic counters describing encode/decode activity and rejected input.
//! A collector is an ordinary value: callers that want metrics create one,
//! share it through an `Arc`, and attach it where elements are framed.

use crate::error::CodecError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Thread-safe metrics collector for element encoding
#[derive(Debug)]
pub struct CodecMetrics {
    /// Elements successfully encoded
    pub elements_encoded: AtomicU64,
    /// Elements successfully decoded
    pub elements_decoded: AtomicU64,
    /// Total bytes produced by encoding
    pub bytes_encoded: AtomicU64,
    /// Total bytes consumed by decoding
    pub bytes_decoded: AtomicU64,
    /// Builder validation failures
    pub validation_failures: AtomicU64,
    /// Inputs that ended before a declared length was satisfied
    pub truncated_inputs: AtomicU64,
    /// Declared lengths rejected by limits
    pub oversized_rejections: AtomicU64,
    /// Any other decode failure (bad UTF-8, trailing bytes, format errors)
    pub malformed_inputs: AtomicU64,
    start_time: Instant,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self {
            elements_encoded: AtomicU64::new(0),
            elements_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            truncated_inputs: AtomicU64::new(0),
            oversized_rejections: AtomicU64::new(0),
            malformed_inputs: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record an encoded element of `byte_count` bytes
    pub fn element_encoded(&self, byte_count: u64) {
        self.elements_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a decoded element of `byte_count` bytes
    pub fn element_decoded(&self, byte_count: u64) {
        self.elements_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Count `err` against the matching failure counter
    pub fn record_error(&self, err: &CodecError) {
        let counter = match err {
            CodecError::Validation(_) => &self.validation_failures,
            CodecError::TruncatedInput { .. } => &self.truncated_inputs,
            CodecError::OversizedElement { .. } => &self.oversized_rejections,
            _ => &self.malformed_inputs,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            elements_encoded: self.elements_encoded.load(Ordering::Relaxed),
            elements_decoded: self.elements_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            truncated_inputs: self.truncated_inputs.load(Ordering::Relaxed),
            oversized_rejections: self.oversized_rejections.load(Ordering::Relaxed),
            malformed_inputs: self.malformed_inputs.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            elements_encoded = snapshot.elements_encoded,
            elements_decoded = snapshot.elements_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            validation_failures = snapshot.validation_failures,
            truncated_inputs = snapshot.truncated_inputs,
            oversized_rejections = snapshot.oversized_rejections,
            malformed_inputs = snapshot.malformed_inputs,
            uptime_seconds = snapshot.uptime_seconds,
            "Credential element codec metrics"
        );
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub elements_encoded: u64,
    pub elements_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub validation_failures: u64,
    pub truncated_inputs: u64,
    pub oversized_rejections: u64,
    pub malformed_inputs: u64,
    pub uptime_seconds: u64,
}

impl MetricsSnapshot {
    /// Total number of rejected inputs of any kind
    pub fn total_errors(&self) -> u64 {
        self.validation_failures
            + self.truncated_inputs
            + self.oversized_rejections
            + self.malformed_inputs
    }
}
