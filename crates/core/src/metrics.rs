//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Job store (enqueues, evaluation outcomes)
//! - Quota ledger (reservations, expiries, outstanding tokens)
//! - Admission (rollbacks)

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Jobs
// =============================================================================

/// Jobs accepted into the store.
pub static JOBS_ENQUEUED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("valuator_jobs_enqueued_total", "Total jobs enqueued").unwrap()
});

/// Evaluations that reached a terminal state.
pub static EVALUATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("valuator_evaluations_total", "Total completed evaluations"),
        &["status"], // "finished", "failed"
    )
    .unwrap()
});

// =============================================================================
// Quota
// =============================================================================

/// Quota reservations by result.
pub static QUOTA_RESERVATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "valuator_quota_reservations_total",
            "Total quota reservation attempts",
        ),
        &["result"], // "granted", "exceeded"
    )
    .unwrap()
});

/// Tokens removed by TTL expiry.
pub static QUOTA_TOKENS_EXPIRED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "valuator_quota_tokens_expired_total",
        "Total quota tokens released by expiry",
    )
    .unwrap()
});

/// Tokens currently outstanding across all owners.
pub static QUOTA_TOKENS_OUTSTANDING: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "valuator_quota_tokens_outstanding",
        "Number of quota tokens currently held",
    )
    .unwrap()
});

/// Tokens handed back because the enqueue after them failed.
pub static QUOTA_ROLLBACKS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "valuator_quota_rollbacks_total",
        "Total quota tokens returned after a failed enqueue",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(JOBS_ENQUEUED.clone()),
        Box::new(EVALUATIONS_TOTAL.clone()),
        Box::new(QUOTA_RESERVATIONS_TOTAL.clone()),
        Box::new(QUOTA_TOKENS_EXPIRED.clone()),
        Box::new(QUOTA_TOKENS_OUTSTANDING.clone()),
        Box::new(QUOTA_ROLLBACKS_TOTAL.clone()),
    ]
}
