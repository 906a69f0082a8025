// src/core/mod.rs

/// Data structures shared across the scanner: severity, issues, the risk
/// score, and the assembled scan report.
pub mod models;

/// Static, read-only catalog of every issue kind with its severity and
/// remediation guidance.
pub mod catalog;

/// The Stripe API surface the scanner consumes, its error taxonomy, and the
/// reqwest-backed client.
pub mod client;

/// The fixed probe battery and the orchestration that fans it out.
pub mod probe;

#[cfg(test)]
pub(crate) mod testing;
