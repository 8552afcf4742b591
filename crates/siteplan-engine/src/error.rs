//! Error types for siteplan-engine.
//!
//! Cancellation is deliberately *not* an error: a cancelled optimization
//! returns its best-known partial solution flagged with
//! [`Termination::Cancelled`][crate::Termination::Cancelled], so callers can
//! accept or retry.

use thiserror::Error;

/// Errors raised by `optimize_locations`.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// More stores requested than candidate sites exist to place them on.
    #[error("requested {requested} stores but only {available} candidate sites are available")]
    Infeasible { requested: usize, available: usize },
}

/// Alias for `Result<T, OptimizeError>`.
pub type OptimizeResult<T> = Result<T, OptimizeError>;
