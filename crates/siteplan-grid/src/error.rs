//! Error types for siteplan-grid.

use thiserror::Error;

/// Errors raised while constructing a demand grid.
///
/// Note the deliberate absences: an empty order set is *not* an error (the
/// grid builds with all-empty cells and downstream coverage reports 0 %),
/// and orders outside the region are counted, not rejected.
#[derive(Debug, Error)]
pub enum GridError {
    /// Degenerate bounding box or non-positive cell size.
    #[error("invalid region: {reason}")]
    InvalidRegion { reason: String },
}

/// Alias for `Result<T, GridError>`.
pub type GridResult<T> = Result<T, GridError>;
