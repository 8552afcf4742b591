//! `siteplan-grid` — demand discretization and scoring.
//!
//! Turns a raw stream of geolocated orders into a `DemandSnapshot`: a
//! complete, non-overlapping tiling of a bounding region with per-cell order
//! statistics, normalized demand scores, and distance to the nearest active
//! store.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`region`] | `BoundingRegion`, `GridSpec` (O(1) coordinate→cell math)   |
//! | [`cell`]   | `DemandCell`                                               |
//! | [`grid`]   | `DemandSnapshot`, `build_demand_snapshot`                  |
//! | [`score`]  | per-cell statistics and demand-score normalization         |
//! | [`stores`] | `StoreIndex` (R-tree over active stores)                   |
//! | [`error`]  | `GridError`, `GridResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Rayon-shard bucketing and scoring.  Merges are by cell    |
//!              | index, so output is bit-identical to the sequential path. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod cell;
pub mod error;
pub mod grid;
pub mod region;
pub mod score;
pub mod stores;

#[cfg(test)]
mod tests;

pub use cell::DemandCell;
pub use error::{GridError, GridResult};
pub use grid::{DemandSnapshot, build_demand_snapshot};
pub use region::{BoundingRegion, GridSpec};
pub use stores::StoreIndex;
