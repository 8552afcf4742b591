//! `siteplan-engine` — facility-location optimization and evaluation.
//!
//! The top of the pipeline: takes a scored `DemandSnapshot` (from
//! `siteplan-grid`) and a candidate pool (from `siteplan-cluster`), selects
//! store sites by greedy maximum coverage with pairwise-swap improvement,
//! and evaluates coverage/ROI for selected or hypothetical site sets.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`pipeline`] | `LocationEngine` — the three-operation facade            |
//! | [`optimize`] | greedy max-coverage + swap local search, `Candidate`,    |
//!                | `OptimizationResult`, `Termination`                      |
//! | [`evaluate`] | `CoverageReport`, `SimulationResult`, ROI math           |
//! | [`travel`]   | `TravelTimeEstimator` trait, `HaversineEstimator`        |
//! | [`cancel`]   | `CancelToken` — cooperative cancellation/timeout         |
//! | [`error`]    | `OptimizeError`, `OptimizeResult<T>`                     |
//!
//! # Determinism
//!
//! Everything here is deterministic: candidate generation is seeded, greedy
//! ties break to the lowest candidate index, and swap scanning order is
//! fixed.  Two runs over the same snapshot with the same options return
//! identical results.

pub mod cancel;
pub mod error;
pub mod evaluate;
pub mod optimize;
pub mod pipeline;
pub mod travel;


pub use cancel::CancelToken;
pub use error::{OptimizeError, OptimizeResult};
pub use evaluate::{CoverageReport, SimulationResult, evaluate_sites};
pub use optimize::{Candidate, OptimizationResult, OptimizeOptions, Termination};
pub use pipeline::LocationEngine;
pub use travel::{HaversineEstimator, TravelTimeEstimator};
