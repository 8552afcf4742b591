//! `siteplan-cluster` — candidate-site generation.
//!
//! Reduces the (possibly hundreds of) high-demand cells of a snapshot to a
//! bounded pool of candidate coordinates for the optimizer: weighted k-means
//! over non-empty cell centroids, weighted by demand score, with
//! deterministic k-means++ seeding so the same seed always yields the same
//! pool.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`kmeans`]   | `WeightedPoint`, `weighted_kmeans` (Lloyd + k-means++) |
//! | [`generate`] | pool sizing and degenerate-case policy                |

pub mod generate;
pub mod kmeans;

#[cfg(test)]
mod tests;

pub use generate::{candidate_pool_size, generate_candidates};
pub use kmeans::{WeightedPoint, weighted_kmeans};
