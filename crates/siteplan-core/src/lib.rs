//! `siteplan-core` — foundational types for the siteplan store-placement engine.
//!
//! This crate is a dependency of every other `siteplan-*` crate.  It
//! intentionally has no `siteplan-*` dependencies and minimal external ones
//! (only `rand`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`ids`]     | `OrderId`, `StoreId`, `CellId`                         |
//! | [`geo`]     | `GeoPoint`, haversine distance                         |
//! | [`order`]   | `Order` snapshot record, hour-of-day derivation        |
//! | [`store`]   | `Store` snapshot record                                |
//! | [`config`]  | `EngineConfig`, `Economics`                            |
//! | [`rng`]     | `EngineRng` (seeded, reproducible)                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types, so     |
//!           | callers can persist snapshots and results themselves.      |

pub mod config;
pub mod geo;
pub mod ids;
pub mod order;
pub mod rng;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Economics, EngineConfig};
pub use geo::GeoPoint;
pub use ids::{CellId, OrderId, StoreId};
pub use order::Order;
pub use rng::EngineRng;
pub use store::{Store, active_positions};
