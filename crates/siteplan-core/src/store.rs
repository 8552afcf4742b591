//! Existing-store snapshot records.

use crate::{GeoPoint, StoreId};

/// An existing facility.  Immutable input; candidate (hypothetical) stores
/// are plain `GeoPoint`s until the caller decides to persist them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub pos: GeoPoint,

    /// Inactive stores are ignored by every computation (distance-to-nearest,
    /// baseline coverage, `use_existing_stores`).
    pub is_active: bool,

    /// Orders-per-day capacity, when known.  Informational — the optimizer
    /// treats sites as uncapacitated.
    pub capacity: Option<u32>,
}

impl Store {
    /// Construct an active store with no capacity metadata.
    pub fn new(id: StoreId, name: impl Into<String>, lat: f32, lon: f32) -> Self {
        Self {
            id,
            name: name.into(),
            pos: GeoPoint::new(lat, lon),
            is_active: true,
            capacity: None,
        }
    }
}

/// Positions of all active stores, in input order.
pub fn active_positions(stores: &[Store]) -> Vec<GeoPoint> {
    stores.iter().filter(|s| s.is_active).map(|s| s.pos).collect()
}
