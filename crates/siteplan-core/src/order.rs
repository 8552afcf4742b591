//! Historical order snapshot records.
//!
//! Orders are immutable inputs owned by the storage collaborator; the engine
//! only reads slices of them.  Timestamps are Unix seconds (UTC) — keeping a
//! raw `i64` avoids a datetime dependency, and the only calendar arithmetic
//! the engine needs (hour-of-day, period length in days) is integer math.

use crate::{GeoPoint, OrderId};

/// One historical delivery order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id: OrderId,

    /// Order placement time, Unix seconds (UTC).
    pub timestamp_unix_secs: i64,

    /// Delivery location.
    pub pos: GeoPoint,

    /// Number of items, when the source system recorded it.
    pub items_count: Option<u16>,

    /// Monetary value of the order, when recorded.  Missing values are
    /// treated as 0 by all aggregations.
    pub order_value: Option<f32>,
}

impl Order {
    /// Minimal constructor for the common case (no item/value metadata).
    pub fn new(id: OrderId, timestamp_unix_secs: i64, lat: f32, lon: f32) -> Self {
        Self {
            id,
            timestamp_unix_secs,
            pos: GeoPoint::new(lat, lon),
            items_count: None,
            order_value: None,
        }
    }

    /// Attach an order value (builder-style, for tests and loaders).
    pub fn with_value(mut self, value: f32) -> Self {
        self.order_value = Some(value);
        self
    }

    /// Hour of day 0–23 (UTC) the order was placed.
    ///
    /// `rem_euclid` keeps pre-1970 timestamps in range rather than negative.
    #[inline]
    pub fn hour_of_day(&self) -> u8 {
        (self.timestamp_unix_secs.rem_euclid(86_400) / 3_600) as u8
    }

    /// Order value with missing values mapped to 0.
    #[inline]
    pub fn value_or_zero(&self) -> f32 {
        self.order_value.unwrap_or(0.0)
    }
}
