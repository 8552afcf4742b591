//! Bounding region and grid geometry.
//!
//! # Cell indexing
//!
//! The region is tiled by `rows × cols` rectangular cells of
//! `cell_size_deg` degrees, row 0 at `lat_min`, column 0 at `lon_min`.
//! A coordinate maps to its cell with two subtractions, two divisions, and
//! two floors — no per-cell point-in-polygon tests:
//!
//! ```text
//! col = floor((lon − lon_min) / cell_size)     clamped to cols − 1
//! row = floor((lat − lat_min) / cell_size)     clamped to rows − 1
//! cell = row · cols + col
//! ```
//!
//! The mapping is total and tie-free: a point on an interior cell edge
//! belongs to the cell whose low edge it sits on (floor), and the clamp
//! closes the region's far edges so the tiling has no gaps.  The last row
//! and column may extend past `lat_max`/`lon_max`; that slack is outside
//! the region and never receives orders.

use siteplan_core::{CellId, GeoPoint};

use crate::{GridError, GridResult};

// ── BoundingRegion ────────────────────────────────────────────────────────────

/// An axis-aligned lat/lon box.  Construct via [`new`](Self::new), which
/// rejects degenerate boxes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingRegion {
    pub lat_min: f32,
    pub lat_max: f32,
    pub lon_min: f32,
    pub lon_max: f32,
}

impl BoundingRegion {
    /// Validate and construct.  Fails when any bound is non-finite or when
    /// `min >= max` on either axis.
    pub fn new(lat_min: f32, lat_max: f32, lon_min: f32, lon_max: f32) -> GridResult<Self> {
        let bounds = [lat_min, lat_max, lon_min, lon_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(GridError::InvalidRegion {
                reason: format!("non-finite bound in [{lat_min}, {lat_max}] × [{lon_min}, {lon_max}]"),
            });
        }
        if lat_min >= lat_max || lon_min >= lon_max {
            return Err(GridError::InvalidRegion {
                reason: format!(
                    "degenerate box: lat [{lat_min}, {lat_max}], lon [{lon_min}, {lon_max}]"
                ),
            });
        }
        Ok(Self { lat_min, lat_max, lon_min, lon_max })
    }

    /// `true` if `p` lies inside the region (closed on all edges).
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.lat_min
            && p.lat <= self.lat_max
            && p.lon >= self.lon_min
            && p.lon <= self.lon_max
    }

    #[inline]
    pub fn height_deg(&self) -> f32 {
        self.lat_max - self.lat_min
    }

    #[inline]
    pub fn width_deg(&self) -> f32 {
        self.lon_max - self.lon_min
    }
}

// ── GridSpec ──────────────────────────────────────────────────────────────────

/// A validated region + cell size, with the derived row/column counts.
///
/// `CellId`s are only meaningful relative to the `GridSpec` that produced
/// them; a snapshot carries its spec for exactly that reason.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub region: BoundingRegion,
    pub cell_size_deg: f32,
    rows: u32,
    cols: u32,
}

impl GridSpec {
    /// Validate and construct.  Fails when `cell_size_deg` is non-positive,
    /// non-finite, or larger than needed to produce at least one cell.
    pub fn new(region: BoundingRegion, cell_size_deg: f32) -> GridResult<Self> {
        if !cell_size_deg.is_finite() || cell_size_deg <= 0.0 {
            return Err(GridError::InvalidRegion {
                reason: format!("cell size must be positive, got {cell_size_deg}"),
            });
        }
        let rows = Self::axis_cells(region.height_deg(), cell_size_deg);
        let cols = Self::axis_cells(region.width_deg(), cell_size_deg);
        Ok(Self { region, cell_size_deg, rows, cols })
    }

    /// Number of cells needed to span `extent` degrees.
    ///
    /// Computed in f64 with a small relative tolerance so that e.g.
    /// 0.5° / 0.05° yields exactly 10 cells despite neither value being
    /// representable in binary.
    fn axis_cells(extent: f32, cell_size: f32) -> u32 {
        let ratio = extent as f64 / cell_size as f64;
        (ratio * (1.0 - 1e-6)).ceil().max(1.0) as u32
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total cell count (`rows × cols`), including cells no order falls in.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Map a coordinate to its containing cell in O(1).
    ///
    /// Returns `None` for points outside the region.  Within the region the
    /// mapping is total and deterministic — see the module docs for the
    /// boundary rule.
    #[inline]
    pub fn cell_index(&self, p: GeoPoint) -> Option<CellId> {
        if !self.region.contains(p) {
            return None;
        }
        let row = (((p.lat - self.region.lat_min) / self.cell_size_deg) as u32).min(self.rows - 1);
        let col = (((p.lon - self.region.lon_min) / self.cell_size_deg) as u32).min(self.cols - 1);
        Some(CellId(row * self.cols + col))
    }

    /// Geographic centre of a cell.
    #[inline]
    pub fn centroid(&self, id: CellId) -> GeoPoint {
        let (row, col) = self.row_col(id);
        GeoPoint::new(
            self.region.lat_min + (row as f32 + 0.5) * self.cell_size_deg,
            self.region.lon_min + (col as f32 + 0.5) * self.cell_size_deg,
        )
    }

    /// Decompose a cell id into `(row, col)`.
    #[inline]
    pub fn row_col(&self, id: CellId) -> (u32, u32) {
        (id.0 / self.cols, id.0 % self.cols)
    }
}
