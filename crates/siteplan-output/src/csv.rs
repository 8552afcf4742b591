//! CSV export backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use siteplan_engine::OptimizationResult;
use siteplan_grid::DemandSnapshot;

use crate::OutputResult;

/// Writes snapshot heatmap rows and ranked candidates to two CSV files.
pub struct CsvExporter {
    cells: Writer<File>,
    candidates: Writer<File>,
    finished: bool,
}

impl CsvExporter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut cells = Writer::from_path(dir.join("demand_cells.csv"))?;
        cells.write_record([
            "cell_id",
            "centroid_lat",
            "centroid_lon",
            "orders_count",
            "total_value",
            "avg_value",
            "peak_hour",
            "demand_score",
            "nearest_store_m",
        ])?;

        let mut candidates = Writer::from_path(dir.join("candidates.csv"))?;
        candidates.write_record([
            "rank",
            "lat",
            "lon",
            "score",
            "coverage_area_km2",
            "estimated_orders_covered",
            "avg_delivery_time_minutes",
            "roi_estimate_months",
        ])?;

        Ok(Self { cells, candidates, finished: false })
    }

    /// Write one heatmap row per non-empty cell of the snapshot.
    ///
    /// Returns the number of rows written.
    pub fn write_cells(&mut self, snapshot: &DemandSnapshot) -> OutputResult<usize> {
        let mut rows = 0;
        for cell in snapshot.non_empty() {
            self.cells.write_record(&[
                cell.id.0.to_string(),
                cell.centroid.lat.to_string(),
                cell.centroid.lon.to_string(),
                cell.orders_count.to_string(),
                cell.total_value.to_string(),
                cell.avg_value.to_string(),
                cell.peak_hour.map(|h| h.to_string()).unwrap_or_default(),
                cell.demand_score.to_string(),
                cell.nearest_store_m.map(|m| m.to_string()).unwrap_or_default(),
            ])?;
            rows += 1;
        }
        Ok(rows)
    }

    /// Write the ranked candidate list of one optimization result.
    pub fn write_candidates(&mut self, result: &OptimizationResult) -> OutputResult<usize> {
        for (rank, c) in result.candidates.iter().enumerate() {
            self.candidates.write_record(&[
                (rank + 1).to_string(),
                c.pos.lat.to_string(),
                c.pos.lon.to_string(),
                c.score.to_string(),
                c.coverage_area_km2.to_string(),
                c.estimated_orders_covered.to_string(),
                c.avg_delivery_time_minutes.to_string(),
                c.roi_estimate_months.map(|m| m.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(result.candidates.len())
    }

    /// Flush and close both file handles.
    ///
    /// Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.cells.flush()?;
        self.candidates.flush()?;
        Ok(())
    }
}
