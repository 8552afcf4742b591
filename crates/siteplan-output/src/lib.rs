//! `siteplan-output` — CSV export for engine results.
//!
//! The engine itself persists nothing; durable storage is the caller's
//! concern.  This crate covers the common non-database need: dumping a
//! demand snapshot (heatmap rows) and a ranked candidate list to files a
//! spreadsheet or a map frontend can ingest directly.
//!
//! Two files are created in the configured output directory:
//! - `demand_cells.csv` — one row per *non-empty* cell
//! - `candidates.csv`   — one row per ranked candidate
//!
//! # Usage
//!
//! ```rust,ignore
//! use siteplan_output::CsvExporter;
//!
//! let mut exporter = CsvExporter::new(Path::new("./output"))?;
//! exporter.write_cells(&snapshot)?;
//! exporter.write_candidates(&result)?;
//! exporter.finish()?;
//! ```

pub mod csv;
pub mod error;

#[cfg(test)]
mod tests;

pub use csv::CsvExporter;
pub use error::{OutputError, OutputResult};
