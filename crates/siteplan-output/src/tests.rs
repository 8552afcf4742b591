//! Unit tests for siteplan-output.

#[cfg(test)]
mod csv_export {
    use siteplan_core::{EngineConfig, Order, OrderId};
    use siteplan_engine::{LocationEngine, OptimizeOptions};
    use siteplan_grid::BoundingRegion;

    use crate::CsvExporter;

    const PERIOD: (i64, i64) = (1_700_000_000, 1_700_000_000 + 30 * 86_400);

    fn line_count(path: &std::path::Path) -> usize {
        std::fs::read_to_string(path).unwrap().lines().count()
    }

    /// Engine + snapshot with orders in two cells of a 10×10 grid.
    fn fixture() -> (LocationEngine, siteplan_grid::DemandSnapshot) {
        let engine = LocationEngine::new(EngineConfig::default());
        let orders: Vec<Order> = (0..40)
            .map(|i| {
                let (lat, lon) = if i % 2 == 0 { (0.15, 0.15) } else { (0.85, 0.85) };
                Order::new(OrderId(i), PERIOD.0 + 3_600, lat, lon).with_value(250.0)
            })
            .collect();
        let snap = engine
            .build_demand_grid(
                &orders,
                &[],
                BoundingRegion::new(0.0, 1.0, 0.0, 1.0).unwrap(),
                0.1,
                PERIOD.0,
                PERIOD.1,
            )
            .unwrap();
        (engine, snap)
    }

    #[test]
    fn writes_one_row_per_non_empty_cell() {
        let (_, snap) = fixture();
        let dir = tempfile::tempdir().unwrap();

        let mut exporter = CsvExporter::new(dir.path()).unwrap();
        let rows = exporter.write_cells(&snap).unwrap();
        exporter.finish().unwrap();

        assert_eq!(rows, 2);
        // Header + 2 data rows.
        assert_eq!(line_count(&dir.path().join("demand_cells.csv")), 3);
    }

    #[test]
    fn writes_ranked_candidates() {
        let (engine, snap) = fixture();
        let result = engine
            .optimize_locations(&snap, &[], &OptimizeOptions::new(2, 60.0))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path()).unwrap();
        let rows = exporter.write_candidates(&result).unwrap();
        exporter.finish().unwrap();

        assert_eq!(rows, 2);
        let content = std::fs::read_to_string(dir.path().join("candidates.csv")).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.starts_with("rank,lat,lon"), "header row expected");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path()).unwrap();
        exporter.finish().unwrap();
        exporter.finish().unwrap();
    }

    #[test]
    fn empty_snapshot_writes_headers_only() {
        let (engine, _) = fixture();
        let snap = engine
            .build_demand_grid(
                &[],
                &[],
                BoundingRegion::new(0.0, 1.0, 0.0, 1.0).unwrap(),
                0.1,
                PERIOD.0,
                PERIOD.1,
            )
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path()).unwrap();
        let rows = exporter.write_cells(&snap).unwrap();
        exporter.finish().unwrap();

        assert_eq!(rows, 0);
        assert_eq!(line_count(&dir.path().join("demand_cells.csv")), 1);
    }
}
