//! Report Resolver
//!
//! Turns a report name and a source table into the chart-ready tables that
//! report displays. Stateless apart from the grouping policy; the input table
//! is never modified, and nothing here logs.

use crate::chart::ChartMetadata;
use crate::error::{DashboardError, Result};
use crate::report::step::require_columns;
use crate::report::{definition, GroupingPolicy, PanelDefinition, ReportId};
use polars::prelude::*;

/// A chart-ready table paired with the hints needed to draw it
#[derive(Debug, Clone)]
pub struct ChartPanel {
    pub table: DataFrame,
    pub chart: ChartMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct ReportResolver {
    policy: GroupingPolicy,
}

impl ReportResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: GroupingPolicy) -> Self {
        Self { policy }
    }

    /// Resolve a report by its navigation name
    pub fn resolve(&self, report_id: &str, table: &DataFrame) -> Result<Vec<ChartPanel>> {
        let id: ReportId = report_id.parse()?;
        self.resolve_id(id, table)
    }

    /// Run every panel of `id` against `table`.
    ///
    /// Fails as a whole if any panel fails; no partial output is returned.
    pub fn resolve_id(&self, id: ReportId, table: &DataFrame) -> Result<Vec<ChartPanel>> {
        let report = definition(id).ok_or_else(|| DashboardError::UnknownReport(id.to_string()))?;

        require_columns(table, &report.required_columns())?;
        if table.height() == 0 {
            return Err(DashboardError::EmptyTable);
        }

        report
            .panels
            .iter()
            .map(|panel| self.run_panel(panel, table))
            .collect()
    }

    fn run_panel(&self, panel: &PanelDefinition, table: &DataFrame) -> Result<ChartPanel> {
        // Cloning a DataFrame only bumps the column refcounts
        let mut current = table.clone();
        for step in &panel.steps {
            current = step.apply(&current, &self.policy)?;
        }

        Ok(ChartPanel {
            table: current,
            chart: panel.chart.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;

    #[test]
    fn test_unknown_report() {
        let df = df! [ "Total Sales" => [1.0] ].unwrap();
        let err = ReportResolver::new().resolve("NotAReport", &df).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownReport(ref name) if name == "NotAReport"));
    }

    #[test]
    fn test_missing_column_checked_before_running() {
        let df = df! [ "Store ID" => ["S1"] ].unwrap();
        let err = ReportResolver::new()
            .resolve("Sales Across Stores", &df)
            .unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(ref name) if name == "Total Sales"));
    }

    #[test]
    fn test_empty_table() {
        let df = df! [
            "Store ID" => Vec::<&str>::new(),
            "Total Sales" => Vec::<f64>::new()
        ]
        .unwrap();
        let err = ReportResolver::new()
            .resolve("Sales Across Stores", &df)
            .unwrap_err();
        assert!(matches!(err, DashboardError::EmptyTable));
    }

    #[test]
    fn test_overview_is_first_ten_rows() {
        let df = df! [
            "Store ID" => (0..25).map(|i| format!("S{}", i)).collect::<Vec<_>>(),
            "Total Sales" => (0..25).map(|i| i as f64).collect::<Vec<_>>()
        ]
        .unwrap();

        let panels = ReportResolver::new().resolve("Overview", &df).unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].chart.kind, ChartKind::Table);
        assert_eq!(panels[0].table.height(), 10);
        assert_eq!(panels[0].table.width(), 2);
        assert!(panels[0].table.equals(&df.head(Some(10))));
    }
}
