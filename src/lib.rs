pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod report;
pub mod resolver;

pub use chart::{ChartKind, ChartMetadata};
pub use error::{DashboardError, Result};
pub use report::{AggregationStep, GroupingPolicy, ReportId};
pub use resolver::{ChartPanel, ReportResolver};
