use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Unknown report: {0}")]
    UnknownReport(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' must be numeric for {operation}, found {dtype}")]
    AggregationType {
        column: String,
        operation: &'static str,
        dtype: String,
    },

    #[error("No numeric columns available for correlation")]
    NoNumericColumns,

    #[error("Input table is empty")]
    EmptyTable,

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(String),

    #[error("Workbook error: {0}")]
    Workbook(String),
}

impl From<polars::error::PolarsError> for DashboardError {
    fn from(err: polars::error::PolarsError) -> Self {
        DashboardError::Polars(err.to_string())
    }
}

impl From<calamine::Error> for DashboardError {
    fn from(err: calamine::Error) -> Self {
        DashboardError::Workbook(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
