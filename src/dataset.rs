//! Dataset Loading
//!
//! Reads the pre-cleaned sales export into a DataFrame once and checks it
//! carries every column the reports read.

use crate::error::{DashboardError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

pub const PRODUCT_CATEGORY: &str = "Product Category";
pub const PRODUCT_NAME: &str = "Product Name";
pub const CUSTOMER_CITY: &str = "Customer City";
pub const CUSTOMER_COUNTRY: &str = "Customer Country";
pub const CUSTOMER_GENDER: &str = "Customer Gender";
pub const CUSTOMER_TYPE: &str = "Customer Type";
pub const INVOICE_TYPE: &str = "Invoice Type";
pub const INVOICE_DATE: &str = "Invoice Date";
pub const STORE_ID: &str = "Store ID";
pub const PRODUCT_AVAILABILITY: &str = "Product Availability";
pub const TOTAL_SALES: &str = "Total Sales";
pub const ITEM_QTY: &str = "Item QTY per Invoice";
pub const INVOICE_ITEMS_COUNT: &str = "Invoice Items Count";

/// Columns any report may read
pub const REQUIRED_COLUMNS: [&str; 13] = [
    PRODUCT_CATEGORY,
    PRODUCT_NAME,
    CUSTOMER_CITY,
    CUSTOMER_COUNTRY,
    CUSTOMER_GENDER,
    CUSTOMER_TYPE,
    INVOICE_TYPE,
    INVOICE_DATE,
    STORE_ID,
    PRODUCT_AVAILABILITY,
    TOTAL_SALES,
    ITEM_QTY,
    INVOICE_ITEMS_COUNT,
];

/// Excel serial day number of 1970-01-01
const EXCEL_UNIX_EPOCH: i32 = 25_569;
/// `NaiveDate::num_days_from_ce` of 1970-01-01
const CE_UNIX_EPOCH: i32 = 719_163;

/// Load an Excel workbook, CSV or Parquet export, dispatching on the file
/// extension
pub fn load(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Dataset file not found: {}", path.display()),
        )));
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let df = match extension.as_deref() {
        Some("csv") => {
            debug!("Reading CSV dataset {}", path.display());
            LazyCsvReader::new(path)
                .with_has_header(true)
                .with_try_parse_dates(true)
                .with_infer_schema_length(Some(1000))
                .finish()?
                .collect()?
        }
        Some("parquet") | Some("pq") => {
            debug!("Reading Parquet dataset {}", path.display());
            LazyFrame::scan_parquet(path, ScanArgsParquet::default())?.collect()?
        }
        Some("xlsx") | Some("xlsm") | Some("xls") => {
            debug!("Reading workbook dataset {}", path.display());
            read_workbook(path)?
        }
        _ => {
            return Err(DashboardError::UnsupportedFormat(path.display().to_string()));
        }
    };

    info!(
        "Loaded dataset {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );

    Ok(df)
}

/// First worksheet as a DataFrame; the first row holds the column names.
///
/// Each column gets the narrowest type all its non-empty cells fit, tried in
/// order: Int64 (whole numbers), Float64, Date (date cells or `YYYY-MM-DD`
/// text), String. Empty and error cells are null.
fn read_workbook(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook.sheet_names().first().cloned().ok_or_else(|| {
        DashboardError::Workbook(format!("{} has no worksheets", path.display()))
    })?;
    debug!("Using worksheet '{}'", sheet);
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string()).collect(),
        None => return Ok(DataFrame::default()),
    };
    let body: Vec<&[Data]> = rows.collect();

    let columns = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let cells: Vec<Option<&Data>> = body
                .iter()
                .map(|row| row.get(i).filter(|c| !is_blank(c)))
                .collect();
            workbook_column(name, &cells)
        })
        .collect::<Result<Vec<Series>>>()?;

    Ok(DataFrame::new(columns)?)
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn workbook_column(name: &str, cells: &[Option<&Data>]) -> Result<Series> {
    let present = || cells.iter().flatten();

    if present().all(|c| matches!(cell_number(c), Some(f) if f.fract() == 0.0)) {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|c| c.and_then(cell_number).map(|f| f as i64))
            .collect();
        return Ok(Series::new(name, values));
    }

    if present().all(|c| cell_number(c).is_some()) {
        let values: Vec<Option<f64>> = cells.iter().map(|c| c.and_then(cell_number)).collect();
        return Ok(Series::new(name, values));
    }

    if present().all(|c| cell_date(c).is_some()) {
        let values: Vec<Option<i32>> = cells.iter().map(|c| c.and_then(cell_date)).collect();
        return Ok(Series::new(name, values).cast(&DataType::Date)?);
    }

    let values: Vec<Option<String>> = cells.iter().map(|c| c.map(|c| c.to_string())).collect();
    Ok(Series::new(name, values))
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        _ => None,
    }
}

/// Days since the Unix epoch
fn cell_date(cell: &Data) -> Option<i32> {
    match cell {
        Data::DateTime(value) if value.is_datetime() => {
            Some(value.as_f64().floor() as i32 - EXCEL_UNIX_EPOCH)
        }
        Data::DateTimeIso(text) | Data::String(text) => {
            let day = text.trim().split(['T', ' ']).next()?;
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
            Some(date.num_days_from_ce() - CE_UNIX_EPOCH)
        }
        _ => None,
    }
}

/// Required columns absent from `df`, in declaration order
pub fn missing_columns(df: &DataFrame) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| df.get_column_index(name).is_none())
        .collect()
}

pub fn validate(df: &DataFrame) -> Result<()> {
    match missing_columns(df).first() {
        Some(name) => Err(DashboardError::MissingColumn(name.to_string())),
        None => Ok(()),
    }
}
