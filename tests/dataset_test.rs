mod common;

use common::{numbers, sales_table};
use pharmacy_dashboard::dataset::{self, INVOICE_DATE, TOTAL_SALES};
use pharmacy_dashboard::output;
use pharmacy_dashboard::ReportResolver;
use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("pharmacy_dashboard_test").join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Excel serial day number of 1970-01-01
const EXCEL_UNIX_EPOCH: i32 = 25_569;

/// Header row, then one row per record; dates become date-formatted serials
fn write_workbook(df: &DataFrame, path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (c, series) in df.get_columns().iter().enumerate() {
        let c = c as u16;
        sheet.write_string(0, c, series.name()).unwrap();
        for r in 0..df.height() {
            let row = r as u32 + 1;
            match series.get(r).unwrap() {
                AnyValue::String(s) => {
                    sheet.write_string(row, c, s).unwrap();
                }
                AnyValue::Float64(f) => {
                    sheet.write_number(row, c, f).unwrap();
                }
                AnyValue::Int64(i) => {
                    sheet.write_number(row, c, i as f64).unwrap();
                }
                AnyValue::Date(d) => {
                    let serial = (d + EXCEL_UNIX_EPOCH) as f64;
                    sheet
                        .write_number_with_format(row, c, serial, &date_format)
                        .unwrap();
                }
                other => panic!("unexpected cell {:?}", other),
            }
        }
    }

    workbook.save(path).unwrap();
}

const CSV: &str = "\
Product Category,Product Name,Customer City,Customer Country,Customer Gender,\
Customer Type,Invoice Type,Invoice Date,Store ID,Product Availability,\
Total Sales,Item QTY per Invoice,Invoice Items Count
Vitamins,Vitamin C,Riyadh,Saudi Arabia,M,Regular,Cash,2024-01-05,ST1,In Stock,120.5,2,1
Skin Care,Sunscreen,Jeddah,Saudi Arabia,F,VIP,Card,2024-01-05,ST2,In Stock,80,1,1
Vitamins,Vitamin D,Riyadh,UAE,F,New,Cash,2024-01-06,ST1,Out of Stock,45.5,3,2
";

#[test]
fn test_load_csv_and_resolve() {
    let path = scratch_dir("csv").join("sales.csv");
    fs::write(&path, CSV).unwrap();

    let df = dataset::load(&path).unwrap();
    assert_eq!(df.height(), 3);
    assert!(dataset::missing_columns(&df).is_empty());
    assert_eq!(df.column(INVOICE_DATE).unwrap().dtype(), &DataType::Date);

    let panels = ReportResolver::new()
        .resolve("Sales Trend Over Time", &df)
        .unwrap();
    assert_eq!(numbers(&panels[0].table, TOTAL_SALES), vec![200.5, 45.5]);

    let json = output::render_json(&panels).unwrap();
    assert_eq!(json[0]["chart"]["kind"], "line");
    assert_eq!(json[0]["rows"][0][INVOICE_DATE], "2024-01-05");
    assert_eq!(json[0]["rows"][1][TOTAL_SALES], 45.5);
}

#[test]
fn test_load_parquet() {
    let path = scratch_dir("parquet").join("sales.parquet");
    let mut df = sales_table(20);

    let mut file = fs::File::create(&path).unwrap();
    ParquetWriter::new(&mut file).finish(&mut df).unwrap();

    let loaded = dataset::load(&path).unwrap();
    assert!(loaded.equals_missing(&df));
    dataset::validate(&loaded).unwrap();
}

#[test]
fn test_load_xlsx_workbook() {
    let path = scratch_dir("xlsx").join("cleaned_data.xlsx");
    let df = sales_table(20);
    write_workbook(&df, &path);

    let loaded = dataset::load(&path).unwrap();
    dataset::validate(&loaded).unwrap();
    assert_eq!(loaded.get_column_names(), df.get_column_names());
    assert_eq!(loaded.dtypes(), df.dtypes());
    assert!(loaded.equals_missing(&df));

    let from_workbook = ReportResolver::new()
        .resolve("Top Sales Days", &loaded)
        .unwrap();
    let from_memory = ReportResolver::new().resolve("Top Sales Days", &df).unwrap();
    assert_eq!(
        numbers(&from_workbook[0].table, TOTAL_SALES),
        numbers(&from_memory[0].table, TOTAL_SALES)
    );
    assert_eq!(
        from_workbook[0].table.column(INVOICE_DATE).unwrap().dtype(),
        &DataType::Date
    );
}

#[test]
fn test_unknown_extension_rejected() {
    let path = scratch_dir("other").join("sales.txt");
    fs::write(&path, CSV).unwrap();

    assert!(matches!(
        dataset::load(&path),
        Err(pharmacy_dashboard::DashboardError::UnsupportedFormat(_))
    ));
}
