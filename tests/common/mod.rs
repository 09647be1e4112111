#![allow(dead_code)]

use chrono::NaiveDate;
use pharmacy_dashboard::dataset::*;
use polars::prelude::*;

pub const CATEGORIES: [&str; 3] = ["Vitamins", "Skin Care", "Pain Relief"];
const CITIES: [&str; 4] = ["Riyadh", "Jeddah", "Dammam", "Mecca"];
const COUNTRIES: [&str; 6] = ["Saudi Arabia", "UAE", "Kuwait", "Qatar", "Bahrain", "Oman"];
const CUSTOMER_TYPES: [&str; 3] = ["Regular", "New", "VIP"];
const INVOICE_TYPES: [&str; 3] = ["Cash", "Card", "Insurance"];
const AVAILABILITY: [&str; 2] = ["In Stock", "Out of Stock"];

/// Days since the Unix epoch, the physical representation of a polars Date
pub fn days(year: i32, month: u32, day: u32) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .signed_duration_since(epoch)
        .num_days() as i32
}

/// Deterministic sales table with every required column.
///
/// 7 products per category, 7 distinct invoice dates, 6 countries. Sales are
/// multiples of 2.5 so float sums are exact.
pub fn sales_table(rows: usize) -> DataFrame {
    let first_day = days(2024, 3, 1);
    let idx: Vec<usize> = (0..rows).collect();

    let text = |f: &dyn Fn(usize) -> String| idx.iter().map(|&i| f(i)).collect::<Vec<String>>();

    let dates = Series::new(
        INVOICE_DATE,
        idx.iter().map(|&i| first_day + (i % 7) as i32).collect::<Vec<i32>>(),
    )
    .cast(&DataType::Date)
    .unwrap();

    DataFrame::new(vec![
        Series::new(PRODUCT_CATEGORY, text(&|i| CATEGORIES[i % 3].to_string())),
        Series::new(PRODUCT_NAME, text(&|i| format!("{} #{}", CATEGORIES[i % 3], (i / 3) % 7))),
        Series::new(CUSTOMER_CITY, text(&|i| CITIES[i % 4].to_string())),
        Series::new(CUSTOMER_COUNTRY, text(&|i| COUNTRIES[i % 6].to_string())),
        Series::new(CUSTOMER_GENDER, text(&|i| if i % 2 == 0 { "M" } else { "F" }.to_string())),
        Series::new(CUSTOMER_TYPE, text(&|i| CUSTOMER_TYPES[(i / 2) % 3].to_string())),
        Series::new(INVOICE_TYPE, text(&|i| INVOICE_TYPES[(i / 4) % 3].to_string())),
        dates,
        Series::new(STORE_ID, text(&|i| format!("ST{}", i % 5))),
        Series::new(PRODUCT_AVAILABILITY, text(&|i| AVAILABILITY[(i / 3) % 2].to_string())),
        Series::new(
            TOTAL_SALES,
            idx.iter().map(|&i| ((i * 37) % 50) as f64 * 2.5 + 10.0).collect::<Vec<f64>>(),
        ),
        Series::new(
            ITEM_QTY,
            idx.iter().map(|&i| ((i * 13) % 9 + 1) as i64).collect::<Vec<i64>>(),
        ),
        Series::new(
            INVOICE_ITEMS_COUNT,
            idx.iter().map(|&i| ((i * 7) % 4 + 1) as i64).collect::<Vec<i64>>(),
        ),
    ])
    .unwrap()
}

pub fn strings(df: &DataFrame, column: &str) -> Vec<String> {
    let cast = df.column(column).unwrap().cast(&DataType::String).unwrap();
    cast.str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

pub fn numbers(df: &DataFrame, column: &str) -> Vec<f64> {
    let cast = df.column(column).unwrap().cast(&DataType::Float64).unwrap();
    cast.f64().unwrap().into_iter().map(|v| v.unwrap()).collect()
}
