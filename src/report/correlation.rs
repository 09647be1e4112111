//! Pearson correlation matrix over the numeric columns of a table.

use crate::error::{DashboardError, Result};
use itertools::Itertools;
use polars::prelude::*;

/// Name of the row-label column in the correlation output
pub const INDEX_COLUMN: &str = "Column";

/// Square correlation matrix: one row and one Float64 column per numeric
/// input column, in input order, labelled by `INDEX_COLUMN`.
///
/// Each pair uses only rows where both values are present. The diagonal is
/// 1.0 unless the column has no variance, in which case it is NaN.
pub fn pearson_matrix(df: &DataFrame) -> Result<DataFrame> {
    let numeric: Vec<&Series> = df
        .get_columns()
        .iter()
        .filter(|s| s.dtype().is_numeric())
        .collect();

    if numeric.is_empty() {
        return Err(DashboardError::NoNumericColumns);
    }

    let names: Vec<String> = numeric.iter().map(|s| s.name().to_string()).collect();
    let values = numeric
        .iter()
        .map(|s| to_f64(s))
        .collect::<Result<Vec<_>>>()?;

    let k = names.len();
    let mut matrix = vec![vec![f64::NAN; k]; k];

    for (i, column) in values.iter().enumerate() {
        matrix[i][i] = if has_variance(column) { 1.0 } else { f64::NAN };
    }
    for (i, j) in (0..k).tuple_combinations() {
        let r = pearson(&values[i], &values[j]);
        matrix[i][j] = r;
        matrix[j][i] = r;
    }

    let mut columns = Vec::with_capacity(k + 1);
    columns.push(Series::new(INDEX_COLUMN, names.clone()));
    for (j, name) in names.iter().enumerate() {
        let column: Vec<f64> = matrix.iter().map(|row| row[j]).collect();
        columns.push(Series::new(name, column));
    }

    Ok(DataFrame::new(columns)?)
}

fn to_f64(series: &Series) -> Result<Vec<Option<f64>>> {
    let cast = series.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

fn has_variance(values: &[Option<f64>]) -> bool {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    match present.first() {
        Some(first) => present.iter().any(|v| v != first),
        None => false,
    }
}

fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    (cov / denominator).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_correlations() {
        let df = df! [
            "Store ID" => ["S1", "S2", "S3", "S4"],
            "Total Sales" => [10.0, 20.0, 30.0, 40.0],
            "Item QTY per Invoice" => [1i64, 2, 3, 4],
            "Returns" => [8.0, 6.0, 4.0, 2.0]
        ]
        .unwrap();

        let m = pearson_matrix(&df).unwrap();

        assert_eq!(
            m.get_column_names(),
            vec!["Column", "Total Sales", "Item QTY per Invoice", "Returns"]
        );
        assert_eq!(m.height(), 3);

        let sales = m.column("Total Sales").unwrap().f64().unwrap();
        assert_eq!(sales.get(0), Some(1.0));
        assert!((sales.get(1).unwrap() - 1.0).abs() < 1e-12);
        assert!((sales.get(2).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_has_nan_diagonal() {
        let df = df! [
            "Total Sales" => [10.0, 20.0, 30.0],
            "Invoice Items Count" => [2i64, 2, 2]
        ]
        .unwrap();

        let m = pearson_matrix(&df).unwrap();
        let items = m.column("Invoice Items Count").unwrap().f64().unwrap();
        assert!(items.get(1).unwrap().is_nan());
        assert!(items.get(0).unwrap().is_nan());
    }

    #[test]
    fn test_pairwise_complete_observations() {
        let a = [Some(1.0), Some(2.0), None, Some(3.0)];
        let b = [Some(2.0), Some(4.0), Some(100.0), Some(6.0)];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_numeric_columns() {
        let df = df! [ "Customer City" => ["Riyadh"] ].unwrap();
        assert!(matches!(
            pearson_matrix(&df),
            Err(DashboardError::NoNumericColumns)
        ));
    }
}
