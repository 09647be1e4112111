//! Aggregation Steps
//!
//! The building blocks of a report panel. Each step is a pure function from
//! one DataFrame to a fresh one; a panel chains them left to right.

use crate::error::{DashboardError, Result};
use crate::report::correlation;
use polars::prelude::*;

/// How grouping treats rows whose key has a null component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingPolicy {
    /// Drop null-keyed rows before grouping. When false, nulls form their
    /// own group, sorted after every non-null key.
    pub drop_null_keys: bool,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self {
            drop_null_keys: true,
        }
    }
}

impl GroupingPolicy {
    pub fn keep_null_keys() -> Self {
        Self {
            drop_null_keys: false,
        }
    }

    fn apply(&self, lf: LazyFrame, keys: &[&str]) -> LazyFrame {
        if !self.drop_null_keys {
            return lf;
        }

        match keys
            .iter()
            .map(|k| col(k).is_not_null())
            .reduce(|acc, e| acc.and(e))
        {
            Some(predicate) => lf.filter(predicate),
            None => lf,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aggregation {
    Sum,
    Mean,
}

impl Aggregation {
    fn name(&self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Mean => "MEAN",
        }
    }

    /// NaN values are skipped like nulls
    fn expr(&self, df: &DataFrame, value: &str) -> Result<Expr> {
        let values = missing_as_null(df, value)?;
        let aggregated = match self {
            Aggregation::Sum => values.sum(),
            Aggregation::Mean => values.mean(),
        };
        Ok(aggregated.alias(value))
    }
}

/// One transformation in a panel's pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationStep {
    /// First `n` rows, unchanged
    Head { n: usize },

    /// Sum `value` per distinct `by` key; output is `by..., value`
    GroupSum { by: Vec<String>, value: String },

    /// Mean of `value` per distinct `by` key; output is `by..., value`
    GroupMean { by: Vec<String>, value: String },

    /// Row count per distinct value of `by`, most frequent first.
    /// Output is `key_alias, count_alias`.
    GroupCount {
        by: String,
        key_alias: String,
        count_alias: String,
    },

    /// Pearson correlation matrix over every numeric column
    Correlation,

    /// Keep the `n` rows with the largest (or smallest) `order`, either over
    /// the whole table or independently inside each `within` group
    TopN {
        n: usize,
        order: String,
        descending: bool,
        within: Option<String>,
    },

    Sort { column: String, descending: bool },
}

impl AggregationStep {
    pub fn head(n: usize) -> Self {
        AggregationStep::Head { n }
    }

    pub fn group_sum(by: &[&str], value: &str) -> Self {
        AggregationStep::GroupSum {
            by: by.iter().map(|s| s.to_string()).collect(),
            value: value.to_string(),
        }
    }

    pub fn group_mean(by: &[&str], value: &str) -> Self {
        AggregationStep::GroupMean {
            by: by.iter().map(|s| s.to_string()).collect(),
            value: value.to_string(),
        }
    }

    pub fn group_count(by: &str, key_alias: &str, count_alias: &str) -> Self {
        AggregationStep::GroupCount {
            by: by.to_string(),
            key_alias: key_alias.to_string(),
            count_alias: count_alias.to_string(),
        }
    }

    pub fn top_n(n: usize, order: &str) -> Self {
        AggregationStep::TopN {
            n,
            order: order.to_string(),
            descending: true,
            within: None,
        }
    }

    pub fn top_n_within(n: usize, order: &str, group: &str) -> Self {
        AggregationStep::TopN {
            n,
            order: order.to_string(),
            descending: true,
            within: Some(group.to_string()),
        }
    }

    pub fn sort_desc(column: &str) -> Self {
        AggregationStep::Sort {
            column: column.to_string(),
            descending: true,
        }
    }

    /// Columns this step reads from its input
    pub fn input_columns(&self) -> Vec<&str> {
        match self {
            AggregationStep::Head { .. } | AggregationStep::Correlation => Vec::new(),
            AggregationStep::GroupSum { by, value } | AggregationStep::GroupMean { by, value } => {
                by.iter().map(String::as_str).chain([value.as_str()]).collect()
            }
            AggregationStep::GroupCount { by, .. } => vec![by.as_str()],
            AggregationStep::TopN { order, within, .. } => {
                within.iter().map(String::as_str).chain([order.as_str()]).collect()
            }
            AggregationStep::Sort { column, .. } => vec![column.as_str()],
        }
    }

    pub fn apply(&self, df: &DataFrame, policy: &GroupingPolicy) -> Result<DataFrame> {
        require_columns(df, &self.input_columns())?;

        match self {
            AggregationStep::Head { n } => Ok(df.head(Some(*n))),
            AggregationStep::GroupSum { by, value } => {
                group_aggregate(df, by, value, Aggregation::Sum, policy)
            }
            AggregationStep::GroupMean { by, value } => {
                group_aggregate(df, by, value, Aggregation::Mean, policy)
            }
            AggregationStep::GroupCount {
                by,
                key_alias,
                count_alias,
            } => group_count(df, by, key_alias, count_alias, policy),
            AggregationStep::Correlation => correlation::pearson_matrix(df),
            AggregationStep::TopN {
                n,
                order,
                descending,
                within,
            } => top_n(df, *n, order, *descending, within.as_deref()),
            AggregationStep::Sort { column, descending } => Ok(df
                .clone()
                .lazy()
                .sort_by_exprs(
                    [missing_as_null(df, column)?],
                    sort_options(vec![*descending]),
                )
                .collect()?),
        }
    }
}

pub(crate) fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<()> {
    match columns.iter().find(|c| df.get_column_index(c).is_none()) {
        Some(missing) => Err(DashboardError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

fn require_numeric(df: &DataFrame, column: &str, operation: &'static str) -> Result<()> {
    let dtype = df.column(column)?.dtype();
    if dtype.is_numeric() {
        Ok(())
    } else {
        Err(DashboardError::AggregationType {
            column: column.to_string(),
            operation,
            dtype: dtype.to_string(),
        })
    }
}

/// `column` with float NaN read as null, so it is skipped by aggregates and
/// sorted after every real value
fn missing_as_null(df: &DataFrame, column: &str) -> Result<Expr> {
    let expr = col(column);
    if df.column(column)?.dtype().is_float() {
        Ok(expr.fill_nan(lit(NULL)))
    } else {
        Ok(expr)
    }
}

/// Stable sort, nulls last
fn sort_options(descending: Vec<bool>) -> SortMultipleOptions {
    SortMultipleOptions {
        descending,
        nulls_last: true,
        maintain_order: true,
        ..Default::default()
    }
}

fn group_aggregate(
    df: &DataFrame,
    by: &[String],
    value: &str,
    aggregation: Aggregation,
    policy: &GroupingPolicy,
) -> Result<DataFrame> {
    require_numeric(df, value, aggregation.name())?;

    let keys: Vec<&str> = by.iter().map(String::as_str).collect();
    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(k)).collect();

    let grouped = policy
        .apply(df.clone().lazy(), &keys)
        .group_by(key_exprs.clone())
        .agg([aggregation.expr(df, value)?])
        .sort_by_exprs(key_exprs, sort_options(vec![false; keys.len()]))
        .collect()?;

    Ok(grouped)
}

fn group_count(
    df: &DataFrame,
    by: &str,
    key_alias: &str,
    count_alias: &str,
    policy: &GroupingPolicy,
) -> Result<DataFrame> {
    let counted = policy
        .apply(df.clone().lazy(), &[by])
        .group_by([col(by)])
        .agg([len().alias(count_alias)])
        .sort_by_exprs([col(count_alias), col(by)], sort_options(vec![true, false]))
        .select([col(by).alias(key_alias), col(count_alias)])
        .collect()?;

    Ok(counted)
}

fn top_n(
    df: &DataFrame,
    n: usize,
    order: &str,
    descending: bool,
    within: Option<&str>,
) -> Result<DataFrame> {
    let lf = df.clone().lazy();
    let ranked = missing_as_null(df, order)?;

    let selected = match within {
        None => lf
            .sort_by_exprs([ranked], sort_options(vec![descending]))
            .limit(n as IdxSize),
        Some(group) => {
            // head() moves the group key to the front; restore the input layout
            let layout: Vec<Expr> = df.get_column_names().iter().map(|c| col(c)).collect();
            lf.sort_by_exprs([col(group), ranked], sort_options(vec![false, descending]))
            .group_by_stable([col(group)])
            .head(Some(n))
            .select(layout)
        }
    };

    Ok(selected.collect()?)
}
