//! Rendering of resolved panels for the command-line shell.

use crate::error::Result;
use crate::resolver::ChartPanel;
use polars::prelude::*;
use serde_json::{json, Map, Number, Value};

/// Title line plus the polars text table for each panel
pub fn render_text(panels: &[ChartPanel]) -> String {
    panels
        .iter()
        .map(|panel| {
            format!(
                "== {} [{}] ==\n{}\n",
                panel.chart.title,
                panel.chart.kind.as_str(),
                panel.table
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[{ "chart": ChartMetadata, "rows": [{column: value, ...}, ...] }, ...]`
pub fn render_json(panels: &[ChartPanel]) -> Result<Value> {
    let mut rendered = Vec::with_capacity(panels.len());
    for panel in panels {
        rendered.push(json!({
            "chart": serde_json::to_value(&panel.chart)?,
            "rows": table_rows(&panel.table)?,
        }));
    }
    Ok(Value::Array(rendered))
}

fn table_rows(df: &DataFrame) -> Result<Vec<Value>> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let mut row = Map::with_capacity(columns.len());
        for series in columns {
            row.insert(series.name().to_string(), any_value_to_json(series.get(idx)?));
        }
        rows.push(Value::Object(row));
    }

    Ok(rows)
}

fn any_value_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Int32(v) => json!(v),
        AnyValue::Int64(v) => json!(v),
        AnyValue::UInt32(v) => json!(v),
        AnyValue::UInt64(v) => json!(v),
        // NaN (e.g. a constant column's correlation) has no JSON form
        AnyValue::Float32(v) => Number::from_f64(v as f64).map_or(Value::Null, Value::Number),
        AnyValue::Float64(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
        other => Value::String(other.to_string()),
    }
}
