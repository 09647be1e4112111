//! Chart Metadata
//!
//! Display hints handed to the chart renderer alongside each chart-ready table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of chart a panel renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Plain tabular preview, no chart
    Table,
    Bar,
    Line,
    Pie,
    Heatmap,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Table => "table",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Heatmap => "heatmap",
        }
    }
}

/// How bars sharing an x value are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Group,
}

/// Everything the renderer needs besides the data itself.
///
/// For pie charts `x` names the slice label field and `y` the slice value field.
/// Heatmaps take their axes from the table's own layout, so both stay empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Field that splits the data into colored series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Field printed on top of each mark
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    /// Inner radius fraction for donut-style pies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    /// Axis/legend label overrides keyed by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ChartMetadata {
    pub fn new(kind: ChartKind, title: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x: None,
            y: None,
            color: None,
            text: None,
            bar_mode: None,
            hole: None,
            labels: BTreeMap::new(),
        }
    }

    pub fn table(title: &str) -> Self {
        Self::new(ChartKind::Table, title)
    }

    pub fn bar(title: &str, x: &str, y: &str) -> Self {
        Self::new(ChartKind::Bar, title).with_axes(x, y)
    }

    pub fn line(title: &str, x: &str, y: &str) -> Self {
        Self::new(ChartKind::Line, title).with_axes(x, y)
    }

    pub fn pie(title: &str, names: &str, values: &str) -> Self {
        Self::new(ChartKind::Pie, title).with_axes(names, values)
    }

    pub fn heatmap(title: &str) -> Self {
        Self::new(ChartKind::Heatmap, title)
    }

    fn with_axes(mut self, x: &str, y: &str) -> Self {
        self.x = Some(x.to_string());
        self.y = Some(y.to_string());
        self
    }

    pub fn with_color(mut self, field: &str) -> Self {
        self.color = Some(field.to_string());
        self
    }

    pub fn with_text(mut self, field: &str) -> Self {
        self.text = Some(field.to_string());
        self
    }

    pub fn grouped(mut self) -> Self {
        self.bar_mode = Some(BarMode::Group);
        self
    }

    pub fn with_hole(mut self, hole: f64) -> Self {
        self.hole = Some(hole);
        self
    }

    pub fn with_label(mut self, field: &str, label: &str) -> Self {
        self.labels.insert(field.to_string(), label.to_string());
        self
    }

    /// Data fields this chart reads, in axis order
    pub fn fields(&self) -> Vec<&str> {
        [&self.x, &self.y, &self.color, &self.text]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .fold(Vec::new(), |mut acc, f| {
                if !acc.contains(&f) {
                    acc.push(f);
                }
                acc
            })
    }
}
