//! Stacked bar chart payload handed to the renderer
//!
//! One bar series per category, projected income stacked last. The y-axis
//! ceiling never drops below $250,000 so panels stay comparable as the
//! projection changes.

use crate::format::format_currency;
use crate::table::EarningsTable;
use serde::Serialize;

/// Lowest y-axis ceiling
pub const Y_AXIS_FLOOR: f64 = 250_000.0;

/// Granularity of the y-axis ceiling
pub const Y_AXIS_STEP: f64 = 50_000.0;

/// Y-axis ceiling for a chart whose tallest stacked bar is `max_value`
pub fn y_axis_ceiling(max_value: f64) -> f64 {
    let rounded = ((max_value + Y_AXIS_STEP - 1.0) / Y_AXIS_STEP).trunc() * Y_AXIS_STEP;
    rounded.max(Y_AXIS_FLOOR)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub x: Vec<u32>,
    /// `None` renders as a gap
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBarChart {
    pub title: String,
    pub series: Vec<BarSeries>,
    pub y_axis_max: f64,
    pub lifetime_earnings: String,
}

impl StackedBarChart {
    /// Build a chart with an explicit y-axis ceiling (shared across panels)
    pub fn with_ceiling(title: &str, table: &EarningsTable, lifetime_total: f64, y_axis_max: f64) -> Self {
        let years: Vec<u32> = table.years().collect();

        let mut series: Vec<BarSeries> = table
            .categories()
            .iter()
            .enumerate()
            .map(|(i, name)| BarSeries {
                name: name.clone(),
                x: years.clone(),
                y: table.rows().iter().map(|r| r.value(i)).collect(),
            })
            .collect();

        series.push(BarSeries {
            name: table.projected_label().to_string(),
            x: years,
            y: table.rows().iter().map(|r| Some(r.projected)).collect(),
        });

        Self {
            title: title.to_string(),
            series,
            y_axis_max,
            lifetime_earnings: format_currency(lifetime_total),
        }
    }

    /// Build a chart sized to its own tallest bar
    pub fn from_table(title: &str, table: &EarningsTable, lifetime_total: f64) -> Self {
        Self::with_ceiling(title, table, lifetime_total, y_axis_ceiling(table.max_stacked_total()))
    }
}
