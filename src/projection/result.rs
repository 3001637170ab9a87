//! Projection output structures

use super::params::{ProjectionParams, ProjectionWindow};
use crate::chart::StackedBarChart;
use crate::error::Result;
use crate::format::format_currency;
use crate::table::EarningsTable;
use serde::Serialize;
use std::io::Write;

/// Complete projection result
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// Base table with the projected category filled in
    pub table: EarningsTable,

    /// Parameters as requested (before clamping)
    pub params: ProjectionParams,

    /// Years that received projected income, `None` for an empty table
    pub window: Option<ProjectionWindow>,

    /// Sum of every category across every year
    pub lifetime_total: f64,
}

impl Projection {
    /// Lifetime total formatted for display
    pub fn lifetime_total_display(&self) -> String {
        format_currency(self.lifetime_total)
    }

    /// Stacked bar chart sized to this projection
    pub fn chart(&self, title: &str) -> StackedBarChart {
        StackedBarChart::from_table(title, &self.table, self.lifetime_total)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let projected_years = self.table.rows().iter().filter(|r| r.projected != 0.0).count();
        let projected_total: f64 = self.table.rows().iter().map(|r| r.projected).sum();

        let peak = self
            .table
            .rows()
            .iter()
            .map(|r| (r.year, r.total()))
            .fold(None, |best: Option<(u32, f64)>, (year, total)| match best {
                Some((_, t)) if t >= total => best,
                _ => Some((year, total)),
            });

        ProjectionSummary {
            total_years: self.table.len(),
            projected_years,
            projected_total,
            fixed_total: self.table.fixed_total(),
            lifetime_total: self.lifetime_total,
            peak_year: peak.map(|(y, _)| y),
            peak_total: peak.map(|(_, t)| t).unwrap_or(0.0),
            category_totals: self
                .table
                .category_totals()
                .into_iter()
                .map(|(name, total)| CategoryTotal { name, total })
                .collect(),
        }
    }

    /// Write the projected table as CSV: year, every category, projected column
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);

        let mut header = vec![crate::table::CALENDAR_YEAR.to_string()];
        header.extend(self.table.categories().iter().cloned());
        header.push(self.table.projected_label().to_string());
        out.write_record(&header)?;

        for row in self.table.rows() {
            let mut record = vec![row.year.to_string()];
            record.extend(
                row.values
                    .iter()
                    .map(|v| v.map(|x| format!("{:.2}", x)).unwrap_or_default()),
            );
            record.push(format!("{:.2}", row.projected));
            out.write_record(&record)?;
        }

        out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSummary {
    pub total_years: usize,
    pub projected_years: usize,
    pub projected_total: f64,
    pub fixed_total: f64,
    pub lifetime_total: f64,
    /// Year with the tallest stacked bar (first one on ties)
    pub peak_year: Option<u32>,
    pub peak_total: f64,
    pub category_totals: Vec<CategoryTotal>,
}
