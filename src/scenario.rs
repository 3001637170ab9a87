//! Side-by-side comparison of the active-duty and reserve retirement scenarios
//!
//! Each scenario owns its own base table, so the projection requested for
//! one panel can never leak into the other.

use crate::chart::{y_axis_ceiling, StackedBarChart};
use crate::defaults::default_params;
use crate::error::Result;
use crate::projection::{EarningsProjector, Projection, ProjectionParams, RawProjectionParams};
use crate::table::{load_default_active, load_default_reserve, load_table, DatasetSpec, EarningsTable};
use std::path::Path;

/// Title of the active-duty panel
pub const ACTIVE_TITLE: &str = "Active Retirement";

/// Title of the reserve panel
pub const RESERVE_TITLE: &str = "Reserve Retirement";

/// Pre-loaded active and reserve scenarios
///
/// # Example
/// ```ignore
/// let comparison = Comparison::from_csv()?;
/// let (active, reserve) = comparison.default_params();
/// let result = comparison.run(&active, &reserve);
/// println!("{}", result.active.lifetime_total_display());
/// ```
#[derive(Debug, Clone)]
pub struct Comparison {
    active: EarningsProjector,
    reserve: EarningsProjector,
}

impl Comparison {
    pub fn new(active: EarningsTable, reserve: EarningsTable) -> Self {
        Self {
            active: EarningsProjector::new(active),
            reserve: EarningsProjector::new(reserve),
        }
    }

    /// Create comparison from the bundled sheets in data/
    pub fn from_csv() -> Result<Self> {
        Ok(Self::new(load_default_active()?, load_default_reserve()?))
    }

    /// Create comparison from specific CSV exports
    pub fn from_csv_paths(active: &Path, reserve: &Path) -> Result<Self> {
        Ok(Self::new(
            load_table(active, &DatasetSpec::active())?,
            load_table(reserve, &DatasetSpec::reserve())?,
        ))
    }

    pub fn active(&self) -> &EarningsProjector {
        &self.active
    }

    pub fn reserve(&self) -> &EarningsProjector {
        &self.reserve
    }

    /// Initial panel parameters derived from each scenario's own table
    pub fn default_params(&self) -> (ProjectionParams, ProjectionParams) {
        (default_params(self.active.base()), default_params(self.reserve.base()))
    }

    /// Project both scenarios
    pub fn run(&self, active: &ProjectionParams, reserve: &ProjectionParams) -> ComparisonResult {
        ComparisonResult::new(self.active.project(active), self.reserve.project(reserve))
    }

    /// Coerce both requests, then project both scenarios.
    /// If either request is invalid neither scenario is projected.
    pub fn run_raw(&self, active: &RawProjectionParams, reserve: &RawProjectionParams) -> Result<ComparisonResult> {
        let parsed = self
            .active
            .validate(active)
            .and_then(|a| self.reserve.validate(reserve).map(|r| (a, r)));

        match parsed {
            Ok((a, r)) => Ok(self.run(&a, &r)),
            Err(e) => {
                log::warn!("Ignoring comparison request: {}", e);
                Err(e)
            }
        }
    }
}

/// Both projections plus the y-axis ceiling they share
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub active: Projection,
    pub reserve: Projection,
    pub y_axis_max: f64,
}

impl ComparisonResult {
    fn new(active: Projection, reserve: Projection) -> Self {
        let tallest = active.table.max_stacked_total().max(reserve.table.max_stacked_total());
        Self {
            active,
            reserve,
            y_axis_max: y_axis_ceiling(tallest),
        }
    }

    /// Lifetime earnings of the active scenario minus the reserve scenario
    pub fn difference(&self) -> f64 {
        self.active.lifetime_total - self.reserve.lifetime_total
    }

    /// Active and reserve charts on the same y-axis
    pub fn charts(&self) -> (StackedBarChart, StackedBarChart) {
        let chart = |title: &str, p: &Projection| {
            StackedBarChart::with_ceiling(title, &p.table, p.lifetime_total, self.y_axis_max)
        };
        (chart(ACTIVE_TITLE, &self.active), chart(RESERVE_TITLE, &self.reserve))
    }
}
