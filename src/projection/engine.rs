//! Post-service earnings projection and lifetime earnings aggregation

use super::params::{ProjectionParams, ProjectionWindow, RawProjectionParams};
use super::result::Projection;
use crate::error::{Error, Result};
use crate::table::EarningsTable;

/// Projects post-service income onto an immutable base table.
///
/// Every call starts from a fresh copy of the base, so repeated
/// recomputation never needs a manual reset and two projectors never
/// observe each other's writes.
#[derive(Debug, Clone)]
pub struct EarningsProjector {
    base: EarningsTable,
}

impl EarningsProjector {
    pub fn new(base: EarningsTable) -> Self {
        Self { base }
    }

    /// The table every projection starts from
    pub fn base(&self) -> &EarningsTable {
        &self.base
    }

    /// Run a projection on a copy of the base table.
    ///
    /// Typed parameters are taken as given: an amount and raise that
    /// compound past `f64::MAX` produce an infinite total here. Requests
    /// from users go through [`EarningsProjector::project_raw`], which
    /// rejects them instead.
    pub fn project(&self, params: &ProjectionParams) -> Projection {
        let mut table = self.base.clone();
        let window = write_projection(&mut table, params);
        let lifetime_total = table.lifetime_total();

        log::debug!(
            "Projected {} from {:?} at {:.2}% raise, lifetime total {:.2}",
            table.projected_label(),
            window,
            params.raise_percent(),
            lifetime_total
        );

        Projection {
            table,
            params: *params,
            window,
            lifetime_total,
        }
    }

    /// Coerce a raw request and project it. Nothing is computed if any field
    /// is invalid or if the income stream would overflow.
    pub fn project_raw(&self, raw: &RawProjectionParams) -> Result<Projection> {
        let params = self.validate(raw)?;
        Ok(self.project(&params))
    }

    /// Coerce a raw request and check that it stays finite on the base table
    pub fn validate(&self, raw: &RawProjectionParams) -> Result<ProjectionParams> {
        let params = ProjectionParams::parse(raw)?;
        check_finite(&self.base, &params)?;
        Ok(params)
    }
}

/// Apply a projection to a table in place and return the lifetime total
pub fn apply_projection(table: &mut EarningsTable, params: &ProjectionParams) -> f64 {
    write_projection(table, params);
    table.lifetime_total()
}

/// Coerce a raw request and apply it in place.
/// On invalid input the table is left exactly as it was.
pub fn apply_projection_raw(table: &mut EarningsTable, raw: &RawProjectionParams) -> Result<f64> {
    let params = ProjectionParams::parse(raw)?;
    check_finite(table, &params)?;
    Ok(apply_projection(table, &params))
}

/// Fail if projecting `params` onto `table` would give a non-finite total.
/// Runs the same compounding as the write without touching the table.
fn check_finite(table: &EarningsTable, params: &ProjectionParams) -> Result<()> {
    let Some(max_year) = table.max_year() else {
        return Ok(());
    };

    let growth = 1.0 + params.annual_growth_rate;
    let mut amount = params.initial_amount;
    let mut total = table.fixed_total();

    for year in params.window(max_year).years() {
        if table.row(year).is_some() {
            total += amount;
        }
        amount *= growth;
    }

    if total.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_input("initial_amount", params.initial_amount.to_string()))
    }
}

/// Reset the projected category, then write the compounding income series
/// over the clamped window. Returns the window, or `None` for an empty table.
fn write_projection(table: &mut EarningsTable, params: &ProjectionParams) -> Option<ProjectionWindow> {
    table.reset_projected();

    let max_year = table.max_year()?;
    let window = params.window(max_year);

    if i64::from(window.start) != params.start_year || i64::from(window.end) != params.end_year {
        log::warn!(
            "Clamped projection years {}..={} to {}..={}",
            params.start_year,
            params.end_year,
            window.start,
            window.end
        );
    }

    let growth = 1.0 + params.annual_growth_rate;
    let mut amount = params.initial_amount;

    for year in window.years() {
        if !table.set_projected(year, amount) {
            log::debug!("Year {} not in table; skipping", year);
        }
        amount *= growth;
    }

    Some(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::table::YearRecord;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert_eq, proptest};

    /// Years 0..=60 with two categories
    fn career_table() -> EarningsTable {
        let records = (0..=60u32)
            .map(|year| {
                let pay = if year < 20 { Some(40_000.0 + 2_000.0 * year as f64) } else { Some(0.0) };
                let pension = if year >= 20 { Some(30_000.0) } else { None };
                YearRecord::new(year, vec![pay, pension])
            })
            .collect();

        EarningsTable::from_records(
            vec!["Military Pay".to_string(), "BRS Pension".to_string()],
            "Post Mil Retirement Pay",
            records,
        )
        .unwrap()
    }

    fn small_table() -> EarningsTable {
        EarningsTable::from_records(
            vec!["A".to_string(), "B".to_string()],
            "Projected",
            vec![
                YearRecord::new(0, vec![Some(10.0), Some(5.0)]),
                YearRecord::new(1, vec![Some(20.0), Some(5.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_geometric_growth() {
        let projector = EarningsProjector::new(career_table());
        let result = projector.project(&ProjectionParams::from_percent(0, 2, 100.0, 10.0));

        let projected = result.table.projected_values();
        assert_relative_eq!(projected[0], 100.0);
        assert_relative_eq!(projected[1], 110.0, epsilon = 1e-9);
        assert_relative_eq!(projected[2], 121.0, epsilon = 1e-9);
        assert!(projected[3..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_fixed_amount() {
        let projector = EarningsProjector::new(career_table());
        let result = projector.project(&ProjectionParams::fixed(21, 25, 500.0));

        let projected = result.table.projected_values();
        assert_eq!(&projected[21..=25], &[500.0; 5]);
        assert_eq!(projected.iter().filter(|v| **v != 0.0).count(), 5);
        assert_eq!(result.window.map(|w| w.len()), Some(5));
    }

    #[test]
    fn test_clamping_matches_explicit_bounds() {
        let projector = EarningsProjector::new(career_table());
        let clamped = projector.project(&ProjectionParams::from_percent(-5, 9999, 1000.0, 3.0));
        let explicit = projector.project(&ProjectionParams::from_percent(0, 60, 1000.0, 3.0));

        assert_eq!(clamped.table, explicit.table);
        assert_eq!(clamped.lifetime_total, explicit.lifetime_total);
        assert_eq!(clamped.window, explicit.window);
    }

    #[test]
    fn test_reversed_range_projects_nothing() {
        let base = career_table();
        let projector = EarningsProjector::new(base.clone());
        let result = projector.project(&ProjectionParams::fixed(40, 10, 1000.0));

        assert!(result.table.projected_values().iter().all(|v| *v == 0.0));
        assert_relative_eq!(result.lifetime_total, base.fixed_total());
    }

    #[test]
    fn test_lifetime_total_without_projection() {
        let projector = EarningsProjector::new(small_table());
        let result = projector.project(&ProjectionParams::fixed(1, 0, 999.0));
        assert_relative_eq!(result.lifetime_total, 40.0);
    }

    #[test]
    fn test_lifetime_total_includes_projection() {
        let projector = EarningsProjector::new(small_table());
        let result = projector.project(&ProjectionParams::fixed(0, 1, 2.5));
        assert_relative_eq!(result.lifetime_total, 45.0);
    }

    #[test]
    fn test_only_projected_category_changes() {
        let base = career_table();
        let result = EarningsProjector::new(base.clone()).project(&ProjectionParams::from_percent(10, 50, 5000.0, 4.0));

        for (before, after) in base.rows().iter().zip(result.table.rows()) {
            assert_eq!(before.year, after.year);
            assert_eq!(before.values, after.values);
        }
    }

    #[test]
    fn test_base_is_never_mutated() {
        let projector = EarningsProjector::new(career_table());
        let _ = projector.project(&ProjectionParams::fixed(0, 60, 1.0));
        assert!(projector.base().projected_values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_in_place_resets_previous_projection() {
        let mut table = career_table();
        apply_projection(&mut table, &ProjectionParams::fixed(0, 60, 10.0));
        let total = apply_projection(&mut table, &ProjectionParams::fixed(30, 31, 10.0));

        assert_eq!(table.projected_values().iter().filter(|v| **v != 0.0).count(), 2);
        assert_relative_eq!(total, table.fixed_total() + 20.0);
    }

    #[test]
    fn test_invalid_input_leaves_table_untouched() {
        let mut table = career_table();
        apply_projection(&mut table, &ProjectionParams::fixed(20, 39, 75_000.0));
        let before = table.clone();

        let raw = RawProjectionParams::from_text("0", "60", "abc", "0");
        let err = apply_projection_raw(&mut table, &raw).unwrap_err();

        assert!(matches!(err, Error::InvalidInput { .. }));
        assert_eq!(table, before);
        assert_relative_eq!(table.row(20).unwrap().projected, 75_000.0);
    }

    #[test]
    fn test_project_raw() {
        let projector = EarningsProjector::new(small_table());
        let raw = RawProjectionParams::from_text("0", "1", "100", "10");
        let result = projector.project_raw(&raw).unwrap();
        assert_relative_eq!(result.lifetime_total, 40.0 + 100.0 + 110.0, epsilon = 1e-9);

        let raw = RawProjectionParams::from_text("zero", "1", "100", "10");
        assert!(projector.project_raw(&raw).is_err());
    }

    #[test]
    fn test_overflowing_income_is_rejected() {
        let mut table = career_table();
        apply_projection(&mut table, &ProjectionParams::fixed(20, 39, 75_000.0));
        let before = table.clone();

        let raw = RawProjectionParams::from_text("0", "60", "1e300", "100");
        let err = apply_projection_raw(&mut table, &raw).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(table, before);

        let projector = EarningsProjector::new(career_table());
        assert!(projector.project_raw(&raw).unwrap_err().is_invalid_input());

        // Same inputs over a short window stay finite
        let raw = RawProjectionParams::from_text("0", "2", "1e300", "100");
        let result = projector.project_raw(&raw).unwrap();
        assert!(result.lifetime_total.is_finite());
    }

    #[test]
    fn test_sparse_years_still_compound() {
        let table = EarningsTable::from_records(
            vec!["A".to_string()],
            "Projected",
            vec![
                YearRecord::new(2, vec![Some(1.0)]),
                YearRecord::new(4, vec![Some(1.0)]),
            ],
        )
        .unwrap();
        let result = EarningsProjector::new(table).project(&ProjectionParams::from_percent(0, 4, 100.0, 100.0));

        // Years 0, 1 and 3 are absent; year 2 is the third projected year
        assert_eq!(result.table.projected_values(), vec![400.0, 1600.0]);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_projection_is_idempotent(
            start in -20i64..80,
            end in -20i64..80,
            amount in 0u32..200_000,
            raise_bp in -500i32..1500
        ) {
            let params = ProjectionParams::from_percent(start, end, amount as f64, raise_bp as f64 / 100.0);

            let mut table = career_table();
            let first = apply_projection(&mut table, &params);
            let after_first = table.clone();
            let second = apply_projection(&mut table, &params);

            prop_assert_eq!(first, second);
            prop_assert_eq!(&table, &after_first);

            let projector = EarningsProjector::new(career_table());
            let pure = projector.project(&params);
            prop_assert_eq!(pure.lifetime_total, first);
            prop_assert_eq!(&pure.table, &after_first);
        }

        #[test]
        fn prop_out_of_range_bounds_clamp(
            below in -10_000i64..0,
            above in 61i64..10_000
        ) {
            let projector = EarningsProjector::new(career_table());
            let wide = projector.project(&ProjectionParams::from_percent(below, above, 1000.0, 2.0));
            let exact = projector.project(&ProjectionParams::from_percent(0, 60, 1000.0, 2.0));

            prop_assert_eq!(wide.table, exact.table);
            prop_assert_eq!(wide.lifetime_total, exact.lifetime_total);
        }
    }
}
