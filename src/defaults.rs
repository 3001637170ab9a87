//! Initial parameter values derived from a compensation table
//!
//! These are starting points for the input fields of a dashboard. They are
//! heuristics over the military pay and TSP columns; the projection itself
//! accepts any parameters.

use crate::projection::ProjectionParams;
use crate::table::{EarningsTable, GOV_TSP_PAYOUT, MILITARY_PAY};

/// Salary used when the table has no military pay
pub const DEFAULT_SALARY: f64 = 80_000.0;

/// Flat post-service income of the single-scenario dashboard
pub const FIXED_POST_SERVICE_AMOUNT: f64 = 123_000.0;

/// Number of years the flat post-service income is paid
pub const FIXED_POST_SERVICE_YEARS: u32 = 20;

/// Year after the steepest single-year drop in military pay.
/// Falls back to the year after the last military pay entry.
pub fn default_start_year(table: &EarningsTable) -> Option<i64> {
    let pay = table.column(MILITARY_PAY)?;
    let years: Vec<u32> = table.years().collect();

    let mut steepest: Option<(usize, f64)> = None;
    for i in 1..pay.len() {
        if let (Some(prev), Some(cur)) = (pay[i - 1], pay[i]) {
            let change = cur - prev;
            if steepest.map_or(true, |(_, best)| change < best) {
                steepest = Some((i, change));
            }
        }
    }

    let index = match steepest {
        Some((i, _)) => i,
        None => pay.iter().rposition(Option::is_some)?,
    };

    Some(i64::from(years[index]) + 1)
}

/// Highest military pay in the table, or [`DEFAULT_SALARY`]
pub fn default_salary(table: &EarningsTable) -> f64 {
    table
        .column(MILITARY_PAY)
        .and_then(|pay| pay.into_iter().flatten().reduce(f64::max))
        .unwrap_or(DEFAULT_SALARY)
}

/// Year before the government TSP payout first appears
pub fn default_end_year(table: &EarningsTable) -> Option<i64> {
    let payouts = table.column(GOV_TSP_PAYOUT)?;
    let index = payouts.iter().position(Option::is_some)?;
    table.rows().get(index).map(|r| i64::from(r.year) - 1)
}

/// Starting parameters for an adjustable dashboard panel, with a 0% raise.
/// Missing heuristics fall back to the table's first and last years.
pub fn default_params(table: &EarningsTable) -> ProjectionParams {
    let first = table.min_year().map(i64::from).unwrap_or(0);
    let last = table.max_year().map(i64::from).unwrap_or(0);

    ProjectionParams::fixed(
        default_start_year(table).unwrap_or(first),
        default_end_year(table).unwrap_or(last),
        default_salary(table),
    )
}

/// Flat post-service income for the twenty years after military pay ends.
///
/// Service ends at the last year with non-zero military pay; the `0.00`
/// cells a sheet carries after separation do not count. `None` when the
/// table has no paid service year, or when service runs to the last year
/// of the table so that no post-service year remains.
pub fn fixed_post_service_params(table: &EarningsTable) -> Option<ProjectionParams> {
    let pay = table.column(MILITARY_PAY)?;
    let last = pay.iter().rposition(|v| v.is_some_and(|p| p != 0.0))?;
    let last_year = i64::from(table.rows()[last].year);
    let max_year = i64::from(table.max_year()?);

    if last_year + 1 > max_year {
        return None;
    }

    Some(ProjectionParams::fixed(
        last_year + 1,
        last_year + i64::from(FIXED_POST_SERVICE_YEARS),
        FIXED_POST_SERVICE_AMOUNT,
    ))
}
