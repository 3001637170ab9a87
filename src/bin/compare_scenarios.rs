//! Compare active-duty and reserve retirement lifetime earnings
//!
//! Usage: cargo run --bin compare_scenarios -- [ACTIVE_CSV RESERVE_CSV]
//!
//! Each panel starts from the defaults derived from its own sheet. Raises
//! can be set with `ACTIVE_RAISE` and `RESERVE_RAISE` (percent).

use anyhow::Context;
use lifetime_earnings::scenario::{ACTIVE_TITLE, RESERVE_TITLE};
use lifetime_earnings::{
    format_currency, Comparison, ComparisonResult, Projection, ProjectionParams, RawProjectionParams,
};
use serde_json::Value;
use std::env;
use std::path::Path;

fn raw_request(params: &ProjectionParams, raise_var: &str) -> RawProjectionParams {
    let raise = env::var(raise_var)
        .map(Value::String)
        .unwrap_or_else(|_| params.raise_percent().into());

    RawProjectionParams {
        start_year: params.start_year.into(),
        end_year: params.end_year.into(),
        initial_amount: params.initial_amount.into(),
        annual_growth_rate: raise,
    }
}

fn print_panel(title: &str, result: &Projection) {
    let summary = result.summary();
    println!("\n{}", title);
    println!("{}", "-".repeat(title.len()));
    if let Some(w) = result.window {
        println!("  {}: years {}..={}", result.table.projected_label(), w.start, w.end);
    }
    for category in &summary.category_totals {
        println!("  {:<28} {:>18}", category.name, format_currency(category.total));
    }
    println!("  {:<28} {:>18}", "Lifetime Earnings", result.lifetime_total_display());
}

fn print_comparison(result: &ComparisonResult) {
    print_panel(ACTIVE_TITLE, &result.active);
    print_panel(RESERVE_TITLE, &result.reserve);

    println!("\nShared y-axis ceiling: {}", format_currency(result.y_axis_max));
    println!("Active minus reserve: {}", format_currency(result.difference()));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let comparison = match args.as_slice() {
        [] => Comparison::from_csv().context("Failed to load bundled sheets")?,
        [active, reserve] => Comparison::from_csv_paths(Path::new(active), Path::new(reserve))
            .context("Failed to load sheets")?,
        _ => anyhow::bail!("Usage: compare_scenarios [ACTIVE_CSV RESERVE_CSV]"),
    };

    let (active, reserve) = comparison.default_params();
    let active_raw = raw_request(&active, "ACTIVE_RAISE");
    let reserve_raw = raw_request(&reserve, "RESERVE_RAISE");

    println!("Active vs Reserve Lifetime Earnings Comparison");
    println!("==============================================");

    let result = comparison
        .run_raw(&active_raw, &reserve_raw)
        .context("Comparison request rejected")?;
    print_comparison(&result);

    Ok(())
}
