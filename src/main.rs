//! Lifetime Earnings CLI
//!
//! Command-line interface for projecting post-service income onto a
//! compensation sheet and totaling lifetime earnings

use anyhow::{bail, Context};
use clap::Parser;
use lifetime_earnings::defaults::{default_params, fixed_post_service_params};
use lifetime_earnings::table::loader::DEFAULT_ACTIVE_PATH;
use lifetime_earnings::table::{load_table, POST_MIL_RETIREMENT_PAY};
use lifetime_earnings::{DatasetSpec, EarningsProjector, RawProjectionParams};
use serde_json::Value;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifetime-earnings")]
#[command(about = "Project post-service income and total lifetime earnings", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV export of the compensation sheet
    #[arg(long, default_value = DEFAULT_ACTIVE_PATH)]
    dataset: PathBuf,

    /// Header of the projected income column
    #[arg(long, default_value = POST_MIL_RETIREMENT_PAY)]
    projected_column: String,

    /// Categories to stack, comma separated (default: every column)
    #[arg(long, value_delimiter = ',')]
    categories: Option<Vec<String>>,

    /// Civilian salary start year
    #[arg(long, allow_hyphen_values = true)]
    start_year: Option<String>,

    /// Civilian retirement year
    #[arg(long, allow_hyphen_values = true)]
    end_year: Option<String>,

    /// Salary in the first civilian year
    #[arg(long, allow_hyphen_values = true)]
    salary: Option<String>,

    /// Percent yearly raise
    #[arg(long, allow_hyphen_values = true)]
    raise: Option<String>,

    /// JSON file with start_year, end_year, salary and yearly_raise
    #[arg(long, conflicts_with_all = ["start_year", "end_year", "salary", "raise", "fixed"])]
    params: Option<PathBuf>,

    /// Flat post-service income for twenty years after military pay ends
    #[arg(long)]
    fixed: bool,

    /// Write the projected table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the chart payload as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn field(arg: Option<String>, default: Value) -> Value {
    arg.map(Value::String).unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let spec = DatasetSpec {
        categories: cli.categories.clone(),
        projected_label: cli.projected_column.clone(),
        ..DatasetSpec::default()
    };
    let table = load_table(&cli.dataset, &spec)
        .with_context(|| format!("Failed to load {}", cli.dataset.display()))?;

    let raw: RawProjectionParams = match &cli.params {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            serde_json::from_reader(file).context("Invalid params file")?
        }
        None => {
            let defaults = if cli.fixed {
                match fixed_post_service_params(&table) {
                    Some(params) => params,
                    None => bail!("--fixed needs a year of paid Military Pay followed by at least one later year"),
                }
            } else {
                default_params(&table)
            };

            RawProjectionParams {
                start_year: field(cli.start_year, defaults.start_year.into()),
                end_year: field(cli.end_year, defaults.end_year.into()),
                initial_amount: field(cli.salary, defaults.initial_amount.into()),
                annual_growth_rate: field(cli.raise, defaults.raise_percent().into()),
            }
        }
    };

    let projector = EarningsProjector::new(table);
    let result = projector.project_raw(&raw).context("Projection request rejected")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.chart("Retirement Graph"))?);
    } else {
        println!("Lifetime Earnings v{}", env!("CARGO_PKG_VERSION"));
        println!("=======================\n");

        match result.window {
            Some(w) if !w.is_empty() => println!(
                "{}: {}..={} starting at ${:.2}, {:.2}% yearly raise\n",
                result.table.projected_label(),
                w.start,
                w.end,
                result.params.initial_amount,
                result.params.raise_percent()
            ),
            _ => println!("{}: none\n", result.table.projected_label()),
        }

        println!("{:>5} {:>14} {:>14} {:>14}", "Year", "Fixed", "Projected", "Total");
        println!("{}", "-".repeat(50));
        for row in result.table.rows() {
            println!(
                "{:>5} {:>14.2} {:>14.2} {:>14.2}",
                row.year,
                row.fixed_total(),
                row.projected,
                row.total()
            );
        }

        let summary = result.summary();
        println!("\nSummary:");
        for category in &summary.category_totals {
            println!("  {:<28} ${:.2}", category.name, category.total);
        }
        if let Some(year) = summary.peak_year {
            println!("  Peak year: {} (${:.2})", year, summary.peak_total);
        }
        println!("  Lifetime Earnings: {}", result.lifetime_total_display());
    }

    if let Some(path) = &cli.output {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        result.write_csv(file)?;
        log::info!("Projected table written to {}", path.display());
    }

    Ok(())
}
