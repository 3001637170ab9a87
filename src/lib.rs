//! Lifetime Earnings - post-service income projection for military compensation data
//!
//! This library provides:
//! - Earnings tables loaded from CSV exports of the compensation workbook
//! - Projection of a compounding post-service income stream onto a table
//! - Lifetime earnings aggregation across every category and year
//! - Default parameter heuristics and an active vs reserve comparison
//! - Chart payloads and currency formatting for display

pub mod error;
pub mod table;
pub mod projection;
pub mod defaults;
pub mod chart;
pub mod format;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, Result};
pub use table::{EarningsTable, YearRecord, DatasetSpec};
pub use projection::{EarningsProjector, Projection, ProjectionParams, RawProjectionParams};
pub use scenario::{Comparison, ComparisonResult};
pub use format::format_currency;
