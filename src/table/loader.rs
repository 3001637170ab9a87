//! Load earnings tables from CSV exports of the compensation workbook

use super::data::{
    EarningsTable, YearRecord, CALENDAR_YEAR, POST_ACTIVE_DUTY_PAY, POST_MIL_RETIREMENT_PAY,
    STANDARD_CATEGORIES,
};
use crate::error::{Error, Result};
use csv::{Reader, StringRecord};
use std::io::Read;
use std::path::Path;

/// Default path to the active-duty retirement sheet
pub const DEFAULT_ACTIVE_PATH: &str = "data/active_retire.csv";

/// Default path to the reserve retirement sheet
pub const DEFAULT_RESERVE_PATH: &str = "data/reserve_retire.csv";

/// Which columns of a CSV export make up an earnings table
#[derive(Debug, Clone)]
pub struct DatasetSpec {
    /// Header of the calendar year column
    pub year_column: String,

    /// Fixed categories to keep, in stacking order.
    /// `None` keeps every column except the year and projected columns.
    pub categories: Option<Vec<String>>,

    /// Header of the projected column. Read if present, zero-filled otherwise.
    pub projected_label: String,
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            year_column: CALENDAR_YEAR.to_string(),
            categories: None,
            projected_label: POST_MIL_RETIREMENT_PAY.to_string(),
        }
    }
}

impl DatasetSpec {
    /// The five charted categories plus the given projected column
    pub fn standard(projected_label: &str) -> Self {
        Self {
            year_column: CALENDAR_YEAR.to_string(),
            categories: Some(STANDARD_CATEGORIES.iter().map(|c| c.to_string()).collect()),
            projected_label: projected_label.to_string(),
        }
    }

    /// Layout of the active-duty retirement sheet
    pub fn active() -> Self {
        Self::standard(POST_MIL_RETIREMENT_PAY)
    }

    /// Layout of the reserve retirement sheet
    pub fn reserve() -> Self {
        Self::standard(POST_ACTIVE_DUTY_PAY)
    }
}

/// Column positions resolved against a CSV header row
struct ColumnMap {
    year: usize,
    categories: Vec<(String, usize)>,
    projected: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord, spec: &DatasetSpec) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let year = find(&spec.year_column)
            .ok_or_else(|| Error::dataset(format!("missing year column '{}'", spec.year_column)))?;
        let projected = find(&spec.projected_label);

        let categories = match &spec.categories {
            Some(names) => names
                .iter()
                .map(|name| {
                    find(name)
                        .map(|i| (name.clone(), i))
                        .ok_or_else(|| Error::dataset(format!("missing category column '{}'", name)))
                })
                .collect::<Result<Vec<_>>>()?,
            None => headers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != year && Some(*i) != projected)
                .map(|(i, h)| (h.trim().to_string(), i))
                .collect(),
        };

        Ok(Self {
            year,
            categories,
            projected,
        })
    }
}

/// Parse a calendar year cell. Spreadsheet exports may write whole numbers as "12.0".
fn parse_year(raw: &str, line: u64) -> Result<u32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<u32>() {
        return Ok(year);
    }

    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
        _ => Err(Error::dataset(format!("line {}: invalid calendar year '{}'", line, raw))),
    }
}

/// Parse an earnings cell. Blank and NaN cells are missing values.
fn parse_cell(raw: &str, column: &str, line: u64) -> Result<Option<f64>> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '$' && *c != ',').collect();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::dataset(format!("line {}: invalid value '{}' in '{}'", line, raw.trim(), column)))
}

/// Load an earnings table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P, spec: &DatasetSpec) -> Result<EarningsTable> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)?;
    let table = read_table(reader, spec)?;
    log::info!(
        "Loaded {} years x {} categories from {}",
        table.len(),
        table.categories().len(),
        path.display()
    );
    Ok(table)
}

/// Load an earnings table from any reader (e.g., string buffer, network stream)
pub fn load_table_from_reader<R: Read>(reader: R, spec: &DatasetSpec) -> Result<EarningsTable> {
    read_table(Reader::from_reader(reader), spec)
}

fn read_table<R: Read>(mut reader: Reader<R>, spec: &DatasetSpec) -> Result<EarningsTable> {
    let headers = reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers, spec)?;

    let names = columns.categories.iter().map(|(n, _)| n.clone()).collect();
    let mut table = EarningsTable::new(names, spec.projected_label.clone());

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let year = parse_year(record.get(columns.year).unwrap_or(""), line)?;

        let values = columns
            .categories
            .iter()
            .map(|(name, i)| parse_cell(record.get(*i).unwrap_or(""), name, line))
            .collect::<Result<Vec<_>>>()?;

        let projected = match columns.projected {
            Some(i) => parse_cell(record.get(i).unwrap_or(""), &spec.projected_label, line)?
                .unwrap_or(0.0),
            None => 0.0,
        };

        table.push_year(YearRecord::new(year, values).with_projected(projected))?;
    }

    if table.is_empty() {
        return Err(Error::dataset("dataset has no rows"));
    }

    Ok(table)
}

/// Load the active-duty retirement sheet from its default location
pub fn load_default_active() -> Result<EarningsTable> {
    load_table(DEFAULT_ACTIVE_PATH, &DatasetSpec::active())
}

/// Load the reserve retirement sheet from its default location
pub fn load_default_reserve() -> Result<EarningsTable> {
    load_table(DEFAULT_RESERVE_PATH, &DatasetSpec::reserve())
}
