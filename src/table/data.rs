//! Earnings table structures matching the compensation workbook layout

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Year column header in the compensation workbook
pub const CALENDAR_YEAR: &str = "Calendar Year";

pub const MILITARY_PAY: &str = "Military Pay";
pub const BONUS_AND_PAYMENTS: &str = "Bonus & Payments";
pub const BRS_PENSION: &str = "BRS Pension";
pub const MEMBER_TSP_PAYOUT: &str = "Service Member TSP Payout";
pub const GOV_TSP_PAYOUT: &str = "Gov't TSP Payout";

/// Projected column label for the active-duty retirement scenario
pub const POST_MIL_RETIREMENT_PAY: &str = "Post Mil Retirement Pay";

/// Projected column label for the reserve retirement scenario
pub const POST_ACTIVE_DUTY_PAY: &str = "Post Active Duty Pay";

/// Fixed earnings categories charted by every dashboard, in stacking order
pub const STANDARD_CATEGORIES: [&str; 5] = [
    MILITARY_PAY,
    BONUS_AND_PAYMENTS,
    BRS_PENSION,
    MEMBER_TSP_PAYOUT,
    GOV_TSP_PAYOUT,
];

/// Earnings for a single calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Calendar year (primary key)
    pub year: u32,

    /// One cell per fixed category, `None` where the workbook cell is blank
    pub values: Vec<Option<f64>>,

    /// Projected post-service income for this year
    pub projected: f64,
}

impl YearRecord {
    /// Create a record with no projected income
    pub fn new(year: u32, values: Vec<Option<f64>>) -> Self {
        Self {
            year,
            values,
            projected: 0.0,
        }
    }

    pub fn with_projected(mut self, projected: f64) -> Self {
        self.projected = projected;
        self
    }

    /// Value of a fixed category; blank cells read as `None`
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Sum of the fixed categories (blank cells count as zero)
    pub fn fixed_total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }

    /// Stacked height of this year: fixed categories plus projected income
    pub fn total(&self) -> f64 {
        self.fixed_total() + self.projected
    }
}

/// Per-year, per-category earnings for one scenario.
///
/// Deserialized tables go through [`EarningsTable::from_records`], so they
/// hold the same ordering and width guarantees as loaded ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRecords")]
pub struct EarningsTable {
    categories: Vec<String>,
    projected_label: String,
    rows: Vec<YearRecord>,
}

/// Serialized shape of an [`EarningsTable`], checked before use
#[derive(Deserialize)]
struct TableRecords {
    categories: Vec<String>,
    projected_label: String,
    rows: Vec<YearRecord>,
}

impl TryFrom<TableRecords> for EarningsTable {
    type Error = Error;

    fn try_from(records: TableRecords) -> Result<Self> {
        EarningsTable::from_records(records.categories, records.projected_label, records.rows)
    }
}

impl EarningsTable {
    /// Create an empty table with the given fixed categories
    pub fn new<S: Into<String>>(categories: Vec<String>, projected_label: S) -> Self {
        Self {
            categories,
            projected_label: projected_label.into(),
            rows: Vec::new(),
        }
    }

    /// Build a table from records, validating width and year ordering.
    /// Fails on an empty record list.
    pub fn from_records<S: Into<String>>(
        categories: Vec<String>,
        projected_label: S,
        records: Vec<YearRecord>,
    ) -> Result<Self> {
        let mut table = Self::new(categories, projected_label);
        for record in records {
            table.push_year(record)?;
        }
        if table.is_empty() {
            return Err(Error::dataset("earnings table has no rows"));
        }
        Ok(table)
    }

    /// Append a year. Years must be strictly increasing.
    pub fn push_year(&mut self, record: YearRecord) -> Result<()> {
        if record.values.len() != self.categories.len() {
            return Err(Error::dataset(format!(
                "year {} has {} values, expected {}",
                record.year,
                record.values.len(),
                self.categories.len()
            )));
        }

        if let Some(last) = self.rows.last() {
            if record.year <= last.year {
                return Err(Error::dataset(format!(
                    "year {} does not follow year {}",
                    record.year, last.year
                )));
            }
        }

        self.rows.push(record);
        Ok(())
    }

    /// Fixed category names, in stacking order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn projected_label(&self) -> &str {
        &self.projected_label
    }

    pub fn rows(&self) -> &[YearRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().map(|r| r.year)
    }

    pub fn min_year(&self) -> Option<u32> {
        self.rows.first().map(|r| r.year)
    }

    /// Largest calendar year present; the upper clamp bound for projections
    pub fn max_year(&self) -> Option<u32> {
        self.rows.last().map(|r| r.year)
    }

    /// Look up a year
    pub fn row(&self, year: u32) -> Option<&YearRecord> {
        self.position(year).map(|i| &self.rows[i])
    }

    fn position(&self, year: u32) -> Option<usize> {
        self.rows.binary_search_by_key(&year, |r| r.year).ok()
    }

    /// Index of a fixed category by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == name)
    }

    /// All cells of a fixed category, in year order
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r.value(index)).collect())
    }

    /// The projected income series, in year order
    pub fn projected_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.projected).collect()
    }

    /// Zero the projected category for every year
    pub(crate) fn reset_projected(&mut self) {
        for row in &mut self.rows {
            row.projected = 0.0;
        }
    }

    /// Write projected income for one year. Returns false if the year is absent.
    pub(crate) fn set_projected(&mut self, year: u32, amount: f64) -> bool {
        match self.position(year) {
            Some(i) => {
                self.rows[i].projected = amount;
                true
            }
            None => false,
        }
    }

    /// Sum of every category (projected included) across every year
    pub fn lifetime_total(&self) -> f64 {
        self.rows.iter().map(YearRecord::total).sum()
    }

    /// Sum of the fixed categories only
    pub fn fixed_total(&self) -> f64 {
        self.rows.iter().map(YearRecord::fixed_total).sum()
    }

    /// Per-category totals, projected category last
    pub fn category_totals(&self) -> Vec<(String, f64)> {
        let mut totals: Vec<(String, f64)> = self
            .categories
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let sum = self.rows.iter().filter_map(|r| r.value(i)).sum();
                (name.clone(), sum)
            })
            .collect();

        let projected = self.rows.iter().map(|r| r.projected).sum();
        totals.push((self.projected_label.clone(), projected));
        totals
    }

    /// Tallest stacked bar across all years
    pub fn max_stacked_total(&self) -> f64 {
        self.rows
            .iter()
            .map(YearRecord::total)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_column_table() -> EarningsTable {
        EarningsTable::from_records(
            vec!["A".to_string(), "B".to_string()],
            "Projected",
            vec![
                YearRecord::new(0, vec![Some(10.0), Some(5.0)]),
                YearRecord::new(1, vec![Some(20.0), None]).with_projected(7.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_totals() {
        let table = two_column_table();

        assert_relative_eq!(table.fixed_total(), 35.0);
        assert_relative_eq!(table.lifetime_total(), 42.0);
        assert_relative_eq!(table.max_stacked_total(), 27.0);

        let totals = table.category_totals();
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[2].0, "Projected");
        assert_relative_eq!(totals[0].1, 30.0);
        assert_relative_eq!(totals[1].1, 5.0);
        assert_relative_eq!(totals[2].1, 7.0);
    }

    #[test]
    fn test_lookup() {
        let table = two_column_table();

        assert_eq!(table.max_year(), Some(1));
        assert_eq!(table.row(1).unwrap().value(0), Some(20.0));
        assert_eq!(table.row(1).unwrap().value(1), None);
        assert!(table.row(2).is_none());
        assert_eq!(table.column("B"), Some(vec![Some(5.0), None]));
        assert!(table.column("C").is_none());
    }

    #[test]
    fn test_rejects_non_increasing_years() {
        let result = EarningsTable::from_records(
            vec!["A".to_string()],
            "Projected",
            vec![
                YearRecord::new(3, vec![Some(1.0)]),
                YearRecord::new(3, vec![Some(1.0)]),
            ],
        );
        assert!(matches!(result, Err(Error::Dataset(_))));
    }

    #[test]
    fn test_rejects_width_mismatch_and_empty() {
        let mut table = EarningsTable::new(vec!["A".to_string()], "Projected");
        assert!(table.push_year(YearRecord::new(0, vec![Some(1.0), Some(2.0)])).is_err());

        let empty = EarningsTable::from_records(vec!["A".to_string()], "Projected", Vec::new());
        assert!(empty.is_err());
    }

    #[test]
    fn test_deserialize_validates_rows() {
        let table = two_column_table();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: EarningsTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);

        let unordered = serde_json::json!({
            "categories": ["A"],
            "projected_label": "Projected",
            "rows": [
                {"year": 5, "values": [1.0], "projected": 0.0},
                {"year": 1, "values": [1.0], "projected": 0.0},
                {"year": 3, "values": [1.0], "projected": 0.0}
            ]
        });
        let err = serde_json::from_value::<EarningsTable>(unordered).unwrap_err();
        assert!(err.to_string().contains("does not follow"));

        let ragged = serde_json::json!({
            "categories": ["A"],
            "projected_label": "Projected",
            "rows": [
                {"year": 0, "values": [1.0], "projected": 0.0},
                {"year": 1, "values": [1.0, 2.0], "projected": 0.0}
            ]
        });
        assert!(serde_json::from_value::<EarningsTable>(ragged).is_err());

        let empty = serde_json::json!({
            "categories": ["A"],
            "projected_label": "Projected",
            "rows": []
        });
        assert!(serde_json::from_value::<EarningsTable>(empty).is_err());
    }

    #[test]
    fn test_set_projected_missing_year() {
        let mut table = two_column_table();
        assert!(!table.set_projected(9, 1.0));
        assert!(table.set_projected(0, 3.0));
        table.reset_projected();
        assert_eq!(table.projected_values(), vec![0.0, 0.0]);
    }
}
