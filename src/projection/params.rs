//! Projection parameters and the coercion boundary for loosely typed input
//!
//! Dashboard inputs arrive as text or JSON values of any type. They are
//! coerced into a typed [`ProjectionParams`] here, and nothing else in the
//! crate accepts untyped values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;

/// Projection request exactly as received from a form or JSON body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProjectionParams {
    /// First year of post-service income
    #[serde(default)]
    pub start_year: Value,

    /// Last year of post-service income (civilian retirement)
    #[serde(default)]
    pub end_year: Value,

    /// Income in the first projected year
    #[serde(default, alias = "salary")]
    pub initial_amount: Value,

    /// Yearly raise as a percentage (5 means 5%)
    #[serde(default, alias = "yearly_raise")]
    pub annual_growth_rate: Value,
}

impl RawProjectionParams {
    /// Request built from four text fields
    pub fn from_text(start_year: &str, end_year: &str, initial_amount: &str, raise_percent: &str) -> Self {
        Self {
            start_year: Value::String(start_year.to_string()),
            end_year: Value::String(end_year.to_string()),
            initial_amount: Value::String(initial_amount.to_string()),
            annual_growth_rate: Value::String(raise_percent.to_string()),
        }
    }
}

/// Validated projection parameters.
///
/// Years are kept as requested; they are clamped against a table when the
/// projection runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub start_year: i64,
    pub end_year: i64,
    pub initial_amount: f64,
    /// Yearly growth as a fraction (0.05 for 5%)
    pub annual_growth_rate: f64,
}

impl ProjectionParams {
    pub fn new(start_year: i64, end_year: i64, initial_amount: f64, annual_growth_rate: f64) -> Self {
        Self {
            start_year,
            end_year,
            initial_amount,
            annual_growth_rate,
        }
    }

    /// Parameters with the raise given as a percentage
    pub fn from_percent(start_year: i64, end_year: i64, initial_amount: f64, raise_percent: f64) -> Self {
        Self::new(start_year, end_year, initial_amount, raise_percent / 100.0)
    }

    /// The same amount in every year of the range
    pub fn fixed(start_year: i64, end_year: i64, amount: f64) -> Self {
        Self::new(start_year, end_year, amount, 0.0)
    }

    /// Coerce a raw request. Fails on the first field that is not numeric.
    pub fn parse(raw: &RawProjectionParams) -> Result<Self> {
        let start_year = coerce_int("start_year", &raw.start_year)?;
        let end_year = coerce_int("end_year", &raw.end_year)?;
        let initial_amount = coerce_float("initial_amount", &raw.initial_amount)?;
        let raise_percent = coerce_float("annual_growth_rate", &raw.annual_growth_rate)?;

        Ok(Self::from_percent(start_year, end_year, initial_amount, raise_percent))
    }

    pub fn raise_percent(&self) -> f64 {
        self.annual_growth_rate * 100.0
    }

    /// Clamp both bounds into `[0, max_year]`
    pub fn window(&self, max_year: u32) -> ProjectionWindow {
        let clamp = |year: i64| year.clamp(0, i64::from(max_year)) as u32;
        ProjectionWindow {
            start: clamp(self.start_year),
            end: clamp(self.end_year),
        }
    }
}

/// Clamped, inclusive range of years that receive projected income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWindow {
    pub start: u32,
    pub end: u32,
}

impl ProjectionWindow {
    /// A reversed window projects nothing
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn years(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

fn invalid(field: &'static str, value: &Value) -> Error {
    let shown = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Error::invalid_input(field, shown)
}

/// Integer coercion: whole-number text, or any finite number truncated toward zero
fn coerce_int(field: &'static str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
                    .ok_or_else(|| invalid(field, value))
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid(field, value)),
        _ => Err(invalid(field, value)),
    }
}

/// Float coercion: numbers or numeric text. Non-finite values are rejected.
fn coerce_float(field: &'static str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| invalid(field, value))
}
