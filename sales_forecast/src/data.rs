//! Sales series handling: validation of raw input and CSV loading

use crate::error::{ForecastError, InputError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Column that uploaded files must provide
pub const SALES_COLUMN: &str = "Sales";

/// Most weeks accepted through manual entry
pub const MAX_MANUAL_WEEKS: usize = 52;

/// Ordered weekly sales observations, oldest first.
///
/// A series always holds at least one finite, non-negative value; it can only be built
/// through [`SalesSeries::new`] or a [`SeriesValidator`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSeries {
    values: Vec<f64>,
}

impl SalesSeries {
    /// Create a series from already clean values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(InputError::EmptySeries.into());
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(InputError::InvalidValue {
                index,
                raw: values[index].to_string(),
            }
            .into());
        }
        if let Some(index) = values.iter().position(|v| *v < 0.0) {
            return Err(InputError::NegativeValue {
                index,
                value: values[index],
            }
            .into());
        }

        Ok(Self { values })
    }

    /// Get the observations
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of observed weeks
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for parity with collection types
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First observed week
    pub fn first(&self) -> f64 {
        self.values[0]
    }

    /// Last observed week
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Arithmetic mean of the observations; finite for any finite series
    pub fn mean(&self) -> f64 {
        let n = self.values.len() as f64;
        let sum: f64 = self.values.iter().sum();
        if sum.is_finite() {
            sum / n
        } else {
            // The plain sum overflowed; scaling first keeps every partial sum below the maximum
            self.values.iter().map(|v| v / n).sum()
        }
    }

    /// 1-based week numbers of the observations
    pub fn weeks(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.values.len()
    }
}

/// What the validator does with entries that are not numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Replace the entry with 0.0
    #[default]
    ZeroFill,
    /// Reject the whole input
    Reject,
}

/// Normalizes raw sales input into a [`SalesSeries`]
#[derive(Debug, Clone, Default)]
pub struct SeriesValidator {
    policy: MissingValuePolicy,
    max_observations: Option<usize>,
}

impl SeriesValidator {
    /// Create a validator with the given missing-value policy
    pub fn new(policy: MissingValuePolicy) -> Self {
        Self {
            policy,
            max_observations: None,
        }
    }

    /// Reject inputs longer than `max` weeks
    pub fn with_max_observations(mut self, max: usize) -> Self {
        self.max_observations = Some(max);
        self
    }

    /// Get the missing-value policy
    pub fn policy(&self) -> MissingValuePolicy {
        self.policy
    }

    /// Validate text entries, as typed by a user or read from a file
    pub fn validate_entries<I, S>(&self, entries: I) -> Result<SalesSeries>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        let mut raw = Vec::new();
        for entry in entries {
            let text = entry.as_ref().trim();
            parsed.push(text.parse::<f64>().ok());
            raw.push(text.to_string());
        }

        self.clean(&parsed, |index| raw[index].clone())
    }

    /// Validate numeric entries where `None` marks a missing cell
    pub fn validate_values(&self, values: &[Option<f64>]) -> Result<SalesSeries> {
        self.clean(values, |index| match values[index] {
            Some(v) => v.to_string(),
            None => String::new(),
        })
    }

    fn clean<F>(&self, values: &[Option<f64>], describe: F) -> Result<SalesSeries>
    where
        F: Fn(usize) -> String,
    {
        if values.is_empty() {
            return Err(InputError::EmptySeries.into());
        }
        if let Some(max) = self.max_observations {
            if values.len() > max {
                return Err(InputError::TooManyObservations {
                    max,
                    actual: values.len(),
                }
                .into());
            }
        }

        let mut cleaned = Vec::with_capacity(values.len());
        let mut coerced = 0;
        for (index, value) in values.iter().enumerate() {
            match value.filter(|v| v.is_finite()) {
                Some(v) => cleaned.push(v),
                None => match self.policy {
                    MissingValuePolicy::ZeroFill => {
                        coerced += 1;
                        cleaned.push(0.0);
                    }
                    MissingValuePolicy::Reject => {
                        return Err(InputError::InvalidValue {
                            index,
                            raw: describe(index),
                        }
                        .into());
                    }
                },
            }
        }

        if coerced > 0 {
            tracing::warn!(coerced, total = cleaned.len(), "non-numeric sales entries replaced with 0.0");
        }

        SalesSeries::new(cleaned)
    }
}

/// Loads a sales series from tabular files
#[derive(Debug, Clone)]
pub struct DataLoader {
    validator: SeriesValidator,
    column: String,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(SeriesValidator::default())
    }
}

impl DataLoader {
    /// Create a loader that reads the `Sales` column through `validator`
    pub fn new(validator: SeriesValidator) -> Self {
        Self {
            validator,
            column: SALES_COLUMN.to_string(),
        }
    }

    /// Read a differently named column
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Get the column this loader reads
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Load a sales series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(&self, path: P) -> Result<SalesSeries> {
        let bytes = std::fs::read(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "read sales file");
        self.from_csv_bytes(&bytes)
    }

    /// Load a sales series from uploaded CSV content
    pub fn from_csv_bytes(&self, bytes: &[u8]) -> Result<SalesSeries> {
        // A header without data rows holds no sales
        let has_rows = bytes
            .split(|b| *b == b'\n')
            .filter(|line| !line.iter().all(|b| b.is_ascii_whitespace()))
            .nth(1)
            .is_some();
        if !has_rows {
            return Err(InputError::EmptySeries.into());
        }

        let df = CsvReader::new(Cursor::new(bytes))
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        self.from_dataframe(&df)
    }

    /// Extract the sales column from an existing DataFrame
    pub fn from_dataframe(&self, df: &DataFrame) -> Result<SalesSeries> {
        let values = self.sales_values(df)?;
        self.validator.validate_values(&values)
    }

    /// Read the sales column as nullable floats; cells that fail to cast become null
    fn sales_values(&self, df: &DataFrame) -> Result<Vec<Option<f64>>> {
        let names = df.get_column_names();
        if !names.iter().any(|name| *name == self.column) {
            return Err(ForecastError::Input(InputError::MissingColumn {
                column: self.column.clone(),
                available: names.iter().map(|name| name.to_string()).collect(),
            }));
        }

        let column = df.column(&self.column)?;
        let floats = column.cast(&DataType::Float64)?;
        let values = floats.f64()?.into_iter().collect();
        Ok(values)
    }
}
