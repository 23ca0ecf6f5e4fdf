//! Week/Sales table covering observed and forecast weeks, with CSV export

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// File name offered for downloads
pub const EXPORT_FILE_NAME: &str = "sales_predictions.csv";

/// One row of the exported table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRow {
    /// 1-based week number
    #[serde(rename = "Week")]
    pub week: usize,
    /// Observed or forecast sales
    #[serde(rename = "Sales")]
    pub sales: f64,
}

/// Observed weeks followed by forecast weeks
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTable {
    rows: Vec<SalesRow>,
    observed: usize,
}

impl SalesTable {
    /// Build the table for a series and its forecast
    pub fn from_forecast(series: &SalesSeries, forecast: &ForecastResult) -> Self {
        let rows = series
            .weeks()
            .zip(series.values())
            .map(|(week, sales)| SalesRow { week, sales: *sales })
            .chain(
                (series.len() + 1..)
                    .zip(forecast.values())
                    .map(|(week, sales)| SalesRow { week, sales: *sales }),
            )
            .collect();

        Self {
            rows,
            observed: series.len(),
        }
    }

    /// Build a table from rows; all rows count as observed
    pub fn from_rows(rows: Vec<SalesRow>) -> Self {
        let observed = rows.len();
        Self { rows, observed }
    }

    /// Get all rows
    pub fn rows(&self) -> &[SalesRow] {
        &self.rows
    }

    /// Rows holding observations
    pub fn observed_rows(&self) -> &[SalesRow] {
        &self.rows[..self.observed]
    }

    /// Rows holding forecasts
    pub fn forecast_rows(&self) -> &[SalesRow] {
        &self.rows[self.observed..]
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV with a header row and no index column
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Encode the table as UTF-8 CSV bytes
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(buffer)
    }

    /// Write the table to a CSV file
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_csv(file)?;
        tracing::info!(path = %path.as_ref().display(), rows = self.rows.len(), "exported sales table");
        Ok(())
    }

    /// Parse a table previously written by [`SalesTable::write_csv`]
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<SalesRow>, csv::Error>>()
            .map_err(ForecastError::from)?;
        Ok(Self::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastMethod;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_layout() {
        let series = SalesSeries::new(vec![10.0, 20.0]).unwrap();
        let forecast = ForecastResult::new(vec![15.0, 15.0], 2, 3, ForecastMethod::Mean).unwrap();
        let table = SalesTable::from_forecast(&series, &forecast);

        assert_eq!(table.len(), 4);
        assert_eq!(table.observed_rows().len(), 2);
        assert_eq!(
            table.forecast_rows(),
            &[
                SalesRow { week: 3, sales: 15.0 },
                SalesRow { week: 4, sales: 15.0 }
            ]
        );
    }

    #[test]
    fn test_csv_text() {
        let table = SalesTable::from_rows(vec![
            SalesRow { week: 1, sales: 10.0 },
            SalesRow { week: 2, sales: 12.5 },
        ]);
        let text = String::from_utf8(table.to_csv_bytes().unwrap()).unwrap();
        assert_eq!(text, "Week,Sales\n1,10.0\n2,12.5\n");
    }
}
