use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use log::info;

use crate::models::DailyRecord;

/// One row of a GHCN daily summary export. Columns not listed are ignored.
#[derive(serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "DATE", default, deserialize_with = "csv::invalid_option")]
    date: Option<NaiveDate>,
    #[serde(rename = "TMAX", default, deserialize_with = "csv::invalid_option")]
    max_temp: Option<f64>,
    #[serde(rename = "PRCP", default, deserialize_with = "csv::invalid_option")]
    precipitation: Option<f64>,
    #[serde(rename = "SNOW", default, deserialize_with = "csv::invalid_option")]
    snowfall: Option<f64>,
    #[serde(rename = "WT03", default, deserialize_with = "csv::invalid_option")]
    thunder: Option<f64>,
}

fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

impl From<CsvRow> for DailyRecord {
    fn from(row: CsvRow) -> Self {
        DailyRecord {
            date: row.date,
            max_temp: or_zero(row.max_temp),
            precipitation: or_zero(row.precipitation),
            snowfall: or_zero(row.snowfall),
            thunder: or_zero(row.thunder) != 0.0,
        }
    }
}

pub fn load_records(csv_path: &Path) -> anyhow::Result<Vec<DailyRecord>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut records = Vec::new();

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("bad row {} in {}", line + 1, csv_path.display()))?;
        records.push(DailyRecord::from(row));
    }

    info!("Loaded {} daily records from {}", records.len(), csv_path.display());
    Ok(records)
}
