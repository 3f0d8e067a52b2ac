//! Loading price series from delimited text files.
//!
//! Each record is `date,price[,...]`. Any record that fails to parse aborts
//! the whole read; the pipeline never runs on a partial series.

use crate::config::InputConfig;
use crate::models::Sample;
use crate::{Error, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a series from the file at `path`
pub fn read_series<P: AsRef<Path>>(path: P, input: &InputConfig) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let series = read_series_from(file, input)?;
    debug!("Read {} samples from {}", series.len(), path.display());
    Ok(series)
}

/// Read a series from any reader, e.g. stdin or an in-memory buffer
pub fn read_series_from<R: Read>(source: R, input: &InputConfig) -> Result<Vec<Sample>> {
    let delimiter = u8::try_from(input.delimiter).map_err(|_| {
        Error::ConfigError(format!(
            "delimiter {:?} is not a single byte",
            input.delimiter
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(input.has_headers)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut series = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        series.push(parse_record(&record, line, &input.date_format)?);
    }

    Ok(series)
}

fn parse_record(record: &csv::StringRecord, line: u64, date_format: &str) -> Result<Sample> {
    let malformed = |reason: String| Error::MalformedRecord { line, reason };

    let (date_field, price_field) = match (record.get(0), record.get(1)) {
        (Some(date), Some(price)) => (date, price),
        _ => {
            return Err(malformed(format!(
                "expected date and price, found {} field(s)",
                record.len()
            )))
        }
    };

    let date = NaiveDate::parse_from_str(date_field, date_format)
        .map_err(|e| malformed(format!("invalid date {:?}: {}", date_field, e)))?;
    let price = price_field
        .parse::<i64>()
        .map_err(|e| malformed(format!("invalid price {:?}: {}", price_field, e)))?;

    Ok(Sample::new(date, price))
}
