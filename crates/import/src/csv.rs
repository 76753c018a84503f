use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

use bankstat_core::RawRecord;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Reads one monthly statement: a header row followed by
/// `date,name,category,amount` rows. Rows with fewer than four fields are
/// skipped; a malformed amount fails the whole file so it can be retried after
/// the statement is fixed.
pub fn read_statement<R: Read>(data: R) -> Result<Vec<RawRecord>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        if row.len() < 4 {
            continue;
        }
        let amount_field = row.get(3).unwrap_or_default().trim();
        let amount = Decimal::from_str(amount_field)
            .map_err(|_| CsvError::InvalidAmount(amount_field.to_string()))?;
        records.push(RawRecord {
            date: row.get(0).unwrap_or_default().to_string(),
            name: row.get(1).unwrap_or_default().to_string(),
            category: row.get(2).unwrap_or_default().to_string(),
            amount,
        });
    }

    Ok(records)
}
