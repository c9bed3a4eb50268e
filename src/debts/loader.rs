//! Load debts from ledger JSON documents and CSV files

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::Reader;
use log::debug;
use thiserror::Error;
use uuid::Uuid;

use super::data::{normalize_due_day, sanitize_amount, Debt};
use super::ledger::DebtLedger;

/// Failure reading or writing debt data
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw CSV row. Every column but `name` and `balance` may be blank.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    name: String,
    balance: f64,
    #[serde(default)]
    apr_monthly_pct: Option<f64>,
    #[serde(default)]
    min_pay_monthly: Option<f64>,
    #[serde(default)]
    due_day: Option<u32>,
}

impl CsvRow {
    fn into_debt(self) -> Debt {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Debt {
            id,
            name: self.name.trim().to_string(),
            balance: sanitize_amount(self.balance),
            apr_monthly_pct: sanitize_amount(self.apr_monthly_pct.unwrap_or(0.0)),
            min_pay_monthly: sanitize_amount(self.min_pay_monthly.unwrap_or(0.0)),
            due_day: normalize_due_day(self.due_day),
        }
    }
}

/// Load debts from a CSV file
pub fn load_debts_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>, LoadError> {
    let file = File::open(path)?;
    load_debts_from_reader(file)
}

/// Load debts from any CSV reader
pub fn load_debts_from_reader<R: Read>(reader: R) -> Result<Vec<Debt>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut debts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        debts.push(row.into_debt());
    }

    debug!("Loaded {} debt(s) from CSV", debts.len());
    Ok(debts)
}

/// Load a ledger document from disk
pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<DebtLedger, LoadError> {
    let file = File::open(path)?;
    load_ledger_from_reader(BufReader::new(file))
}

/// Parse a ledger document; missing fields take their defaults and numbers are sanitized
pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<DebtLedger, LoadError> {
    let mut ledger: DebtLedger = serde_json::from_reader(reader)?;
    ledger.sanitize();
    debug!(
        "Loaded ledger: {} debt(s), {} payment(s)",
        ledger.debts.len(),
        ledger.payments.len()
    );
    Ok(ledger)
}

/// Write a ledger document to disk as pretty JSON
pub fn save_ledger<P: AsRef<Path>>(ledger: &DebtLedger, path: P) -> Result<(), LoadError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, ledger)?;
    writer.flush()?;
    Ok(())
}
