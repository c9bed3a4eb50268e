//! Combined export pack: household figures plus the debt ledger

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HouseholdFinances;
use crate::debts::{DebtLedger, LoadError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub finance: HouseholdFinances,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debts: Option<DebtLedger>,
}

pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook, LoadError> {
    let file = File::open(path)?;
    load_workbook_from_reader(BufReader::new(file))
}

/// Accepts either a full pack (`{ "finance": ..., "debts": ... }`) or a bare
/// household document.
pub fn load_workbook_from_reader<R: Read>(reader: R) -> Result<Workbook, LoadError> {
    let mut value: Value = serde_json::from_reader(reader)?;

    let (finance, debts) = match value.get_mut("finance").map(Value::take) {
        Some(finance) => {
            let debts = value.get_mut("debts").map(Value::take);
            (finance, debts)
        }
        None => (value, None),
    };

    let finance: HouseholdFinances = serde_json::from_value(finance)?;
    let debts = match debts {
        Some(Value::Null) | None => None,
        Some(raw) => {
            let mut ledger: DebtLedger = serde_json::from_value(raw)?;
            ledger.sanitize();
            Some(ledger)
        }
    };

    Ok(Workbook { finance, debts })
}

pub fn save_workbook<P: AsRef<Path>>(workbook: &Workbook, path: P) -> Result<(), LoadError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, workbook)?;
    writer.flush()?;
    Ok(())
}
