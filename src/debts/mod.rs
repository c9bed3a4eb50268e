//! Debt records, the ledger store, and loaders

mod data;
mod ledger;
pub mod loader;

pub use data::{
    normalize_due_day, round_cents, sanitize_amount, Debt, DebtDraft, DebtSnapshot, DebtStatus, Payment,
};
pub use ledger::{DebtLedger, LedgerError, DEFAULT_BUDGET_MONTHLY};
pub use loader::{load_debts_csv, load_debts_from_reader, load_ledger, load_ledger_from_reader, save_ledger, LoadError};
