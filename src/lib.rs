//! Debt Payoff - household debt ledger and payoff projection engine
//!
//! This library provides:
//! - A multi-debt ledger with a payment log
//! - Month-by-month payoff projections (avalanche and snowball strategies)
//! - Strategy comparisons and parallel budget sweeps
//! - Simple-mode household summaries and savings goals

pub mod debts;
pub mod household;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use debts::{Debt, DebtDraft, DebtLedger, DebtSnapshot, LedgerError, LoadError, Payment};
pub use household::{HouseholdFinances, Workbook, YearMonth};
pub use projection::{project, ProjectionEngine, ProjectionOutcome, ProjectionResult, Strategy};
pub use scenario::ScenarioRunner;
