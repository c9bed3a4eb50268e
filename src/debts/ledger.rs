//! In-memory debt ledger: debts, payment log, budget and strategy

use chrono::{Local, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::data::{normalize_due_day, round_cents, sanitize_amount, Debt, DebtDraft, DebtSnapshot, Payment};
use crate::projection::{ProjectionEngine, ProjectionResult, Strategy};

/// Monthly budget a fresh ledger starts with
pub const DEFAULT_BUDGET_MONTHLY: f64 = 2000.0;

/// Rejected ledger operations
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Debt name cannot be empty")]
    EmptyName,
    #[error("Balance must be greater than zero (got {0})")]
    NonPositiveBalance(f64),
    #[error("Payment amount must be greater than zero (got {0})")]
    NonPositivePayment(f64),
    #[error("Unknown debt: {0}")]
    UnknownDebt(String),
}

fn default_budget() -> f64 {
    DEFAULT_BUDGET_MONTHLY
}

/// Validated field values from a draft
struct DebtFields {
    name: String,
    balance: f64,
    apr_monthly_pct: f64,
    min_pay_monthly: f64,
    due_day: Option<u32>,
}

impl DebtFields {
    fn from_draft(draft: &DebtDraft) -> Result<Self, LedgerError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let balance = sanitize_amount(draft.balance);
        if balance <= 0.0 {
            return Err(LedgerError::NonPositiveBalance(draft.balance));
        }

        Ok(Self {
            name: name.to_string(),
            balance: round_cents(balance),
            apr_monthly_pct: round_cents(sanitize_amount(draft.apr_monthly_pct)),
            min_pay_monthly: round_cents(sanitize_amount(draft.min_pay_monthly)),
            due_day: normalize_due_day(draft.due_day),
        })
    }

    fn apply(self, debt: &mut Debt) {
        debt.name = self.name;
        debt.balance = self.balance;
        debt.apr_monthly_pct = self.apr_monthly_pct;
        debt.min_pay_monthly = self.min_pay_monthly;
        debt.due_day = self.due_day;
    }
}

/// The debt store the projection reads from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtLedger {
    /// Total available per month across all debts
    #[serde(default = "default_budget")]
    pub budget_monthly: f64,

    #[serde(default)]
    pub strategy: Strategy,

    #[serde(default)]
    pub debts: Vec<Debt>,

    /// Append-only payment log
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Default for DebtLedger {
    fn default() -> Self {
        Self {
            budget_monthly: DEFAULT_BUDGET_MONTHLY,
            strategy: Strategy::Avalanche,
            debts: Vec::new(),
            payments: Vec::new(),
        }
    }
}

impl DebtLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debt from a draft. Name must be non-blank and balance positive.
    pub fn add_debt(&mut self, draft: &DebtDraft) -> Result<&Debt, LedgerError> {
        let fields = DebtFields::from_draft(draft)?;
        let mut debt = Debt {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            balance: 0.0,
            apr_monthly_pct: 0.0,
            min_pay_monthly: 0.0,
            due_day: None,
        };
        fields.apply(&mut debt);

        info!("Added debt {} ({}) with balance {:.2}", debt.name, debt.id, debt.balance);
        self.debts.push(debt);
        Ok(&self.debts[self.debts.len() - 1])
    }

    /// Replace every editable field of an existing debt
    pub fn edit_debt(&mut self, id: &str, draft: &DebtDraft) -> Result<&Debt, LedgerError> {
        let fields = DebtFields::from_draft(draft)?;
        let debt = self
            .debts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| LedgerError::UnknownDebt(id.to_string()))?;

        fields.apply(debt);
        Ok(debt)
    }

    /// Remove a debt. Its payments stay in the log.
    pub fn remove_debt(&mut self, id: &str) -> Result<Debt, LedgerError> {
        let idx = self
            .debts
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| LedgerError::UnknownDebt(id.to_string()))?;

        Ok(self.debts.remove(idx))
    }

    pub fn debt(&self, id: &str) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id == id)
    }

    /// Record a payment and reduce the debt's balance (never below zero).
    ///
    /// `date` defaults to today.
    pub fn register_payment(
        &mut self,
        debt_id: &str,
        amount: f64,
        date: Option<NaiveDate>,
    ) -> Result<&Payment, LedgerError> {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        if amount <= 0.0 {
            return Err(LedgerError::NonPositivePayment(amount));
        }

        let debt = self
            .debts
            .iter_mut()
            .find(|d| d.id == debt_id)
            .ok_or_else(|| LedgerError::UnknownDebt(debt_id.to_string()))?;

        let old_balance = sanitize_amount(debt.balance);
        debt.balance = round_cents((old_balance - amount).max(0.0));

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            debt_id: debt_id.to_string(),
            amount,
            date: date.unwrap_or_else(|| Local::now().date_naive()),
        };
        info!(
            "Payment of {:.2} on {} ({:.2} -> {:.2})",
            amount, debt.name, old_balance, debt.balance
        );

        self.payments.push(payment);
        Ok(&self.payments[self.payments.len() - 1])
    }

    pub fn set_budget(&mut self, budget: f64) {
        self.budget_monthly = sanitize_amount(budget);
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Owned copies of the debt figures for the projection engine
    pub fn snapshots(&self) -> Vec<DebtSnapshot> {
        self.debts.iter().map(Debt::snapshot).collect()
    }

    pub fn total_balance(&self) -> f64 {
        self.debts.iter().map(|d| sanitize_amount(d.balance)).sum()
    }

    pub fn total_minimums(&self) -> f64 {
        self.debts.iter().map(|d| sanitize_amount(d.min_pay_monthly)).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(|p| sanitize_amount(p.amount)).sum()
    }

    pub fn payments_for<'a>(&'a self, debt_id: &'a str) -> impl Iterator<Item = &'a Payment> + 'a {
        self.payments.iter().filter(move |p| p.debt_id == debt_id)
    }

    /// Project the ledger's debts with its own budget and strategy
    pub fn project(&self, engine: &ProjectionEngine) -> ProjectionResult {
        engine.project(&self.snapshots(), self.budget_monthly, self.strategy)
    }

    /// Clamp every numeric field after loading from an untrusted source
    pub(crate) fn sanitize(&mut self) {
        self.budget_monthly = sanitize_amount(self.budget_monthly);
        for debt in &mut self.debts {
            debt.sanitize();
        }
    }
}
