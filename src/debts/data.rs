//! Debt and payment records as held by the ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coerce a raw amount to a non-negative finite number.
///
/// NaN, infinities and negatives all become 0.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Round a currency amount to cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamp a raw due day to 1..=31, treating 0 as unset
pub fn normalize_due_day(raw: Option<u32>) -> Option<u32> {
    match raw {
        None | Some(0) => None,
        Some(day) => Some(day.min(31)),
    }
}

/// Whether a debt still has money owed on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtStatus {
    Active,
    Settled,
}

/// A single liability tracked by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    /// Opaque unique identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Outstanding balance
    #[serde(default)]
    pub balance: f64,

    /// Monthly periodic interest rate, in percent (2.5 means 2.5% per month)
    #[serde(default)]
    pub apr_monthly_pct: f64,

    /// Minimum required monthly payment
    #[serde(default)]
    pub min_pay_monthly: f64,

    /// Day of month the payment is due, 1..=31 once sanitized
    #[serde(default)]
    pub due_day: Option<u32>,
}

impl Debt {
    pub fn status(&self) -> DebtStatus {
        if self.balance <= 0.0 {
            DebtStatus::Settled
        } else {
            DebtStatus::Active
        }
    }

    /// Copy the figures the projection engine needs
    pub fn snapshot(&self) -> DebtSnapshot {
        DebtSnapshot::new(
            self.id.clone(),
            self.balance,
            self.apr_monthly_pct,
            self.min_pay_monthly,
        )
    }

    /// Clamp every numeric field after loading from an untrusted source
    pub(crate) fn sanitize(&mut self) {
        self.balance = sanitize_amount(self.balance);
        self.apr_monthly_pct = sanitize_amount(self.apr_monthly_pct);
        self.min_pay_monthly = sanitize_amount(self.min_pay_monthly);
        self.due_day = normalize_due_day(self.due_day);
    }
}

/// A recorded payment against a debt. Never mutated once logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub debt_id: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Form data for creating or fully replacing a debt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtDraft {
    pub name: String,
    pub balance: f64,
    pub apr_monthly_pct: f64,
    pub min_pay_monthly: f64,
    /// Raw due day as entered; 0 means unset
    pub due_day: Option<u32>,
}

impl DebtDraft {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            name: name.into(),
            balance,
            ..Default::default()
        }
    }

    pub fn with_rate(mut self, apr_monthly_pct: f64) -> Self {
        self.apr_monthly_pct = apr_monthly_pct;
        self
    }

    pub fn with_minimum(mut self, min_pay_monthly: f64) -> Self {
        self.min_pay_monthly = min_pay_monthly;
        self
    }

    pub fn with_due_day(mut self, due_day: u32) -> Self {
        self.due_day = Some(due_day);
        self
    }
}

/// The engine's view of one debt: only the figures the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSnapshot {
    pub id: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub apr_monthly_pct: f64,
    #[serde(default)]
    pub min_pay_monthly: f64,
}

impl DebtSnapshot {
    /// Figures are taken as given; the engine clamps them when it builds its working copy
    pub fn new(id: impl Into<String>, balance: f64, apr_monthly_pct: f64, min_pay_monthly: f64) -> Self {
        Self {
            id: id.into(),
            balance,
            apr_monthly_pct,
            min_pay_monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_amount() {
        assert_eq!(sanitize_amount(12.5), 12.5);
        assert_eq!(sanitize_amount(-3.0), 0.0);
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_due_day_clamped() {
        assert_eq!(normalize_due_day(None), None);
        assert_eq!(normalize_due_day(Some(0)), None);
        assert_eq!(normalize_due_day(Some(15)), Some(15));
        assert_eq!(normalize_due_day(Some(45)), Some(31));
    }

    #[test]
    fn test_debt_sanitize_clamps_due_day() {
        let json = r#"{"id":"x1","name":"Card","balance":-10,"dueDay":300}"#;
        let mut debt: Debt = serde_json::from_str(json).unwrap();
        assert_eq!(debt.due_day, Some(300));

        debt.sanitize();
        assert_eq!(debt.due_day, Some(31));
        assert_eq!(debt.balance, 0.0);
        assert_eq!(debt.status(), DebtStatus::Settled);
    }

    #[test]
    fn test_debt_json_field_names() {
        let json = r#"{"id":"x1","name":"Card","balance":1200.5,"aprMonthlyPct":3.2,"minPayMonthly":90,"dueDay":10}"#;
        let debt: Debt = serde_json::from_str(json).unwrap();
        assert_eq!(debt.apr_monthly_pct, 3.2);
        assert_eq!(debt.due_day, Some(10));
        assert_eq!(debt.status(), DebtStatus::Active);
    }
}
