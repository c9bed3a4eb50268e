//! Simple-mode household finances: one aggregate debt, a reserve, and goals
//!
//! Everything here is plain arithmetic over [`HouseholdFinances`]; the
//! multi-debt ledger and its projection live in [`crate::debts`] and
//! [`crate::projection`].

mod month;
mod summary;
mod goals;
mod workbook;

pub use month::{YearMonth, YearMonthParseError};
pub use summary::{DailyFigures, IncomeShares, MonthClose, MonthlySummary};
pub use goals::{DebtGoalStatus, GoalProgress, ReserveEta};
pub use workbook::{load_workbook, load_workbook_from_reader, save_workbook, Workbook};

use serde::{Deserialize, Deserializer, Serialize};

/// Replace NaN and infinities with zero
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Blank month inputs are stored as empty strings
fn blank_month_as_none<'de, D>(deserializer: D) -> Result<Option<YearMonth>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Monthly household figures entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseholdFinances {
    pub income_you: f64,
    #[serde(alias = "incomeWife")]
    pub income_partner: f64,
    pub income_extra: f64,
    pub fixed_costs: f64,

    /// Single aggregate debt
    pub debt_total: f64,
    pub debt_pay: f64,

    pub reserve_total: f64,
    pub reserve_add: f64,

    /// Month the debt should be gone by
    #[serde(deserialize_with = "blank_month_as_none")]
    pub goal_debt_date: Option<YearMonth>,

    /// Reserve target expressed in months of fixed costs
    pub goal_reserve_months: f64,

    pub daily_value: f64,
    pub daily_fixed: f64,

    /// Closed months, oldest first, at most one per month
    pub history: Vec<MonthClose>,
}

impl Default for HouseholdFinances {
    fn default() -> Self {
        Self {
            income_you: 7200.0,
            income_partner: 3000.0,
            income_extra: 0.0,
            fixed_costs: 4380.0,
            debt_total: 60000.0,
            debt_pay: 2000.0,
            reserve_total: 0.0,
            reserve_add: 200.0,
            goal_debt_date: None,
            goal_reserve_months: 6.0,
            daily_value: 240.0,
            daily_fixed: 146.0,
            history: Vec::new(),
        }
    }
}

impl HouseholdFinances {
    /// Snapshot this month into the history and roll balances forward.
    ///
    /// Closing the same month twice replaces the earlier entry.
    pub fn close_month(&mut self, today: chrono::NaiveDate) -> &MonthClose {
        let summary = self.monthly_summary();
        let entry = MonthClose::from_summary(YearMonth::from_date(today), &summary);

        self.history.retain(|h| h.month != entry.month);
        self.history.push(entry);

        self.debt_total = summary.debt_after;
        self.reserve_total = summary.reserve_after;

        &self.history[self.history.len() - 1]
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
