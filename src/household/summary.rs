//! Monthly and daily summaries for simple mode

use serde::{Deserialize, Serialize};

use super::{finite_or_zero, HouseholdFinances, YearMonth};

/// Share of income taken by each bucket, in percent (0..=100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeShares {
    pub fixed: f64,
    pub debt: f64,
    pub reserve: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income_total: f64,
    pub fixed: f64,
    pub debt_pay: f64,
    pub reserve_add: f64,

    /// Debt payment plus reserve contribution
    pub contributions: f64,

    /// Income minus fixed costs and contributions; negative means overspent
    pub left: f64,

    pub debt_after: f64,
    pub reserve_after: f64,

    /// `None` when nothing is paid towards the debt
    pub months_to_pay: Option<u32>,

    /// Six months of fixed costs
    pub reserve_goal_6x: f64,

    pub shares: IncomeShares,
}

/// A closed month in the history table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthClose {
    pub month: YearMonth,
    pub income_total: f64,
    pub fixed: f64,
    pub debt_pay: f64,
    pub reserve_add: f64,
    pub left: f64,
    pub debt_after: f64,
    pub reserve_after: f64,
}

impl MonthClose {
    pub fn from_summary(month: YearMonth, summary: &MonthlySummary) -> Self {
        Self {
            month,
            income_total: summary.income_total,
            fixed: summary.fixed,
            debt_pay: summary.debt_pay,
            reserve_add: summary.reserve_add,
            left: summary.left,
            debt_after: summary.debt_after,
            reserve_after: summary.reserve_after,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyFigures {
    pub left_per_day: f64,
    /// Daily leftover over a 30-day month
    pub left_per_month: f64,
}

fn percent_of(part: f64, total: f64) -> f64 {
    (part / total * 100.0).clamp(0.0, 100.0)
}

impl HouseholdFinances {
    pub fn monthly_summary(&self) -> MonthlySummary {
        let income_total =
            finite_or_zero(self.income_you) + finite_or_zero(self.income_partner) + finite_or_zero(self.income_extra);
        let fixed = finite_or_zero(self.fixed_costs);
        let debt_pay = finite_or_zero(self.debt_pay);
        let reserve_add = finite_or_zero(self.reserve_add);
        let debt_total = finite_or_zero(self.debt_total);

        let contributions = debt_pay + reserve_add;
        let left = income_total - fixed - contributions;

        let months_to_pay = if debt_pay > 0.0 {
            Some((debt_total.max(0.0) / debt_pay).ceil() as u32)
        } else {
            None
        };

        let share_base = if income_total > 0.0 { income_total } else { 1.0 };

        MonthlySummary {
            income_total,
            fixed,
            debt_pay,
            reserve_add,
            contributions,
            left,
            debt_after: (debt_total - debt_pay).max(0.0),
            reserve_after: (finite_or_zero(self.reserve_total) + reserve_add).max(0.0),
            months_to_pay,
            reserve_goal_6x: (fixed * 6.0).max(0.0),
            shares: IncomeShares {
                fixed: percent_of(fixed, share_base),
                debt: percent_of(debt_pay, share_base),
                reserve: percent_of(reserve_add, share_base),
                left: percent_of(left.max(0.0), share_base),
            },
        }
    }

    pub fn daily(&self) -> DailyFigures {
        let left_per_day = finite_or_zero(self.daily_value).max(0.0) - finite_or_zero(self.daily_fixed).max(0.0);
        DailyFigures {
            left_per_day,
            left_per_month: left_per_day * 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_summary() {
        let summary = HouseholdFinances::default().monthly_summary();

        assert_eq!(summary.income_total, 10200.0);
        assert_eq!(summary.contributions, 2200.0);
        assert_eq!(summary.left, 3620.0);
        assert_eq!(summary.debt_after, 58000.0);
        assert_eq!(summary.reserve_after, 200.0);
        assert_eq!(summary.months_to_pay, Some(30));
        assert_eq!(summary.reserve_goal_6x, 26280.0);
        assert_relative_eq!(summary.shares.fixed, 4380.0 / 10200.0 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_debt_payment() {
        let finances = HouseholdFinances {
            debt_pay: 0.0,
            ..Default::default()
        };
        assert_eq!(finances.monthly_summary().months_to_pay, None);
    }

    #[test]
    fn test_months_to_pay_rounds_up() {
        let finances = HouseholdFinances {
            debt_total: 1001.0,
            debt_pay: 100.0,
            ..Default::default()
        };
        assert_eq!(finances.monthly_summary().months_to_pay, Some(11));
    }

    #[test]
    fn test_overspent_shares() {
        let finances = HouseholdFinances {
            income_you: 1000.0,
            income_partner: 0.0,
            fixed_costs: 1500.0,
            ..Default::default()
        };
        let summary = finances.monthly_summary();

        assert!(summary.left < 0.0);
        assert_eq!(summary.shares.fixed, 100.0);
        assert_eq!(summary.shares.left, 0.0);
    }

    #[test]
    fn test_zero_income_shares() {
        let finances = HouseholdFinances {
            income_you: 0.0,
            income_partner: 0.0,
            income_extra: 0.0,
            fixed_costs: 0.5,
            debt_pay: 0.0,
            reserve_add: 0.0,
            ..Default::default()
        };
        assert_relative_eq!(finances.monthly_summary().shares.fixed, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_daily() {
        let daily = HouseholdFinances::default().daily();
        assert_eq!(daily.left_per_day, 94.0);
        assert_eq!(daily.left_per_month, 2820.0);

        let negative = HouseholdFinances {
            daily_value: -10.0,
            daily_fixed: 20.0,
            ..Default::default()
        };
        assert_eq!(negative.daily().left_per_day, -20.0);
    }
}
