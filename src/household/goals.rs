//! Debt payoff and emergency reserve goals

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{finite_or_zero, HouseholdFinances, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtGoalStatus {
    /// No target month set
    NoTarget,
    /// Target set but nothing is paid towards the debt
    NoContribution,
    OnTrack,
    OffTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReserveEta {
    Reached,
    Months(u32),
    NoContribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Month the aggregate debt is expected to be gone
    pub debt_eta: Option<YearMonth>,
    pub debt_status: DebtGoalStatus,

    /// Fixed costs times the number of reserve months (at least one)
    pub reserve_goal: f64,
    pub reserve_missing: f64,
    pub reserve_eta: ReserveEta,
}

impl HouseholdFinances {
    pub fn goals(&self, today: NaiveDate) -> GoalProgress {
        let now = YearMonth::from_date(today);
        let debt_total = finite_or_zero(self.debt_total);
        let debt_pay = finite_or_zero(self.debt_pay);

        let debt_eta = if debt_total <= 0.0 {
            Some(now)
        } else if debt_pay > 0.0 {
            Some(now.add_months((debt_total / debt_pay).ceil() as u32))
        } else {
            None
        };

        let debt_status = match (self.goal_debt_date, debt_eta) {
            (None, _) => DebtGoalStatus::NoTarget,
            (Some(_), None) => DebtGoalStatus::NoContribution,
            (Some(goal), Some(eta)) if eta <= goal => DebtGoalStatus::OnTrack,
            (Some(_), Some(_)) => DebtGoalStatus::OffTrack,
        };

        let reserve_months = finite_or_zero(self.goal_reserve_months).max(1.0);
        let reserve_goal = finite_or_zero(self.fixed_costs) * reserve_months;
        let reserve_missing = (reserve_goal - finite_or_zero(self.reserve_total)).max(0.0);
        let reserve_add = finite_or_zero(self.reserve_add);

        let reserve_eta = if reserve_missing == 0.0 {
            ReserveEta::Reached
        } else if reserve_add > 0.0 {
            ReserveEta::Months((reserve_missing / reserve_add).ceil() as u32)
        } else {
            ReserveEta::NoContribution
        };

        GoalProgress {
            debt_eta,
            debt_status,
            reserve_goal,
            reserve_missing,
            reserve_eta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_debt_eta_from_payment() {
        let goals = HouseholdFinances::default().goals(today());

        // 60000 / 2000 = 30 months after 2026-10
        assert_eq!(goals.debt_eta.unwrap().to_string(), "2029-04");
        assert_eq!(goals.debt_status, DebtGoalStatus::NoTarget);
    }

    #[test]
    fn test_debt_goal_status() {
        let mut finances = HouseholdFinances {
            goal_debt_date: YearMonth::new(2029, 4),
            ..Default::default()
        };
        assert_eq!(finances.goals(today()).debt_status, DebtGoalStatus::OnTrack);

        finances.goal_debt_date = YearMonth::new(2029, 3);
        assert_eq!(finances.goals(today()).debt_status, DebtGoalStatus::OffTrack);

        finances.debt_pay = 0.0;
        let goals = finances.goals(today());
        assert_eq!(goals.debt_eta, None);
        assert_eq!(goals.debt_status, DebtGoalStatus::NoContribution);
    }

    #[test]
    fn test_no_debt_is_due_now() {
        let finances = HouseholdFinances {
            debt_total: 0.0,
            debt_pay: 0.0,
            ..Default::default()
        };
        assert_eq!(finances.goals(today()).debt_eta, Some(YearMonth::from_date(today())));
    }

    #[test]
    fn test_reserve_eta() {
        let goals = HouseholdFinances::default().goals(today());
        assert_eq!(goals.reserve_goal, 26280.0);
        // 26280 / 200 = 131.4 -> 132 months
        assert_eq!(goals.reserve_eta, ReserveEta::Months(132));

        let reached = HouseholdFinances {
            reserve_total: 30000.0,
            ..Default::default()
        };
        assert_eq!(reached.goals(today()).reserve_eta, ReserveEta::Reached);

        let stalled = HouseholdFinances {
            reserve_add: 0.0,
            ..Default::default()
        };
        assert_eq!(stalled.goals(today()).reserve_eta, ReserveEta::NoContribution);
    }

    #[test]
    fn test_reserve_months_at_least_one() {
        let finances = HouseholdFinances {
            goal_reserve_months: 0.0,
            ..Default::default()
        };
        assert_eq!(finances.goals(today()).reserve_goal, 4380.0);
    }
}
