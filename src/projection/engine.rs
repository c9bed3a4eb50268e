//! Core projection engine for month-by-month debt payoff simulation

use std::cmp::Ordering;
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::debts::{sanitize_amount, DebtSnapshot};
use super::state::{ProjectionState, WorkingDebt};
use super::schedule::{DebtMonth, MonthRow, ProjectionFailure, ProjectionOutcome, ProjectionResult};

/// Hard cap on simulated months (50 years)
pub const MAX_PROJECTION_MONTHS: u32 = 600;

/// Total balance at or below this is treated as fully paid
pub const CONVERGENCE_TOLERANCE: f64 = 0.009;

/// Per-debt balances below this snap to zero after each month's payments
pub const DUST_THRESHOLD: f64 = 0.01;

/// Which debt receives the budget left over after minimum payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    /// Highest monthly rate first; equal rates go to the larger balance
    #[default]
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl Strategy {
    /// Parse a strategy name. Only the exact string `snowball` selects
    /// snowball; anything else falls back to avalanche.
    pub fn from_name(name: &str) -> Self {
        match name {
            "snowball" => Strategy::Snowball,
            _ => Strategy::Avalanche,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }

    /// Priority ordering for the extra payment: `Less` means `a` goes first
    fn priority(&self, a: &WorkingDebt, b: &WorkingDebt) -> Ordering {
        match self {
            Strategy::Snowball => a.balance.total_cmp(&b.balance),
            Strategy::Avalanche => b
                .apr_monthly_pct
                .total_cmp(&a.apr_monthly_pct)
                .then_with(|| b.balance.total_cmp(&a.balance)),
        }
    }
}

impl From<String> for Strategy {
    fn from(name: String) -> Self {
        Strategy::from_name(&name)
    }
}

impl From<&str> for Strategy {
    fn from(name: &str) -> Self {
        Strategy::from_name(name)
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Maximum number of months to simulate before giving up
    pub max_months: u32,

    /// Total balance treated as zero
    pub convergence_tolerance: f64,

    /// Per-debt balance snapped to zero after payments
    pub dust_threshold: f64,

    /// Whether to record the month-by-month schedule
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_months: MAX_PROJECTION_MONTHS,
            convergence_tolerance: CONVERGENCE_TOLERANCE,
            dust_threshold: DUST_THRESHOLD,
            detailed_output: false,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Engine that records every simulated month
    pub fn detailed() -> Self {
        Self::new(ProjectionConfig {
            detailed_output: true,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Simulate paying off `debts` with `budget` per month.
    ///
    /// The input is copied; callers' records are never touched.
    pub fn project(&self, debts: &[DebtSnapshot], budget: f64, strategy: Strategy) -> ProjectionResult {
        let mut state = ProjectionState::from_snapshots(debts);
        let budget = sanitize_amount(budget);

        if state.is_empty() {
            return ProjectionResult::new(ProjectionOutcome::Converged { months: 0 });
        }
        if budget <= 0.0 {
            debug!("Projection skipped: {} open debt(s), no budget", state.debts.len());
            return ProjectionResult::new(ProjectionOutcome::Failed(ProjectionFailure::NoContribution));
        }

        let mut result = ProjectionResult::new(ProjectionOutcome::Failed(ProjectionFailure::DoesNotConverge));
        let mut converged = false;

        while state.month < self.config.max_months {
            if state.total_balance() <= self.config.convergence_tolerance {
                converged = true;
                break;
            }

            state.month += 1;
            let row = self.simulate_month(&mut state, budget, strategy);
            if self.config.detailed_output {
                result.add_row(row);
            }
        }

        // Reaching the cap is a failure even if the last month cleared the balance
        result.outcome = if converged {
            ProjectionOutcome::Converged { months: state.month }
        } else {
            warn!(
                "Projection did not converge within {} months ({:.2} still owed, strategy {})",
                self.config.max_months,
                state.total_balance(),
                strategy
            );
            ProjectionOutcome::Failed(ProjectionFailure::DoesNotConverge)
        };

        debug!(
            "Projected {} debt(s), budget {:.2}, strategy {}: {}",
            state.debts.len(),
            budget,
            strategy,
            result.outcome
        );

        result
    }

    /// Run one month: accrue interest, pay minimums, pay the extra, clamp dust
    fn simulate_month(&self, state: &mut ProjectionState, budget: f64, strategy: Strategy) -> MonthRow {
        let mut row = MonthRow::new(state.month);
        let mut lines: Vec<DebtMonth> = state
            .debts
            .iter()
            .map(|d| DebtMonth {
                debt_id: d.id.clone(),
                opening: d.balance,
                interest: 0.0,
                minimum_paid: 0.0,
                extra_paid: 0.0,
                closing: 0.0,
            })
            .collect();
        row.opening_balance = state.total_balance();

        // Interest accrues before any payment, even on a debt paid off this month
        for (debt, line) in state.debts.iter_mut().zip(lines.iter_mut()) {
            line.interest = debt.accrue_interest();
        }

        let mut remaining = budget;

        // Minimums in stored order, stopping as soon as the budget runs out
        for (debt, line) in state.debts.iter_mut().zip(lines.iter_mut()) {
            if !debt.is_open() {
                continue;
            }
            let due = debt.min_pay_monthly.min(remaining);
            let paid = debt.pay(due);
            line.minimum_paid = paid;
            remaining -= paid;
            if remaining <= 0.0 {
                break;
            }
        }

        // Everything left goes to exactly one debt
        if remaining > 0.0 {
            let target = state
                .debts
                .iter()
                .enumerate()
                .filter(|(_, d)| d.is_open())
                .min_by(|(_, a), (_, b)| strategy.priority(a, b))
                .map(|(idx, _)| idx);

            if let Some(idx) = target {
                let paid = state.debts[idx].pay(remaining);
                lines[idx].extra_paid = paid;
                remaining -= paid;
                row.extra_target = Some(state.debts[idx].id.clone());
            }
        }

        state.clamp_dust(self.config.dust_threshold);

        for (debt, line) in state.debts.iter().zip(lines.iter_mut()) {
            line.closing = debt.balance;
        }

        row.interest = lines.iter().map(|l| l.interest).sum();
        row.minimum_paid = lines.iter().map(|l| l.minimum_paid).sum();
        row.extra_paid = lines.iter().map(|l| l.extra_paid).sum();
        row.closing_balance = state.total_balance();
        row.unspent = remaining.max(0.0);
        row.debts = lines;
        row
    }
}

/// Project with the default configuration, returning only the outcome
pub fn project(debts: &[DebtSnapshot], budget: f64, strategy: Strategy) -> ProjectionOutcome {
    ProjectionEngine::default().project(debts, budget, strategy).outcome
}
