//! Working state carried between simulated months

use crate::debts::{sanitize_amount, DebtSnapshot};

/// Private per-simulation copy of a debt
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingDebt {
    pub id: String,

    /// Working balance, distinct from the ledger's persisted balance
    pub balance: f64,

    /// Monthly rate in percent
    pub apr_monthly_pct: f64,

    pub min_pay_monthly: f64,
}

impl WorkingDebt {
    /// Copy a snapshot, clamping negative and non-finite figures to 0
    pub fn from_snapshot(snapshot: &DebtSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            balance: sanitize_amount(snapshot.balance),
            apr_monthly_pct: sanitize_amount(snapshot.apr_monthly_pct),
            min_pay_monthly: sanitize_amount(snapshot.min_pay_monthly),
        }
    }

    pub fn is_open(&self) -> bool {
        self.balance > 0.0
    }

    /// Apply one month of interest, returning the amount accrued
    pub fn accrue_interest(&mut self) -> f64 {
        if self.balance > 0.0 && self.apr_monthly_pct > 0.0 {
            let before = self.balance;
            self.balance *= 1.0 + self.apr_monthly_pct / 100.0;
            self.balance - before
        } else {
            0.0
        }
    }

    /// Pay up to `amount`, capped at the balance. Returns what was paid.
    pub fn pay(&mut self, amount: f64) -> f64 {
        let paid = amount.min(self.balance).max(0.0);
        self.balance -= paid;
        paid
    }
}

/// Simulation state for one projection run
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Completed months (0 before the first month runs)
    pub month: u32,

    /// Open debts in stored order
    pub debts: Vec<WorkingDebt>,
}

impl ProjectionState {
    /// Copy the snapshots, dropping anything already settled
    pub fn from_snapshots(snapshots: &[DebtSnapshot]) -> Self {
        let debts = snapshots
            .iter()
            .map(WorkingDebt::from_snapshot)
            .filter(WorkingDebt::is_open)
            .collect();

        Self { month: 0, debts }
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn total_balance(&self) -> f64 {
        self.debts.iter().map(|d| d.balance).sum()
    }

    /// Snap balances below `threshold` to exactly zero
    pub fn clamp_dust(&mut self, threshold: f64) {
        for debt in &mut self.debts {
            if debt.balance < threshold {
                debt.balance = 0.0;
            }
        }
    }
}
