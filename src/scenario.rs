//! Scenario runner for comparing strategies and budgets
//!
//! Holds one projection configuration and evaluates many (budget, strategy)
//! combinations against the same debt snapshot.

use rayon::prelude::*;
use serde::Serialize;

use crate::debts::{DebtLedger, DebtSnapshot};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionOutcome, ProjectionSummary, Strategy};

/// Side-by-side avalanche and snowball results for one budget
#[derive(Debug, Clone, Serialize)]
pub struct StrategyComparison {
    pub budget: f64,
    pub avalanche: ProjectionSummary,
    pub snowball: ProjectionSummary,
}

impl StrategyComparison {
    /// Strategy that finishes sooner; ties (and double failures) go to avalanche
    pub fn faster(&self) -> Strategy {
        match (self.avalanche.outcome.months(), self.snowball.outcome.months()) {
            (None, Some(_)) => Strategy::Snowball,
            (Some(a), Some(s)) if s < a => Strategy::Snowball,
            _ => Strategy::Avalanche,
        }
    }

    /// Interest saved by avalanche over snowball (negative if snowball is cheaper)
    pub fn interest_saved_by_avalanche(&self) -> f64 {
        self.snowball.total_interest - self.avalanche.total_interest
    }
}

/// One point of a budget sweep
#[derive(Debug, Clone, Serialize)]
pub struct BudgetPoint {
    pub budget: f64,
    pub outcome: ProjectionOutcome,
}

/// Pre-configured runner for batch projections
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    fn engine(&self, detailed: bool) -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig {
            detailed_output: detailed,
            ..self.config.clone()
        })
    }

    /// Project a ledger with its own budget and strategy
    pub fn run(&self, ledger: &DebtLedger) -> ProjectionSummary {
        ledger.project(&self.engine(true)).summary()
    }

    /// Run both strategies against the same debts and budget
    pub fn compare_strategies(&self, debts: &[DebtSnapshot], budget: f64) -> StrategyComparison {
        let engine = self.engine(true);
        let (avalanche, snowball) = rayon::join(
            || engine.project(debts, budget, Strategy::Avalanche).summary(),
            || engine.project(debts, budget, Strategy::Snowball).summary(),
        );

        StrategyComparison {
            budget,
            avalanche,
            snowball,
        }
    }

    /// Evaluate many budgets in parallel. Output order matches `budgets`.
    pub fn budget_sweep(&self, debts: &[DebtSnapshot], budgets: &[f64], strategy: Strategy) -> Vec<BudgetPoint> {
        let engine = self.engine(false);
        budgets
            .par_iter()
            .map(|&budget| BudgetPoint {
                budget,
                outcome: engine.project(debts, budget, strategy).outcome,
            })
            .collect()
    }

    /// Smallest budget in the sweep that pays everything off within `months`
    pub fn cheapest_budget_within(points: &[BudgetPoint], months: u32) -> Option<f64> {
        points
            .iter()
            .filter(|p| p.outcome.months().is_some_and(|m| m <= months))
            .map(|p| p.budget)
            .min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debts::DebtDraft;
    use crate::projection::ProjectionFailure;

    fn debts() -> Vec<DebtSnapshot> {
        vec![
            DebtSnapshot::new("small_cheap", 800.0, 0.5, 25.0),
            DebtSnapshot::new("big_costly", 6000.0, 3.0, 150.0),
        ]
    }

    #[test]
    fn test_compare_strategies() {
        let runner = ScenarioRunner::new();
        let comparison = runner.compare_strategies(&debts(), 600.0);

        assert!(comparison.avalanche.outcome.is_converged());
        assert!(comparison.snowball.outcome.is_converged());
        assert!(comparison.interest_saved_by_avalanche() > 0.0);
        assert_eq!(comparison.faster(), Strategy::Avalanche);
    }

    #[test]
    fn test_budget_sweep_keeps_order() {
        let runner = ScenarioRunner::new();
        let budgets: Vec<f64> = vec![0.0, 100.0, 400.0, 800.0, 1600.0];
        let points = runner.budget_sweep(&debts(), &budgets, Strategy::Avalanche);

        assert_eq!(points.len(), budgets.len());
        for (point, budget) in points.iter().zip(&budgets) {
            assert_eq!(point.budget, *budget);
        }
        assert_eq!(points[0].outcome, ProjectionOutcome::Failed(ProjectionFailure::NoContribution));
        // 100/month can't keep up with 180/month of interest on the big debt
        assert_eq!(points[1].outcome, ProjectionOutcome::Failed(ProjectionFailure::DoesNotConverge));

        // More money never takes longer
        let months: Vec<u32> = points[2..].iter().map(|p| p.outcome.months().unwrap()).collect();
        assert!(months.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_cheapest_budget_within() {
        let runner = ScenarioRunner::new();
        let budgets: Vec<f64> = (1..=20).map(|i| i as f64 * 250.0).collect();
        let points = runner.budget_sweep(&debts(), &budgets, Strategy::Snowball);

        let cheapest = ScenarioRunner::cheapest_budget_within(&points, 12).unwrap();
        let months = points.iter().find(|p| p.budget == cheapest).unwrap().outcome.months().unwrap();
        assert!(months <= 12);
        assert_eq!(ScenarioRunner::cheapest_budget_within(&points, 0), None);
    }

    #[test]
    fn test_run_ledger() {
        let mut ledger = DebtLedger::new();
        ledger.add_debt(&DebtDraft::new("Card", 1000.0)).unwrap();
        ledger.set_budget(250.0);

        let summary = ScenarioRunner::new().run(&ledger);
        assert_eq!(summary.outcome, ProjectionOutcome::Converged { months: 4 });
        assert_eq!(summary.months_simulated, 4);
        assert_eq!(summary.total_paid, 1000.0);
    }
}
