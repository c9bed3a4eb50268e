//! AWS Lambda handler for debt payoff projections
//!
//! Accepts a debt list, budget and strategy as JSON and returns the payoff
//! outcome, a summary, and optionally the month-by-month schedule and a
//! strategy comparison.

use debt_payoff::{
    debts::DebtSnapshot,
    projection::{MonthRow, ProjectionConfig, ProjectionEngine, ProjectionOutcome, ProjectionSummary, MAX_PROJECTION_MONTHS},
    scenario::{ScenarioRunner, StrategyComparison},
    Strategy, YearMonth,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

/// Input for one projection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    /// Debts to project; settled ones are ignored
    #[serde(default)]
    pub debts: Vec<DebtSnapshot>,

    /// Monthly budget across all debts
    #[serde(default)]
    pub budget_monthly: f64,

    /// "avalanche" or "snowball"; anything else means avalanche
    #[serde(default)]
    pub strategy: Strategy,

    /// Simulation cap (default and upper bound: 600)
    #[serde(default = "default_max_months")]
    pub max_months: u32,

    /// Include the month-by-month schedule
    #[serde(default)]
    pub include_schedule: bool,

    /// Also run the other strategy
    #[serde(default)]
    pub compare: bool,
}

fn default_max_months() -> u32 { MAX_PROJECTION_MONTHS }

/// Output from the projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub result: ProjectionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_month: Option<YearMonth>,
    pub summary: ProjectionSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<MonthRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<StrategyComparison>,
    pub execution_time_ms: u64,
}

fn project(request: ProjectionRequest) -> ProjectionResponse {
    let start = std::time::Instant::now();
    let config = ProjectionConfig {
        max_months: request.max_months.min(MAX_PROJECTION_MONTHS),
        detailed_output: true,
        ..Default::default()
    };

    let engine = ProjectionEngine::new(config.clone());
    let result = engine.project(&request.debts, request.budget_monthly, request.strategy);
    let summary = result.summary();

    let comparison = request.compare.then(|| {
        ScenarioRunner::with_config(config).compare_strategies(&request.debts, request.budget_monthly)
    });

    let schedule = if request.include_schedule { result.schedule } else { Vec::new() };

    ProjectionResponse {
        result: result.outcome,
        payoff_month: result.outcome.payoff_month(YearMonth::current()),
        summary,
        schedule,
        comparison,
        execution_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    let (request, context) = event.into_parts();
    info!(
        "Request {}: {} debt(s), budget {:.2}, strategy {}",
        context.request_id,
        request.debts.len(),
        request.budget_monthly,
        request.strategy
    );

    Ok(project(request))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use debt_payoff::projection::ProjectionFailure;

    #[test]
    fn test_request_defaults() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"debts":[{"id":"a","balance":1000}],"budgetMonthly":100}"#,
        )
        .unwrap();

        assert_eq!(request.strategy, Strategy::Avalanche);
        assert_eq!(request.max_months, 600);
        assert!(!request.include_schedule);

        let response = project(request);
        assert_eq!(response.result, ProjectionOutcome::Converged { months: 10 });
        assert!(response.schedule.is_empty());
        assert!(response.comparison.is_none());
    }

    #[test]
    fn test_response_shape() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"debts":[{"id":"a","balance":500,"aprMonthlyPct":2,"minPayMonthly":50}],
                "budgetMonthly":0,"strategy":"snowball","compare":true}"#,
        )
        .unwrap();

        let json = serde_json::to_value(project(request)).unwrap();
        assert_eq!(json["result"]["converged"], false);
        assert_eq!(json["result"]["reason"], "no monthly contribution defined");
        assert!(json.get("payoffMonth").is_none());
        assert!(json.get("comparison").is_some());
    }

    #[test]
    fn test_oversized_cap_is_clamped() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"debts":[{"id":"a","balance":1000,"aprMonthlyPct":50}],
                "budgetMonthly":10,"maxMonths":4294967295,"includeSchedule":true}"#,
        )
        .unwrap();

        let response = project(request);
        assert_eq!(response.result, ProjectionOutcome::Failed(ProjectionFailure::DoesNotConverge));
        assert_eq!(response.schedule.len() as u32, MAX_PROJECTION_MONTHS);
        assert_eq!(response.summary.months_simulated, MAX_PROJECTION_MONTHS);
    }

    #[test]
    fn test_smaller_cap_respected() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"debts":[{"id":"a","balance":1000}],"budgetMonthly":100,"maxMonths":5}"#,
        )
        .unwrap();

        assert_eq!(project(request).result, ProjectionOutcome::Failed(ProjectionFailure::DoesNotConverge));
    }
}
