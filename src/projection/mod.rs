//! Payoff projection for a set of debts under a fixed monthly budget

mod state;
mod engine;
mod schedule;

pub use state::{ProjectionState, WorkingDebt};
pub use engine::{
    project, ProjectionConfig, ProjectionEngine, Strategy,
    CONVERGENCE_TOLERANCE, DUST_THRESHOLD, MAX_PROJECTION_MONTHS,
};
pub use schedule::{
    write_schedule_csv, DebtMonth, DebtPayoff, MonthRow, ProjectionFailure, ProjectionOutcome,
    ProjectionResult, ProjectionSummary,
};
