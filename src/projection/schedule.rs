//! Projection output structures

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::household::YearMonth;

/// Why a projection could not produce a payoff date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionFailure {
    /// Debts exist but nothing is budgeted to pay them
    NoContribution,
    /// The simulation horizon ran out with money still owed
    DoesNotConverge,
}

impl ProjectionFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            ProjectionFailure::NoContribution => "no monthly contribution defined",
            ProjectionFailure::DoesNotConverge => "does not converge (interest exceeds payment)",
        }
    }

    /// Inverse of [`ProjectionFailure::reason`]
    pub fn from_reason(reason: &str) -> Option<Self> {
        [ProjectionFailure::NoContribution, ProjectionFailure::DoesNotConverge]
            .into_iter()
            .find(|f| f.reason() == reason)
    }
}

impl fmt::Display for ProjectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Final answer of a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "OutcomeRecord", try_from = "OutcomeRecord")]
pub enum ProjectionOutcome {
    Converged { months: u32 },
    Failed(ProjectionFailure),
}

impl ProjectionOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, ProjectionOutcome::Converged { .. })
    }

    pub fn months(&self) -> Option<u32> {
        match self {
            ProjectionOutcome::Converged { months } => Some(*months),
            ProjectionOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<ProjectionFailure> {
        match self {
            ProjectionOutcome::Converged { .. } => None,
            ProjectionOutcome::Failed(failure) => Some(*failure),
        }
    }

    /// Calendar month in which the last debt is paid, counting from `start`
    pub fn payoff_month(&self, start: YearMonth) -> Option<YearMonth> {
        self.months().map(|m| start.add_months(m))
    }
}

impl fmt::Display for ProjectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionOutcome::Converged { months } => write!(f, "{} month(s)", months),
            ProjectionOutcome::Failed(failure) => write!(f, "{}", failure),
        }
    }
}

/// Wire shape: `{ "converged": true, "months": N }` or `{ "converged": false, "reason": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OutcomeRecord {
    converged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl From<ProjectionOutcome> for OutcomeRecord {
    fn from(outcome: ProjectionOutcome) -> Self {
        match outcome {
            ProjectionOutcome::Converged { months } => OutcomeRecord {
                converged: true,
                months: Some(months),
                reason: None,
            },
            ProjectionOutcome::Failed(failure) => OutcomeRecord {
                converged: false,
                months: None,
                reason: Some(failure.reason().to_string()),
            },
        }
    }
}

impl TryFrom<OutcomeRecord> for ProjectionOutcome {
    type Error = String;

    fn try_from(record: OutcomeRecord) -> Result<Self, Self::Error> {
        if record.converged {
            return Ok(ProjectionOutcome::Converged {
                months: record.months.unwrap_or(0),
            });
        }

        let reason = record.reason.unwrap_or_default();
        ProjectionFailure::from_reason(&reason)
            .map(ProjectionOutcome::Failed)
            .ok_or_else(|| format!("Unknown projection failure reason: {}", reason))
    }
}

/// One debt's movement within a simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtMonth {
    pub debt_id: String,
    pub opening: f64,
    pub interest: f64,
    pub minimum_paid: f64,
    pub extra_paid: f64,
    pub closing: f64,
}

impl DebtMonth {
    pub fn total_paid(&self) -> f64 {
        self.minimum_paid + self.extra_paid
    }
}

/// A single simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Month number (1-indexed)
    pub month: u32,

    pub opening_balance: f64,
    pub interest: f64,
    pub minimum_paid: f64,
    pub extra_paid: f64,

    /// Debt that received the extra payment, if any budget was left after minimums
    pub extra_target: Option<String>,

    /// Balance after payments and dust clamping
    pub closing_balance: f64,

    /// Budget left over because every debt was already covered
    pub unspent: f64,

    pub debts: Vec<DebtMonth>,
}

impl MonthRow {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            opening_balance: 0.0,
            interest: 0.0,
            minimum_paid: 0.0,
            extra_paid: 0.0,
            extra_target: None,
            closing_balance: 0.0,
            unspent: 0.0,
            debts: Vec::new(),
        }
    }

    pub fn debt(&self, debt_id: &str) -> Option<&DebtMonth> {
        self.debts.iter().find(|d| d.debt_id == debt_id)
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub outcome: ProjectionOutcome,

    /// Month-by-month detail; empty unless detailed output was requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<MonthRow>,
}

impl ProjectionResult {
    pub fn new(outcome: ProjectionOutcome) -> Self {
        Self {
            outcome,
            schedule: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: MonthRow) {
        self.schedule.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_interest: f64 = self.schedule.iter().map(|r| r.interest).sum();
        let total_paid: f64 = self
            .schedule
            .iter()
            .map(|r| r.minimum_paid + r.extra_paid)
            .sum();

        let mut payoffs: Vec<DebtPayoff> = Vec::new();
        for row in &self.schedule {
            for line in &row.debts {
                let idx = match payoffs.iter().position(|p| p.debt_id == line.debt_id) {
                    Some(idx) => idx,
                    None => {
                        payoffs.push(DebtPayoff {
                            debt_id: line.debt_id.clone(),
                            paid_off_month: None,
                        });
                        payoffs.len() - 1
                    }
                };
                let entry = &mut payoffs[idx];
                if entry.paid_off_month.is_none() && line.closing <= 0.0 {
                    entry.paid_off_month = Some(row.month);
                }
            }
        }

        ProjectionSummary {
            outcome: self.outcome,
            months_simulated: self.schedule.len() as u32,
            total_interest,
            total_paid,
            payoffs,
        }
    }
}

/// Month in which a single debt reached zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub debt_id: String,
    pub paid_off_month: Option<u32>,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub outcome: ProjectionOutcome,
    pub months_simulated: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub payoffs: Vec<DebtPayoff>,
}

/// Flat CSV line: one debt in one month
#[derive(Debug, Serialize)]
struct ScheduleCsvRow<'a> {
    month: u32,
    debt_id: &'a str,
    opening: f64,
    interest: f64,
    minimum_paid: f64,
    extra_paid: f64,
    closing: f64,
}

/// Write the per-debt schedule as CSV
pub fn write_schedule_csv<W: Write>(rows: &[MonthRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        for line in &row.debts {
            csv_writer.serialize(ScheduleCsvRow {
                month: row.month,
                debt_id: &line.debt_id,
                opening: line.opening,
                interest: line.interest,
                minimum_paid: line.minimum_paid,
                extra_paid: line.extra_paid,
                closing: line.closing,
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_wire_shape() {
        let ok = serde_json::to_value(ProjectionOutcome::Converged { months: 14 }).unwrap();
        assert_eq!(ok, serde_json::json!({ "converged": true, "months": 14 }));

        let failed = serde_json::to_value(ProjectionOutcome::Failed(ProjectionFailure::NoContribution)).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({ "converged": false, "reason": "no monthly contribution defined" })
        );
    }

    #[test]
    fn test_outcome_rejects_unknown_reason() {
        let parsed: Result<ProjectionOutcome, _> =
            serde_json::from_str(r#"{"converged":false,"reason":"bad luck"}"#);
        assert!(parsed.is_err());

        let parsed: ProjectionOutcome = serde_json::from_str(
            r#"{"converged":false,"reason":"does not converge (interest exceeds payment)"}"#,
        )
        .unwrap();
        assert_eq!(parsed.failure(), Some(ProjectionFailure::DoesNotConverge));
    }

    #[test]
    fn test_payoff_month() {
        let start: YearMonth = "2026-10".parse().unwrap();
        let outcome = ProjectionOutcome::Converged { months: 5 };
        assert_eq!(outcome.payoff_month(start).unwrap().to_string(), "2027-03");
        assert_eq!(
            ProjectionOutcome::Failed(ProjectionFailure::DoesNotConverge).payoff_month(start),
            None
        );
    }

    #[test]
    fn test_summary_tracks_payoff_months() {
        let mut result = ProjectionResult::new(ProjectionOutcome::Converged { months: 2 });
        let line = |id: &str, opening: f64, paid: f64| DebtMonth {
            debt_id: id.to_string(),
            opening,
            interest: 0.0,
            minimum_paid: paid,
            extra_paid: 0.0,
            closing: opening - paid,
        };

        let mut m1 = MonthRow::new(1);
        m1.minimum_paid = 150.0;
        m1.debts = vec![line("a", 50.0, 50.0), line("b", 200.0, 100.0)];
        result.add_row(m1);

        let mut m2 = MonthRow::new(2);
        m2.minimum_paid = 100.0;
        m2.debts = vec![line("a", 0.0, 0.0), line("b", 100.0, 100.0)];
        result.add_row(m2);

        let summary = result.summary();
        assert_eq!(summary.total_paid, 250.0);
        assert_eq!(summary.payoffs[0].paid_off_month, Some(1));
        assert_eq!(summary.payoffs[1].paid_off_month, Some(2));
    }

    #[test]
    fn test_schedule_csv_layout() {
        let mut row = MonthRow::new(1);
        row.debts.push(DebtMonth {
            debt_id: "card".to_string(),
            opening: 100.0,
            interest: 2.0,
            minimum_paid: 10.0,
            extra_paid: 5.0,
            closing: 87.0,
        });

        let mut buf = Vec::new();
        write_schedule_csv(&[row], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("month,debt_id,opening,interest,minimum_paid,extra_paid,closing")
        );
        assert_eq!(lines.next(), Some("1,card,100.0,2.0,10.0,5.0,87.0"));
    }
}
