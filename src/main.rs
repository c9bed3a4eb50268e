//! Debt Payoff CLI
//!
//! Command-line interface for projecting, comparing and recording debt payments

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::info;

use debt_payoff::debts::{load_debts_csv, load_ledger, save_ledger, DebtLedger, DebtStatus};
use debt_payoff::household::{load_workbook, DebtGoalStatus, ReserveEta};
use debt_payoff::projection::{
    write_schedule_csv, ProjectionConfig, ProjectionEngine, MAX_PROJECTION_MONTHS,
};
use debt_payoff::{ScenarioRunner, Strategy, YearMonth};

#[derive(Debug, Parser)]
#[command(name = "debt_payoff", version, about = "Debt payoff projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project months to payoff for a ledger
    Project {
        #[command(flatten)]
        source: Source,

        /// Write the per-debt schedule to this CSV file
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
    /// Compare avalanche and snowball for the same budget
    Compare {
        #[command(flatten)]
        source: Source,
    },
    /// Project across a range of monthly budgets
    Sweep {
        #[command(flatten)]
        source: Source,

        #[arg(long)]
        from: f64,

        #[arg(long)]
        to: f64,

        #[arg(long, default_value_t = 100.0)]
        step: f64,
    },
    /// Record a payment against a debt in a ledger file
    Pay {
        /// Ledger JSON file (rewritten in place)
        #[arg(long)]
        ledger: PathBuf,

        /// Debt id
        #[arg(long)]
        debt: String,

        #[arg(long)]
        amount: f64,

        /// Payment date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Monthly summary and goals for a household workbook
    Summary {
        #[arg(long)]
        workbook: PathBuf,
    },
}

/// Where the debts come from, plus overrides for the ledger's own settings
#[derive(Debug, Args)]
struct Source {
    /// Ledger JSON file
    #[arg(long, conflicts_with = "csv", required_unless_present = "csv")]
    ledger: Option<PathBuf>,

    /// Debts CSV file (name,balance,apr_monthly_pct,min_pay_monthly,...)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Monthly budget (overrides the ledger's)
    #[arg(long)]
    budget: Option<f64>,

    /// avalanche or snowball (overrides the ledger's)
    #[arg(long)]
    strategy: Option<String>,

    /// Give up after this many months
    #[arg(long, default_value_t = MAX_PROJECTION_MONTHS)]
    max_months: u32,
}

impl Source {
    fn load(&self) -> Result<DebtLedger> {
        let mut ledger = match (&self.ledger, &self.csv) {
            (Some(path), _) => load_ledger(path)
                .with_context(|| format!("Failed to load ledger {}", path.display()))?,
            (None, Some(path)) => {
                let debts = load_debts_csv(path)
                    .with_context(|| format!("Failed to load debts {}", path.display()))?;
                DebtLedger {
                    debts,
                    ..Default::default()
                }
            }
            (None, None) => bail!("Either --ledger or --csv is required"),
        };

        if let Some(budget) = self.budget {
            ledger.set_budget(budget);
        }
        if let Some(strategy) = &self.strategy {
            ledger.set_strategy(Strategy::from_name(strategy));
        }
        Ok(ledger)
    }

    fn config(&self) -> ProjectionConfig {
        ProjectionConfig {
            max_months: self.max_months,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project { source, schedule } => run_project(&source, schedule),
        Command::Compare { source } => run_compare(&source),
        Command::Sweep { source, from, to, step } => run_sweep(&source, from, to, step),
        Command::Pay { ledger, debt, amount, date } => run_pay(ledger, &debt, amount, date),
        Command::Summary { workbook } => run_summary(workbook),
    }
}

fn print_ledger(ledger: &DebtLedger) {
    println!(
        "{:<38} {:<20} {:>12} {:>8} {:>10} {:>5} {:>8}",
        "Id", "Name", "Balance", "Rate", "Minimum", "Due", "Status"
    );
    println!("{}", "-".repeat(107));

    for debt in &ledger.debts {
        let due = debt.due_day.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let status = match debt.status() {
            DebtStatus::Active => "active",
            DebtStatus::Settled => "settled",
        };
        println!(
            "{:<38} {:<20} {:>12.2} {:>7.2}% {:>10.2} {:>5} {:>8}",
            debt.id, debt.name, debt.balance, debt.apr_monthly_pct, debt.min_pay_monthly, due, status
        );
    }

    println!();
    println!("  Total owed:     {:.2}", ledger.total_balance());
    println!("  Total minimums: {:.2}", ledger.total_minimums());
    println!("  Total paid:     {:.2}", ledger.total_paid());
    println!("  Budget:         {:.2} ({})", ledger.budget_monthly, ledger.strategy);
}

fn run_project(source: &Source, schedule: Option<PathBuf>) -> Result<()> {
    let ledger = source.load()?;
    print_ledger(&ledger);

    let engine = ProjectionEngine::new(ProjectionConfig {
        detailed_output: true,
        ..source.config()
    });
    let result = ledger.project(&engine);
    let summary = result.summary();

    println!("\nProjection: {}", result.outcome);
    if let Some(month) = result.outcome.payoff_month(YearMonth::current()) {
        println!("  Debt free in:   {}", month);
        println!("  Total interest: {:.2}", summary.total_interest);
        println!("  Total paid:     {:.2}", summary.total_paid);
        for payoff in &summary.payoffs {
            let name = ledger.debt(&payoff.debt_id).map(|d| d.name.as_str()).unwrap_or("?");
            match payoff.paid_off_month {
                Some(m) => println!("    {:<20} paid off in month {}", name, m),
                None => println!("    {:<20} still open", name),
            }
        }
    }

    if let Some(path) = schedule {
        let file = File::create(&path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        write_schedule_csv(&result.schedule, BufWriter::new(file))?;
        info!("Schedule written to {}", path.display());
        println!("\nSchedule written to: {}", path.display());
    }

    Ok(())
}

fn run_compare(source: &Source) -> Result<()> {
    let ledger = source.load()?;
    let runner = ScenarioRunner::with_config(source.config());
    let comparison = runner.compare_strategies(&ledger.snapshots(), ledger.budget_monthly);

    println!("Budget {:.2}/month", comparison.budget);
    println!("{:<10} {:>24} {:>14} {:>14}", "Strategy", "Result", "Interest", "Paid");
    for (strategy, summary) in [
        (Strategy::Avalanche, &comparison.avalanche),
        (Strategy::Snowball, &comparison.snowball),
    ] {
        println!(
            "{:<10} {:>24} {:>14.2} {:>14.2}",
            strategy.as_str(),
            summary.outcome.to_string(),
            summary.total_interest,
            summary.total_paid
        );
    }

    println!("\nFaster: {}", comparison.faster());
    println!("Interest saved by avalanche: {:.2}", comparison.interest_saved_by_avalanche());
    Ok(())
}

fn run_sweep(source: &Source, from: f64, to: f64, step: f64) -> Result<()> {
    if !(step > 0.0) || !(to >= from) {
        bail!("Sweep needs step > 0 and to >= from");
    }

    let ledger = source.load()?;
    let steps = ((to - from) / step).floor() as usize;
    let budgets: Vec<f64> = (0..=steps).map(|i| from + step * i as f64).collect();

    let runner = ScenarioRunner::with_config(source.config());
    let points = runner.budget_sweep(&ledger.snapshots(), &budgets, ledger.strategy);

    println!("{:>12} {}", "Budget", "Result");
    for point in &points {
        println!("{:>12.2} {}", point.budget, point.outcome);
    }
    Ok(())
}

fn run_pay(path: PathBuf, debt_id: &str, amount: f64, date: Option<NaiveDate>) -> Result<()> {
    let mut ledger = load_ledger(&path)
        .with_context(|| format!("Failed to load ledger {}", path.display()))?;

    let payment = ledger.register_payment(debt_id, amount, date)?.clone();
    save_ledger(&ledger, &path)
        .with_context(|| format!("Failed to save ledger {}", path.display()))?;

    let balance = ledger.debt(debt_id).map(|d| d.balance).unwrap_or(0.0);
    println!(
        "Recorded {:.2} on {} ({}), balance now {:.2}",
        payment.amount, payment.date, payment.debt_id, balance
    );
    Ok(())
}

fn run_summary(path: PathBuf) -> Result<()> {
    let workbook = load_workbook(&path)
        .with_context(|| format!("Failed to load workbook {}", path.display()))?;
    let finance = &workbook.finance;
    let today = Local::now().date_naive();

    let s = finance.monthly_summary();
    println!("Monthly summary");
    println!("  Income:          {:.2}", s.income_total);
    println!("  Fixed costs:     {:.2}", s.fixed);
    println!("  Contributions:   {:.2}", s.contributions);
    println!("  Left over:       {:.2}", s.left);
    println!("  Debt after:      {:.2}", s.debt_after);
    println!("  Reserve after:   {:.2}", s.reserve_after);
    println!("  6x reserve goal: {:.2}", s.reserve_goal_6x);
    match s.months_to_pay {
        Some(m) => println!("  Months to pay:   {}", m),
        None => println!("  Months to pay:   -"),
    }
    println!(
        "  Fixed {:.0}% | Debt {:.0}% | Reserve {:.0}% | Left {:.0}%",
        s.shares.fixed, s.shares.debt, s.shares.reserve, s.shares.left
    );

    let goals = finance.goals(today);
    println!("\nGoals");
    let debt_eta = goals.debt_eta.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
    println!("  Debt ETA:        {}", debt_eta);
    let status = match goals.debt_status {
        DebtGoalStatus::NoTarget => "no target month set",
        DebtGoalStatus::NoContribution => "no payment",
        DebtGoalStatus::OnTrack => "on track",
        DebtGoalStatus::OffTrack => "behind target",
    };
    println!("  Debt goal:       {}", status);
    println!("  Reserve goal:    {:.2}", goals.reserve_goal);
    match goals.reserve_eta {
        ReserveEta::Reached => println!("  Reserve ETA:     reached"),
        ReserveEta::Months(m) => println!("  Reserve ETA:     {} month(s)", m),
        ReserveEta::NoContribution => println!("  Reserve ETA:     no contribution"),
    }

    let daily = finance.daily();
    println!("\nDaily: {:.2}/day, {:.2}/month", daily.left_per_day, daily.left_per_month);

    if let Some(ledger) = &workbook.debts {
        println!();
        print_ledger(ledger);
        let outcome = ledger.project(&ProjectionEngine::default()).outcome;
        println!("  Projection:     {}", outcome);
    }

    Ok(())
}
