//! Summarize an expense export and compare it with the default budget
//!
//! Usage: expense_report <expenses.csv> [--json]
//! Accepts config via environment variables:
//!   MONTHLY_INCOME (default 5000), PLANNER_REFERENCE_DIR, REPORT_AS_OF (YYYY-MM-DD)

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::warn;
use serde::Serialize;

use planning_engine::budget::{
    category_breakdown, load_expenses, summarize_expenses, BudgetAnalysis, CategoryBreakdown, ExpenseRecord,
    ExpenseSummary,
};
use planning_engine::{BudgetCategory, PlanningEngine};

const DEFAULT_MONTHLY_INCOME: f64 = 5000.0;

#[derive(Serialize)]
struct ReportResponse {
    source: String,
    monthly_income: f64,
    expense_count: usize,
    summary: ExpenseSummary,
    breakdown: BTreeMap<BudgetCategory, CategoryBreakdown>,
    analysis: BudgetAnalysis,
    execution_time_ms: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring unparsable {}={}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let path = env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .context("usage: expense_report <expenses.csv> [--json]")?;
    let start = Instant::now();

    let monthly_income: f64 = env_or("MONTHLY_INCOME", DEFAULT_MONTHLY_INCOME);
    let as_of: NaiveDate = env_or("REPORT_AS_OF", chrono::Local::now().date_naive());

    let engine = match env::var_os("PLANNER_REFERENCE_DIR") {
        Some(dir) => PlanningEngine::from_dir(Path::new(&dir))
            .with_context(|| format!("failed to load reference data from {}", Path::new(&dir).display()))?,
        None => PlanningEngine::new(),
    };

    let expenses = load_expenses(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();

    let plan = engine.generate_budget(monthly_income, &HashMap::new())?;
    let response = ReportResponse {
        source: path.display().to_string(),
        monthly_income,
        expense_count: expenses.len(),
        summary: summarize_expenses(&expenses, as_of)?,
        breakdown: category_breakdown(&expenses)?,
        analysis: engine.analyze_budget(&plan, &records)?,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Expense Report: {}", response.source);
    println!("======================\n");
    println!("  Transactions:   {}", response.expense_count);
    println!("  Total spent:    ${:.2}", response.summary.total_expenses);
    println!("  Monthly income: ${:.2}", monthly_income);
    println!();

    println!("Top categories:");
    for top in &response.summary.top_categories {
        println!("  {:<15} ${:>10.2}", top.category.as_str(), top.amount);
    }
    println!();

    println!("Monthly trend:");
    for month in &response.summary.monthly_trend {
        println!("  {}  ${:>10.2}  ({} txns)", month.month, month.amount, month.transaction_count);
    }
    println!();

    println!("{:<15} {:>10} {:>10} {:>10}", "Category", "Budgeted", "Actual", "Diff");
    for line in &response.analysis.categories {
        println!(
            "{:<15} {:>10.2} {:>10.2} {:>+10.2}",
            line.category.as_str(), line.budgeted, line.actual, line.difference
        );
    }
    if response.analysis.unbudgeted_spending > 0.0 {
        println!("{:<15} {:>10} {:>10.2}", "(unbudgeted)", "-", response.analysis.unbudgeted_spending);
    }
    println!();

    println!("Status: {:?}", response.analysis.overall_status);
    for rec in &response.analysis.recommendations {
        println!("  - {}", rec);
    }
    println!("\nCompleted in {} ms", response.execution_time_ms);

    Ok(())
}
