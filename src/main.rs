//! Planning Engine CLI
//!
//! Usage:
//!   planning_engine simulate savings_rate --params '{"annual_income": 80000}'
//!   planning_engine scenarios
//!   planning_engine budget --income 5000 --set savings=0.25
//!   planning_engine analyze --income 5000 --expenses data/expenses.csv
//!   planning_engine goal --target 20000 --current 1000 --contribution 500
//!   planning_engine risk --age 34 --income 85000 --horizon 20 --goal retirement
//!   planning_engine term "Roth IRA"
//!   planning_engine ask "how should I budget?"
//!
//! Reference tables come from `--reference-dir`, then `PLANNER_REFERENCE_DIR`,
//! then the built-in defaults.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Months, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

use planning_engine::budget::{load_expenses, BudgetCategory, ExpenseRecord};
use planning_engine::risk::{risk_score, InvestmentRecommendation, RiskTier, UserFinancialProfile};
use planning_engine::{EstimateMode, PlanningEngine, SavingsGoal};

#[derive(Parser)]
#[command(name = "planning_engine", version, about = "Personal financial projection and budgeting")]
struct Cli {
    /// Directory holding budget_defaults.csv and financial_terms.json
    #[arg(long, global = true)]
    reference_dir: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a what-if scenario
    Simulate {
        /// savings_rate, investment_return or retirement
        scenario: String,
        /// Parameters as a JSON object; omitted fields take defaults
        #[arg(long)]
        params: Option<String>,
    },
    /// List available scenarios and their parameters
    Scenarios,
    /// Generate a budget from the default allocation
    Budget {
        #[arg(long)]
        income: f64,
        /// Override a category share, e.g. savings=0.25
        #[arg(long = "set", value_parser = parse_pair)]
        overrides: Vec<(BudgetCategory, f64)>,
        /// Use exact amounts instead of the defaults, e.g. housing=1800
        #[arg(long = "amount", value_parser = parse_pair, conflicts_with = "overrides")]
        amounts: Vec<(BudgetCategory, f64)>,
    },
    /// Compare actual spending from a CSV against the default budget
    Analyze {
        #[arg(long)]
        income: f64,
        /// CSV with date,description,category,amount
        #[arg(long)]
        expenses: PathBuf,
    },
    /// Predict when a savings goal is reached
    Goal {
        #[arg(long, default_value = "Savings goal")]
        name: String,
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        #[arg(long)]
        contribution: f64,
        /// Annual expected return (defaults to 0.05)
        #[arg(long)]
        rate: Option<f64>,
        /// Target date (YYYY-MM-DD); defaults to one year from today
        #[arg(long)]
        by: Option<NaiveDate>,
        /// Compound the balance monthly instead of the linear estimate
        #[arg(long)]
        compounding: bool,
    },
    /// Classify risk tolerance and suggest a portfolio
    Risk {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        income: f64,
        /// Investment horizon in years
        #[arg(long)]
        horizon: u32,
        #[arg(long = "goal")]
        goals: Vec<String>,
        /// Stated tolerance; the scored tier is used when omitted
        #[arg(long)]
        tolerance: Option<RiskTier>,
    },
    /// Look up a financial term
    Term { term: String },
    /// Ask a free-text question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
}

fn parse_pair(s: &str) -> std::result::Result<(BudgetCategory, f64), String> {
    let (category, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=VALUE, got '{}'", s))?;
    let category: BudgetCategory = category.parse().map_err(|e| format!("{}", e))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    Ok((category, value))
}

#[derive(Serialize)]
struct RiskReport {
    score: u32,
    risk_level: RiskTier,
    recommendation: InvestmentRecommendation,
}

fn load_engine(reference_dir: Option<PathBuf>) -> Result<PlanningEngine> {
    let dir = reference_dir.or_else(|| env::var_os("PLANNER_REFERENCE_DIR").map(PathBuf::from));
    match dir {
        Some(dir) => PlanningEngine::from_dir(&dir)
            .with_context(|| format!("failed to load reference data from {}", dir.display())),
        None => {
            info!("using built-in reference tables");
            Ok(PlanningEngine::new())
        }
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

fn parse_params(raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(raw).context("--params is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("--params must be a JSON object"),
    }
}

fn expense_records(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let expenses = load_expenses(path).with_context(|| format!("failed to read expenses from {}", path.display()))?;
    Ok(expenses.iter().map(ExpenseRecord::from).collect())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let engine = load_engine(cli.reference_dir)?;
    let compact = cli.compact;

    match cli.command {
        Commands::Simulate { scenario, params } => {
            let params = parse_params(params.as_deref())?;
            let outcome = engine.simulate_scenario(&scenario, &params)?;
            print_json(&outcome, compact)
        }
        Commands::Scenarios => print_json(&engine.available_scenarios(), compact),
        Commands::Budget {
            income,
            overrides,
            amounts,
        } => {
            let plan = if amounts.is_empty() {
                let overrides: HashMap<BudgetCategory, f64> = overrides.into_iter().collect();
                engine.generate_budget(income, &overrides)?
            } else {
                engine.custom_budget(income, &amounts)?
            };
            print_json(&plan, compact)
        }
        Commands::Analyze { income, expenses } => {
            let records = expense_records(&expenses)?;
            let plan = engine.generate_budget(income, &HashMap::new())?;
            print_json(&engine.analyze_budget(&plan, &records)?, compact)
        }
        Commands::Goal {
            name,
            target,
            current,
            contribution,
            rate,
            by,
            compounding,
        } => {
            let target_date = match by {
                Some(date) => date,
                None => chrono::Local::now()
                    .date_naive()
                    .checked_add_months(Months::new(12))
                    .context("target date out of range")?,
            };
            let goal = SavingsGoal::new(name, target, current, target_date, 3);
            let mode = if compounding {
                EstimateMode::Compounding
            } else {
                EstimateMode::Linear
            };
            print_json(&engine.predict_goal_achievement(&goal, contribution, rate, mode)?, compact)
        }
        Commands::Risk {
            age,
            income,
            horizon,
            goals,
            tolerance,
        } => {
            let tier = engine.classify_risk(age, income, horizon, &goals);
            let profile = UserFinancialProfile {
                age,
                income,
                risk_tolerance: tolerance.unwrap_or(tier),
                time_horizon: horizon,
                goals: goals.clone(),
            };
            let report = RiskReport {
                score: risk_score(age, income, horizon, &goals),
                risk_level: tier,
                recommendation: engine.recommend_investments(&profile)?,
            };
            print_json(&report, compact)
        }
        Commands::Term { term } => print_json(&engine.lookup_term(&term), compact),
        Commands::Ask { question } => {
            println!("{}", engine.respond(&question.join(" ")));
            Ok(())
        }
    }
}
