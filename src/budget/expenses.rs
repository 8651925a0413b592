//! Expense records, summaries and CSV import

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::Reader;
use serde::{Deserialize, Serialize};

use super::analysis::{require_expense_amount, ExpenseRecord};
use super::category::BudgetCategory;
use crate::error::Result;
use crate::timevalue::round_money;

/// Months covered by the spending trend, current month included
pub const TREND_MONTHS: u32 = 6;

/// Categories listed in a summary's top spenders
pub const TOP_CATEGORY_COUNT: usize = 5;

/// A single dated expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub description: String,
    pub amount: f64,
    pub category: BudgetCategory,
    pub date: NaiveDate,
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        ExpenseRecord {
            category: expense.category,
            amount: expense.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// "YYYY-MM"
    pub month: String,
    pub amount: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: BudgetCategory,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total_expenses: f64,
    pub expenses_by_category: BTreeMap<BudgetCategory, f64>,
    /// Oldest month first
    pub monthly_trend: Vec<MonthlyTotal>,
    pub top_categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub total_amount: f64,
    pub transaction_count: usize,
    pub average_transaction: f64,
}

/// Totals, top categories and the six-month trend ending in `as_of`'s month
pub fn summarize_expenses(expenses: &[Expense], as_of: NaiveDate) -> Result<ExpenseSummary> {
    validate_expenses(expenses)?;

    let total: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut by_category: BTreeMap<BudgetCategory, f64> = BTreeMap::new();
    for expense in expenses {
        *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    let mut top: Vec<CategoryTotal> = by_category
        .iter()
        .map(|(&category, &amount)| CategoryTotal {
            category,
            amount: round_money(amount),
        })
        .collect();
    top.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    top.truncate(TOP_CATEGORY_COUNT);

    Ok(ExpenseSummary {
        total_expenses: round_money(total),
        expenses_by_category: by_category.into_iter().map(|(c, a)| (c, round_money(a))).collect(),
        monthly_trend: monthly_trend(expenses, as_of),
        top_categories: top,
    })
}

/// Per-category totals with transaction counts and averages
pub fn category_breakdown(expenses: &[Expense]) -> Result<BTreeMap<BudgetCategory, CategoryBreakdown>> {
    validate_expenses(expenses)?;

    let mut grouped: BTreeMap<BudgetCategory, (f64, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = grouped.entry(expense.category).or_insert((0.0, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    Ok(grouped
        .into_iter()
        .map(|(category, (total, count))| {
            (
                category,
                CategoryBreakdown {
                    total_amount: round_money(total),
                    transaction_count: count,
                    average_transaction: round_money(total / count as f64),
                },
            )
        })
        .collect())
}

fn validate_expenses(expenses: &[Expense]) -> Result<()> {
    expenses
        .iter()
        .try_for_each(|e| require_expense_amount(&e.description, e.amount))
}

fn monthly_trend(expenses: &[Expense], as_of: NaiveDate) -> Vec<MonthlyTotal> {
    let anchor = as_of.year() * 12 + as_of.month0() as i32;

    (0..TREND_MONTHS as i32)
        .rev()
        .map(|back| {
            let index = anchor - back;
            let (year, month) = (index.div_euclid(12), index.rem_euclid(12) as u32 + 1);

            let in_month: Vec<&Expense> = expenses
                .iter()
                .filter(|e| e.date.year() == year && e.date.month() == month)
                .collect();

            MonthlyTotal {
                month: format!("{:04}-{:02}", year, month),
                amount: round_money(in_month.iter().map(|e| e.amount).sum()),
                transaction_count: in_month.len(),
            }
        })
        .collect()
}

/// Raw CSV row: `date,description,category,amount`
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    description: String,
    category: String,
    amount: f64,
}

impl CsvRow {
    fn into_expense(self) -> Result<Expense> {
        require_expense_amount(&self.description, self.amount)?;

        Ok(Expense {
            category: self.category.parse()?,
            description: self.description,
            amount: self.amount,
            date: self.date,
        })
    }
}

/// Load expenses from any CSV reader
pub fn load_expenses_from_reader<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut expenses = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        expenses.push(row.into_expense()?);
    }

    Ok(expenses)
}

/// Load expenses from a CSV file
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
    let file = std::fs::File::open(path)?;
    load_expenses_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: BudgetCategory, amount: f64, date: NaiveDate) -> Expense {
        Expense {
            description: format!("{} purchase", category),
            amount,
            category,
            date,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(BudgetCategory::Food, 120.0, date(2026, 10, 2)),
            expense(BudgetCategory::Food, 80.5, date(2026, 9, 14)),
            expense(BudgetCategory::Housing, 1_400.0, date(2026, 10, 1)),
            expense(BudgetCategory::Entertainment, 60.0, date(2026, 5, 20)),
            expense(BudgetCategory::Transportation, 45.0, date(2026, 1, 3)),
            expense(BudgetCategory::Utilities, 90.0, date(2026, 10, 5)),
            expense(BudgetCategory::Healthcare, 30.0, date(2026, 8, 5)),
        ]
    }

    #[test]
    fn test_summary_totals_and_top_categories() {
        let summary = summarize_expenses(&sample(), date(2026, 10, 16)).unwrap();

        assert_eq!(summary.total_expenses, 1_825.5);
        assert_eq!(summary.expenses_by_category[&BudgetCategory::Food], 200.5);
        assert_eq!(summary.top_categories.len(), 5);
        assert_eq!(summary.top_categories[0].category, BudgetCategory::Housing);
        assert_eq!(summary.top_categories[1].category, BudgetCategory::Food);
    }

    #[test]
    fn test_monthly_trend_is_chronological() {
        let summary = summarize_expenses(&sample(), date(2026, 10, 16)).unwrap();
        let months: Vec<&str> = summary.monthly_trend.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2026-05", "2026-06", "2026-07", "2026-08", "2026-09", "2026-10"]);

        let october = summary.monthly_trend.last().unwrap();
        assert_eq!(october.amount, 1_610.0);
        assert_eq!(october.transaction_count, 3);

        // January is outside the window
        let trend_total: f64 = summary.monthly_trend.iter().map(|m| m.amount).sum();
        assert_eq!(trend_total, 1_780.5);
    }

    #[test]
    fn test_trend_crosses_year_boundary() {
        let summary = summarize_expenses(&[], date(2027, 2, 1)).unwrap();
        let months: Vec<&str> = summary.monthly_trend.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2026-09", "2026-10", "2026-11", "2026-12", "2027-01", "2027-02"]);
    }

    #[test]
    fn test_category_breakdown() {
        let breakdown = category_breakdown(&sample()).unwrap();
        let food = &breakdown[&BudgetCategory::Food];
        assert_eq!(food.transaction_count, 2);
        assert_eq!(food.total_amount, 200.5);
        assert_eq!(food.average_transaction, 100.25);
    }

    #[test]
    fn test_summaries_reject_unusable_amounts() {
        for bad in [f64::NAN, -25.0, 0.0] {
            let mut expenses = sample();
            expenses.push(expense(BudgetCategory::Food, bad, date(2026, 10, 9)));

            assert!(summarize_expenses(&expenses, date(2026, 10, 16)).is_err());
            assert!(category_breakdown(&expenses).is_err());
        }
    }

    #[test]
    fn test_load_from_reader() {
        let data = "date,description,category,amount\n\
                    2026-10-01,Rent,Housing,1400\n\
                    2026-10-03,Groceries,food,86.40\n";
        let expenses = load_expenses_from_reader(data.as_bytes()).unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category, BudgetCategory::Housing);
        assert_eq!(expenses[1].amount, 86.40);
        assert_eq!(expenses[1].date, date(2026, 10, 3));
    }

    #[test]
    fn test_load_rejects_unknown_category() {
        let data = "date,description,category,amount\n2026-10-01,Boat,yachting,10\n";
        assert!(load_expenses_from_reader(data.as_bytes()).is_err());
    }
}
