//! Budget generation, variance analysis and expense summaries

mod analysis;
mod category;
mod expenses;
mod plan;

pub use analysis::{
    analyze, spending_by_category, BudgetAnalysis, CategoryVariance, ExpenseRecord, OverallStatus,
    VarianceStatus,
};
pub use category::BudgetCategory;
pub use expenses::{
    category_breakdown, load_expenses, load_expenses_from_reader, summarize_expenses, CategoryBreakdown,
    CategoryTotal, Expense, ExpenseSummary, MonthlyTotal, TOP_CATEGORY_COUNT, TREND_MONTHS,
};
pub use plan::{custom_plan, generate, BudgetDefaults, BudgetItem, BudgetPlan};
