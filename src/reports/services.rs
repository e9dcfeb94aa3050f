use std::collections::HashMap;

use time::{Date, Month, OffsetDateTime};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::dto::{MonthlyReport, TopCategory};
use crate::{
    categories::repo_types::Category,
    error::AppError,
    store::Store,
    transactions::repo_types::{Transaction, TransactionType},
};

pub const TOP_CATEGORIES: usize = 5;

/// `[first instant of month, first instant of next month)` in UTC.
pub fn month_range(year: i32, month: u8) -> Result<(OffsetDateTime, OffsetDateTime), AppError> {
    let invalid = || AppError::Validation(format!("invalid month {year}-{month:02}"));
    let m = Month::try_from(month).map_err(|_| invalid())?;
    let start = Date::from_calendar_date(year, m, 1).map_err(|_| invalid())?;
    let (next_year, next_month) = match m {
        Month::December => (year + 1, Month::January),
        _ => (year, m.next()),
    };
    let end = Date::from_calendar_date(next_year, next_month, 1).map_err(|_| invalid())?;
    Ok((start.midnight().assume_utc(), end.midnight().assume_utc()))
}

/// Pure aggregation over one month's transactions.
///
/// Expenses are summed per category, the five largest sums are kept and
/// joined against `categories`; sums whose category no longer exists are
/// dropped from the ranking but stay in the totals. Equal sums are ordered
/// by category id.
pub fn build_report(
    year: i32,
    month: u8,
    transactions: &[Transaction],
    categories: &[Category],
) -> MonthlyReport {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut per_category: HashMap<Uuid, f64> = HashMap::new();

    for txn in transactions {
        match txn.kind {
            TransactionType::Income => total_income += txn.amount,
            TransactionType::Expense => {
                total_expenses += txn.amount;
                *per_category.entry(txn.category_id).or_insert(0.0) += txn.amount;
            }
        }
    }

    let mut ranked: Vec<(Uuid, f64)> = per_category.into_iter().collect();
    ranked.sort_by(|(a_id, a), (b_id, b)| b.total_cmp(a).then_with(|| a_id.cmp(b_id)));

    let by_id: HashMap<Uuid, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let top_categories = ranked
        .into_iter()
        .take(TOP_CATEGORIES)
        .filter_map(|(id, amount)| {
            by_id.get(&id).map(|c| TopCategory {
                category: c.name.clone(),
                amount,
                color: c.color.clone(),
            })
        })
        .collect();

    MonthlyReport {
        month: format!("{month:02}"),
        year,
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transactions_count: transactions.len(),
        top_categories,
    }
}

#[instrument(skip(store))]
pub async fn monthly_report(
    store: &dyn Store,
    user_id: Uuid,
    year: i32,
    month: u8,
) -> Result<MonthlyReport, AppError> {
    let (start, end) = month_range(year, month)?;
    let transactions = store.list_transactions_between(user_id, start, end).await?;
    let categories = store.list_categories(user_id).await?;
    debug!(count = transactions.len(), "transactions in range");
    Ok(build_report(year, month, &transactions, &categories))
}
