//! Per-category expense totals and percentages for one calendar month.

use crate::model::{Category, Transaction};
use crate::presentation::Presentation;
use crate::summary::{accumulate, SelectedMonth};
use chrono::TimeZone;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Expense totals for a month, before they are matched against the category table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyExpenses {
    /// Sum of the month's expenses grouped by category key.
    pub by_category: HashMap<String, Decimal>,
    /// Sum of all of the month's expenses, including any with an unknown category key.
    pub grand_total: Decimal,
}

/// Sums the negative transactions whose date, in time zone `tz`, falls within `month`.
pub fn monthly_expenses<Tz: TimeZone>(
    transactions: &[Transaction],
    month: &SelectedMonth,
    tz: &Tz,
) -> MonthlyExpenses {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| month.contains(t.date().with_timezone(tz).date_naive()))
        .fold(MonthlyExpenses::default(), |mut acc, t| {
            let amount = t.amount().value();
            let category_total = acc
                .by_category
                .entry(t.category().to_string())
                .or_insert(Decimal::ZERO);
            *category_total = accumulate(*category_total, amount);
            acc.grand_total = accumulate(acc.grand_total, amount);
            acc
        })
}

/// One slice of the category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub key: String,
    pub name: String,
    pub color: String,
    pub total: Decimal,
    pub total_formatted: String,
    /// `total` as a share of the month's expenses, in the range 0 to 100.
    pub percent: Decimal,
    pub percent_formatted: String,
}

/// Builds the breakdown rows, in the order of `categories`.
///
/// Categories without spending in the month are left out. When the month's grand total is zero
/// the result is empty.
pub fn category_breakdown<Tz: TimeZone>(
    transactions: &[Transaction],
    month: &SelectedMonth,
    categories: &[Category],
    presentation: &Presentation,
    tz: &Tz,
) -> Vec<CategoryBreakdown> {
    let expenses = monthly_expenses(transactions, month, tz);
    if expenses.grand_total <= Decimal::ZERO {
        return Vec::new();
    }

    categories
        .iter()
        .filter_map(|category| {
            let total = *expenses.by_category.get(category.key())?;
            if total <= Decimal::ZERO {
                return None;
            }
            let percent = percent_of(total, expenses.grand_total);
            Some(CategoryBreakdown {
                key: category.key().to_string(),
                name: category.name().to_string(),
                color: category.color().to_string(),
                total,
                total_formatted: presentation.currency(total),
                percent,
                percent_formatted: presentation.percent(percent),
            })
        })
        .collect()
}

/// `part` as a percentage of `whole`, which must be positive. Dividing first keeps large parts
/// from overflowing.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|p| p.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or_else(|| {
            warn!("Unable to compute {part} as a percentage of {whole}");
            Decimal::ZERO
        })
}
