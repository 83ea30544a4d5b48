//! Pure functions that turn a user's stored transactions into what the screens show.
//!
//! Nothing in here touches storage. Every summary is recomputed from the full transaction list.

mod breakdown;
mod highlight;
mod listing;
mod month;

pub use breakdown::{category_breakdown, monthly_expenses, CategoryBreakdown, MonthlyExpenses};
pub use highlight::{
    dashboard_totals, highlight_summary, DashboardTotals, HighlightCard, HighlightSummary,
};
pub use listing::{transaction_rows, TransactionRow};
pub use month::SelectedMonth;

use rust_decimal::Decimal;
use tracing::warn;

/// Adds `amount` to `sum`, saturating at the bounds of `Decimal` instead of panicking. Only
/// reachable through stored amounts that bypassed `Amount::MAX`.
fn accumulate(sum: Decimal, amount: Decimal) -> Decimal {
    sum.checked_add(amount).unwrap_or_else(|| {
        warn!("Adding {amount} to {sum} overflowed, the sum is capped");
        sum.saturating_add(amount)
    })
}

