//! The dashboard's highlight summary: entries, expenses and their net total.

use crate::model::{Transaction, TransactionType};
use crate::presentation::Presentation;
use crate::summary::accumulate;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

/// The raw numbers behind the highlight cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    /// Sum of all positive transactions.
    pub entries: Decimal,
    /// Sum of all negative transactions, as a non-negative number.
    pub expenses: Decimal,
    /// The most recent positive transaction, `None` when there are none.
    pub last_entry: Option<DateTime<Utc>>,
    /// The most recent negative transaction, `None` when there are none.
    pub last_expense: Option<DateTime<Utc>>,
}

impl DashboardTotals {
    /// Entries minus expenses. May be negative.
    pub fn total(&self) -> Decimal {
        self.entries.checked_sub(self.expenses).unwrap_or_else(|| {
            warn!("The total of {} minus {} overflowed", self.entries, self.expenses);
            self.entries.saturating_sub(self.expenses)
        })
    }
}

/// Partitions `transactions` by type and sums each partition.
pub fn dashboard_totals(transactions: &[Transaction]) -> DashboardTotals {
    transactions
        .iter()
        .fold(DashboardTotals::default(), |mut totals, t| {
            let amount = t.amount().value();
            match t.transaction_type() {
                TransactionType::Positive => {
                    totals.entries = accumulate(totals.entries, amount);
                    totals.last_entry = latest(totals.last_entry, t.date());
                }
                TransactionType::Negative => {
                    totals.expenses = accumulate(totals.expenses, amount);
                    totals.last_expense = latest(totals.last_expense, t.date());
                }
            }
            totals
        })
}

fn latest(current: Option<DateTime<Utc>>, candidate: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Some(current.map_or(candidate, |c| c.max(candidate)))
}

/// One of the three cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightCard {
    pub amount: Decimal,
    pub amount_formatted: String,
    pub last_transaction: String,
}

/// The formatted highlight summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSummary {
    pub entries: HighlightCard,
    pub expenses: HighlightCard,
    pub total: HighlightCard,
}

impl HighlightSummary {
    /// Formats `totals`. Dates are converted to `tz` before their day and month are taken.
    ///
    /// The total card's label spans from the first of the month to the last expense; when there
    /// are no expenses it shows the "no transactions" label, like the other two cards do when
    /// their side is empty.
    pub fn new<Tz: TimeZone>(
        totals: &DashboardTotals,
        presentation: &Presentation,
        tz: &Tz,
    ) -> Self {
        let local = |d: DateTime<Utc>| d.with_timezone(tz).date_naive();
        let none = || presentation.no_transactions().to_string();

        let card = |amount: Decimal, last_transaction: String| HighlightCard {
            amount,
            amount_formatted: presentation.currency(amount),
            last_transaction,
        };

        Self {
            entries: card(
                totals.entries,
                totals
                    .last_entry
                    .map(|d| presentation.last_entry(local(d)))
                    .unwrap_or_else(none),
            ),
            expenses: card(
                totals.expenses,
                totals
                    .last_expense
                    .map(|d| presentation.last_expense(local(d)))
                    .unwrap_or_else(none),
            ),
            total: card(
                totals.total(),
                totals
                    .last_expense
                    .map(|d| presentation.total_interval(local(d)))
                    .unwrap_or_else(none),
            ),
        }
    }
}

/// Computes and formats the highlight summary in one step.
pub fn highlight_summary<Tz: TimeZone>(
    transactions: &[Transaction],
    presentation: &Presentation,
    tz: &Tz,
) -> HighlightSummary {
    HighlightSummary::new(&dashboard_totals(transactions), presentation, tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::presentation::Locale;
    use std::str::FromStr;

    fn tx(kind: TransactionType, amount: &str, category: &str, d: (i32, u32, u32)) -> Transaction {
        Transaction::new(
            "t",
            Amount::parse_lenient(amount),
            kind,
            category,
            Utc.with_ymd_and_hms(d.0, d.1, d.2, 12, 0, 0).unwrap(),
        )
    }

    fn pt() -> Presentation {
        Presentation::new(Locale::PtBr)
    }

    #[test]
    fn test_empty() {
        let totals = dashboard_totals(&[]);
        assert_eq!(totals.entries, Decimal::ZERO);
        assert_eq!(totals.expenses, Decimal::ZERO);
        assert_eq!(totals.total(), Decimal::ZERO);

        let summary = HighlightSummary::new(&totals, &pt(), &Utc);
        assert_eq!(summary.entries.last_transaction, "Não há transações");
        assert_eq!(summary.expenses.last_transaction, "Não há transações");
        assert_eq!(summary.total.last_transaction, "Não há transações");
        assert_eq!(summary.total.amount_formatted, "R$ 0,00");
    }

    #[test]
    fn test_entry_and_expense() {
        let transactions = vec![
            tx(TransactionType::Positive, "500", "salary", (2026, 10, 1)),
            tx(TransactionType::Negative, "200", "food", (2026, 10, 3)),
        ];
        let totals = dashboard_totals(&transactions);
        assert_eq!(totals.entries, Decimal::from(500));
        assert_eq!(totals.expenses, Decimal::from(200));
        assert_eq!(totals.total(), Decimal::from(300));

        let summary = HighlightSummary::new(&totals, &pt(), &Utc);
        assert_eq!(summary.entries.amount_formatted, "R$ 500,00");
        assert_eq!(summary.expenses.amount_formatted, "R$ 200,00");
        assert_eq!(summary.total.amount_formatted, "R$ 300,00");
        assert_eq!(
            summary.entries.last_transaction,
            "Ultima entrada dia 1 de outubro"
        );
        assert_eq!(
            summary.expenses.last_transaction,
            "Ultima saída dia 3 de outubro"
        );
        assert_eq!(summary.total.last_transaction, "01 a 3 de outubro");
    }

    #[test]
    fn test_net_may_be_negative() {
        let transactions = vec![
            tx(TransactionType::Positive, "10.10", "salary", (2026, 1, 1)),
            tx(TransactionType::Negative, "20.20", "car", (2026, 1, 2)),
        ];
        let totals = dashboard_totals(&transactions);
        assert_eq!(totals.total(), Decimal::from_str("-10.10").unwrap());
        assert_eq!(totals.entries - totals.expenses, totals.total());
    }

    #[test]
    fn test_last_date_is_maximum_not_last_stored() {
        let transactions = vec![
            tx(TransactionType::Negative, "1", "food", (2026, 5, 20)),
            tx(TransactionType::Negative, "1", "food", (2026, 5, 2)),
            tx(TransactionType::Positive, "1", "salary", (2025, 12, 31)),
            tx(TransactionType::Positive, "1", "salary", (2026, 2, 1)),
        ];
        let totals = dashboard_totals(&transactions);
        assert_eq!(
            totals.last_expense,
            Some(Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap())
        );
        assert_eq!(
            totals.last_entry,
            Some(Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_only_entries() {
        let transactions = vec![tx(TransactionType::Positive, "50", "salary", (2026, 7, 9))];
        let summary = highlight_summary(&transactions, &pt(), &Utc);
        assert_eq!(
            summary.entries.last_transaction,
            "Ultima entrada dia 9 de julho"
        );
        assert_eq!(summary.expenses.last_transaction, "Não há transações");
        assert_eq!(summary.total.last_transaction, "Não há transações");
    }

    #[test]
    fn test_malformed_amount_counts_as_zero() {
        let transactions = vec![
            tx(TransactionType::Positive, "not a number", "salary", (2026, 7, 9)),
            tx(TransactionType::Positive, "5", "salary", (2026, 7, 9)),
        ];
        let totals = dashboard_totals(&transactions);
        assert_eq!(totals.entries, Decimal::from(5));
    }

    #[test]
    fn test_many_transactions_at_the_largest_amount() {
        let largest = Amount::MAX.to_string();
        let transactions: Vec<_> = (0..10_000)
            .map(|_| tx(TransactionType::Negative, &largest, "food", (2026, 7, 9)))
            .collect();
        let totals = dashboard_totals(&transactions);
        assert_eq!(
            totals.expenses,
            Amount::MAX.value() * Decimal::from(10_000)
        );
        assert_eq!(totals.total(), -totals.expenses);
        let summary = HighlightSummary::new(&totals, &pt(), &Utc);
        assert_eq!(
            summary.expenses.amount_formatted,
            "R$ 10.000.000.000.000.000,00"
        );
    }

    #[test]
    fn test_overflowing_sum_is_capped() {
        // stored values, never accepted by the register form
        let huge = "50000000000000000000000000000";
        let negative_huge = format!("-{huge}");
        let d = (2026, 7, 9);
        let transactions = vec![
            tx(TransactionType::Negative, huge, "food", d),
            tx(TransactionType::Negative, huge, "food", d),
            tx(TransactionType::Positive, &negative_huge, "salary", d),
            tx(TransactionType::Positive, &negative_huge, "salary", d),
        ];
        let totals = dashboard_totals(&transactions);
        assert_eq!(totals.expenses, Decimal::MAX);
        assert_eq!(totals.entries, Decimal::MIN);
        assert_eq!(totals.total(), Decimal::MIN);
        HighlightSummary::new(&totals, &pt(), &Utc);
    }

    #[test]
    fn test_labels_use_time_zone() {
        let transactions = vec![Transaction::new(
            "late",
            Amount::parse_lenient("1"),
            TransactionType::Negative,
            "food",
            Utc.with_ymd_and_hms(2026, 10, 1, 1, 0, 0).unwrap(),
        )];
        let sao_paulo = chrono::FixedOffset::west_opt(3 * 3600).unwrap();
        let summary = highlight_summary(&transactions, &pt(), &sao_paulo);
        assert_eq!(
            summary.expenses.last_transaction,
            "Ultima saída dia 30 de setembro"
        );
    }
}
