use crate::model::{find_category, Transaction, TransactionType};
use crate::presentation::Presentation;
use chrono::TimeZone;
use serde::Serialize;

/// A transaction formatted for the dashboard list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub name: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    /// The category's display name, or its key when it is not in the table.
    pub category_name: String,
    pub icon: Option<String>,
    pub date: String,
}

/// Formats every transaction, in stored order.
pub fn transaction_rows<Tz: TimeZone>(
    transactions: &[Transaction],
    presentation: &Presentation,
    tz: &Tz,
) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|t| {
            let category = find_category(t.category());
            TransactionRow {
                id: t.id().to_string(),
                name: t.name().to_string(),
                amount: presentation.currency(t.amount().value()),
                transaction_type: t.transaction_type(),
                category: t.category().to_string(),
                category_name: category
                    .map(|c| c.name().to_string())
                    .unwrap_or_else(|| t.category().to_string()),
                icon: category.map(|c| c.icon().to_string()),
                date: presentation.short_date(t.date().with_timezone(tz).date_naive()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::presentation::Locale;
    use chrono::Utc;

    #[test]
    fn test_rows() {
        let date = Utc.with_ymd_and_hms(2026, 10, 5, 12, 0, 0).unwrap();
        let transactions = vec![
            Transaction::new(
                "Pizza",
                Amount::parse_lenient("59.9"),
                TransactionType::Negative,
                "food",
                date,
            ),
            Transaction::new(
                "Vet",
                Amount::parse_lenient("120"),
                TransactionType::Negative,
                "pets",
                date,
            ),
        ];
        let rows = transaction_rows(&transactions, &Presentation::new(Locale::PtBr), &Utc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Pizza");
        assert_eq!(rows[0].amount, "R$ 59,90");
        assert_eq!(rows[0].category_name, "Alimentação");
        assert_eq!(rows[0].icon.as_deref(), Some("coffee"));
        assert_eq!(rows[0].date, "05/10/26");
        assert_eq!(rows[1].category_name, "pets");
        assert_eq!(rows[1].icon, None);
    }
}
