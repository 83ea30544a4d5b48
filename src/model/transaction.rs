use crate::model::{find_category, Amount};
use crate::utils::generate_transaction_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The direction of a transaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Income, shown as "entries".
    Positive,
    /// Outflow, shown as "expenses".
    Negative,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single registered transaction.
///
/// Transactions are immutable once created. They are appended to the per-user sequence and
/// never edited in place. The JSON representation is:
///
/// ```json
/// {
///   "id": "0b6f4b64-5a0a-4b4e-9a8c-1f2d3c4b5a69",
///   "name": "Lunch",
///   "amount": "32.90",
///   "type": "negative",
///   "category": "food",
///   "date": "2026-10-15T15:04:05.123Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
    name: String,
    amount: Amount,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    category: String,
    date: DateTime<Utc>,
}

impl Transaction {
    /// Creates a transaction with a freshly generated ID. No validation is performed, see
    /// `TransactionForm` for that.
    pub fn new(
        name: impl Into<String>,
        amount: Amount,
        transaction_type: TransactionType,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_transaction_id(),
            name: name.into(),
            amount,
            transaction_type,
            category: category.into(),
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn is_entry(&self) -> bool {
        self.transaction_type == TransactionType::Positive
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Negative
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

/// The raw user input for a new transaction, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub name: String,
    pub amount: String,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
}

/// Why a `TransactionForm` was rejected. `Presentation::form_error` gives the localized message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    NameRequired,
    AmountRequired,
    AmountNotANumber(String),
    AmountNotPositive(Amount),
    AmountTooLarge(Amount),
    TypeRequired,
    CategoryRequired,
    UnknownCategory(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::NameRequired => write!(f, "The name is required"),
            FormError::AmountRequired => write!(f, "The amount is required"),
            FormError::AmountNotANumber(s) => write!(f, "The amount '{s}' is not a number"),
            FormError::AmountNotPositive(a) => {
                write!(f, "The amount must be greater than zero, got {a}")
            }
            FormError::AmountTooLarge(a) => {
                write!(f, "The amount must be at most {}, got {a}", Amount::MAX)
            }
            FormError::TypeRequired => write!(f, "Select the transaction type"),
            FormError::CategoryRequired => write!(f, "Select the category"),
            FormError::UnknownCategory(key) => write!(f, "Unknown category '{key}'"),
        }
    }
}

impl std::error::Error for FormError {}

impl TransactionForm {
    /// Validates the form and builds a `Transaction` dated `date`.
    ///
    /// # Errors
    /// - The name is blank.
    /// - The amount is missing, not a number, not strictly positive or above `Amount::MAX`.
    /// - The transaction type was not selected.
    /// - The category was not selected or is not one of `CATEGORIES`.
    pub fn into_transaction(self, date: DateTime<Utc>) -> Result<Transaction, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::NameRequired);
        }

        if self.amount.trim().is_empty() {
            return Err(FormError::AmountRequired);
        }
        let amount = Amount::from_str(&self.amount)
            .map_err(|_| FormError::AmountNotANumber(self.amount.clone()))?;
        if !amount.is_positive() {
            return Err(FormError::AmountNotPositive(amount));
        }
        if amount > Amount::MAX {
            return Err(FormError::AmountTooLarge(amount));
        }

        let Some(transaction_type) = self.transaction_type else {
            return Err(FormError::TypeRequired);
        };

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => return Err(FormError::CategoryRequired),
            Some(key) => match find_category(key) {
                Some(category) => category.key(),
                None => return Err(FormError::UnknownCategory(key.to_string())),
            },
        };

        Ok(Transaction::new(
            name,
            amount,
            transaction_type,
            category,
            date,
        ))
    }
}
