//! Types that represent the core data model, such as `Transaction`, `Category` and `User`.
mod amount;
mod category;
mod transaction;
mod user;

pub use amount::{Amount, AmountError};
pub use category::{find_category, Category, CATEGORIES};
pub use transaction::{FormError, Transaction, TransactionForm, TransactionType};
pub use user::User;
