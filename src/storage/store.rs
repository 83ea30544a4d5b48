use crate::error::Res;
use crate::model::{Transaction, User};
use crate::storage::Storage;
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, warn};

/// The namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "@gofinances";

/// Typed access to the records kept in a `Storage`.
///
/// Keys are laid out as:
/// - `<namespace>:user` holds the signed in `User`.
/// - `<namespace>:transactions_user:<user id>` holds that user's transactions as a JSON array,
///   in the order they were registered.
#[derive(Clone)]
pub struct Store {
    storage: Arc<dyn Storage>,
    namespace: String,
}

impl Store {
    pub fn new(storage: Arc<dyn Storage>, namespace: impl Into<String>) -> Self {
        Self {
            storage,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn user_key(&self) -> String {
        format!("{}:user", self.namespace)
    }

    pub fn transactions_key(&self, user_id: &str) -> String {
        format!("{}:transactions_user:{user_id}", self.namespace)
    }

    /// Loads the signed in user, if any.
    ///
    /// A record that cannot be parsed is logged and treated as if nobody were signed in.
    pub async fn load_user(&self) -> Res<Option<User>> {
        let key = self.user_key();
        let Some(json) = self.storage.get(&key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Ignoring the unreadable user record under '{key}': {e}");
                Ok(None)
            }
        }
    }

    pub async fn save_user(&self, user: &User) -> Res<()> {
        let json = serde_json::to_string(user).context("Unable to serialize the user")?;
        self.storage.set(&self.user_key(), &json).await
    }

    /// Removes the user record. Transactions are left in place.
    pub async fn remove_user(&self) -> Res<()> {
        self.storage.remove(&self.user_key()).await
    }

    /// Loads all of a user's transactions. A user without any gets an empty list.
    ///
    /// # Errors
    /// - The storage read fails.
    /// - The stored value is not a JSON array of transactions.
    pub async fn load_transactions(&self, user_id: &str) -> Res<Vec<Transaction>> {
        let key = self.transactions_key(user_id);
        match self.storage.get(&key).await? {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("The transactions stored under '{key}' are corrupt")),
        }
    }

    /// Appends `transaction` to the user's sequence by reading the whole sequence, appending and
    /// writing it back. Returns the new number of transactions.
    pub async fn append_transaction(&self, user_id: &str, transaction: Transaction) -> Res<usize> {
        let mut transactions = self.load_transactions(user_id).await?;
        transactions.push(transaction);
        let json = serde_json::to_string(&transactions)
            .context("Unable to serialize the transactions")?;
        self.storage
            .set(&self.transactions_key(user_id), &json)
            .await?;
        debug!(
            "Saved {} transactions for user {user_id}",
            transactions.len()
        );
        Ok(transactions.len())
    }
}
