use crate::auth::IdentityProvider;
use crate::error::{Error, ErrorType, IntoResult, Result};
use crate::model::{Transaction, User};
use crate::storage::Store;
use anyhow::anyhow;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

const EVENT_CAPACITY: usize = 16;

/// A change in who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(User),
    SignedOut,
}

/// Tracks the signed in user and owns access to their data.
///
/// A `Session` is created once at startup with `restore`, which reads the persisted user from
/// the `Store`. Subscribers are notified of every sign-in and sign-out.
pub struct Session {
    store: Store,
    user: Option<User>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Creates a session, restoring the user that was signed in the last time, if any.
    pub async fn restore(store: Store) -> Result<Self> {
        let user = store.load_user().await.pub_result(ErrorType::Storage)?;
        match &user {
            Some(user) => debug!("Restored session for user {}", user.id()),
            None => debug!("No user is signed in"),
        }
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            store,
            user,
            events,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The signed in user, or an `Auth` error.
    pub fn require_user(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| Error::new(ErrorType::Auth, anyhow!("sign in first")))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Runs `provider` and, if it produced a user, persists and activates it.
    ///
    /// A cancelled flow and a failed flow are both reported as an `Auth` error and leave the
    /// session as it was. The user is only activated once it has been saved.
    pub async fn sign_in(&mut self, provider: &dyn IdentityProvider) -> Result<&User> {
        let user = match provider.authenticate().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!("The {} sign-in was cancelled", provider.name());
                return Err(Error::new(
                    ErrorType::Auth,
                    anyhow!("the {} sign-in was cancelled", provider.name()),
                ));
            }
            Err(e) => {
                warn!("The {} sign-in failed: {e:#}", provider.name());
                return Err(Error::new(
                    ErrorType::Auth,
                    e.context(format!("the {} sign-in failed", provider.name())),
                ));
            }
        };

        self.store
            .save_user(&user)
            .await
            .pub_result(ErrorType::Storage)?;
        info!("Signed in {} with {}", user.id(), provider.name());
        self.notify(SessionEvent::SignedIn(user.clone()));
        Ok(self.user.insert(user))
    }

    /// Removes the persisted user and clears the session. Transactions are kept. Signing out
    /// when nobody is signed in is not an error.
    pub async fn sign_out(&mut self) -> Result<()> {
        self.store.remove_user().await.pub_result(ErrorType::Storage)?;
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.id());
        }
        self.notify(SessionEvent::SignedOut);
        Ok(())
    }

    /// Loads the signed in user's transactions.
    pub async fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let user = self.require_user()?;
        self.store
            .load_transactions(user.id())
            .await
            .pub_result(ErrorType::Storage)
    }

    /// Appends a transaction for the signed in user and returns the new count.
    pub async fn append_transaction(&self, transaction: Transaction) -> Result<usize> {
        let user = self.require_user()?;
        self.store
            .append_transaction(user.id(), transaction)
            .await
            .pub_result(ErrorType::Storage)
    }

    fn notify(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            trace!("No session subscribers");
        }
    }
}
