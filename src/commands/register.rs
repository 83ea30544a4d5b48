use crate::commands::{open_session, Out};
use crate::error::{Error, ErrorType};
use crate::model::{Transaction, TransactionForm};
use crate::{Config, Result};
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Handles `gofin register`: validates `form` and appends the new transaction, dated now, to the
/// signed in user's transactions.
///
/// # Errors
/// - `Auth` when nobody is signed in.
/// - `Validation` when the form is incomplete or invalid. Nothing is saved.
/// - `Storage` when the transaction could not be saved.
pub async fn register(config: Config, form: TransactionForm) -> Result<Out<Transaction>> {
    register_at(config, form, Utc::now()).await
}

async fn register_at(
    config: Config,
    form: TransactionForm,
    now: DateTime<Utc>,
) -> Result<Out<Transaction>> {
    let session = open_session(&config).await?;
    session.require_user()?;
    let presentation = config.presentation();
    let transaction = form.into_transaction(now).map_err(|e| {
        debug!("Rejected the transaction form: {e}");
        Error::new(ErrorType::Validation, anyhow!(presentation.form_error(&e)))
    })?;
    let count = session.append_transaction(transaction.clone()).await?;
    debug!("Registered transaction {}", transaction.id());

    Ok(Out::new(
        format!(
            "Registered '{}' ({} {}), {count} transactions in total",
            transaction.name(),
            transaction.transaction_type(),
            presentation.currency(transaction.amount().value()),
        ),
        transaction,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::presentation::Locale;
    use crate::test::TestEnv;
    use chrono::TimeZone;

    fn form() -> TransactionForm {
        TransactionForm {
            name: "Pizza".to_string(),
            amount: "59.90".to_string(),
            transaction_type: Some(TransactionType::Negative),
            category: Some("food".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register() {
        let env = TestEnv::new().await;
        let user = env.seed(Vec::new()).await;
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap();

        let out = register_at(env.config(), form(), now).await.unwrap();
        assert!(out.message().contains("R$ 59,90"));
        assert!(out.message().contains("1 transactions"));
        let registered = out.structure().unwrap();
        assert_eq!(registered.date(), now);

        let store = env.config().store().await.unwrap();
        let stored = store.load_transactions(user.id()).await.unwrap();
        assert_eq!(stored, vec![registered.clone()]);
    }

    #[tokio::test]
    async fn test_register_invalid_saves_nothing() {
        let env = TestEnv::new().await;
        let user = env.seed(Vec::new()).await;
        let invalid = TransactionForm {
            category: None,
            ..form()
        };

        let e = register(env.config(), invalid).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Validation);
        assert_eq!(e.user_message(), "Selecione a categoria");

        let store = env.config().store().await.unwrap();
        assert!(store.load_transactions(user.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_amount_above_max() {
        let env = TestEnv::with_locale(Locale::EnUs).await;
        let user = env.seed(Vec::new()).await;
        let huge = TransactionForm {
            amount: "50000000000000000000000000000".to_string(),
            ..form()
        };

        let e = register(env.config(), huge).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Validation);
        assert!(e.user_message().starts_with("The amount must be at most"));

        let store = env.config().store().await.unwrap();
        assert!(store.load_transactions(user.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_requires_sign_in() {
        let env = TestEnv::new().await;
        let e = register(env.config(), form()).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Auth);
    }
}
