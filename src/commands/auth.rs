//! Command handlers for signing in and out.

use crate::auth::IdentityProvider;
use crate::commands::{open_session, Out};
use crate::model::User;
use crate::{Config, Result};

/// Handles `gofin sign-in`: runs `provider` and persists the resulting user.
///
/// # Errors
/// - `Auth` when the flow was cancelled or failed. Whoever was signed in before stays signed in.
/// - `Storage` when the user could not be saved.
pub async fn sign_in(config: Config, provider: &dyn IdentityProvider) -> Result<Out<User>> {
    let mut session = open_session(&config).await?;
    let user = session.sign_in(provider).await?.clone();
    Ok(Out::new(
        format!("Signed in as {} <{}>", user.name(), user.email()),
        user,
    ))
}

/// Handles `gofin sign-out`. The user's transactions are left in storage.
pub async fn sign_out(config: Config) -> Result<Out<()>> {
    let mut session = open_session(&config).await?;
    let message = match session.current_user() {
        Some(user) => format!("Signed out {}", user.name()),
        None => "Nobody was signed in".to_string(),
    };
    session.sign_out().await?;
    Ok(message.into())
}

/// Handles `gofin whoami`.
pub async fn whoami(config: Config) -> Result<Out<User>> {
    let session = open_session(&config).await?;
    Ok(match session.current_user() {
        Some(user) => Out::new(
            format!("{} <{}> ({})", user.name(), user.email(), user.id()),
            user.clone(),
        ),
        None => "Nobody is signed in".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AppleCredential, AppleProvider, LocalProvider};
    use crate::error::ErrorType;
    use crate::test::{test_user, TestEnv};

    #[tokio::test]
    async fn test_sign_in_whoami_sign_out() {
        let env = TestEnv::new().await;
        assert!(whoami(env.config()).await.unwrap().structure().is_none());

        let out = sign_in(env.config(), &LocalProvider::new(test_user()))
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&test_user()));

        let out = whoami(env.config()).await.unwrap();
        assert_eq!(out.structure(), Some(&test_user()));
        assert!(out.message().contains("ana@example.com"));

        let out = sign_out(env.config()).await.unwrap();
        assert_eq!(out.message(), "Signed out Ana");
        assert!(whoami(env.config()).await.unwrap().structure().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_sign_in() {
        let env = TestEnv::new().await;
        let e = sign_in(env.config(), &AppleProvider::new(None))
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Auth);
        assert!(whoami(env.config()).await.unwrap().structure().is_none());
    }

    #[tokio::test]
    async fn test_apple_sign_in() {
        let env = TestEnv::new().await;
        let provider = AppleProvider::new(Some(AppleCredential {
            user: "001.abc".to_string(),
            email: None,
            given_name: Some("Bia".to_string()),
        }));
        let out = sign_in(env.config(), &provider).await.unwrap();
        let user = out.structure().unwrap();
        assert_eq!(user.name(), "Bia");
        assert!(user.photo().unwrap().starts_with("https://ui-avatars.com/api/"));
    }
}
