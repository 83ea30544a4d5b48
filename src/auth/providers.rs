use crate::auth::IdentityProvider;
use crate::error::Res;
use crate::model::User;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::debug;

const AVATAR_URL: &str = "https://ui-avatars.com/api/";

/// A provider that signs in a profile given up front, e.g. from command line arguments.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    user: User,
}

impl LocalProvider {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for LocalProvider {
    fn name(&self) -> &str {
        "local"
    }

    async fn authenticate(&self) -> Res<Option<User>> {
        Ok(Some(self.user.clone()))
    }
}

/// The profile returned by a successful Google sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<GoogleProfile> for User {
    fn from(profile: GoogleProfile) -> Self {
        User::new(profile.id, profile.name, profile.email, profile.photo_url)
    }
}

/// The outcome of a Google sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleAuthResult {
    Success(GoogleProfile),
    Cancel,
}

/// Adapts the outcome of a Google sign-in flow.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    result: GoogleAuthResult,
}

impl GoogleProvider {
    pub fn new(result: GoogleAuthResult) -> Self {
        Self { result }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn authenticate(&self) -> Res<Option<User>> {
        match &self.result {
            GoogleAuthResult::Success(profile) => Ok(Some(profile.clone().into())),
            GoogleAuthResult::Cancel => Ok(None),
        }
    }
}

/// The credential returned by Sign in with Apple. Apple only shares the email and name on the
/// first sign-in, so both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleCredential {
    pub user: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
}

impl AppleCredential {
    /// Normalizes the credential. The photo is a generated avatar with the initial of the given
    /// name.
    ///
    /// # Errors
    /// - The credential has no given name.
    pub fn into_user(self) -> Res<User> {
        let name = match self.given_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => bail!("The Apple credential for '{}' has no given name", self.user),
        };
        let photo =
            url::Url::parse_with_params(AVATAR_URL, [("name", name.as_str()), ("length", "1")])
                .context("Unable to build the avatar URL")?;
        Ok(User::new(
            self.user,
            name,
            self.email.unwrap_or_default(),
            Some(photo.to_string()),
        ))
    }
}

/// Adapts the outcome of a Sign in with Apple flow. `None` means the flow was cancelled.
#[derive(Debug, Clone)]
pub struct AppleProvider {
    credential: Option<AppleCredential>,
}

impl AppleProvider {
    pub fn new(credential: Option<AppleCredential>) -> Self {
        Self { credential }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for AppleProvider {
    fn name(&self) -> &str {
        "apple"
    }

    async fn authenticate(&self) -> Res<Option<User>> {
        let Some(credential) = self.credential.clone() else {
            return Ok(None);
        };
        debug!("Normalizing the Apple credential for {}", credential.user);
        credential.into_user().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_google_success() {
        let provider = GoogleProvider::new(GoogleAuthResult::Success(GoogleProfile {
            id: "any_id".to_string(),
            email: "alifer@gmail.com".to_string(),
            name: "Alifer".to_string(),
            photo_url: Some("any_photo.png".to_string()),
        }));
        let user = provider.authenticate().await.unwrap().unwrap();
        assert_eq!(user.id(), "any_id");
        assert_eq!(user.email(), "alifer@gmail.com");
        assert_eq!(user.photo(), Some("any_photo.png"));
    }

    #[tokio::test]
    async fn test_google_cancel() {
        let provider = GoogleProvider::new(GoogleAuthResult::Cancel);
        assert_eq!(provider.authenticate().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_apple_avatar() {
        let provider = AppleProvider::new(Some(AppleCredential {
            user: "001.abc".to_string(),
            email: Some("ana@privaterelay.appleid.com".to_string()),
            given_name: Some("Ana Maria".to_string()),
        }));
        let user = provider.authenticate().await.unwrap().unwrap();
        assert_eq!(user.id(), "001.abc");
        assert_eq!(user.name(), "Ana Maria");
        assert_eq!(
            user.photo(),
            Some("https://ui-avatars.com/api/?name=Ana+Maria&length=1")
        );
    }

    #[test]
    fn test_apple_without_email() {
        let credential = AppleCredential {
            user: "001.abc".to_string(),
            email: None,
            given_name: Some("Ana".to_string()),
        };
        assert_eq!(credential.into_user().unwrap().email(), "");
    }

    #[tokio::test]
    async fn test_apple_without_name_fails() {
        let provider = AppleProvider::new(Some(AppleCredential {
            user: "001.abc".to_string(),
            email: None,
            given_name: None,
        }));
        assert!(provider.authenticate().await.is_err());
    }

    #[tokio::test]
    async fn test_apple_cancel() {
        assert_eq!(AppleProvider::new(None).authenticate().await.unwrap(), None);
    }
}
