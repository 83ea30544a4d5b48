use serde::{Deserialize, Serialize};

/// The signed in user, as normalized from an identity provider's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        photo: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            photo,
        }
    }

    /// The provider's user ID. This namespaces the user's transactions in storage.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_is_optional() {
        let json = r#"{"id":"42","name":"Ana","email":"ana@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.photo(), None);
        let back = serde_json::to_string(&user).unwrap();
        assert!(!back.contains("photo"));
    }
}
