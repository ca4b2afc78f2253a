//! Authenticated session state.

use secrecy::{ExposeSecret, SecretString};

use super::user::User;

/// A signed-in session: the user plus the opaque token stored alongside it.
///
/// The token is wrapped in [`SecretString`] so it never shows up in logs via
/// `Debug`.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    token: SecretString,
}

impl AuthSession {
    #[must_use]
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: SecretString::from(token.into()),
        }
    }

    /// The raw token, for persisting.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Email, UserId};

    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let session = AuthSession::new(
            User {
                id: UserId::new("u1"),
                name: "Ada Lovelace".into(),
                email: Email::parse("ada@example.com").unwrap(),
            },
            "tok-very-secret",
        );
        assert_eq!(session.token(), "tok-very-secret");
        assert!(!format!("{session:?}").contains("tok-very-secret"));
        assert_eq!(session.user.first_name(), "Ada");
    }
}
