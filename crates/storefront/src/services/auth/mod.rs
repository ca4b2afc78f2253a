//! Authentication service.
//!
//! Accounts are simulated: sign-in accepts any well-formed credentials and
//! registration never collides. A successful call mints a random token and
//! persists it together with the user profile so the session survives a
//! restart.

mod error;

pub use error::AuthError;

use std::time::Duration;

use tracing::instrument;
use uuid::Uuid;

use shopfront_core::{Email, UserId};

use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::models::{AuthSession, User};
use crate::storage::{KeyValueStore, keys};
use crate::validation::{LoginForm, RegisterForm};

/// Authentication service.
///
/// Holds at most one session.
#[derive(Debug)]
pub struct AuthService<S> {
    storage: S,
    delay: Duration,
    session: Option<AuthSession>,
}

impl<S: KeyValueStore> AuthService<S> {
    /// Create a signed-out service.
    ///
    /// `delay` is applied before each sign-in or registration completes.
    pub const fn new(storage: S, delay: Duration) -> Self {
        Self {
            storage,
            delay,
            session: None,
        }
    }

    /// Reload a persisted session. Both the token and the user record must be
    /// present; anything less starts signed out.
    pub async fn restore(storage: S, delay: Duration) -> Self {
        let token = storage.get(keys::AUTH_TOKEN).await;
        let user = storage.get_json::<User>(keys::USER_DATA).await;

        let session = match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                set_sentry_user(&user.id, Some(user.email.as_str()));
                tracing::debug!(user_id = %user.id, "Session restored");
                Some(AuthSession::new(user, token))
            }
            _ => None,
        };

        Self {
            storage,
            delay,
            session,
        }
    }

    /// The active session, if signed in.
    pub const fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the form is incomplete or the email
    /// is malformed, and `AuthError::AlreadySignedIn` if a session exists.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn login(&mut self, form: &LoginForm) -> Result<&AuthSession, AuthError> {
        self.ensure_signed_out()?;
        let input = form.validate()?;
        self.simulate_latency().await;

        let name = display_name_from(&input.email);
        let session = self.start_session(name, input.email).await;
        tracing::info!(user_id = %session.user.id, "User signed in");
        Ok(session)
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for any invalid field and
    /// `AuthError::AlreadySignedIn` if a session exists.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&mut self, form: &RegisterForm) -> Result<&AuthSession, AuthError> {
        self.ensure_signed_out()?;
        let input = form.validate()?;
        self.simulate_latency().await;

        let session = self.start_session(input.name, input.email).await;
        tracing::info!(user_id = %session.user.id, "User registered");
        Ok(session)
    }

    /// End the session and forget the persisted token and profile.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = %session.user.id, "User signed out");
            add_breadcrumb("auth", "Signed out", None);
        }
        for key in [keys::AUTH_TOKEN, keys::USER_DATA] {
            if !self.storage.remove(key).await {
                tracing::warn!(key, "Failed to clear stored session");
            }
        }
        clear_sentry_user();
    }

    const fn ensure_signed_out(&self) -> Result<(), AuthError> {
        if self.session.is_some() {
            return Err(AuthError::AlreadySignedIn);
        }
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    async fn start_session(&mut self, name: String, email: Email) -> &AuthSession {
        let user = User {
            id: UserId::new(Uuid::new_v4().to_string()),
            name,
            email,
        };
        let token = Uuid::new_v4().to_string();

        let saved = self.storage.set(keys::AUTH_TOKEN, &token).await
            && self.storage.set_json(keys::USER_DATA, &user).await;
        if !saved {
            tracing::warn!("Session not persisted; it will end on exit");
        }

        set_sentry_user(&user.id, Some(user.email.as_str()));
        add_breadcrumb("auth", "Signed in", Some(&[("user_id", user.id.as_str())]));
        self.session.insert(AuthSession::new(user, token))
    }
}

/// A greeting name for accounts created through sign-in: the email local
/// part with separators turned into spaces and each word capitalized.
fn display_name_from(email: &Email) -> String {
    email
        .local_part()
        .split(['.', '_', '-', '+'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
