//! Unified error handling with Sentry integration.
//!
//! Store operations themselves are total and never fail; errors only arise
//! at the edges (configuration, seed data, form-driven services). `AppError`
//! gathers those so a client can handle them in one place.

use thiserror::Error;

use crate::config::ConfigError;
use crate::seed::SeedError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Static seed data is malformed.
    #[error("Seed data error: {0}")]
    Seed(#[from] SeedError),

    /// Sign-in or registration failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order placement failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A referenced resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether the error was caused by user input rather than the app.
    ///
    /// User errors are shown inline and not reported to Sentry.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::Validation(_) | AuthError::AlreadySignedIn)
                | Self::Checkout(CheckoutError::Validation(_) | CheckoutError::EmptyCart)
                | Self::NotFound(_)
        )
    }

    /// Log the error and, for non-user errors, capture it to Sentry.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::info!(error = %self, "Rejected user input");
        } else {
            let event_id = sentry::capture_error(self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Storefront error");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Placed order", Some(&[("items", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

/// Set the Sentry user context after sign-in.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on sign-out.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldErrors;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product p9".to_string());
        assert_eq!(err.to_string(), "Not found: product p9");

        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: cart is empty");
    }

    #[test]
    fn test_user_errors() {
        assert!(AppError::NotFound("x".into()).is_user_error());
        assert!(AppError::Checkout(CheckoutError::EmptyCart).is_user_error());
        assert!(AppError::Auth(AuthError::Validation(FieldErrors::new())).is_user_error());
        assert!(AppError::Auth(AuthError::AlreadySignedIn).is_user_error());
        assert!(
            !AppError::Config(ConfigError::InvalidEnvVar("K".into(), "bad".into()))
                .is_user_error()
        );
    }
}
