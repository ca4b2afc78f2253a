//! Authentication error types.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors that can occur during sign-in and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted form failed validation.
    #[error("invalid input: {0}")]
    Validation(#[from] FieldErrors),

    /// A session is already active; sign out first.
    #[error("already signed in")]
    AlreadySignedIn,
}
