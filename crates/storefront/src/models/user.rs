//! User domain types.
//!
//! Accounts are simulated on the client; there is no server-side identity.

use serde::{Deserialize, Serialize};

use shopfront_core::{Email, UserId};

/// A signed-in user's profile, persisted under the user-data key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Client-generated user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
}

impl User {
    /// First word of the display name, for greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
