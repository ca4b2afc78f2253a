//! Synchronous form validation.
//!
//! Validators never panic and never return early on the first problem: every
//! field is checked and the messages are collected into [`FieldErrors`] so a
//! screen can show them next to the offending inputs.

use core::fmt;

use serde::Deserialize;

use shopfront_core::Email;

use crate::models::ShippingAddress;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Field-level validation messages, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a message for `field`. Only the first message per field is kept.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(value)` when no errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("{label} is required"));
    }
    trimmed.to_owned()
}

fn email(errors: &mut FieldErrors, value: &str) -> Option<Email> {
    match Email::parse(value) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.add("email", e.to_string());
            None
        }
    }
}

/// Login screen input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Validated login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: Email,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns [`FieldErrors`] for a missing or malformed email or a missing
    /// password.
    pub fn validate(&self) -> Result<LoginInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = email(&mut errors, &self.email);
        if self.password.trim().is_empty() {
            errors.add("password", "Password is required");
        }
        match email {
            Some(email) if errors.is_empty() => Ok(LoginInput { email }),
            _ => Err(errors),
        }
    }
}

/// Registration screen input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub email: Email,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns [`FieldErrors`] for a missing name, bad email, short password,
    /// or a confirmation that does not match.
    pub fn validate(&self) -> Result<RegisterInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name, "Name");
        let email = email(&mut errors, &self.email);

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }
        if self.confirm_password != self.password {
            errors.add("confirm_password", "Passwords do not match");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(RegisterInput { name, email }),
            _ => Err(errors),
        }
    }
}

/// Checkout shipping input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingForm {
    pub full_name: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    /// Optional receipt address; validated only when non-blank.
    #[serde(default)]
    pub email: String,
}

impl ShippingForm {
    /// # Errors
    ///
    /// Returns [`FieldErrors`] for any missing required field or a malformed
    /// receipt email.
    pub fn validate(&self) -> Result<ShippingAddress, FieldErrors> {
        let mut errors = FieldErrors::new();
        let full_name = required(&mut errors, "full_name", &self.full_name, "Full name");
        let address_line = required(&mut errors, "address_line", &self.address_line, "Address");
        let city = required(&mut errors, "city", &self.city, "City");
        let postal_code = required(&mut errors, "postal_code", &self.postal_code, "Postal code");
        let phone = required(&mut errors, "phone", &self.phone, "Phone number");
        if !phone.is_empty() && !phone.chars().any(|c| c.is_ascii_digit()) {
            errors.add("phone", "Phone number must contain digits");
        }

        let email = if self.email.trim().is_empty() {
            None
        } else {
            email(&mut errors, &self.email)
        };

        errors.into_result(|| ShippingAddress {
            full_name,
            address_line,
            city,
            postal_code,
            phone,
            email,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_login_rejects_bad_email_format() {
        let form = LoginForm {
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("email").is_some());
    }

    #[test]
    fn test_login_ok() {
        let form = LoginForm {
            email: "Shopper@Example.com".into(),
            password: "x".into(),
        };
        assert_eq!(
            form.validate().unwrap().email.as_str(),
            "shopper@example.com"
        );
    }

    #[test]
    fn test_register_password_rules() {
        let form = RegisterForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(
            errors.get("confirm_password"),
            Some("Passwords do not match")
        );
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_register_ok_trims_name() {
        let form = RegisterForm {
            name: "  Sam Jones ".into(),
            email: "sam@example.com".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.name, "Sam Jones");
    }

    fn shipping() -> ShippingForm {
        ShippingForm {
            full_name: "Sam Jones".into(),
            address_line: "1 Main St".into(),
            city: "Springfield".into(),
            postal_code: "12345".into(),
            phone: "+1 555 0100".into(),
            email: String::new(),
        }
    }

    #[test]
    fn test_shipping_ok_without_email() {
        let address = shipping().validate().unwrap();
        assert_eq!(address.city, "Springfield");
        assert!(address.email.is_none());
    }

    #[test]
    fn test_shipping_collects_every_missing_field() {
        let errors = ShippingForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            ["full_name", "address_line", "city", "postal_code", "phone"]
        );
    }

    #[test]
    fn test_shipping_validates_optional_email_and_phone() {
        let mut form = shipping();
        form.email = "bad@".into();
        form.phone = "call me".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.get("email").is_some());
        assert_eq!(
            errors.get("phone"),
            Some("Phone number must contain digits")
        );
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.add("a", "one");
        errors.add("a", "ignored");
        errors.add("b", "two");
        assert_eq!(errors.to_string(), "a: one; b: two");
    }
}
