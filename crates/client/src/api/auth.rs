//! Account registration.
//!
//! The client validates the registration form locally with the same rules
//! the storefront enforces in the browser, then submits it to the external
//! auth service's `POST /api/auth/register` endpoint. Token issuance and
//! email verification stay entirely on the auth service's side.

use serde::{Deserialize, Serialize};
use storefront_core::Email;
use thiserror::Error;
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Per-field validation failures for the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Errors from submitting a registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The form failed local validation; one entry per failing field.
    #[error("registration form is invalid")]
    Validation(Vec<ValidationError>),

    /// The email is already registered with the auth service.
    #[error("This email is already registered. Please sign in instead.")]
    EmailAlreadyRegistered,

    /// The auth service rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Raw registration form input, as typed by the visitor.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Validate the form, collecting every failing field.
    ///
    /// # Errors
    ///
    /// Returns one [`ValidationError`] per failing field, in field order.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push(ValidationError::FirstNameRequired);
        }
        if self.last_name.trim().is_empty() {
            errors.push(ValidationError::LastNameRequired);
        }

        if self.email.trim().is_empty() {
            errors.push(ValidationError::EmailRequired);
        } else if Email::parse(self.email.trim()).is_err() {
            errors.push(ValidationError::EmailInvalid);
        }

        if self.phone.trim().is_empty() {
            errors.push(ValidationError::PhoneRequired);
        }

        if self.password.is_empty() {
            errors.push(ValidationError::PasswordRequired);
        } else if self.password.len() < MIN_PASSWORD_LENGTH {
            errors.push(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Request body for `POST /api/auth/register`. The confirmation field is a
/// client-side check only and never leaves the client.
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct RegisterEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Client for account registration.
#[derive(Clone)]
pub struct RegistrationClient {
    api: ApiClient,
}

impl RegistrationClient {
    /// Create a registration client over an existing API client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Validate and submit a registration form.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::Validation`] before any request is made
    /// - [`RegistrationError::EmailAlreadyRegistered`] on an HTTP 409 or a
    ///   backend message indicating a duplicate account
    /// - [`RegistrationError::Api`] for everything else
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), RegistrationError> {
        form.validate().map_err(RegistrationError::Validation)?;

        let body = RegisterRequest {
            first_name: form.first_name.trim(),
            last_name: form.last_name.trim(),
            email: form.email.trim(),
            phone: form.phone.trim(),
            password: &form.password,
        };
        let response = self
            .api
            .post("api/auth/register")?
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(RegistrationError::EmailAlreadyRegistered);
        }

        let envelope: RegisterEnvelope = ApiClient::read_json(response).await?;
        if envelope.success {
            return Ok(());
        }

        let message = envelope.message.unwrap_or_default();
        if message.to_lowercase().contains("already registered") {
            return Err(RegistrationError::EmailAlreadyRegistered);
        }
        Err(RegistrationError::Api(ApiError::Rejected(
            if message.is_empty() {
                "Registration failed. Please try again later.".to_string()
            } else {
                message
            },
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            password: "correct horse".to_string(),
            confirm_password: "correct horse".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_blank_form_collects_all_required_errors() {
        let errors = RegistrationForm::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::FirstNameRequired,
                ValidationError::LastNameRequired,
                ValidationError::EmailRequired,
                ValidationError::PhoneRequired,
                ValidationError::PasswordRequired,
            ]
        );
    }

    #[test]
    fn test_whitespace_names_are_rejected() {
        let mut form = valid_form();
        form.first_name = "   ".to_string();
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ValidationError::FirstNameRequired]
        );
    }

    #[test]
    fn test_invalid_email_shape() {
        let mut form = valid_form();
        form.email = "ada@nodot".to_string();
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ValidationError::EmailInvalid]
        );
    }

    #[test]
    fn test_short_password() {
        let mut form = valid_form();
        form.password = "12345".to_string();
        form.confirm_password = "12345".to_string();
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ValidationError::PasswordTooShort]
        );
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = valid_form();
        form.confirm_password = "different".to_string();
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ValidationError::PasswordMismatch]
        );
    }

    #[test]
    fn test_empty_password_reports_required_and_mismatch_separately() {
        let mut form = valid_form();
        form.password = String::new();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::PasswordRequired));
        assert!(errors.contains(&ValidationError::PasswordMismatch));
    }
}
