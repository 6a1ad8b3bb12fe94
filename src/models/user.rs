use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::validation::{
    validate_password, validate_password_present, validate_username, validate_username_present,
    validation_error,
};

/// Values entered in the registration form.
#[derive(Debug, Clone, Default, Validate)]
#[validate(schema(function = "validate_passwords_match", skip_on_field_errors = true))]
pub struct RegisterForm {
    #[validate(custom = "validate_username")]
    pub username: String,

    #[validate(custom = "validate_password")]
    pub password: String,

    pub confirm_password: String,
}

/// Values entered in the login form.
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(custom = "validate_username_present")]
    pub username: String,

    #[validate(custom = "validate_password_present")]
    pub password: String,
}

/// Body of `POST /auth/register` and `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub balance: f64,
}

/// An authenticated session. Every cart call takes one explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

/// The first form rule that failed, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FormError {
    pub field: String,
    pub code: String,
    pub message: String,
}

const SCHEMA_FIELD: &str = "__all__";

fn validate_passwords_match(form: &RegisterForm) -> Result<(), ValidationError> {
    if form.password != form.confirm_password {
        return Err(validation_error("password_mismatch", "Passwords do not match"));
    }
    Ok(())
}

/// Picks the first error following the order the form checks its fields in.
fn first_error(errors: &ValidationErrors, order: &[&'static str]) -> FormError {
    let fields = errors.field_errors();

    for field in order {
        if let Some(error) = fields.get(field).and_then(|errors| errors.first()) {
            return FormError {
                field: (*field).to_string(),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            };
        }
    }

    FormError {
        field: SCHEMA_FIELD.to_string(),
        code: "invalid".to_string(),
        message: errors.to_string(),
    }
}

impl RegisterForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Validates the form so no bad values reach the backend.
    ///
    /// Rules run in the order the form shows them; only the first failure
    /// is reported.
    pub fn validate_input(&self) -> Result<(), FormError> {
        self.validate()
            .map_err(|e| first_error(&e, &["username", "password", SCHEMA_FIELD]))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate_input(&self) -> Result<(), FormError> {
        self.validate()
            .map_err(|e| first_error(&e, &["username", "password"]))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl Session {
    pub fn from_login(response: LoginResponse) -> Self {
        Self {
            username: response.username,
            token: response.token,
            balance: response.balance,
            created_at: Utc::now(),
        }
    }
}
