//! Login and signup forms: field buffers, local validation, submission payloads.
//!
//! Validation runs before any request is sent. A form that fails validation
//! is never submitted; the UI shows the field messages instead.
use email_address::EmailAddress;
use secrecy::{ExposeSecret, SecretString};
use std::str::FromStr;

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 3;
const MIN_EMAIL_LEN: usize = 6;
const MOBILE_LEN: usize = 10;

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Address syntax is checked by `email_address`. On top of that the domain must
/// be a dotted hostname, and display-name forms (`Name <a@b.com>`) are refused.
fn accepts_email(email: &str) -> bool {
    if email.contains(['<', '>']) {
        return false;
    }
    match EmailAddress::from_str(email) {
        Ok(address) => is_hostname(address.domain()),
        Err(_) => false,
    }
}

/// At least two labels of ASCII letters, digits and inner hyphens.
fn is_hostname(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

// ============================================================================
// Submission Payloads
// ============================================================================

/// Credentials for `login-user`.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if !accepts_email(&self.email) {
            errors.push(FieldError::new("email", "Email must be a valid address."));
        }
        if self.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters.",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "email": self.email,
            "password": self.password.expose_secret(),
        })
    }
}

/// Account details for `singup-user`.
#[derive(Debug)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.first_name.trim().chars().count() < MIN_NAME_LEN {
            errors.push(FieldError::new(
                "first_name",
                "First name must be at least 3 characters.",
            ));
        }
        if self.last_name.trim().chars().count() < MIN_NAME_LEN {
            errors.push(FieldError::new(
                "last_name",
                "Last name must be at least 3 characters.",
            ));
        }
        if self.email.chars().count() < MIN_EMAIL_LEN || !accepts_email(&self.email) {
            errors.push(FieldError::new("email", "Email must be a valid address."));
        }
        if self.mobile.chars().count() != MOBILE_LEN {
            errors.push(FieldError::new(
                "mobile",
                "Mobile number must be exactly 10 characters.",
            ));
        }
        let password = self.password.expose_secret();
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters.",
            ));
        }
        let confirm = self.confirm_password.expose_secret();
        if confirm.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "confirm_password",
                "Password must be at least 6 characters.",
            ));
        } else if confirm != password {
            errors.push(FieldError::new("confirm_password", "Passwords do not match."));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "email": self.email,
            "mobile": self.mobile,
            "password": self.password.expose_secret(),
            "confirmPassword": self.confirm_password.expose_secret(),
        })
    }
}

// ============================================================================
// Input Buffers
// ============================================================================

/// One editable text field in a terminal form.
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Rendered as `*` characters.
    pub masked: bool,
}

impl FieldInput {
    const fn new(name: &'static str, label: &'static str, masked: bool) -> Self {
        Self {
            name,
            label,
            value: String::new(),
            masked,
        }
    }
}

/// Editable state of a login or signup form.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub fields: Vec<FieldInput>,
    pub focused: usize,
    pub errors: Vec<FieldError>,
}

/// Longest value accepted in any single field.
const MAX_FIELD_LEN: usize = 128;

impl FormInput {
    pub fn login() -> Self {
        Self::with_fields(vec![
            FieldInput::new("email", "Email Address", false),
            FieldInput::new("password", "Password", true),
        ])
    }

    pub fn signup() -> Self {
        Self::with_fields(vec![
            FieldInput::new("first_name", "First Name", false),
            FieldInput::new("last_name", "Last Name", false),
            FieldInput::new("email", "Email Address", false),
            FieldInput::new("mobile", "Mobile", false),
            FieldInput::new("password", "Password", true),
            FieldInput::new("confirm_password", "Confirm Password", true),
        ])
    }

    fn with_fields(fields: Vec<FieldInput>) -> Self {
        Self {
            fields,
            focused: 0,
            errors: Vec::new(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.focused) {
            if field.value.chars().count() < MAX_FIELD_LEN {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// First validation message recorded for a field, if any.
    pub fn error_for(&self, name: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message)
    }

    /// Clear every value and message, keeping the field layout.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focused = 0;
        self.errors.clear();
    }

    pub fn to_login_form(&self) -> LoginForm {
        LoginForm {
            email: self.value("email").trim().to_string(),
            password: SecretString::from(self.value("password").to_string()),
        }
    }

    pub fn to_signup_form(&self) -> SignupForm {
        SignupForm {
            first_name: self.value("first_name").trim().to_string(),
            last_name: self.value("last_name").trim().to_string(),
            email: self.value("email").trim().to_string(),
            mobile: self.value("mobile").trim().to_string(),
            password: SecretString::from(self.value("password").to_string()),
            confirm_password: SecretString::from(self.value("confirm_password").to_string()),
        }
    }
}
