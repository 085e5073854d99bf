//! Contact submission contract.
//!
//! The same [`validate`] function runs in the browser-facing client and in the
//! server handler, so both sides always agree on what a valid submission is.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::{Validate, ValidateEmail};

/// Route serving contact submissions.
pub const CONTACT_PATH: &str = "/api/contact";

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 320;
pub const SUBJECT_MAX_LEN: usize = 200;
pub const MESSAGE_MAX_LEN: usize = 5000;

/// Dot-atom `local-part@domain` where the domain has at least one dot.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

#[derive(
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

/// Why a candidate failed validation, tied to one field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Joins errors as `"email: invalid format; message: required"`.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Untrusted candidate, as typed in the form or received on the wire.
///
/// Missing JSON fields deserialize to empty strings so they are reported as
/// `required` instead of failing the whole body.
#[derive(Validate, Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ContactInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_subject"))]
    pub subject: String,
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

impl ContactInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.subject.is_empty()
            && self.message.is_empty()
    }
}

/// A submission that passed [`validate`]. Only constructible through it.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ContactSubmission> for ContactInput {
    fn from(value: ContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

/// Body of a 2xx answer to `POST /api/contact`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmitResponse {
    pub message: String,
}

/// Body of a 4xx/5xx answer to `POST /api/contact`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

pub fn validate(candidate: &ContactInput) -> Result<ContactSubmission, Vec<ValidationError>> {
    if let Err(errors) = Validate::validate(candidate) {
        let mut errors = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                let field = Field::from_str(field.as_ref()).ok()?;
                Some(errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    ValidationError::new(field, message)
                }))
            })
            .flatten()
            .collect::<Vec<_>>();

        errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

        return Err(errors);
    }

    Ok(ContactSubmission {
        name: candidate.name.to_owned(),
        email: candidate.email.to_owned(),
        subject: candidate.subject.to_owned(),
        message: candidate.message.to_owned(),
    })
}

fn required(value: &str, max: usize) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("required").with_message("required".into()));
    }

    if value.chars().count() > max {
        return Err(validator::ValidationError::new("length")
            .with_message(format!("must be at most {max} characters").into()));
    }

    Ok(())
}

fn validate_name(value: &str) -> Result<(), validator::ValidationError> {
    required(value, NAME_MAX_LEN)
}

fn validate_email(value: &str) -> Result<(), validator::ValidationError> {
    required(value, EMAIL_MAX_LEN)?;

    if !value.validate_email() || !EMAIL_REGEX.is_match(value) {
        return Err(
            validator::ValidationError::new("email").with_message("invalid format".into())
        );
    }

    Ok(())
}

fn validate_subject(value: &str) -> Result<(), validator::ValidationError> {
    required(value, SUBJECT_MAX_LEN)
}

fn validate_message(value: &str) -> Result<(), validator::ValidationError> {
    required(value, MESSAGE_MAX_LEN)
}
