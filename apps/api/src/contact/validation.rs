use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const MIN_NAME_LEN: usize = 2;
const MIN_SUBJECT_LEN: usize = 5;
const MIN_MESSAGE_LEN: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Per-field error messages; `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.subject.is_none() && self.message.is_none()
    }
}

/// Required field with a minimum trimmed length, counted in characters.
fn check_length(value: &str, min: usize, label: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(format!("{label} is required"))
    } else if trimmed.chars().count() < min {
        Some(format!("{label} must be at least {min} characters"))
    } else {
        None
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_contact_form(form: &ContactForm) -> FormErrors {
    let email = if form.email.trim().is_empty() {
        Some("Email is required".to_string())
    } else if !is_valid_email(&form.email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    };

    FormErrors {
        name: check_length(&form.name, MIN_NAME_LEN, "Name"),
        email,
        subject: check_length(&form.subject, MIN_SUBJECT_LEN, "Subject"),
        message: check_length(&form.message, MIN_MESSAGE_LEN, "Message"),
    }
}
