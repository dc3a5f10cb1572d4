//! Client-side form and upload checks. Anything rejected here never reaches
//! the network.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::shared::error::ValidationError;
use crate::shared::models::{Credentials, PaperUpload, Registration};

/// Uploads must be strictly smaller than this.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PASSWORD_SPECIALS: &str = "@$!%*?&";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").expect("valid username pattern"));
static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\d@$!%*?&]+$").expect("valid password pattern"));

fn require(field: &str, value: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, message))
    } else {
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    require("email", email, "Please enter your email")?;
    if !EMAIL.is_match(email.trim()) {
        return Err(ValidationError::new("email", "Please enter a valid email address"));
    }
    Ok(())
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    validate_email(&credentials.email)?;
    require("password", &credentials.password, "Please enter your password")
}

pub fn validate_registration(registration: &Registration) -> Result<(), ValidationError> {
    let username = registration.username.trim();
    require("username", username, "Please enter a username")?;
    if !(3..=20).contains(&username.chars().count()) {
        return Err(ValidationError::new(
            "username",
            "Username must be between 3 and 20 characters",
        ));
    }
    if !USERNAME.is_match(username) {
        return Err(ValidationError::new(
            "username",
            "Username may only contain letters, digits, underscores and hyphens",
        ));
    }

    validate_email(&registration.email)?;

    let password = registration.password.as_str();
    require("password", password, "Please enter a password")?;
    if password.chars().count() < 8 {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    let strong = PASSWORD_CHARSET.is_match(password)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if !strong {
        return Err(ValidationError::new(
            "password",
            format!(
                "Password must mix upper and lower case letters, digits and one of {PASSWORD_SPECIALS}"
            ),
        ));
    }

    require("confirm_password", &registration.confirm_password, "Please confirm your password")?;
    if registration.confirm_password != registration.password {
        return Err(ValidationError::new("confirm_password", "Passwords do not match"));
    }
    Ok(())
}

/// PDF only, under 10 MiB. Messages name the offending file.
fn not_a_pdf(name: &str) -> ValidationError {
    ValidationError::new("file", format!("{name} is not a PDF file"))
}

fn check_size(name: &str, size: u64) -> Result<(), ValidationError> {
    if size >= MAX_UPLOAD_BYTES {
        return Err(ValidationError::new("file", format!("{name} is larger than 10MB")));
    }
    Ok(())
}

pub fn validate_upload(upload: &PaperUpload) -> Result<(), ValidationError> {
    let is_pdf = match upload.content_type.as_deref() {
        Some(content_type) => content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE),
        None => upload.file_name.to_ascii_lowercase().ends_with(".pdf"),
    };
    if !is_pdf {
        return Err(not_a_pdf(&upload.file_name));
    }
    check_size(&upload.file_name, upload.size())
}

/// Check a file on disk from its extension and metadata alone, without
/// reading it. Returns its size.
pub fn validate_upload_path(path: &Path) -> Result<u64, ValidationError> {
    let name = PaperUpload::file_name_of(path);
    if PaperUpload::content_type_of(path).as_deref() != Some(PDF_CONTENT_TYPE) {
        return Err(not_a_pdf(&name));
    }
    let metadata = std::fs::metadata(path)
        .map_err(|e| ValidationError::new("file", format!("Cannot read {name}: {e}")))?;
    if !metadata.is_file() {
        return Err(ValidationError::new("file", format!("{name} is not a file")));
    }
    check_size(&name, metadata.len())?;
    Ok(metadata.len())
}
