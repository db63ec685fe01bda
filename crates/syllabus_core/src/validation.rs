//! crates/syllabus_core/src/validation.rs
//!
//! Input checks applied at the user-action boundary before any work is done.

use crate::domain::{LoginForm, SignupForm};

/// Extracted text shorter than this is treated as an unusable extraction.
pub const MIN_TEXT_CHARS: usize = 100;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter your name")]
    MissingName,
    #[error("Please upload a PDF file")]
    NotPdf,
    #[error("Could not extract enough text from PDF")]
    InsufficientText { length: usize },
}

pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    if form.email.is_empty() || form.password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationError> {
    if form.email.is_empty() || form.password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if form.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    Ok(())
}

/// Accepts the upload if its declared content type is PDF, or, when no content
/// type was sent, if the file name carries a `.pdf` extension.
pub fn ensure_pdf(content_type: Option<&str>, file_name: &str) -> Result<(), ValidationError> {
    let is_pdf = match content_type {
        Some(ct) => ct.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE),
        None => file_name.to_ascii_lowercase().ends_with(".pdf"),
    };
    if is_pdf {
        Ok(())
    } else {
        Err(ValidationError::NotPdf)
    }
}

pub fn ensure_usable_text(text: &str) -> Result<(), ValidationError> {
    let length = text.chars().count();
    if length < MIN_TEXT_CHARS {
        return Err(ValidationError::InsufficientText { length });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_requires_all_fields() {
        let mut form = SignupForm {
            email: "ada@example.edu".into(),
            password: "pw".into(),
            name: String::new(),
        };
        assert_eq!(validate_signup(&form), Err(ValidationError::MissingName));

        form.name = "Ada".into();
        assert_eq!(validate_signup(&form), Ok(()));

        form.password.clear();
        assert_eq!(validate_signup(&form), Err(ValidationError::MissingFields));
    }

    #[test]
    fn login_ignores_name() {
        let form = LoginForm {
            email: "ada@example.edu".into(),
            password: String::new(),
        };
        assert_eq!(validate_login(&form), Err(ValidationError::MissingFields));
    }

    #[test]
    fn pdf_check_prefers_content_type() {
        assert!(ensure_pdf(Some("application/pdf"), "notes.txt").is_ok());
        assert_eq!(ensure_pdf(Some("text/plain"), "syllabus.pdf"), Err(ValidationError::NotPdf));
        assert!(ensure_pdf(None, "Syllabus.PDF").is_ok());
        assert!(ensure_pdf(None, "syllabus.docx").is_err());
    }

    #[test]
    fn short_text_is_rejected_with_its_length() {
        assert_eq!(
            ensure_usable_text("too short"),
            Err(ValidationError::InsufficientText { length: 9 })
        );
        assert!(ensure_usable_text(&"a".repeat(MIN_TEXT_CHARS)).is_ok());
    }
}
