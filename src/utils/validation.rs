//! Field checks run by the forms before anything is sent.

use crate::error::ValidationError;
use crate::models::Attachment;
use crate::utils::constants::{MAX_ATTACHMENT_BYTES, MIN_PASSWORD_LEN};

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Signup and maker creation: both fields must match and be long enough.
pub fn validate_new_password(password: &str, repeat: &str) -> Result<(), ValidationError> {
    if password != repeat {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

const PHOTO_TYPES: &[&str] = &["image/jpeg", "image/png"];
const RESUME_TYPE: &str = "application/pdf";

pub fn validate_upload(
    first_name: &str,
    last_name: &str,
    photo: Option<&Attachment>,
    resume: Option<&Attachment>,
) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if first_name.trim().is_empty() {
        missing.push("first_name");
    }
    if last_name.trim().is_empty() {
        missing.push("last_name");
    }
    if photo.is_none() {
        missing.push("photo");
    }
    if resume.is_none() {
        missing.push("resume");
    }
    let (Some(photo), Some(resume)) = (photo, resume) else {
        return Err(ValidationError::MissingFields(missing));
    };
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if !PHOTO_TYPES.contains(&photo.content_type.as_str()) {
        return Err(ValidationError::WrongFileType {
            field: "Photo",
            expected: "JPEG or PNG",
        });
    }
    if photo.size() > MAX_ATTACHMENT_BYTES {
        return Err(ValidationError::FileTooLarge {
            field: "Photo",
            max_mb: MAX_ATTACHMENT_BYTES / (1024 * 1024),
        });
    }
    if resume.content_type != RESUME_TYPE {
        return Err(ValidationError::WrongFileType {
            field: "Resume",
            expected: "PDF",
        });
    }
    if resume.size() > MAX_ATTACHMENT_BYTES {
        return Err(ValidationError::FileTooLarge {
            field: "Resume",
            max_mb: MAX_ATTACHMENT_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> Attachment {
        Attachment {
            file_name: "f".into(),
            content_type: content_type.into(),
            bytes: vec![0; size],
        }
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert!(validate_email("a@b.c").is_ok());
        assert_eq!(validate_email("   "), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ab.c"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn password_rules() {
        assert_eq!(
            validate_new_password("abcdefgh", "abcdefgx"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_new_password("short", "short"),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        assert!(validate_new_password("abcdefgh", "abcdefgh").is_ok());
    }

    #[test]
    fn upload_lists_every_missing_field() {
        let err = validate_upload("", "Doe", None, Some(&file("application/pdf", 10))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["first_name", "photo"]));
    }

    #[test]
    fn upload_checks_types_and_sizes() {
        let pdf = file("application/pdf", 10);
        let png = file("image/png", 10);

        let err = validate_upload("A", "B", Some(&file("image/gif", 10)), Some(&pdf)).unwrap_err();
        assert!(matches!(err, ValidationError::WrongFileType { field: "Photo", .. }));

        let big = file("image/jpeg", MAX_ATTACHMENT_BYTES + 1);
        let err = validate_upload("A", "B", Some(&big), Some(&pdf)).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { field: "Photo", .. }));

        let err = validate_upload("A", "B", Some(&png), Some(&png)).unwrap_err();
        assert!(matches!(err, ValidationError::WrongFileType { field: "Resume", .. }));

        assert!(validate_upload("A", "B", Some(&png), Some(&pdf)).is_ok());
    }
}
