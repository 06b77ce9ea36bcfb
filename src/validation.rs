use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Validate)]
pub struct ValidatedInvitation {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
}

impl ValidatedInvitation {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Validate)]
pub struct ValidatedWish {
    #[validate(custom = "not_blank")]
    pub description: String,
    #[validate(url(message = "Please enter a valid URL"))]
    pub link: String,
}

impl ValidatedWish {
    pub fn new(description: &str, link: &str) -> Self {
        Self {
            description: description.to_string(),
            link: link.to_string(),
        }
    }
}

#[derive(Validate)]
pub struct ValidatedCredentials {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl ValidatedCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

pub fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("Description is required"));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_requires_email() {
        assert!(ValidatedInvitation::new("b@x.com").validate().is_ok());
        assert!(ValidatedInvitation::new("b-at-x.com").validate().is_err());
        assert!(ValidatedInvitation::new("").validate().is_err());
    }

    #[test]
    fn wish_requires_description() {
        assert!(ValidatedWish::new("Bike", "https://shop.example/bike")
            .validate()
            .is_ok());
        assert!(ValidatedWish::new("", "https://shop.example/bike")
            .validate()
            .is_err());
        assert!(ValidatedWish::new("   ", "https://shop.example/bike")
            .validate()
            .is_err());
    }

    #[test]
    fn wish_requires_url() {
        let errors = ValidatedWish::new("Bike", "not a link")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("link"));
        assert!(!errors.field_errors().contains_key("description"));
    }

    #[test]
    fn password_has_minimum_length() {
        assert!(ValidatedCredentials::new("a@x.com", "secret")
            .validate()
            .is_ok());
        assert!(ValidatedCredentials::new("a@x.com", "short")
            .validate()
            .is_err());
    }
}
