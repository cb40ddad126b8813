use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    #[serde(skip_serializing)]
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
        }
    }
}

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// At least 8 characters drawn from letters, digits and `@$!%*?&`, with at
/// least one of each class.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    let strong = password.len() >= 8
        && allowed
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if strong {
        return Ok(());
    }
    let mut err = ValidationError::new("password_strength");
    err.message = Some(
        "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character"
            .into(),
    );
    Err(err)
}

fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() >= 2 {
        return Ok(());
    }
    let mut err = ValidationError::new("full_name");
    err.message = Some("Full Name must be at least 2 characters long".into());
    Err(err)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(custom = "validate_full_name")]
    #[validate(length(max = 100, message = "Full Name must be under 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters long"))]
    #[validate(custom = "validate_password_strength")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Lowercase and trim, so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str) -> SignupRequest {
        SignupRequest {
            full_name: "Test User".into(),
            email: "test@example.com".into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(signup("Str0ng!Pass").validate().is_ok());
    }

    #[test]
    fn test_weak_passwords_rejected() {
        for weak in ["Sh0rt!a", "alllowercase1!", "ALLUPPER1!", "NoDigits!!", "NoSpecial12", "Bad#Char12"] {
            let errors = signup(weak).validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("password"),
                "{} should be rejected",
                weak
            );
        }
    }

    #[test]
    fn test_full_name_is_trimmed_before_length_check() {
        let mut req = signup("Str0ng!Pass");
        req.full_name = "  A  ".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = signup("Str0ng!Pass");
        req.email = "not-an-email".into();
        assert!(req.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Test@Example.COM "), "test@example.com");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            full_name: "Test User".into(),
            email: "test@example.com".into(),
            password_hash: Some("$argon2id$secret".into()),
            google_id: Some("google-123".into()),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("googleId").is_none());
        assert_eq!(json["fullName"], "Test User");
    }
}
