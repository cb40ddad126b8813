pub mod achievement;
pub mod break_entry;
pub mod calendar_event;
pub mod challenge;
pub mod hydration;
pub mod mood;
pub mod reminder;
pub mod settings;
pub mod sleep;
pub mod stat;
pub mod user;
pub mod work;

use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        return Err(err);
    }
    Ok(())
}
