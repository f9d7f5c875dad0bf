//! Value objects shared across bounded contexts.
//!
//! Every value object has exactly one constructor, a factory taking raw
//! primitives. The factory runs all checks and either returns a complete
//! immutable instance or a [`ValidationError`](crate::error::ValidationError).
//! Equality is structural.

mod contact;
mod employment;
mod input;
mod location;
mod money;
mod period;
mod text;

pub use contact::{ContactInfo, Email, PhoneNumber};
pub use employment::{EmploymentType, EmploymentTypeSet};
pub use input::{ContactInput, LocationInput, SalaryInput, validate_salary};
pub use location::{GeoPoint, Location};
pub use money::{Currency, Money, Salary};
pub use period::DateRange;
pub use text::{Description, Title};

use crate::error::ValidationError;

/// Trims `raw` and checks it is non-empty and at most `max_chars` long.
///
/// # Errors
///
/// Returns `empty_code` for blank input or `too_long_code` past the limit.
pub fn bounded_text(
    field: &'static str,
    empty_code: &'static str,
    too_long_code: &'static str,
    raw: &str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            empty_code,
            format!("{field} must not be empty"),
        ));
    }
    if trimmed.chars().count() > max_chars {
        return Err(ValidationError::new(
            field,
            too_long_code,
            format!("{field} must be at most {max_chars} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Like [`bounded_text`] but blank input yields `None`.
///
/// # Errors
///
/// Returns `too_long_code` past the limit.
pub fn optional_text(
    field: &'static str,
    too_long_code: &'static str,
    raw: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => bounded_text(field, too_long_code, too_long_code, value, max_chars).map(Some),
    }
}
