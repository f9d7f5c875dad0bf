//! Email, phone number and contact details.

use std::fmt;

use super::bounded_text;
use crate::error::ValidationError;

/// An e-mail address, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    const MAX_CHARS: usize = 254;

    /// Validates and builds an e-mail address.
    ///
    /// # Errors
    ///
    /// Returns `email.empty`, `email.too_long` or `email.malformed`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let value = bounded_text("email", "email.empty", "email.too_long", raw, Self::MAX_CHARS)?;
        let malformed = || {
            ValidationError::new(
                "email",
                "email.malformed",
                format!("{value:?} is not an e-mail address"),
            )
        };
        let (local, domain) = value.split_once('@').ok_or_else(malformed)?;
        if local.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || value.chars().any(char::is_whitespace)
        {
            return Err(malformed());
        }
        Ok(Self(value.to_lowercase()))
    }

    /// Returns the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A phone number normalized to an optional `+` followed by digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 7;
    const MAX_DIGITS: usize = 20;

    /// Validates and builds a phone number. Spaces, dashes, dots and
    /// parentheses are dropped.
    ///
    /// # Errors
    ///
    /// Returns `phone.malformed` for stray characters or a digit count
    /// outside `7..=20`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let (plus, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };
        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => {
                    return Err(ValidationError::new(
                        "phone",
                        "phone.malformed",
                        format!("unexpected character {c:?} in phone number"),
                    ));
                }
            }
        }
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(ValidationError::new(
                "phone",
                "phone.malformed",
                format!(
                    "phone number must have {}..={} digits",
                    Self::MIN_DIGITS,
                    Self::MAX_DIGITS
                ),
            ));
        }
        Ok(Self(format!("{plus}{digits}")))
    }

    /// Returns the normalized number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How to reach a person: vacancy recruiter or resume owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactInfo {
    name: String,
    email: Email,
    phone: Option<PhoneNumber>,
}

impl ContactInfo {
    const NAME_MAX_CHARS: usize = 100;

    /// Validates and builds contact details. A blank phone is absent.
    ///
    /// # Errors
    ///
    /// Returns `contact.name_required`, `contact.name_too_long`, or the
    /// e-mail or phone error.
    pub fn new(name: &str, email: &str, phone: Option<&str>) -> Result<Self, ValidationError> {
        let name = bounded_text(
            "contact_name",
            "contact.name_required",
            "contact.name_too_long",
            name,
            Self::NAME_MAX_CHARS,
        )?;
        let email = Email::new(email)?;
        let phone = match phone.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(PhoneNumber::new(raw)?),
        };
        Ok(Self { name, email, phone })
    }

    /// Contact person's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact e-mail.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Contact phone, if given.
    #[must_use]
    pub const fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_lowercased() {
        let email = Email::new(" Jane.Doe@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jane.doe@example.com");
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        for raw in ["jane", "@example.com", "jane@", "jane@example", "a@b@c.d", "jane doe@x.io"] {
            assert_eq!(
                Email::new(raw).unwrap_err().code,
                "email.malformed",
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_phone_is_normalized() {
        let phone = PhoneNumber::new("+49 (30) 123-456.78").unwrap();
        assert_eq!(phone.as_str(), "+493012345678");
    }

    #[test]
    fn test_phone_rejects_letters_and_short_numbers() {
        assert_eq!(PhoneNumber::new("555-CALL").unwrap_err().code, "phone.malformed");
        assert_eq!(PhoneNumber::new("12345").unwrap_err().code, "phone.malformed");
    }

    #[test]
    fn test_contact_info_is_all_or_nothing() {
        let err = ContactInfo::new("Jane", "jane@example.com", Some("x")).unwrap_err();
        assert_eq!(err.code, "phone.malformed");

        let contact = ContactInfo::new("Jane", "jane@example.com", Some(" ")).unwrap();
        assert!(contact.phone().is_none());
        assert_eq!(contact.email().as_str(), "jane@example.com");
    }
}
