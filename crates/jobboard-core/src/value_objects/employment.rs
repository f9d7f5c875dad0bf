//! Employment types and the non-empty set that holds them.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{DomainError, ValidationError};

/// Kind of employment offered by a vacancy or sought by a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmploymentType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Temporary work.
    Temporary,
    /// Internship.
    Internship,
    /// Unpaid volunteer work.
    Volunteer,
}

impl EmploymentType {
    /// Every employment type.
    pub const ALL: [Self; 6] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Temporary,
        Self::Internship,
        Self::Volunteer,
    ];

    /// Stable code used in read models.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Contract => "contract",
            Self::Temporary => "temporary",
            Self::Internship => "internship",
            Self::Volunteer => "volunteer",
        }
    }

    /// Parses a code produced by [`Self::code`].
    ///
    /// # Errors
    ///
    /// Returns `employment_type.unknown` for any other input.
    pub fn from_code(raw: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == raw.trim())
            .ok_or_else(|| {
                ValidationError::new(
                    "employment_type",
                    "employment_type.unknown",
                    format!("unknown employment type {raw:?}"),
                )
            })
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A non-empty set of employment types.
///
/// The set is immutable; [`Self::with`] and [`Self::without`] return a new
/// set and fail instead of silently doing nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmploymentTypeSet(BTreeSet<EmploymentType>);

impl EmploymentTypeSet {
    /// Builds a set from a list that must be non-empty and duplicate-free.
    ///
    /// # Errors
    ///
    /// Returns `employment_types.empty` or `employment_types.duplicate`.
    pub fn new(types: impl IntoIterator<Item = EmploymentType>) -> Result<Self, ValidationError> {
        let mut set = BTreeSet::new();
        for employment_type in types {
            if !set.insert(employment_type) {
                return Err(ValidationError::new(
                    "employment_types",
                    "employment_types.duplicate",
                    format!("{employment_type} is listed twice"),
                ));
            }
        }
        if set.is_empty() {
            return Err(ValidationError::new(
                "employment_types",
                "employment_types.empty",
                "at least one employment type is required",
            ));
        }
        Ok(Self(set))
    }

    /// Builds a set from raw codes.
    ///
    /// # Errors
    ///
    /// Returns `employment_type.unknown` for an unrecognized code, or any
    /// error of [`Self::new`].
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self, ValidationError> {
        let types = codes
            .iter()
            .map(|code| EmploymentType::from_code(code.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(types)
    }

    /// Returns a copy of the set with `employment_type` added.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`employment_type.duplicate`) if it is
    /// already present.
    pub fn with(&self, employment_type: EmploymentType) -> Result<Self, DomainError> {
        if self.0.contains(&employment_type) {
            return Err(DomainError::conflict(
                "employment_type.duplicate",
                format!("{employment_type} is already listed"),
            ));
        }
        let mut next = self.0.clone();
        next.insert(employment_type);
        Ok(Self(next))
    }

    /// Returns a copy of the set with `employment_type` removed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`employment_type.absent`) if it is not
    /// present, or `DomainError::Problem` (`employment_type.last_required`)
    /// if it is the only one left.
    pub fn without(&self, employment_type: EmploymentType) -> Result<Self, DomainError> {
        if !self.0.contains(&employment_type) {
            return Err(DomainError::conflict(
                "employment_type.absent",
                format!("{employment_type} is not listed"),
            ));
        }
        if self.0.len() == 1 {
            return Err(DomainError::problem(
                "employment_type.last_required",
                "at least one employment type is required",
            ));
        }
        let mut next = self.0.clone();
        next.remove(&employment_type);
        Ok(Self(next))
    }

    /// Whether `employment_type` is in the set.
    #[must_use]
    pub fn contains(&self, employment_type: EmploymentType) -> bool {
        self.0.contains(&employment_type)
    }

    /// Iterates in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = EmploymentType> + '_ {
        self.0.iter().copied()
    }

    /// Codes in a stable order, for flat read-model columns.
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        self.iter().map(|t| t.code().to_owned()).collect()
    }

    /// Number of types in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
