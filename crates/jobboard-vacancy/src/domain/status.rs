//! Vacancy lifecycle.

use std::fmt;

use jobboard_core::status::{EditableField, LifecycleStatus};
use serde::{Deserialize, Serialize};

/// Status of a vacancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacancyStatus {
    /// Being written by the employer.
    Draft,
    /// Submitted for categorization.
    Registered,
    /// Visible to applicants.
    Published,
    /// Withdrawn from the board; may be republished.
    Archived,
}

impl VacancyStatus {
    /// Stable lowercase code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Registered => "registered",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for VacancyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl LifecycleStatus for VacancyStatus {
    const ALL: &'static [Self] = &[
        Self::Draft,
        Self::Registered,
        Self::Published,
        Self::Archived,
    ];
    const INVALID_TRANSITION_CODE: &'static str = "vacancy.invalid_transition";
    const AGGREGATE_TYPE: &'static str = "vacancy";

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Registered],
            Self::Registered | Self::Archived => &[Self::Published],
            Self::Published => &[Self::Archived],
        }
    }
}

/// Mutable vacancy fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacancyField {
    Title,
    Description,
    Salary,
    Location,
    RecruiterInfo,
    EmploymentTypes,
    Category,
}

const CONTENT_EDITABLE: &[VacancyStatus] = &[
    VacancyStatus::Draft,
    VacancyStatus::Registered,
    VacancyStatus::Published,
];

impl EditableField for VacancyField {
    type Status = VacancyStatus;
    const LOCKED_CODE: &'static str = "vacancy.field_locked";

    fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Salary => "salary",
            Self::Location => "location",
            Self::RecruiterInfo => "recruiter info",
            Self::EmploymentTypes => "employment types",
            Self::Category => "category",
        }
    }

    fn editable_in(self) -> &'static [VacancyStatus] {
        match self {
            Self::Category => &[VacancyStatus::Registered],
            _ => CONTENT_EDITABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table_matches_lifecycle() {
        let allowed = [
            (VacancyStatus::Draft, VacancyStatus::Registered),
            (VacancyStatus::Registered, VacancyStatus::Published),
            (VacancyStatus::Published, VacancyStatus::Archived),
            (VacancyStatus::Archived, VacancyStatus::Published),
        ];

        for &from in VacancyStatus::ALL {
            for &to in VacancyStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_content_is_locked_only_when_archived() {
        for status in [
            VacancyStatus::Draft,
            VacancyStatus::Registered,
            VacancyStatus::Published,
        ] {
            assert!(VacancyField::Title.is_editable_in(status));
            assert!(VacancyField::EmploymentTypes.is_editable_in(status));
        }
        assert!(!VacancyField::Salary.is_editable_in(VacancyStatus::Archived));
    }

    #[test]
    fn test_category_is_settable_only_while_registered() {
        for &status in VacancyStatus::ALL {
            assert_eq!(
                VacancyField::Category.is_editable_in(status),
                status == VacancyStatus::Registered
            );
        }
    }
}
