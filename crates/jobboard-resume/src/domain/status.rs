//! Resume lifecycle.

use std::fmt;

use jobboard_core::status::{EditableField, LifecycleStatus};
use serde::{Deserialize, Serialize};

/// Status of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResumeStatus {
    /// Visible only to its owner.
    Draft,
    /// Visible to employers and usable for applications.
    Published,
}

impl ResumeStatus {
    /// Stable lowercase code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for ResumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl LifecycleStatus for ResumeStatus {
    const ALL: &'static [Self] = &[Self::Draft, Self::Published];
    const INVALID_TRANSITION_CODE: &'static str = "resume.invalid_transition";
    const AGGREGATE_TYPE: &'static str = "resume";

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Published],
            Self::Published => &[Self::Draft],
        }
    }
}

/// Mutable resume fields. All are editable in every status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeField {
    Title,
    About,
    DesiredSalary,
    Location,
    Contact,
    EmploymentTypes,
    WorkExperience,
    Education,
}

impl EditableField for ResumeField {
    type Status = ResumeStatus;
    const LOCKED_CODE: &'static str = "resume.field_locked";

    fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::About => "about",
            Self::DesiredSalary => "desired salary",
            Self::Location => "location",
            Self::Contact => "contact",
            Self::EmploymentTypes => "employment types",
            Self::WorkExperience => "work experience",
            Self::Education => "education",
        }
    }

    fn editable_in(self) -> &'static [ResumeStatus] {
        ResumeStatus::ALL
    }
}
