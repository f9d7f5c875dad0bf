//! Job application lifecycle.

use std::fmt;

use jobboard_core::status::LifecycleStatus;
use serde::{Deserialize, Serialize};

/// Status of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Awaiting the employer.
    Submitted,
    /// Pulled back by the applicant. Terminal.
    Withdrawn,
}

impl ApplicationStatus {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl LifecycleStatus for ApplicationStatus {
    const ALL: &'static [Self] = &[Self::Submitted, Self::Withdrawn];
    const INVALID_TRANSITION_CODE: &'static str = "application.invalid_transition";
    const AGGREGATE_TYPE: &'static str = "job_application";

    fn successors(self) -> &'static [Self] {
        match self {
            Self::Submitted => &[Self::Withdrawn],
            Self::Withdrawn => &[],
        }
    }
}
