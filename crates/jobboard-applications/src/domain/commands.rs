//! Commands for the Applications context.

use jobboard_core::command::Command;
use uuid::Uuid;

/// Command to apply to a vacancy with a resume.
#[derive(Debug, Clone)]
pub struct SubmitApplication {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The applicant.
    pub acting_user_id: Uuid,
    /// Identifier to create the application under.
    pub application_id: Uuid,
    /// The vacancy applied to.
    pub vacancy_id: Uuid,
    /// The resume applied with.
    pub resume_id: Uuid,
    /// Optional markdown cover letter.
    pub cover_letter: Option<String>,
}

/// Command to withdraw a submitted application.
#[derive(Debug, Clone)]
pub struct WithdrawApplication {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The applicant.
    pub acting_user_id: Uuid,
    /// The application identifier.
    pub application_id: Uuid,
}

impl Command for SubmitApplication {
    fn command_type(&self) -> &'static str {
        "application.submit"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn acting_user_id(&self) -> Uuid {
        self.acting_user_id
    }
}

impl Command for WithdrawApplication {
    fn command_type(&self) -> &'static str {
        "application.withdraw"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn acting_user_id(&self) -> Uuid {
        self.acting_user_id
    }
}
