//! Commands for the Resume context.

use chrono::NaiveDate;
use jobboard_core::command::Command;
use jobboard_core::value_objects::{ContactInput, LocationInput, SalaryInput};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw work experience fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceInput {
    pub company: String,
    pub position: String,
    pub start: NaiveDate,
    /// `None` for the current job.
    pub end: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Raw education fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationInput {
    pub institution: String,
    pub degree: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// Command to create a draft resume.
#[derive(Debug, Clone)]
pub struct CreateResume {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The applicant creating the resume.
    pub acting_user_id: Uuid,
    /// Identifier to create the resume under.
    pub resume_id: Uuid,
    /// Headline.
    pub title: String,
    /// Markdown summary.
    pub about: String,
    /// Desired salary, if stated.
    pub desired_salary: Option<SalaryInput>,
    /// Where the applicant wants to work.
    pub location: LocationInput,
    /// Contact details.
    pub contact: ContactInput,
    /// Employment type codes.
    pub employment_types: Vec<String>,
}

/// Command to publish a draft resume.
#[derive(Debug, Clone)]
pub struct PublishResume {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user publishing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
}

/// Command to return a published resume to draft.
#[derive(Debug, Clone)]
pub struct DraftResume {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user unpublishing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
}

/// Command to edit resume fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateResume {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
    /// New headline.
    pub title: Option<String>,
    /// New markdown summary.
    pub about: Option<String>,
    /// New desired salary; `Some(None)` clears it.
    pub desired_salary: Option<Option<SalaryInput>>,
    /// New location.
    pub location: Option<LocationInput>,
    /// New contact details.
    pub contact: Option<ContactInput>,
    /// Employment type codes to add.
    pub add_employment_types: Vec<String>,
    /// Employment type codes to remove.
    pub remove_employment_types: Vec<String>,
}

/// Command to append a work experience entry.
#[derive(Debug, Clone)]
pub struct AddWorkExperience {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
    /// Identifier for the new entry.
    pub entry_id: Uuid,
    /// Entry fields.
    pub entry: WorkExperienceInput,
}

/// Command to replace a work experience entry.
#[derive(Debug, Clone)]
pub struct UpdateWorkExperience {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
    /// The entry to replace.
    pub entry_id: Uuid,
    /// Replacement fields.
    pub entry: WorkExperienceInput,
}

/// Command to remove a work experience entry.
#[derive(Debug, Clone)]
pub struct RemoveWorkExperience {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
    /// The entry to remove.
    pub entry_id: Uuid,
}

/// Command to append an education entry.
#[derive(Debug, Clone)]
pub struct AddEducation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
    /// Identifier for the new entry.
    pub entry_id: Uuid,
    /// Entry fields.
    pub entry: EducationInput,
}

/// Command to replace an education entry.
#[derive(Debug, Clone)]
pub struct UpdateEducation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
    /// The entry to replace.
    pub entry_id: Uuid,
    /// Replacement fields.
    pub entry: EducationInput,
}

/// Command to remove an education entry.
#[derive(Debug, Clone)]
pub struct RemoveEducation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
    /// The entry to remove.
    pub entry_id: Uuid,
}

/// Command to delete a resume.
#[derive(Debug, Clone)]
pub struct DeleteResume {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user deleting the resume.
    pub acting_user_id: Uuid,
    /// The resume identifier.
    pub resume_id: Uuid,
}

macro_rules! impl_command {
    ($($command:ty => $name:literal),+ $(,)?) => {
        $(
            impl Command for $command {
                fn command_type(&self) -> &'static str {
                    $name
                }

                fn correlation_id(&self) -> Uuid {
                    self.correlation_id
                }

                fn acting_user_id(&self) -> Uuid {
                    self.acting_user_id
                }
            }
        )+
    };
}

impl_command! {
    CreateResume => "resume.create",
    PublishResume => "resume.publish",
    DraftResume => "resume.draft",
    UpdateResume => "resume.update",
    AddWorkExperience => "resume.add_work_experience",
    UpdateWorkExperience => "resume.update_work_experience",
    RemoveWorkExperience => "resume.remove_work_experience",
    AddEducation => "resume.add_education",
    UpdateEducation => "resume.update_education",
    RemoveEducation => "resume.remove_education",
    DeleteResume => "resume.delete",
}
