//! Commands for the Vacancy context.
//!
//! Commands carry raw input; handlers validate it through the value-object
//! factories before touching the aggregate.

use jobboard_core::command::Command;
use jobboard_core::value_objects::{ContactInput, LocationInput, SalaryInput};
use uuid::Uuid;

/// Command to create a draft vacancy.
#[derive(Debug, Clone)]
pub struct CreateVacancy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The employer creating the vacancy.
    pub acting_user_id: Uuid,
    /// Identifier to create the vacancy under.
    pub vacancy_id: Uuid,
    /// Job title.
    pub title: String,
    /// Markdown description.
    pub description: String,
    /// Offered salary, if disclosed.
    pub salary: Option<SalaryInput>,
    /// Where the job is.
    pub location: LocationInput,
    /// Recruiter contact.
    pub recruiter: ContactInput,
    /// Employment type codes.
    pub employment_types: Vec<String>,
}

/// Command to register a draft.
#[derive(Debug, Clone)]
pub struct RegisterVacancy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user registering the vacancy.
    pub acting_user_id: Uuid,
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Command to assign a category to a registered vacancy.
#[derive(Debug, Clone)]
pub struct SetVacancyCategory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user assigning the category.
    pub acting_user_id: Uuid,
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
    /// The category identifier.
    pub category_id: Uuid,
}

/// Command to publish a vacancy.
#[derive(Debug, Clone)]
pub struct PublishVacancy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user publishing the vacancy.
    pub acting_user_id: Uuid,
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Command to archive a published vacancy.
#[derive(Debug, Clone)]
pub struct ArchiveVacancy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user archiving the vacancy.
    pub acting_user_id: Uuid,
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Command to edit vacancy fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateVacancy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user editing the vacancy.
    pub acting_user_id: Uuid,
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
    /// New title.
    pub title: Option<String>,
    /// New markdown description.
    pub description: Option<String>,
    /// New salary; `Some(None)` clears it.
    pub salary: Option<Option<SalaryInput>>,
    /// New location.
    pub location: Option<LocationInput>,
    /// New recruiter contact.
    pub recruiter: Option<ContactInput>,
    /// Employment type codes to add.
    pub add_employment_types: Vec<String>,
    /// Employment type codes to remove.
    pub remove_employment_types: Vec<String>,
}

/// Command to delete a vacancy that is not published.
#[derive(Debug, Clone)]
pub struct DeleteVacancy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user deleting the vacancy.
    pub acting_user_id: Uuid,
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
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
    CreateVacancy => "vacancy.create",
    RegisterVacancy => "vacancy.register",
    SetVacancyCategory => "vacancy.set_category",
    PublishVacancy => "vacancy.publish",
    ArchiveVacancy => "vacancy.archive",
    UpdateVacancy => "vacancy.update",
    DeleteVacancy => "vacancy.delete",
}
