//! Aggregate root for the Vacancy context.

use chrono::{DateTime, Utc};
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::error::DomainError;
use jobboard_core::status::{ensure_editable, ensure_transition};
use jobboard_core::value_objects::{
    ContactInfo, Description, EmploymentType, EmploymentTypeSet, Location, Salary, Title,
};
use uuid::Uuid;

use super::events::{
    VacancyArchived, VacancyCreated, VacancyDeleted, VacancyEvent, VacancyEventKind,
    VacancyPublished, VacancyRegistered, VacancyUpdated,
};
use super::status::{VacancyField, VacancyStatus};

/// Validated content of a new vacancy.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyContent {
    /// Job title.
    pub title: Title,
    /// Markdown description.
    pub description: Description,
    /// Offered salary, if disclosed.
    pub salary: Option<Salary>,
    /// Where the job is.
    pub location: Location,
    /// Who applicants talk to.
    pub recruiter: ContactInfo,
    /// Offered kinds of employment.
    pub employment_types: EmploymentTypeSet,
}

/// The aggregate root for a vacancy.
#[derive(Debug, Clone)]
pub struct Vacancy {
    id: Uuid,
    company_id: Uuid,
    created_by: Uuid,
    status: VacancyStatus,
    content: VacancyContent,
    category_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    registered_at: Option<DateTime<Utc>>,
    published_at: Option<DateTime<Utc>>,
    archived_at: Option<DateTime<Utc>>,
    last_updated_at: DateTime<Utc>,
    /// Persisted version, assigned by the repository.
    version: i64,
    /// Whether fields changed since the last `VacancyUpdated`.
    fields_changed: bool,
    uncommitted_events: Vec<VacancyEvent>,
}

impl Vacancy {
    /// Creates a draft vacancy, producing a `VacancyCreated` event.
    #[must_use]
    pub fn create(
        id: Uuid,
        company_id: Uuid,
        created_by: Uuid,
        content: VacancyContent,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        let mut vacancy = Self {
            id,
            company_id,
            created_by,
            status: VacancyStatus::Draft,
            content,
            category_id: None,
            created_at: now,
            registered_at: None,
            published_at: None,
            archived_at: None,
            last_updated_at: now,
            version: 0,
            fields_changed: false,
            uncommitted_events: Vec::new(),
        };
        vacancy.emit(
            VacancyEventKind::VacancyCreated(VacancyCreated { vacancy_id: id }),
            correlation_id,
            now,
        );
        vacancy
    }

    /// Moves a draft to `Registered`, producing a `VacancyRegistered` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.invalid_transition`) unless
    /// the vacancy is a draft.
    pub fn register(
        &mut self,
        registering_user_id: Uuid,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_transition(self.status, VacancyStatus::Registered)?;
        let now = clock.now();
        self.status = VacancyStatus::Registered;
        self.registered_at = Some(now);
        self.last_updated_at = now;
        self.emit(
            VacancyEventKind::VacancyRegistered(VacancyRegistered {
                vacancy_id: self.id,
                registering_user_id,
            }),
            correlation_id,
            now,
        );
        Ok(())
    }

    /// Publishes the vacancy, producing a `VacancyPublished` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.invalid_transition`) unless
    /// the vacancy is registered or archived, then `DomainError::Problem`
    /// (`vacancy.category_required`) if no category is set.
    pub fn publish(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_transition(self.status, VacancyStatus::Published)?;
        if self.category_id.is_none() {
            return Err(DomainError::problem(
                "vacancy.category_required",
                format!("vacancy {} needs a category before it can be published", self.id),
            ));
        }
        let now = clock.now();
        self.status = VacancyStatus::Published;
        self.published_at = Some(now);
        self.last_updated_at = now;
        self.emit(
            VacancyEventKind::VacancyPublished(VacancyPublished {
                vacancy_id: self.id,
            }),
            correlation_id,
            now,
        );
        Ok(())
    }

    /// Archives a published vacancy, producing a `VacancyArchived` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.invalid_transition`) unless
    /// the vacancy is published.
    pub fn archive(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_transition(self.status, VacancyStatus::Archived)?;
        let now = clock.now();
        self.status = VacancyStatus::Archived;
        self.archived_at = Some(now);
        self.last_updated_at = now;
        self.emit(
            VacancyEventKind::VacancyArchived(VacancyArchived {
                vacancy_id: self.id,
            }),
            correlation_id,
            now,
        );
        Ok(())
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.field_locked`) while archived.
    pub fn update_title(&mut self, title: Title, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_editable(VacancyField::Title, self.status)?;
        if self.content.title != title {
            self.content.title = title;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.field_locked`) while archived.
    pub fn update_description(
        &mut self,
        description: Description,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(VacancyField::Description, self.status)?;
        if self.content.description != description {
            self.content.description = description;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces or clears the salary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.field_locked`) while archived.
    pub fn update_salary(
        &mut self,
        salary: Option<Salary>,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(VacancyField::Salary, self.status)?;
        if self.content.salary != salary {
            self.content.salary = salary;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces the location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.field_locked`) while archived.
    pub fn update_location(
        &mut self,
        location: Location,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(VacancyField::Location, self.status)?;
        if self.content.location != location {
            self.content.location = location;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces the recruiter contact.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.field_locked`) while archived.
    pub fn update_recruiter(
        &mut self,
        recruiter: ContactInfo,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(VacancyField::RecruiterInfo, self.status)?;
        if self.content.recruiter != recruiter {
            self.content.recruiter = recruiter;
            self.touch(clock);
        }
        Ok(())
    }

    /// Adds an employment type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` while archived
    /// (`vacancy.field_locked`) or when the type is already offered
    /// (`employment_type.duplicate`).
    pub fn add_employment_type(
        &mut self,
        employment_type: EmploymentType,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(VacancyField::EmploymentTypes, self.status)?;
        self.content.employment_types = self.content.employment_types.with(employment_type)?;
        self.touch(clock);
        Ok(())
    }

    /// Removes an employment type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` while archived or when the type is not
    /// offered, and `DomainError::Problem` (`employment_type.last_required`)
    /// when it is the last one.
    pub fn remove_employment_type(
        &mut self,
        employment_type: EmploymentType,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(VacancyField::EmploymentTypes, self.status)?;
        self.content.employment_types = self.content.employment_types.without(employment_type)?;
        self.touch(clock);
        Ok(())
    }

    /// Sets the category.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.field_locked`) unless the
    /// vacancy is registered.
    pub fn set_category(&mut self, category_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_editable(VacancyField::Category, self.status)?;
        if self.category_id != Some(category_id) {
            self.category_id = Some(category_id);
            self.touch(clock);
        }
        Ok(())
    }

    /// Emits one `VacancyUpdated` event if any field changed since the last
    /// one. Returns whether an event was emitted.
    pub fn record_update(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.fields_changed {
            return false;
        }
        self.fields_changed = false;
        self.emit(
            VacancyEventKind::VacancyUpdated(VacancyUpdated {
                vacancy_id: self.id,
            }),
            correlation_id,
            clock.now(),
        );
        true
    }

    /// Marks the vacancy for deletion, producing a `VacancyDeleted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`vacancy.delete_published`) while
    /// published; it must be archived first.
    pub fn mark_deleted(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.status == VacancyStatus::Published {
            return Err(DomainError::conflict(
                "vacancy.delete_published",
                format!("vacancy {} must be archived before it is deleted", self.id),
            ));
        }
        self.emit(
            VacancyEventKind::VacancyDeleted(VacancyDeleted {
                vacancy_id: self.id,
            }),
            correlation_id,
            clock.now(),
        );
        Ok(())
    }

    fn touch(&mut self, clock: &dyn Clock) {
        self.last_updated_at = clock.now();
        self.fields_changed = true;
    }

    fn emit(&mut self, kind: VacancyEventKind, correlation_id: Uuid, at: DateTime<Utc>) {
        self.uncommitted_events
            .push(VacancyEvent::new(kind, correlation_id, at));
    }

    /// Owning company.
    #[must_use]
    pub const fn company_id(&self) -> Uuid {
        self.company_id
    }

    /// Employer who created the vacancy.
    #[must_use]
    pub const fn created_by(&self) -> Uuid {
        self.created_by
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> VacancyStatus {
        self.status
    }

    /// Current content.
    #[must_use]
    pub const fn content(&self) -> &VacancyContent {
        &self.content
    }

    /// Assigned category, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn registered_at(&self) -> Option<DateTime<Utc>> {
        self.registered_at
    }

    #[must_use]
    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Time of the last successful mutation.
    #[must_use]
    pub const fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }
}

impl AggregateRoot for Vacancy {
    type Event = VacancyEvent;
    const AGGREGATE_TYPE: &'static str = "vacancy";

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn uncommitted_events(&self) -> &[VacancyEvent] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
