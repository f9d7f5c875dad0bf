//! Aggregate root for the Resume context.

use chrono::{DateTime, Utc};
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::error::DomainError;
use jobboard_core::status::{ensure_editable, ensure_transition};
use jobboard_core::value_objects::{
    ContactInfo, Description, EmploymentType, EmploymentTypeSet, Location, Salary, Title,
};
use uuid::Uuid;

use super::entities::{Education, WorkExperience};
use super::events::{
    ResumeCreated, ResumeDeleted, ResumeDrafted, ResumeEvent, ResumeEventKind, ResumePublished,
    ResumeUpdated,
};
use super::status::{ResumeField, ResumeStatus};

/// Validated scalar content of a resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeContent {
    /// Headline, e.g. the sought position.
    pub title: Title,
    /// Markdown summary.
    pub about: Description,
    /// Expected salary, if stated.
    pub desired_salary: Option<Salary>,
    /// Where the applicant wants to work.
    pub location: Location,
    /// How employers reach the applicant.
    pub contact: ContactInfo,
    /// Acceptable kinds of employment.
    pub employment_types: EmploymentTypeSet,
}

/// The aggregate root for a resume.
#[derive(Debug, Clone)]
pub struct Resume {
    id: Uuid,
    owner_id: Uuid,
    status: ResumeStatus,
    content: ResumeContent,
    work_experience: Vec<WorkExperience>,
    education: Vec<Education>,
    created_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    last_updated_at: DateTime<Utc>,
    version: i64,
    fields_changed: bool,
    uncommitted_events: Vec<ResumeEvent>,
}

impl Resume {
    /// Creates a draft resume, producing a `ResumeCreated` event.
    #[must_use]
    pub fn create(
        id: Uuid,
        owner_id: Uuid,
        content: ResumeContent,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        let mut resume = Self {
            id,
            owner_id,
            status: ResumeStatus::Draft,
            content,
            work_experience: Vec::new(),
            education: Vec::new(),
            created_at: now,
            published_at: None,
            last_updated_at: now,
            version: 0,
            fields_changed: false,
            uncommitted_events: Vec::new(),
        };
        resume.emit(
            ResumeEventKind::ResumeCreated(ResumeCreated { resume_id: id }),
            correlation_id,
            now,
        );
        resume
    }

    /// Publishes a draft, producing a `ResumePublished` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`resume.invalid_transition`) if it is
    /// already published.
    pub fn publish(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_transition(self.status, ResumeStatus::Published)?;
        let now = clock.now();
        self.status = ResumeStatus::Published;
        self.published_at = Some(now);
        self.last_updated_at = now;
        self.emit(
            ResumeEventKind::ResumePublished(ResumePublished { resume_id: self.id }),
            correlation_id,
            now,
        );
        Ok(())
    }

    /// Returns a published resume to draft, producing a `ResumeDrafted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`resume.invalid_transition`) if it is
    /// already a draft.
    pub fn draft(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_transition(self.status, ResumeStatus::Draft)?;
        let now = clock.now();
        self.status = ResumeStatus::Draft;
        self.published_at = None;
        self.last_updated_at = now;
        self.emit(
            ResumeEventKind::ResumeDrafted(ResumeDrafted { resume_id: self.id }),
            correlation_id,
            now,
        );
        Ok(())
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if the title is locked.
    pub fn update_title(&mut self, title: Title, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_editable(ResumeField::Title, self.status)?;
        if self.content.title != title {
            self.content.title = title;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces the summary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if the summary is locked.
    pub fn update_about(&mut self, about: Description, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_editable(ResumeField::About, self.status)?;
        if self.content.about != about {
            self.content.about = about;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces or clears the desired salary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if the salary is locked.
    pub fn update_desired_salary(
        &mut self,
        salary: Option<Salary>,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::DesiredSalary, self.status)?;
        if self.content.desired_salary != salary {
            self.content.desired_salary = salary;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces the location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if the location is locked.
    pub fn update_location(
        &mut self,
        location: Location,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::Location, self.status)?;
        if self.content.location != location {
            self.content.location = location;
            self.touch(clock);
        }
        Ok(())
    }

    /// Replaces the contact details.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if the contact is locked.
    pub fn update_contact(
        &mut self,
        contact: ContactInfo,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::Contact, self.status)?;
        if self.content.contact != contact {
            self.content.contact = contact;
            self.touch(clock);
        }
        Ok(())
    }

    /// Adds an acceptable employment type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`employment_type.duplicate`) if it is
    /// already listed.
    pub fn add_employment_type(
        &mut self,
        employment_type: EmploymentType,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::EmploymentTypes, self.status)?;
        self.content.employment_types = self.content.employment_types.with(employment_type)?;
        self.touch(clock);
        Ok(())
    }

    /// Removes an employment type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if it is not listed and
    /// `DomainError::Problem` (`employment_type.last_required`) for the last
    /// one.
    pub fn remove_employment_type(
        &mut self,
        employment_type: EmploymentType,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::EmploymentTypes, self.status)?;
        self.content.employment_types = self.content.employment_types.without(employment_type)?;
        self.touch(clock);
        Ok(())
    }

    /// Appends a work experience entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`resume.duplicate_entry`) if an entry
    /// with the same id exists.
    pub fn add_work_experience(
        &mut self,
        entry: WorkExperience,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::WorkExperience, self.status)?;
        if self.work_experience.iter().any(|e| e.id() == entry.id()) {
            return Err(duplicate_entry("work experience", entry.id()));
        }
        self.work_experience.push(entry);
        self.touch(clock);
        Ok(())
    }

    /// Replaces the work experience entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` for an unknown entry.
    pub fn update_work_experience(
        &mut self,
        entry: WorkExperience,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::WorkExperience, self.status)?;
        let slot = self
            .work_experience
            .iter_mut()
            .find(|e| e.id() == entry.id())
            .ok_or(DomainError::not_found("work_experience", entry.id()))?;
        if *slot != entry {
            *slot = entry;
            self.touch(clock);
        }
        Ok(())
    }

    /// Removes a work experience entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` for an unknown entry.
    pub fn remove_work_experience(
        &mut self,
        entry_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::WorkExperience, self.status)?;
        let index = self
            .work_experience
            .iter()
            .position(|e| e.id() == entry_id)
            .ok_or(DomainError::not_found("work_experience", entry_id))?;
        self.work_experience.remove(index);
        self.touch(clock);
        Ok(())
    }

    /// Appends an education entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` (`resume.duplicate_entry`) if an entry
    /// with the same id exists.
    pub fn add_education(&mut self, entry: Education, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_editable(ResumeField::Education, self.status)?;
        if self.education.iter().any(|e| e.id() == entry.id()) {
            return Err(duplicate_entry("education", entry.id()));
        }
        self.education.push(entry);
        self.touch(clock);
        Ok(())
    }

    /// Replaces the education entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` for an unknown entry.
    pub fn update_education(
        &mut self,
        entry: Education,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        ensure_editable(ResumeField::Education, self.status)?;
        let slot = self
            .education
            .iter_mut()
            .find(|e| e.id() == entry.id())
            .ok_or(DomainError::not_found("education", entry.id()))?;
        if *slot != entry {
            *slot = entry;
            self.touch(clock);
        }
        Ok(())
    }

    /// Removes an education entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` for an unknown entry.
    pub fn remove_education(&mut self, entry_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        ensure_editable(ResumeField::Education, self.status)?;
        let index = self
            .education
            .iter()
            .position(|e| e.id() == entry_id)
            .ok_or(DomainError::not_found("education", entry_id))?;
        self.education.remove(index);
        self.touch(clock);
        Ok(())
    }

    /// Emits one `ResumeUpdated` event if anything changed since the last
    /// one. Returns whether an event was emitted.
    pub fn record_update(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.fields_changed {
            return false;
        }
        self.fields_changed = false;
        self.emit(
            ResumeEventKind::ResumeUpdated(ResumeUpdated { resume_id: self.id }),
            correlation_id,
            clock.now(),
        );
        true
    }

    /// Marks the resume for deletion, producing a `ResumeDeleted` event.
    /// Allowed in every status.
    pub fn mark_deleted(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.emit(
            ResumeEventKind::ResumeDeleted(ResumeDeleted { resume_id: self.id }),
            correlation_id,
            clock.now(),
        );
    }

    fn touch(&mut self, clock: &dyn Clock) {
        self.last_updated_at = clock.now();
        self.fields_changed = true;
    }

    fn emit(&mut self, kind: ResumeEventKind, correlation_id: Uuid, at: DateTime<Utc>) {
        self.uncommitted_events
            .push(ResumeEvent::new(kind, correlation_id, at));
    }

    /// The applicant who owns the resume.
    #[must_use]
    pub const fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    #[must_use]
    pub const fn status(&self) -> ResumeStatus {
        self.status
    }

    #[must_use]
    pub const fn content(&self) -> &ResumeContent {
        &self.content
    }

    /// Work history in insertion order.
    #[must_use]
    pub fn work_experience(&self) -> &[WorkExperience] {
        &self.work_experience
    }

    /// Education in insertion order.
    #[must_use]
    pub fn education(&self) -> &[Education] {
        &self.education
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the resume was last published; cleared on return to draft.
    #[must_use]
    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    #[must_use]
    pub const fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }
}

fn duplicate_entry(entry: &str, id: Uuid) -> DomainError {
    DomainError::conflict(
        "resume.duplicate_entry",
        format!("{entry} entry {id} already exists"),
    )
}

impl AggregateRoot for Resume {
    type Event = ResumeEvent;
    const AGGREGATE_TYPE: &'static str = "resume";

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn uncommitted_events(&self) -> &[ResumeEvent] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{Duration, NaiveDate};
    use jobboard_core::error::ErrorKind;
    use jobboard_core::event::DomainEvent;
    use jobboard_core::value_objects::DateRange;
    use jobboard_test_support::FixedClock;

    use super::*;
    use crate::domain::events::{
        RESUME_DRAFTED_EVENT_TYPE, RESUME_PUBLISHED_EVENT_TYPE, RESUME_UPDATED_EVENT_TYPE,
    };

    pub(crate) fn sample_content() -> ResumeContent {
        ResumeContent {
            title: Title::new("Rust Developer").unwrap(),
            about: Description::new("Ten years of *systems* work.").unwrap(),
            desired_salary: Some(Salary::new(Some(70_000), None, "EUR").unwrap()),
            location: Location::new("Spain", None, "Madrid", None, None, None, None).unwrap(),
            contact: ContactInfo::new("Alex Applicant", "alex@example.com", None).unwrap(),
            employment_types: EmploymentTypeSet::new([
                EmploymentType::FullTime,
                EmploymentType::Contract,
            ])
            .unwrap(),
        }
    }

    pub(crate) fn resume_in(status: ResumeStatus, clock: &FixedClock) -> Resume {
        let mut resume = Resume::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            sample_content(),
            Uuid::new_v4(),
            clock,
        );
        if status == ResumeStatus::Published {
            resume.publish(Uuid::new_v4(), clock).unwrap();
        }
        resume.clear_uncommitted_events();
        resume
    }

    pub(crate) fn job(id: Uuid, position: &str) -> WorkExperience {
        let period = DateRange::new(
            NaiveDate::from_ymd_opt(2019, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30),
        )
        .unwrap();
        WorkExperience::new(id, "Acme", position, period, Some("Shipped things.")).unwrap()
    }

    fn degree(id: Uuid) -> Education {
        let period = DateRange::new(
            NaiveDate::from_ymd_opt(2012, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 6, 30),
        )
        .unwrap();
        Education::new(id, "University of Porto", "BSc Informatics", period).unwrap()
    }

    #[test]
    fn test_publish_and_draft_toggle_with_events() {
        // Arrange
        let clock = FixedClock::default();
        let mut resume = resume_in(ResumeStatus::Draft, &clock);

        // Act
        resume.publish(Uuid::new_v4(), &clock).unwrap();
        resume.draft(Uuid::new_v4(), &clock).unwrap();

        // Assert
        let types: Vec<_> = resume
            .uncommitted_events()
            .iter()
            .map(DomainEvent::event_type)
            .collect();
        assert_eq!(types, vec![RESUME_PUBLISHED_EVENT_TYPE, RESUME_DRAFTED_EVENT_TYPE]);
        assert_eq!(resume.status(), ResumeStatus::Draft);
        assert!(resume.published_at().is_none());
    }

    #[test]
    fn test_draft_twice_is_a_conflict() {
        // Arrange
        let clock = FixedClock::default();
        let mut resume = resume_in(ResumeStatus::Published, &clock);
        resume.draft(Uuid::new_v4(), &clock).unwrap();

        // Act
        let err = resume.draft(Uuid::new_v4(), &clock).unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), "resume.invalid_transition");
        assert_eq!(resume.uncommitted_events().len(), 1);
    }

    #[test]
    fn test_publish_twice_is_a_conflict() {
        let clock = FixedClock::default();
        let mut resume = resume_in(ResumeStatus::Published, &clock);

        let err = resume.publish(Uuid::new_v4(), &clock).unwrap_err();

        assert_eq!(err.code(), "resume.invalid_transition");
        assert!(resume.uncommitted_events().is_empty());
    }

    #[test]
    fn test_fields_are_editable_while_published() {
        // Arrange
        let clock = FixedClock::default();
        let later = FixedClock(clock.0 + Duration::days(1));
        let mut resume = resume_in(ResumeStatus::Published, &clock);

        // Act
        resume
            .update_title(Title::new("Senior Rust Developer").unwrap(), &later)
            .unwrap();
        resume
            .update_about(Description::new("Still doing systems work.").unwrap(), &later)
            .unwrap();
        resume
            .remove_employment_type(EmploymentType::Contract, &later)
            .unwrap();
        resume.update_desired_salary(None, &later).unwrap();

        // Assert
        assert!(resume.record_update(Uuid::new_v4(), &later));
        assert_eq!(resume.uncommitted_events().len(), 1);
        assert_eq!(
            resume.uncommitted_events()[0].event_type(),
            RESUME_UPDATED_EVENT_TYPE
        );
        assert_eq!(resume.content().employment_types.codes(), vec!["full_time"]);
        assert_eq!(resume.last_updated_at(), later.0);
    }

    #[test]
    fn test_work_experience_lifecycle() {
        // Arrange
        let clock = FixedClock::default();
        let mut resume = resume_in(ResumeStatus::Draft, &clock);
        let entry_id = Uuid::new_v4();

        // Act
        resume.add_work_experience(job(entry_id, "Engineer"), &clock).unwrap();
        resume
            .update_work_experience(job(entry_id, "Lead Engineer"), &clock)
            .unwrap();

        // Assert
        assert_eq!(resume.work_experience().len(), 1);
        assert_eq!(resume.work_experience()[0].position(), "Lead Engineer");

        resume.remove_work_experience(entry_id, &clock).unwrap();
        assert!(resume.work_experience().is_empty());
    }

    #[test]
    fn test_unknown_child_id_is_not_found() {
        // Arrange
        let clock = FixedClock::default();
        let mut resume = resume_in(ResumeStatus::Draft, &clock);
        let unknown = Uuid::new_v4();

        // Act
        let results = [
            resume.update_work_experience(job(unknown, "Engineer"), &clock),
            resume.remove_work_experience(unknown, &clock),
            resume.update_education(degree(unknown), &clock),
            resume.remove_education(unknown, &clock),
        ];

        // Assert
        for result in results {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
        }
        assert!(!resume.record_update(Uuid::new_v4(), &clock));
    }

    #[test]
    fn test_duplicate_child_id_is_a_conflict() {
        let clock = FixedClock::default();
        let mut resume = resume_in(ResumeStatus::Draft, &clock);
        let entry_id = Uuid::new_v4();
        resume.add_education(degree(entry_id), &clock).unwrap();

        let err = resume.add_education(degree(entry_id), &clock).unwrap_err();

        assert_eq!(err.code(), "resume.duplicate_entry");
        assert_eq!(resume.education().len(), 1);
    }

    #[test]
    fn test_delete_allowed_in_any_status() {
        let clock = FixedClock::default();
        for status in [ResumeStatus::Draft, ResumeStatus::Published] {
            let mut resume = resume_in(status, &clock);

            resume.mark_deleted(Uuid::new_v4(), &clock);

            assert!(matches!(
                resume.uncommitted_events()[0].kind,
                ResumeEventKind::ResumeDeleted(_)
            ));
        }
    }
}
