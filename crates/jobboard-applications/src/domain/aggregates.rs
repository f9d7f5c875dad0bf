//! Aggregate root for the Applications context.

use chrono::{DateTime, Utc};
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::error::DomainError;
use jobboard_core::status::ensure_transition;
use jobboard_core::value_objects::Description;
use uuid::Uuid;

use super::events::{
    ApplicationEvent, ApplicationEventKind, ApplicationSubmitted, ApplicationWithdrawn,
};
use super::status::ApplicationStatus;

/// An applicant's application to a vacancy with one of their resumes.
#[derive(Debug, Clone)]
pub struct JobApplication {
    id: Uuid,
    vacancy_id: Uuid,
    resume_id: Uuid,
    applicant_id: Uuid,
    cover_letter: Option<Description>,
    status: ApplicationStatus,
    submitted_at: DateTime<Utc>,
    withdrawn_at: Option<DateTime<Utc>>,
    version: i64,
    uncommitted_events: Vec<ApplicationEvent>,
}

/// The parties an application links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationParties {
    pub vacancy_id: Uuid,
    pub resume_id: Uuid,
    pub applicant_id: Uuid,
}

impl JobApplication {
    /// Submits a new application, producing an `ApplicationSubmitted` event.
    ///
    /// Eligibility is checked by `ApplicationPolicy` before this is called.
    #[must_use]
    pub fn submit(
        id: Uuid,
        parties: ApplicationParties,
        cover_letter: Option<Description>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        let mut application = Self {
            id,
            vacancy_id: parties.vacancy_id,
            resume_id: parties.resume_id,
            applicant_id: parties.applicant_id,
            cover_letter,
            status: ApplicationStatus::Submitted,
            submitted_at: now,
            withdrawn_at: None,
            version: 0,
            uncommitted_events: Vec::new(),
        };
        application.uncommitted_events.push(ApplicationEvent::new(
            ApplicationEventKind::ApplicationSubmitted(ApplicationSubmitted {
                application_id: id,
            }),
            correlation_id,
            now,
        ));
        application
    }

    /// Withdraws the application on behalf of its applicant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Problem` (`application.applicant_mismatch`) when
    /// someone else asks, or `Conflict` if it is already withdrawn.
    pub fn withdraw(
        &mut self,
        acting_user_id: Uuid,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if acting_user_id != self.applicant_id {
            return Err(DomainError::problem(
                "application.applicant_mismatch",
                format!("user {acting_user_id} did not submit application {}", self.id),
            ));
        }
        ensure_transition(self.status, ApplicationStatus::Withdrawn)?;
        let now = clock.now();
        self.status = ApplicationStatus::Withdrawn;
        self.withdrawn_at = Some(now);
        self.uncommitted_events.push(ApplicationEvent::new(
            ApplicationEventKind::ApplicationWithdrawn(ApplicationWithdrawn {
                application_id: self.id,
            }),
            correlation_id,
            now,
        ));
        Ok(())
    }

    #[must_use]
    pub const fn vacancy_id(&self) -> Uuid {
        self.vacancy_id
    }

    #[must_use]
    pub const fn resume_id(&self) -> Uuid {
        self.resume_id
    }

    #[must_use]
    pub const fn applicant_id(&self) -> Uuid {
        self.applicant_id
    }

    #[must_use]
    pub const fn cover_letter(&self) -> Option<&Description> {
        self.cover_letter.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Whether the application is still awaiting the employer.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ApplicationStatus::Submitted
    }

    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    #[must_use]
    pub const fn withdrawn_at(&self) -> Option<DateTime<Utc>> {
        self.withdrawn_at
    }
}

impl AggregateRoot for JobApplication {
    type Event = ApplicationEvent;
    const AGGREGATE_TYPE: &'static str = "job_application";

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn uncommitted_events(&self) -> &[ApplicationEvent] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jobboard_core::error::ErrorKind;
    use jobboard_core::event::DomainEvent;
    use jobboard_test_support::FixedClock;

    use super::*;
    use crate::domain::events::{
        APPLICATION_SUBMITTED_EVENT_TYPE, APPLICATION_WITHDRAWN_EVENT_TYPE,
    };

    pub(crate) fn submitted(parties: ApplicationParties, clock: &FixedClock) -> JobApplication {
        let mut application =
            JobApplication::submit(Uuid::new_v4(), parties, None, Uuid::new_v4(), clock);
        application.clear_uncommitted_events();
        application
    }

    fn parties() -> ApplicationParties {
        ApplicationParties {
            vacancy_id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_submit_emits_event() {
        // Arrange
        let clock = FixedClock::default();
        let cover_letter = Description::new("Hire me.").unwrap();

        // Act
        let application = JobApplication::submit(
            Uuid::new_v4(),
            parties(),
            Some(cover_letter),
            Uuid::new_v4(),
            &clock,
        );

        // Assert
        assert!(application.is_active());
        assert_eq!(application.submitted_at(), clock.0);
        assert_eq!(
            application.uncommitted_events()[0].event_type(),
            APPLICATION_SUBMITTED_EVENT_TYPE
        );
    }

    #[test]
    fn test_withdraw_once() {
        // Arrange
        let clock = FixedClock::default();
        let parties = parties();
        let mut application = submitted(parties, &clock);

        // Act
        application
            .withdraw(parties.applicant_id, Uuid::new_v4(), &clock)
            .unwrap();
        let err = application
            .withdraw(parties.applicant_id, Uuid::new_v4(), &clock)
            .unwrap_err();

        // Assert
        assert_eq!(application.status(), ApplicationStatus::Withdrawn);
        assert_eq!(application.withdrawn_at(), Some(clock.0));
        assert_eq!(err.code(), "application.invalid_transition");
        assert_eq!(application.uncommitted_events().len(), 1);
        assert_eq!(
            application.uncommitted_events()[0].event_type(),
            APPLICATION_WITHDRAWN_EVENT_TYPE
        );
    }

    #[test]
    fn test_only_applicant_can_withdraw() {
        let clock = FixedClock::default();
        let mut application = submitted(parties(), &clock);

        let err = application
            .withdraw(Uuid::new_v4(), Uuid::new_v4(), &clock)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Problem);
        assert!(application.is_active());
    }
}
