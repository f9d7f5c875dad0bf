//! Read models for the Applications context.

use chrono::{DateTime, Utc};
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::ReadModel;
use jobboard_resume::domain::aggregates::Resume;
use jobboard_vacancy::domain::aggregates::Vacancy;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::JobApplication;

/// A submitted application joined with its vacancy and resume.
///
/// Exists while the application is submitted, its vacancy is published and
/// its resume exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationView {
    pub application_id: Uuid,
    pub vacancy_id: Uuid,
    pub resume_id: Uuid,
    pub applicant_id: Uuid,
    pub company_id: Uuid,
    pub vacancy_title: String,
    pub vacancy_city: String,
    pub resume_title: String,
    pub applicant_name: String,
    pub applicant_email: String,
    /// Plain-text excerpt of the cover letter.
    pub cover_letter_excerpt: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationView {
    #[must_use]
    pub fn build(
        application: &JobApplication,
        vacancy: &Vacancy,
        resume: &Resume,
        text: &ExcerptRenderer,
    ) -> Self {
        let contact = &resume.content().contact;
        Self {
            application_id: application.aggregate_id(),
            vacancy_id: vacancy.aggregate_id(),
            resume_id: resume.aggregate_id(),
            applicant_id: application.applicant_id(),
            company_id: vacancy.company_id(),
            vacancy_title: vacancy.content().title.as_str().to_owned(),
            vacancy_city: vacancy.content().location.city().to_owned(),
            resume_title: resume.content().title.as_str().to_owned(),
            applicant_name: contact.name().to_owned(),
            applicant_email: contact.email().as_str().to_owned(),
            cover_letter_excerpt: application
                .cover_letter()
                .map(|letter| text.excerpt(letter.markdown())),
            submitted_at: application.submitted_at(),
        }
    }
}

impl ReadModel for ApplicationView {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.application_id
    }
}

/// Application counts for one published vacancy, recomputed from the write
/// model. Applications whose resume was deleted are not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyApplicationSummary {
    pub vacancy_id: Uuid,
    pub company_id: Uuid,
    pub submitted_count: usize,
    pub withdrawn_count: usize,
    pub last_submitted_at: Option<DateTime<Utc>>,
}

impl VacancyApplicationSummary {
    /// Summarizes `applications`, which must all belong to `vacancy`.
    #[must_use]
    pub fn build(vacancy: &Vacancy, applications: &[JobApplication]) -> Self {
        let submitted_count = applications.iter().filter(|a| a.is_active()).count();
        Self {
            vacancy_id: vacancy.aggregate_id(),
            company_id: vacancy.company_id(),
            submitted_count,
            withdrawn_count: applications.len() - submitted_count,
            last_submitted_at: applications
                .iter()
                .filter(|a| a.is_active())
                .map(JobApplication::submitted_at)
                .max(),
        }
    }
}

impl ReadModel for VacancyApplicationSummary {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.vacancy_id
    }
}
