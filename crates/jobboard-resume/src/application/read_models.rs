//! Read models for the Resume context.

use chrono::{DateTime, Utc};
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::ReadModel;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::Resume;

/// Public listing of a published resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeListing {
    pub resume_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    /// Plain-text excerpt of the markdown summary.
    pub about_excerpt: String,
    pub desired_salary_min: Option<u64>,
    pub desired_salary_max: Option<u64>,
    pub desired_salary_currency: Option<String>,
    pub country: String,
    pub region: Option<String>,
    pub city: String,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub employment_types: Vec<String>,
    /// Position of the first listed job, if any.
    pub latest_position: Option<String>,
    pub work_experience_count: usize,
    pub education_count: usize,
    pub contact_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub last_updated_at: DateTime<Utc>,
}

impl ResumeListing {
    /// Builds the listing row for `resume`.
    #[must_use]
    pub fn from_resume(resume: &Resume, text: &ExcerptRenderer) -> Self {
        let content = resume.content();
        let location = &content.location;
        let coordinates = location.coordinates();
        let salary = content.desired_salary;
        Self {
            resume_id: resume.aggregate_id(),
            owner_id: resume.owner_id(),
            title: content.title.as_str().to_owned(),
            about_excerpt: text.excerpt(content.about.markdown()),
            desired_salary_min: salary.and_then(|salary| salary.min()),
            desired_salary_max: salary.and_then(|salary| salary.max()),
            desired_salary_currency: salary.map(|salary| salary.currency().code().to_owned()),
            country: location.country().to_owned(),
            region: location.region().map(str::to_owned),
            city: location.city().to_owned(),
            district: location.district().map(str::to_owned),
            latitude: coordinates.map(|point| point.latitude()),
            longitude: coordinates.map(|point| point.longitude()),
            employment_types: content.employment_types.codes(),
            latest_position: resume
                .work_experience()
                .first()
                .map(|entry| entry.position().to_owned()),
            work_experience_count: resume.work_experience().len(),
            education_count: resume.education().len(),
            contact_name: content.contact.name().to_owned(),
            published_at: resume.published_at(),
            last_updated_at: resume.last_updated_at(),
        }
    }
}

impl ReadModel for ResumeListing {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.resume_id
    }
}

/// An applicant's view of one of their resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResume {
    pub resume_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub status: String,
    pub employment_types: Vec<String>,
    pub city: String,
    pub work_experience_count: usize,
    pub education_count: usize,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub last_updated_at: DateTime<Utc>,
}

impl UserResume {
    #[must_use]
    pub fn from_resume(resume: &Resume) -> Self {
        let content = resume.content();
        Self {
            resume_id: resume.aggregate_id(),
            owner_id: resume.owner_id(),
            title: content.title.as_str().to_owned(),
            status: resume.status().code().to_owned(),
            employment_types: content.employment_types.codes(),
            city: content.location.city().to_owned(),
            work_experience_count: resume.work_experience().len(),
            education_count: resume.education().len(),
            created_at: resume.created_at(),
            published_at: resume.published_at(),
            last_updated_at: resume.last_updated_at(),
        }
    }
}

impl ReadModel for UserResume {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.resume_id
    }
}
