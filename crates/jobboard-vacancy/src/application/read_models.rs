//! Read models for the Vacancy context.
//!
//! Rows are flat and derived entirely from the current vacancy, so building
//! one twice from the same vacancy yields the same row.

use chrono::{DateTime, Utc};
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::ReadModel;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::Vacancy;

/// Public listing of a published vacancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancyListing {
    pub vacancy_id: Uuid,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    /// Plain-text excerpt of the markdown description.
    pub description_excerpt: String,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub salary_currency: Option<String>,
    pub country: String,
    pub region: Option<String>,
    pub city: String,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Employment type codes in a stable order.
    pub employment_types: Vec<String>,
    pub recruiter_name: String,
    pub recruiter_email: String,
    pub published_at: Option<DateTime<Utc>>,
    pub last_updated_at: DateTime<Utc>,
}

impl VacancyListing {
    /// Builds the listing row for `vacancy`.
    #[must_use]
    pub fn from_vacancy(vacancy: &Vacancy, text: &ExcerptRenderer) -> Self {
        let content = vacancy.content();
        let location = &content.location;
        let coordinates = location.coordinates();
        Self {
            vacancy_id: vacancy.aggregate_id(),
            company_id: vacancy.company_id(),
            category_id: vacancy.category_id(),
            title: content.title.as_str().to_owned(),
            description_excerpt: text.excerpt(content.description.markdown()),
            salary_min: content.salary.and_then(|salary| salary.min()),
            salary_max: content.salary.and_then(|salary| salary.max()),
            salary_currency: content
                .salary
                .map(|salary| salary.currency().code().to_owned()),
            country: location.country().to_owned(),
            region: location.region().map(str::to_owned),
            city: location.city().to_owned(),
            district: location.district().map(str::to_owned),
            latitude: coordinates.map(|point| point.latitude()),
            longitude: coordinates.map(|point| point.longitude()),
            employment_types: content.employment_types.codes(),
            recruiter_name: content.recruiter.name().to_owned(),
            recruiter_email: content.recruiter.email().as_str().to_owned(),
            published_at: vacancy.published_at(),
            last_updated_at: vacancy.last_updated_at(),
        }
    }
}

impl ReadModel for VacancyListing {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.vacancy_id
    }
}

/// A company's view of one of its vacancies, in any status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyVacancy {
    pub company_id: Uuid,
    pub vacancy_id: Uuid,
    pub title: String,
    /// Status code, e.g. `registered`.
    pub status: String,
    pub category_id: Option<Uuid>,
    pub employment_types: Vec<String>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub salary_currency: Option<String>,
    pub city: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub registered_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
    pub last_updated_at: DateTime<Utc>,
}

impl CompanyVacancy {
    /// Builds the company row for `vacancy`.
    #[must_use]
    pub fn from_vacancy(vacancy: &Vacancy) -> Self {
        let content = vacancy.content();
        Self {
            company_id: vacancy.company_id(),
            vacancy_id: vacancy.aggregate_id(),
            title: content.title.as_str().to_owned(),
            status: vacancy.status().code().to_owned(),
            category_id: vacancy.category_id(),
            employment_types: content.employment_types.codes(),
            salary_min: content.salary.and_then(|salary| salary.min()),
            salary_max: content.salary.and_then(|salary| salary.max()),
            salary_currency: content
                .salary
                .map(|salary| salary.currency().code().to_owned()),
            city: content.location.city().to_owned(),
            created_by: vacancy.created_by(),
            created_at: vacancy.created_at(),
            registered_at: vacancy.registered_at(),
            published_at: vacancy.published_at(),
            archived_at: vacancy.archived_at(),
            last_updated_at: vacancy.last_updated_at(),
        }
    }
}

impl ReadModel for CompanyVacancy {
    type Key = (Uuid, Uuid);

    fn key(&self) -> (Uuid, Uuid) {
        (self.company_id, self.vacancy_id)
    }
}
