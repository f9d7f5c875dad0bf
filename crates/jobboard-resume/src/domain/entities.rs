//! Child entities owned by a resume.

use jobboard_core::error::ValidationError;
use jobboard_core::value_objects::{DateRange, Description, bounded_text};
use uuid::Uuid;

const NAME_MAX_CHARS: usize = 150;

/// A past or current job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkExperience {
    id: Uuid,
    company: String,
    position: String,
    period: DateRange,
    description: Option<Description>,
}

impl WorkExperience {
    /// Validates and builds a work experience entry.
    ///
    /// # Errors
    ///
    /// Returns `work_experience.company_required`,
    /// `work_experience.position_required`, their `*_too_long` codes, or the
    /// description's error.
    pub fn new(
        id: Uuid,
        company: &str,
        position: &str,
        period: DateRange,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let company = bounded_text(
            "company",
            "work_experience.company_required",
            "work_experience.company_too_long",
            company,
            NAME_MAX_CHARS,
        )?;
        let position = bounded_text(
            "position",
            "work_experience.position_required",
            "work_experience.position_too_long",
            position,
            NAME_MAX_CHARS,
        )?;
        let description = match description.map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(Description::new(text)?),
        };
        Ok(Self {
            id,
            company,
            position,
            period,
            description,
        })
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn company(&self) -> &str {
        &self.company
    }

    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }

    #[must_use]
    pub const fn period(&self) -> DateRange {
        self.period
    }

    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }
}

/// A degree or course of study.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Education {
    id: Uuid,
    institution: String,
    degree: String,
    period: DateRange,
}

impl Education {
    /// Validates and builds an education entry.
    ///
    /// # Errors
    ///
    /// Returns `education.institution_required`, `education.degree_required`
    /// or their `*_too_long` codes.
    pub fn new(
        id: Uuid,
        institution: &str,
        degree: &str,
        period: DateRange,
    ) -> Result<Self, ValidationError> {
        let institution = bounded_text(
            "institution",
            "education.institution_required",
            "education.institution_too_long",
            institution,
            NAME_MAX_CHARS,
        )?;
        let degree = bounded_text(
            "degree",
            "education.degree_required",
            "education.degree_too_long",
            degree,
            NAME_MAX_CHARS,
        )?;
        Ok(Self {
            id,
            institution,
            degree,
            period,
        })
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn institution(&self) -> &str {
        &self.institution
    }

    #[must_use]
    pub fn degree(&self) -> &str {
        &self.degree
    }

    #[must_use]
    pub const fn period(&self) -> DateRange {
        self.period
    }
}
