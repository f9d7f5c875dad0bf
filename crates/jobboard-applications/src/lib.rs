//! Applications bounded context: applicants applying to published vacancies
//! with published resumes.

pub mod application;
pub mod domain;

#[cfg(test)]
mod fixtures;
