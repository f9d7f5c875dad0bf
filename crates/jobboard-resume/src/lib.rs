//! Resume bounded context: applicant resumes, their history entries, and
//! their listings.

pub mod application;
pub mod domain;
