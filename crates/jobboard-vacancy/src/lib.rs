//! Vacancy bounded context: the vacancy lifecycle and its listings.

pub mod application;
pub mod domain;
