//! Raw, unvalidated shapes of composite value objects as they arrive in
//! commands. Each converts through the value object's factory.

use serde::{Deserialize, Serialize};

use super::{ContactInfo, Location, Salary};
use crate::error::ValidationError;

/// Raw location fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    pub country: String,
    pub region: Option<String>,
    pub city: String,
    pub district: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationInput {
    /// Validates through [`Location::new`].
    ///
    /// # Errors
    ///
    /// Returns the first failing location check.
    pub fn validate(&self) -> Result<Location, ValidationError> {
        Location::new(
            &self.country,
            self.region.as_deref(),
            &self.city,
            self.district.as_deref(),
            self.address.as_deref(),
            self.latitude,
            self.longitude,
        )
    }
}

/// Raw salary range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub currency: String,
}

impl SalaryInput {
    /// Validates through [`Salary::new`].
    ///
    /// # Errors
    ///
    /// Returns the first failing salary check.
    pub fn validate(&self) -> Result<Salary, ValidationError> {
        Salary::new(self.min, self.max, &self.currency)
    }
}

/// Raw contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl ContactInput {
    /// Validates through [`ContactInfo::new`].
    ///
    /// # Errors
    ///
    /// Returns the first failing contact check.
    pub fn validate(&self) -> Result<ContactInfo, ValidationError> {
        ContactInfo::new(&self.name, &self.email, self.phone.as_deref())
    }
}

/// Validates an optional salary, where `None` means "no salary given".
///
/// # Errors
///
/// Returns the salary's validation error.
pub fn validate_salary(input: Option<&SalaryInput>) -> Result<Option<Salary>, ValidationError> {
    input.map(SalaryInput::validate).transpose()
}
