//! Postal location with optional coordinates.

use super::{bounded_text, optional_text};
use crate::error::ValidationError;

/// A WGS-84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validates and builds a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns `location.latitude_out_of_range` outside `[-90, 90]` and
    /// `location.longitude_out_of_range` outside `[-180, 180]`. Non-finite
    /// values are out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::new(
                "latitude",
                "location.latitude_out_of_range",
                format!("latitude must be within [-90, 90], got {latitude}"),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::new(
                "longitude",
                "location.longitude_out_of_range",
                format!("longitude must be within [-180, 180], got {longitude}"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Where a job is performed or a candidate lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    country: String,
    region: Option<String>,
    city: String,
    district: Option<String>,
    address: Option<String>,
    coordinates: Option<GeoPoint>,
}

impl Location {
    const NAME_MAX_CHARS: usize = 100;
    const ADDRESS_MAX_CHARS: usize = 250;

    /// Validates and builds a location.
    ///
    /// Blank optional parts are treated as absent. Latitude and longitude must
    /// be given together.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: `location.country_required`,
    /// `location.city_required`, a `*_too_long` code, a coordinate range code,
    /// or `location.partial_coordinates`.
    pub fn new(
        country: &str,
        region: Option<&str>,
        city: &str,
        district: Option<&str>,
        address: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let country = bounded_text(
            "country",
            "location.country_required",
            "location.country_too_long",
            country,
            Self::NAME_MAX_CHARS,
        )?;
        let city = bounded_text(
            "city",
            "location.city_required",
            "location.city_too_long",
            city,
            Self::NAME_MAX_CHARS,
        )?;
        let region = optional_text("region", "location.region_too_long", region, Self::NAME_MAX_CHARS)?;
        let district = optional_text(
            "district",
            "location.district_too_long",
            district,
            Self::NAME_MAX_CHARS,
        )?;
        let address = optional_text(
            "address",
            "location.address_too_long",
            address,
            Self::ADDRESS_MAX_CHARS,
        )?;
        let coordinates = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)?),
            (None, None) => None,
            _ => {
                return Err(ValidationError::new(
                    "coordinates",
                    "location.partial_coordinates",
                    "latitude and longitude must be given together",
                ));
            }
        };

        Ok(Self {
            country,
            region,
            city,
            district,
            address,
            coordinates,
        })
    }

    /// Country name.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Region or state, if given.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// City name.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// District within the city, if given.
    #[must_use]
    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    /// Street address, if given.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Coordinates, if given.
    #[must_use]
    pub const fn coordinates(&self) -> Option<GeoPoint> {
        self.coordinates
    }
}
