//! Currency, money and salary ranges.

use std::fmt;

use crate::error::ValidationError;

/// ISO-4217 style three-letter currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency([u8; 3]);

impl Currency {
    /// Validates and builds a currency code. Lowercase input is normalized.
    ///
    /// # Errors
    ///
    /// Returns `currency.invalid_code` unless the input is exactly three ASCII
    /// letters.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let bytes = raw.trim().as_bytes();
        match bytes {
            [a, b, c] if bytes.iter().all(u8::is_ascii_alphabetic) => Ok(Self([
                a.to_ascii_uppercase(),
                b.to_ascii_uppercase(),
                c.to_ascii_uppercase(),
            ])),
            _ => Err(ValidationError::new(
                "currency",
                "currency.invalid_code",
                format!("currency must be a three-letter code, got {raw:?}"),
            )),
        }
    }

    /// Returns the code, e.g. `"EUR"`.
    #[must_use]
    pub fn code(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A non-negative amount in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    amount: u64,
    currency: Currency,
}

impl Money {
    /// Validates and builds an amount of money.
    ///
    /// # Errors
    ///
    /// Returns `money.negative_amount` or the currency's error.
    pub fn new(amount: i64, currency: &str) -> Result<Self, ValidationError> {
        Self::checked(amount, Currency::new(currency)?, "amount", "money.negative_amount")
    }

    fn checked(
        amount: i64,
        currency: Currency,
        field: &'static str,
        code: &'static str,
    ) -> Result<Self, ValidationError> {
        let amount = u64::try_from(amount).map_err(|_| {
            ValidationError::new(field, code, format!("{field} must not be negative, got {amount}"))
        })?;
        Ok(Self { amount, currency })
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// Returns the currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }
}

/// A salary range with at least one bound, in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salary {
    min: Option<Money>,
    max: Option<Money>,
    currency: Currency,
}

impl Salary {
    /// Validates and builds a salary range from raw amounts.
    ///
    /// # Errors
    ///
    /// Returns `salary.negative_amount` for a negative bound, the currency's
    /// error, or any error of [`Salary::from_bounds`].
    pub fn new(min: Option<i64>, max: Option<i64>, currency: &str) -> Result<Self, ValidationError> {
        let currency = Currency::new(currency)?;
        let min = min
            .map(|v| Money::checked(v, currency, "salary_min", "salary.negative_amount"))
            .transpose()?;
        let max = max
            .map(|v| Money::checked(v, currency, "salary_max", "salary.negative_amount"))
            .transpose()?;
        Self::from_bounds(min, max)
    }

    /// Builds a salary range from two optional bounds.
    ///
    /// # Errors
    ///
    /// Returns `salary.unbounded` when both bounds are missing,
    /// `salary.mixed_currency` when the bounds disagree on currency, or
    /// `salary.inverted_range` when `max < min`.
    pub fn from_bounds(min: Option<Money>, max: Option<Money>) -> Result<Self, ValidationError> {
        let currency = match (min, max) {
            (None, None) => {
                return Err(ValidationError::new(
                    "salary",
                    "salary.unbounded",
                    "salary needs a minimum, a maximum, or both",
                ));
            }
            (Some(lo), Some(hi)) if lo.currency != hi.currency => {
                return Err(ValidationError::new(
                    "salary_max",
                    "salary.mixed_currency",
                    format!("salary bounds mix {} and {}", lo.currency, hi.currency),
                ));
            }
            (Some(bound), _) | (None, Some(bound)) => bound.currency,
        };
        if let (Some(lo), Some(hi)) = (min, max) {
            if hi.amount < lo.amount {
                return Err(ValidationError::new(
                    "salary_max",
                    "salary.inverted_range",
                    format!("salary maximum {} is below minimum {}", hi.amount, lo.amount),
                ));
            }
        }
        Ok(Self { min, max, currency })
    }

    /// Lower bound amount, if any.
    #[must_use]
    pub fn min(&self) -> Option<u64> {
        self.min.map(|bound| bound.amount)
    }

    /// Upper bound amount, if any.
    #[must_use]
    pub fn max(&self) -> Option<u64> {
        self.max.map(|bound| bound.amount)
    }

    /// Currency of both bounds.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub const fn min_money(&self) -> Option<Money> {
        self.min
    }

    #[must_use]
    pub const fn max_money(&self) -> Option<Money> {
        self.max
    }
}
