//! Configuration read from the environment.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::AppError;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(AppError::Config(format!(
                "JOBBOARD_LOG_FORMAT must be `json` or `pretty`, got {other:?}"
            ))),
        }
    }
}

/// Runtime settings for the job board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tracing output format (`JOBBOARD_LOG_FORMAT`).
    pub log_format: LogFormat,
    /// Tries per command when commits conflict (`JOBBOARD_COMMIT_ATTEMPTS`).
    pub commit_attempts: u32,
    /// Maximum characters of plain text kept in listing rows
    /// (`JOBBOARD_EXCERPT_CHARS`).
    pub excerpt_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            commit_attempts: 3,
            excerpt_chars: 280,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let log_format = match lookup("JOBBOARD_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };
        let commit_attempts = positive(&lookup, "JOBBOARD_COMMIT_ATTEMPTS")?
            .unwrap_or(defaults.commit_attempts);
        let excerpt_chars =
            positive(&lookup, "JOBBOARD_EXCERPT_CHARS")?.unwrap_or(defaults.excerpt_chars);
        Ok(Self {
            log_format,
            commit_attempts,
            excerpt_chars,
        })
    }
}

fn positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a positive integer: {e}")))?;
    if value <= T::default() {
        return Err(AppError::Config(format!("{key} must be a positive integer")));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        // Arrange
        let pairs = [
            ("JOBBOARD_LOG_FORMAT", "Pretty"),
            ("JOBBOARD_COMMIT_ATTEMPTS", "5"),
            ("JOBBOARD_EXCERPT_CHARS", "120"),
        ];

        // Act
        let config = config_from(&pairs).unwrap();

        // Assert
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.commit_attempts, 5);
        assert_eq!(config.excerpt_chars, 120);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        for pairs in [
            [("JOBBOARD_LOG_FORMAT", "xml")],
            [("JOBBOARD_COMMIT_ATTEMPTS", "0")],
            [("JOBBOARD_COMMIT_ATTEMPTS", "-1")],
            [("JOBBOARD_EXCERPT_CHARS", "lots")],
        ] {
            assert!(
                matches!(config_from(&pairs), Err(AppError::Config(_))),
                "{pairs:?} should be rejected"
            );
        }
    }
}
