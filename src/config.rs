//! Engine configuration.
//!
//! Loaded from TOML. Every key is optional; missing keys take the compiled
//! defaults:
//!
//! ```toml
//! locale = "he"
//! week_start = "sunday"
//! pad_trailing_weeks = false
//! page_size = 20
//! operation_history = 64
//! ```

use crate::task::view::{CalendarOptions, FilterContext, TaskSorter, ViewError};
use chrono::Weekday;
use mockable::Clock;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue {
        /// Offending key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// First day of the week used by the calendar grid and the `week` filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Saturday-first weeks.
    Saturday,
    /// Sunday-first weeks.
    #[default]
    Sunday,
    /// Monday-first weeks.
    Monday,
}

impl WeekStart {
    /// Returns the matching [`Weekday`].
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Saturday => Weekday::Sat,
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

/// Resolved engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// BCP 47 tag used for string collation.
    pub locale: String,
    /// First day of the week.
    pub week_start: WeekStart,
    /// Pads the calendar grid with trailing blanks to complete the last
    /// week.
    pub pad_trailing_weeks: bool,
    /// Tasks requested per page.
    pub page_size: u32,
    /// Finished operation records retained by the store.
    pub operation_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: "he".to_owned(),
            week_start: WeekStart::Sunday,
            pad_trailing_weeks: false,
            page_size: 20,
            operation_history: 64,
        }
    }
}

impl EngineConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed TOML or unknown keys
    /// and [`ConfigError::InvalidValue`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] when the file cannot be read, and
    /// the errors of [`EngineConfig::from_toml_str`] otherwise.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges and that collation data exists for the locale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size",
                reason: "must be at least 1".to_owned(),
            });
        }
        self.sorter().map_err(|err| ConfigError::InvalidValue {
            key: "locale",
            reason: err.to_string(),
        })?;
        Ok(())
    }

    /// Builds a sorter for the configured locale.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] when the locale is invalid or lacks collation
    /// data.
    pub fn sorter(&self) -> Result<TaskSorter, ViewError> {
        TaskSorter::for_locale(&self.locale)
    }

    /// Returns calendar options for the configured week start and padding.
    #[must_use]
    pub const fn calendar_options(&self) -> CalendarOptions {
        CalendarOptions::new(self.week_start.weekday()).with_pad_trailing(self.pad_trailing_weeks)
    }

    /// Returns a filter context for the clock's current local date.
    #[must_use]
    pub fn filter_context(&self, clock: &impl Clock) -> FilterContext {
        FilterContext::from_clock(clock, self.week_start.weekday())
    }
}
