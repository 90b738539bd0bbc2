//! Errors raised while configuring projections.

use thiserror::Error;

/// Errors returned by projection constructors and parsers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// The `(year, month)` pair does not name a representable month.
    #[error("invalid calendar month {year}-{month}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month, expected in `1..=12`.
        month: u32,
    },

    /// The locale tag could not be parsed.
    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),

    /// No collation data is available for the locale.
    #[error("collation unavailable for locale '{locale}': {message}")]
    Collation {
        /// Requested locale tag.
        locale: String,
        /// Message from the collation backend.
        message: String,
    },

    /// The sort field name is not one of the sortable task fields.
    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    /// The filter value is neither `all` nor a known value.
    #[error("invalid filter value '{0}', expected 'all' or a concrete value")]
    InvalidFilter(String),
}
