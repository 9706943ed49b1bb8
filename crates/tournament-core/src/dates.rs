//! Tournament date handling.

use chrono::NaiveDate;
use thiserror::Error;

/// The textual date format used in every persisted file: `dd-mm-yyyy`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Errors that can occur when validating tournament dates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid '{field}' date {value:?}: expected format is dd-mm-yyyy")]
    Malformed { field: &'static str, value: String },

    #[error("end date {to} is before start date {from}")]
    OutOfOrder { from: String, to: String },
}

/// Parses a `dd-mm-yyyy` date, returning `None` if it is not a real calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Returns true if `value` is a valid `dd-mm-yyyy` calendar date.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// The first and last day of a tournament.
///
/// The input text is kept so that saving reproduces exactly what was
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentDates {
    from: String,
    to: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl TournamentDates {
    /// Validates both dates.
    ///
    /// Ordering is not checked so that historical records with reversed
    /// dates stay loadable; use [`TournamentDates::parse_ordered`] for new
    /// tournaments.
    pub fn parse(from: &str, to: &str) -> Result<Self, DateError> {
        let start = parse_date(from).ok_or_else(|| DateError::Malformed {
            field: "from",
            value: from.to_string(),
        })?;
        let end = parse_date(to).ok_or_else(|| DateError::Malformed {
            field: "to",
            value: to.to_string(),
        })?;

        Ok(TournamentDates {
            from: from.to_string(),
            to: to.to_string(),
            start,
            end,
        })
    }

    /// Validates both dates and requires `from <= to`.
    pub fn parse_ordered(from: &str, to: &str) -> Result<Self, DateError> {
        let dates = Self::parse(from, to)?;
        if dates.end < dates.start {
            return Err(DateError::OutOfOrder {
                from: dates.from,
                to: dates.to,
            });
        }
        Ok(dates)
    }

    /// Start date as written.
    pub fn from_text(&self) -> &str {
        &self.from
    }

    /// End date as written.
    pub fn to_text(&self) -> &str {
        &self.to
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}
