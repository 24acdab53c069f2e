use time::{macros::format_description, util, Date};

use crate::Summary;

/// Number of calendar months covered by the trailing listings.
pub const TRAILING_MONTHS: u32 = 12;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("The start date is not valid. Be sure to use the format yyyy-mm-dd.")]
    InvalidStart,
    #[error("The start date is before the first temperature observation on {0}.")]
    StartBeforeCoverage(Date),
    #[error("The end date is not valid. Be sure to use the format yyyy-mm-dd.")]
    InvalidEnd,
    #[error("The end date is after the last temperature observation on {0}.")]
    EndAfterCoverage(Date),
    #[error("The start date is after the end date. Please enter a valid date range.")]
    StartAfterEnd,
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Validates raw user input against the coverage of the observation data.
    ///
    /// Checks run in a fixed order and stop at the first failure, so a bad
    /// start date is always reported before anything about the end date.
    /// A missing `end` defaults to the last observation date.
    pub fn validate(
        start: &str,
        end: Option<&str>,
        summary: &Summary,
    ) -> Result<Self, DateRangeError> {
        let start = parse_date(start).ok_or(DateRangeError::InvalidStart)?;
        if start < summary.first_date {
            return Err(DateRangeError::StartBeforeCoverage(summary.first_date));
        }

        let end = match end {
            None => summary.last_date,
            Some(raw) => {
                let end = parse_date(raw).ok_or(DateRangeError::InvalidEnd)?;
                if end > summary.last_date {
                    return Err(DateRangeError::EndAfterCoverage(summary.last_date));
                }
                end
            }
        };

        if start > end {
            return Err(DateRangeError::StartAfterEnd);
        }

        Ok(Self { start, end })
    }

    /// The twelve calendar months ending on `last_date`, both ends inclusive.
    /// A window reaching past the earliest representable date saturates at
    /// [`Date::MIN`].
    pub fn trailing_year(last_date: Date) -> Self {
        Self {
            start: subtract_months(last_date, TRAILING_MONTHS).unwrap_or(Date::MIN),
            end: last_date,
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Parses a `yyyy-mm-dd` calendar date: an unsigned four digit year, and a
/// month and day of one or two digits (`2016-8-3` is `2016-08-03`).
/// Anything else, including impossible days like `2017-02-30`, yields `None`.
pub fn parse_date(raw: &str) -> Option<Date> {
    // `[year]` tolerates a leading sign
    if !raw.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Date::parse(
        raw,
        format_description!("[year]-[month padding:none]-[day padding:none]"),
    )
    .ok()
}

/// Calendar month subtraction. The day of month is kept and clamped to the
/// length of the target month, so `2016-03-31` minus one month is `2016-02-29`.
/// `None` when the result falls outside the representable years.
pub fn subtract_months(date: Date, months: u32) -> Option<Date> {
    let month = date.month().nth_prev((months % 12) as u8);
    let wrapped = u8::from(month) > u8::from(date.month());
    let years_back = i32::try_from(months / 12).ok()? + i32::from(wrapped);
    let year = date.year().checked_sub(years_back)?;
    let day = date.day().min(util::days_in_year_month(year, month));

    Date::from_calendar_date(year, month, day).ok()
}
