//! Period tokens and custom start/end strings resolved into inclusive UTC
//! day windows.
//!
//! Relative periods are anchored on a *reference time* rather than the wall
//! clock: seeded data is historical, so "last 30 days" means the 30 days
//! ending on the latest known transaction.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::{EngineError, ResultEngine, Transaction, util::non_blank};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Relative trailing window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Number of calendar days covered, the end day included.
    pub fn days(self) -> u64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "1y",
        }
    }

    /// Parses an optional token; blank or absent means the default `30d`.
    pub fn parse_or_default(raw: Option<&str>) -> ResultEngine<Self> {
        match non_blank(raw) {
            Some(token) => token.parse(),
            None => Ok(Self::default()),
        }
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_ascii_lowercase().as_str() {
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            "90d" => Ok(Self::Quarter),
            "1y" => Ok(Self::Year),
            _ => Err(EngineError::invalid(format!(
                "Invalid period '{token}'. Allowed: 7d, 30d, 90d, 1y"
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive UTC window covering whole days.
///
/// `start` is the first instant of `start_date`, `end` the last 100ns tick of
/// `end_date`. Always `start_date <= end_date`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Builds the window spanning `start_date..=end_date`.
    pub fn from_dates(start_date: NaiveDate, end_date: NaiveDate) -> ResultEngine<Self> {
        if start_date > end_date {
            return Err(EngineError::invalid("startDate must be <= endDate"));
        }

        let last_tick = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_900)
            .ok_or_else(|| EngineError::invalid("invalid end of day"))?;

        Ok(Self {
            start: start_date.and_time(NaiveTime::MIN).and_utc(),
            end: end_date.and_time(last_tick).and_utc(),
            start_date,
            end_date,
        })
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Inclusive count of calendar days.
    pub fn days(&self) -> u64 {
        let span = (self.end_date - self.start_date).num_days() + 1;
        u64::try_from(span).unwrap_or(1)
    }

    /// Window of the same length ending the day before `start_date`.
    pub fn preceding(&self) -> ResultEngine<Self> {
        let prev_end = self
            .start_date
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| EngineError::invalid("date out of range"))?;
        let prev_start = prev_end
            .checked_sub_days(Days::new(self.days() - 1))
            .ok_or_else(|| EngineError::invalid("date out of range"))?;

        Self::from_dates(prev_start, prev_end)
    }

    pub fn start_date_string(&self) -> String {
        self.start_date.format(DATE_FORMAT).to_string()
    }

    /// Date-only form of the last day, not of the end-of-day instant.
    pub fn end_date_string(&self) -> String {
        self.end_date.format(DATE_FORMAT).to_string()
    }
}

/// Anchor instant for relative periods: the latest transaction timestamp, or
/// `utc_now` when there are no transactions.
pub fn reference_time(transactions: &[Transaction], utc_now: DateTime<Utc>) -> DateTime<Utc> {
    transactions
        .iter()
        .map(Transaction::utc_date)
        .max()
        .unwrap_or(utc_now)
}

/// Resolves a period token or a custom range into a [`DateRange`].
///
/// A non-blank `start_date` or `end_date` switches to custom mode and
/// `period` is ignored. In custom mode a missing start collapses to the end
/// day, and a missing end means "today" according to `reference_now`.
pub fn resolve(
    period: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    reference_now: DateTime<Utc>,
) -> ResultEngine<DateRange> {
    let start_date = non_blank(start_date);
    let end_date = non_blank(end_date);
    let today = reference_now.date_naive();

    let range = if start_date.is_some() || end_date.is_some() {
        let start = start_date.map(parse_iso_date).transpose()?;
        let end = end_date.map(parse_iso_date).transpose()?;

        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, today),
            (None, Some(end)) => (end, end),
            (None, None) => (days_before(today, Period::Month.days() - 1)?, today),
        };
        DateRange::from_dates(start, end)?
    } else {
        let period = Period::parse_or_default(period)?;
        DateRange::from_dates(days_before(today, period.days() - 1)?, today)?
    };

    tracing::debug!(
        "resolved range {}..={}",
        range.start_date_string(),
        range.end_date_string()
    );
    Ok(range)
}

fn days_before(date: NaiveDate, days: u64) -> ResultEngine<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| EngineError::invalid("date out of range"))
}

/// Strict `YYYY-MM-DD`: four-digit year, zero-padded month and day.
fn parse_iso_date(value: &str) -> ResultEngine<NaiveDate> {
    let invalid = || EngineError::invalid(format!("Invalid date '{value}'. Expected format YYYY-MM-DD."));

    let trimmed = value.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}
