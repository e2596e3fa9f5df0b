//! Date normalization for Symphony history values.
//!
//! Symphony writes dates in several shapes:
//!
//! - embedded record timestamps, `E202301180024483003R` or `20230118002448`
//! - slash dates, `1/18/2023`, sometimes followed by a clock time after a
//!   comma (`01/13/2023,5:33 PM`)
//! - the sentinels `TODAY` and `NEVER`
//!
//! All of them are rewritten to `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`. The
//! digits of a timestamp are copied verbatim; there is no timezone handling.

use chrono::{Local, NaiveDate};

use hist_model::FormatOptions;

/// Shortest value read as an embedded timestamp (`YYYYMMDDhhmmss`).
const TIMESTAMP_MIN_LEN: usize = 14;

/// Source of the current date for the `TODAY` sentinel.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Requested output precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateForm {
    /// `YYYY-MM-DD HH:MM:SS` for timestamps, `YYYY-MM-DD` otherwise.
    Full,
    /// Always `YYYY-MM-DD`.
    DateOnly,
}

/// Normalizes Symphony date strings.
pub struct DateNormalizer {
    record_start: char,
    never_date: String,
    fallback_date: String,
    clock: Box<dyn Clock>,
}

impl DateNormalizer {
    pub fn new(options: &FormatOptions) -> Self {
        Self::with_clock(options, Box::new(SystemClock))
    }

    pub fn with_clock(options: &FormatOptions, clock: Box<dyn Clock>) -> Self {
        Self {
            record_start: options.record_start,
            never_date: options.never_date.clone(),
            fallback_date: options.fallback_date.clone(),
            clock,
        }
    }

    /// Normalize `value` into a canonical date string.
    ///
    /// Never fails: values that are not dates become the fallback date.
    pub fn normalize(&self, value: &str, form: DateForm) -> String {
        let head = value.split(',').next().unwrap_or_default();
        if head.chars().count() >= TIMESTAMP_MIN_LEN {
            return self.from_timestamp(head, form);
        }
        match parse_slash_date(head) {
            Some(date) => date,
            None => self.from_sentinel(head),
        }
    }

    fn from_timestamp(&self, value: &str, form: DateForm) -> String {
        let digits: Vec<char> = value
            .strip_prefix(self.record_start)
            .unwrap_or(value)
            .chars()
            .collect();
        let part = |start: usize, end: usize| -> String {
            digits
                .iter()
                .skip(start)
                .take(end.saturating_sub(start))
                .collect()
        };
        let date = format!("{}-{}-{}", part(0, 4), part(4, 6), part(6, 8));
        match form {
            DateForm::DateOnly => date,
            DateForm::Full => format!(
                "{date} {}:{}:{}",
                part(8, 10),
                part(10, 12),
                part(12, 14)
            ),
        }
    }

    fn from_sentinel(&self, value: &str) -> String {
        match value.trim() {
            "TODAY" => self.clock.today().format("%Y-%m-%d").to_string(),
            "NEVER" => self.never_date.clone(),
            _ => self.fallback_date.clone(),
        }
    }
}

impl std::fmt::Debug for DateNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateNormalizer")
            .field("record_start", &self.record_start)
            .field("never_date", &self.never_date)
            .field("fallback_date", &self.fallback_date)
            .finish_non_exhaustive()
    }
}

/// Parse `M/D/Y` into `YYYY-MM-DD`. `None` when a part is missing or not
/// an integer.
fn parse_slash_date(value: &str) -> Option<String> {
    let mut parts = value.split('/');
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year: u32 = parts.next()?.trim().parse().ok()?;
    Some(format!("{year:04}-{month:02}-{day:02}"))
}
