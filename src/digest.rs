use std::fmt::Display;

use chrono::{Local, NaiveDate};

use crate::fetcher::FetchOutcome;

/// Title shared by the archive header and the email subject
pub fn digest_title(date: NaiveDate) -> String {
    format!("Dagens IT-nyhet - {}", date.format("%F"))
}

/// The block of text produced by one run, keyed by the day it was produced for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestContent {
    pub date: NaiveDate,
    pub text: String,

    /// True when `text` is the substitute produced after a failed fetch.
    /// Archive and email treat both kinds the same
    pub is_fallback: bool,
}

impl DigestContent {
    pub fn new(date: NaiveDate, text: String) -> Self {
        Self {
            date,
            text,
            is_fallback: false,
        }
    }

    pub fn from_fetch(date: NaiveDate, outcome: FetchOutcome) -> Self {
        let is_fallback = outcome.is_fallback();
        Self {
            date,
            text: outcome.into_text(),
            is_fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new() -> Self {
        Self(format!("{}", Local::now().format("%F %T")))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(digest_title(date), "Dagens IT-nyhet - 2024-01-01");
    }

    #[test]
    fn fallback_is_flagged() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let outcome = FetchOutcome::Fallback {
            text: "sorry".to_string(),
            msg: "boom".to_string(),
        };
        let digest = DigestContent::from_fetch(date, outcome);
        assert!(digest.is_fallback);
        assert_eq!(digest.text, "sorry");
    }

    #[test]
    fn timestamp_format() {
        let ts = Timestamp::new().to_string();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[10..11], " ");
    }
}
