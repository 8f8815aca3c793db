//! Per-request time context.

use chrono::{DateTime, Utc};

/// Timestamp and date stamp captured once per request.
///
/// Every signing step for one request must read from the same `TimeContext`;
/// the date stamp is always the date prefix of the timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeContext {
    timestamp: String,
    date_stamp: String,
}

impl TimeContext {
    /// Capture the current UTC time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build a context from an explicit instant (second resolution).
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use signfetch_auth::TimeContext;
    ///
    /// let ctx = TimeContext::from_datetime(Utc.with_ymd_and_hms(2021, 8, 18, 9, 57, 29).unwrap());
    /// assert_eq!(ctx.timestamp(), "20210818T095729Z");
    /// assert_eq!(ctx.date_stamp(), "20210818");
    /// ```
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.format("%Y%m%dT%H%M%SZ").to_string(),
            date_stamp: at.format("%Y%m%d").to_string(),
        }
    }

    /// Full timestamp, `YYYYMMDDTHHMMSSZ`.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Date stamp, `YYYYMMDD`.
    #[must_use]
    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }
}
