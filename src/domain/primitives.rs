//! Domain primitives: ids, timestamps, reporting periods.

use serde::{Deserialize, Serialize};

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    /// Create a TimeMs from milliseconds.
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        TimeMs(chrono::Utc::now().timestamp_millis())
    }

    /// Get the underlying milliseconds value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// User identifier (uuid string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: String) -> Self {
        UserId(id)
    }

    pub fn generate() -> Self {
        UserId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creator identifier (uuid string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatorId(pub String);

impl CreatorId {
    pub fn new(id: String) -> Self {
        CreatorId(id)
    }

    pub fn generate() -> Self {
        CreatorId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CreatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monthly reporting period.
///
/// `month` is 1..=12 and `year` is bounded to [`Period::MIN_YEAR`] ..=
/// [`Period::MAX_YEAR`], keeping every period representable as a calendar
/// date. Yearly aggregations iterate the twelve periods of a year; the
/// `month = 0` sentinel on goals is resolved before a Period is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub const MIN_YEAR: i32 = 1970;
    pub const MAX_YEAR: i32 = 9999;

    /// Build a period, validating month and year bounds.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            Some(Period { year, month })
        } else {
            None
        }
    }

    /// Number of calendar days in this month.
    pub fn days_in_month(&self) -> u32 {
        use chrono::NaiveDate;
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month");
        let next = self.next().first_day();
        next.signed_duration_since(first).num_days() as u32
    }

    /// Start of the period as epoch milliseconds (inclusive).
    pub fn start_ms(&self) -> TimeMs {
        use chrono::{TimeZone, Utc};
        let dt = Utc.from_utc_datetime(
            &self
                .first_day()
                .and_hms_opt(0, 0, 0)
                .expect("midnight is valid"),
        );
        TimeMs(dt.timestamp_millis())
    }

    /// End of the period as epoch milliseconds (exclusive).
    pub fn end_ms(&self) -> TimeMs {
        self.next().start_ms()
    }

    fn next(&self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    fn first_day(&self) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month")
    }
}
