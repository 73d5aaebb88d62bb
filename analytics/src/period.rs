//! Symbolic periods and their resolution to concrete half-open intervals.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::AnalyticsError;

/// Symbolic time-window tag, resolved to a concrete interval at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
    All,
}

/// Half-open interval `[start, end)` in UTC. A value type, recomputed on
/// every call and never cached itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// True when `t` falls inside the interval (start inclusive, end exclusive).
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    /// Resolves the tag against `now` into `[start, now)`.
    ///
    /// `today` starts at local midnight, `week` at the most recent Monday
    /// midnight (on a Sunday that is six days back, not the day after),
    /// `month` at the first of the current month, `all` at the Unix epoch.
    /// The timezone of `now` defines "local"; pure and deterministic given `now`.
    pub fn resolve<Tz: TimeZone>(self, now: DateTime<Tz>) -> TimeRange {
        let end = now.with_timezone(&Utc);
        let today = now.date_naive();
        let tz = now.timezone();

        let start = match self {
            Period::Today => local_midnight(today, &tz),
            Period::Week => {
                let days_back = i64::from(today.weekday().num_days_from_monday());
                local_midnight(today - Duration::days(days_back), &tz)
            }
            Period::Month => {
                let first = today
                    .with_day(1)
                    .expect("the first day of a month always exists");
                local_midnight(first, &tz)
            }
            Period::All => DateTime::UNIX_EPOCH,
        };

        TimeRange { start, end }
    }
}

/// Midnight of `date` in `tz`, as a UTC instant. When a DST jump skips
/// midnight, the first hour after the gap is used.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

impl FromStr for Period {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            other => Err(AnalyticsError::InvalidArgument(format!(
                "unknown period tag: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    fn moscow() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).expect("valid offset")
    }

    #[test]
    fn today_starts_at_local_midnight() {
        // 2024-03-20 15:30 UTC+3
        let now = moscow().with_ymd_and_hms(2024, 3, 20, 15, 30, 0).unwrap();
        let range = Period::Today.resolve(now);

        let midnight = moscow().with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        assert_eq!(range.start, midnight.with_timezone(&Utc));
        assert_eq!(range.end, now.with_timezone(&Utc));
    }

    #[test]
    fn week_starts_on_the_most_recent_monday() {
        // 2024-03-20 is a Wednesday.
        let now = moscow().with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let range = Period::Week.resolve(now);

        let monday = moscow().with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap();
        assert_eq!(range.start, monday.with_timezone(&Utc));
    }

    #[test]
    fn week_on_sunday_goes_six_days_back() {
        // 2024-03-24 is a Sunday; the week started on Monday the 18th,
        // not the upcoming Monday.
        let now = moscow().with_ymd_and_hms(2024, 3, 24, 23, 0, 0).unwrap();
        let range = Period::Week.resolve(now);

        let monday = moscow().with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap();
        assert_eq!(range.start, monday.with_timezone(&Utc));
    }

    #[test]
    fn week_on_monday_starts_the_same_day() {
        let now = moscow().with_ymd_and_hms(2024, 3, 18, 8, 0, 0).unwrap();
        let range = Period::Week.resolve(now);

        let monday = moscow().with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap();
        assert_eq!(range.start, monday.with_timezone(&Utc));
    }

    #[test]
    fn month_starts_on_the_first() {
        let now = moscow().with_ymd_and_hms(2024, 2, 29, 10, 0, 0).unwrap();
        let range = Period::Month.resolve(now);

        let first = moscow().with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(range.start, first.with_timezone(&Utc));
    }

    #[test]
    fn all_starts_at_the_epoch() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let range = Period::All.resolve(now);

        assert_eq!(range.start, DateTime::UNIX_EPOCH);
        assert_eq!(range.end, now);
    }

    #[test]
    fn every_period_yields_a_half_open_interval_ending_now() {
        let now = moscow().with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        for period in [Period::Today, Period::Week, Period::Month, Period::All] {
            let range = period.resolve(now);
            assert!(range.start <= range.end, "{period}: start after end");
            assert_eq!(range.end, now.with_timezone(&Utc));
            assert!(!range.contains(range.end), "{period}: end must be exclusive");
        }
    }

    #[test]
    fn parse_accepts_the_four_tags() {
        assert_eq!("today".parse::<Period>().unwrap(), Period::Today);
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("month".parse::<Period>().unwrap(), Period::Month);
        assert_eq!("all".parse::<Period>().unwrap(), Period::All);
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        let err = "yesterday".parse::<Period>().unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidArgument(_)));
    }
}
