//! Time windows for selecting consumption entries.

use chrono::{DateTime, Duration, Local, Months, Utc};
use serde::{Deserialize, Serialize};

/// A named or explicit time window, evaluated against a reference instant.
///
/// All windows are inclusive at both ends. The named variants anchor their
/// end at the reference instant ("now"); `Today` starts at the local calendar
/// day's midnight, so its span depends on the machine's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodFilter {
    /// From local midnight to now.
    Today,
    /// From now minus 7 days to now.
    Week,
    /// From now minus one calendar month to now.
    Month,
    /// An explicit inclusive range.
    Range {
        /// Window start, inclusive.
        start: DateTime<Utc>,
        /// Window end, inclusive.
        end: DateTime<Utc>,
    },
}

impl PeriodFilter {
    /// Resolve the window to inclusive `(start, end)` bounds at `now`.
    #[must_use]
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match *self {
            Self::Today => (local_midnight(now), now),
            Self::Week => (now - Duration::days(7), now),
            Self::Month => (
                // Falls back to 30 days for out-of-range dates chrono cannot
                // represent; unreachable for real clock values.
                now.checked_sub_months(Months::new(1))
                    .unwrap_or_else(|| now - Duration::days(30)),
                now,
            ),
            Self::Range { start, end } => (start, end),
        }
    }

    /// Whether `instant` falls within the window resolved at `now`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds(now);
        start <= instant && instant <= end
    }
}

/// Midnight of `now`'s local calendar day, as a UTC instant.
fn local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_day = now.with_timezone(&Local).date_naive();
    local_day
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map_or(now, |midnight| midnight.with_timezone(&Utc))
}
