//! Statement time window and local time helpers.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Zone used for the day boundary and message timestamps.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Kyiv;

/// Time range for a statement request, in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementWindow {
    pub from: i64,
    pub to: i64,
}

impl StatementWindow {
    /// From the start of `now`'s local day up to `now`.
    pub fn today(now: DateTime<Tz>) -> Self {
        Self {
            from: start_of_day(now),
            to: now.timestamp(),
        }
    }
}

/// First instant of `now`'s local day.
///
/// Where a DST shift skips midnight the day starts when the gap ends.
fn start_of_day(now: DateTime<Tz>) -> i64 {
    let tz = now.timezone();
    let limit = now.naive_local();
    let mut local = now.date_naive().and_time(NaiveTime::MIN);

    while local <= limit {
        if let Some(start) = tz.from_local_datetime(&local).earliest() {
            return start.timestamp();
        }
        local += Duration::minutes(1);
    }

    now.timestamp()
}

/// Current wall-clock time in `tz`.
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// 24-hour `HH:MM:SS` label used in notifications.
pub fn local_time_label(at: DateTime<Tz>) -> String {
    at.format("%H:%M:%S").to_string()
}
