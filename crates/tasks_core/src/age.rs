use time::{Duration, OffsetDateTime};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Coarse "time ago" text for list output, e.g. `3 hours ago`.
pub fn relative_age(created_at: OffsetDateTime, now: OffsetDateTime) -> String {
    describe(now - created_at)
}

fn describe(elapsed: Duration) -> String {
    let seconds = elapsed.whole_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }

    if seconds < 45 {
        "a few seconds ago".to_string()
    } else if seconds < 90 {
        "a minute ago".to_string()
    } else if seconds < 45 * MINUTE {
        format!("{} minutes ago", rounded(seconds, MINUTE))
    } else if seconds < 90 * MINUTE {
        "an hour ago".to_string()
    } else if seconds < 22 * HOUR {
        format!("{} hours ago", rounded(seconds, HOUR))
    } else if seconds < 36 * HOUR {
        "a day ago".to_string()
    } else if seconds < 26 * DAY {
        format!("{} days ago", rounded(seconds, DAY))
    } else if seconds < 45 * DAY {
        "a month ago".to_string()
    } else if seconds < 320 * DAY {
        format!("{} months ago", rounded(seconds, 30 * DAY))
    } else if seconds < 548 * DAY {
        "a year ago".to_string()
    } else {
        format!("{} years ago", rounded(seconds, 365 * DAY))
    }
}

fn rounded(seconds: i64, unit: i64) -> i64 {
    (seconds + unit / 2) / unit
}
