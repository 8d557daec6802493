use chrono::{DateTime, Utc};

const UNITS: [(&str, i64); 6] = [
    ("year", 365 * 24 * 60 * 60),
    ("month", 30 * 24 * 60 * 60),
    ("day", 24 * 60 * 60),
    ("hour", 60 * 60),
    ("minute", 60),
    ("second", 1),
];

/// Relative age at the resolution of the largest whole unit elapsed,
/// e.g. `"1 hour"`, `"5 days"`. Timestamps in the future read as `"0 seconds"`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - then).num_seconds().max(0);

    for (unit, seconds) in UNITS {
        let count = elapsed / seconds;
        if count >= 1 {
            let plural = if count == 1 { "" } else { "s" };
            return format!("{count} {unit}{plural}");
        }
    }
    "0 seconds".to_string()
}
