//! Date validation functions and the default date bounds

use chrono::{DateTime, TimeZone, Utc};

/// Earliest representable form date: 0001-01-01T00:00:00Z
pub fn distant_past() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Latest representable form date: 4001-01-01T00:00:00Z
pub fn distant_future() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(4001, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Validates a timestamp lies within an inclusive range
pub fn validate_date_range(
    value: DateTime<Utc>,
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
) -> Result<(), String> {
    if value >= earliest && value <= latest {
        Ok(())
    } else {
        Err(format!(
            "Date must be between {} and {}",
            earliest.format("%Y-%m-%d"),
            latest.format("%Y-%m-%d")
        ))
    }
}
