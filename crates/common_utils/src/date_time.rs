//! Date-time utilities

use time::{OffsetDateTime, PrimitiveDateTime};

/// Current date and time in UTC
pub fn now() -> PrimitiveDateTime {
    let utc_date_time = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(utc_date_time.date(), utc_date_time.time())
}

/// Seconds since the Unix epoch
pub fn now_unix_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
