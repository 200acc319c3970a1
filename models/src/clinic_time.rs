// models/src/clinic_time.rs

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

/// The clinic operates on IST (UTC+05:30, no daylight saving). All "today"
/// and date-range boundaries are computed against this zone, never the
/// server's locale; instants are stored as UTC.
pub fn clinic_tz() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range")
}

/// The current instant, as stored.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// UTC bounds of a clinic-local calendar day: local midnight through
/// 23:59:59.999.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = clinic_tz();
    let start = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is valid");
    (
        tz.from_local_datetime(&start)
            .single()
            .expect("fixed offset is unambiguous")
            .with_timezone(&Utc),
        tz.from_local_datetime(&end)
            .single()
            .expect("fixed offset is unambiguous")
            .with_timezone(&Utc),
    )
}

/// UTC bounds of the clinic-local current day.
pub fn today_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    day_bounds(Utc::now().with_timezone(&clinic_tz()).date_naive())
}

/// Inclusive UTC bounds of a clinic-local date range (start-of-day through
/// end-of-day), as used by the report queries.
pub fn range_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    (day_bounds(start).0, day_bounds(end).1)
}

/// 12-hour clock rendering of an entry time, clinic-local (`03:45 PM`).
pub fn format_entry_time(instant: &DateTime<Utc>) -> String {
    instant
        .with_timezone(&clinic_tz())
        .format("%I:%M %p")
        .to_string()
}

/// Calendar-date rendering of an entry time, clinic-local (`2024-01-15`).
pub fn format_entry_date(instant: &DateTime<Utc>) -> String {
    instant
        .with_timezone(&clinic_tz())
        .format("%Y-%m-%d")
        .to_string()
}
