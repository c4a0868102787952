use chrono::{NaiveDate, NaiveDateTime};

/// Date format used for schedule keys and absences
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Timestamp format used for shift start/end
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).ok()
}

/// 本地时间的今天
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
