use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;

/// Epoch milliseconds for a timestamp attribute. Numbers are taken as epoch
/// milliseconds, strings go through [`parse_date_text`].
pub fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|millis| millis.is_finite())
                .map(|millis| millis as i64)
        }),
        Value::String(text) => parse_date_text(text),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY-MM` and `YYYY`; dates without a time
/// resolve to UTC midnight.
pub fn parse_date_text(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.timestamp_millis());
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return midnight_millis(date);
    }

    if let Some((year, month)) = text.split_once('-')
        && let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>())
    {
        return NaiveDate::from_ymd_opt(year, month, 1).and_then(midnight_millis);
    }

    text.parse::<i32>().ok().and_then(year_start_millis)
}

pub fn year_start_millis(year: i32) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight_millis)
}

pub fn year_of(millis: i64) -> Option<i32> {
    DateTime::from_timestamp_millis(millis).map(|datetime| datetime.year())
}

pub fn format_date(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|datetime| datetime.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn midnight_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|datetime| datetime.and_utc().timestamp_millis())
}
