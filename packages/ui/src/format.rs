//! Display formatting in the console's language (Bahasa Indonesia).

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// `10 Mei 2024`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02} {} {}", date.day(), MONTHS_SHORT[date.month0() as usize], date.year())
}

/// `3 Januari 2024`, for letterheads and print.
pub fn format_date_long(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS_LONG[date.month0() as usize], date.year())
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Parse a server timestamp. Offsets are converted to local time; naive
/// values are taken as local already.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `10 Mei 2024 14:05`, or the raw text when it does not parse.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format!("{} {:02}:{:02}", format_date(dt.date()), dt.hour(), dt.minute()),
        None if raw.trim().is_empty() => "-".to_string(),
        None => raw.to_string(),
    }
}

/// `5 menit yang lalu` style distance from `now`.
pub fn relative_time(raw: &str, now: NaiveDateTime) -> String {
    let Some(then) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "baru saja".to_string();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return format!("{minutes} menit yang lalu");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} jam yang lalu");
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{days} hari yang lalu");
    }
    if days < 365 {
        return format!("{} bulan yang lalu", days / 30);
    }
    format!("{} tahun yang lalu", days / 365)
}

pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!("{:.0}%", c),
        None => "-".to_string(),
    }
}

/// Cut `text` to `max` characters, appending an ellipsis when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        assert_eq!(format_date(date), "03 Mei 2024");
        assert_eq!(format_date_long(date), "3 Mei 2024");
        assert_eq!(format_optional_date(None), "-");
    }

    #[test]
    fn test_parse_naive_and_fractional() {
        assert_eq!(
            parse_timestamp("2024-05-10T14:05:33.123456"),
            Some(at("2024-05-10 14:05:33") + chrono::Duration::microseconds(123456))
        );
        assert_eq!(parse_timestamp("2024-05-10"), Some(at("2024-05-10 00:00:00")));
        assert_eq!(parse_timestamp("kemarin"), None);
        assert_eq!(format_timestamp("2024-05-10T14:05:33"), "10 Mei 2024 14:05");
        assert_eq!(format_timestamp(""), "-");
    }

    #[test]
    fn test_relative_time() {
        let now = at("2024-05-10 12:00:00");
        assert_eq!(relative_time("2024-05-10T11:59:30", now), "baru saja");
        assert_eq!(relative_time("2024-05-10T11:55:00", now), "5 menit yang lalu");
        assert_eq!(relative_time("2024-05-10T09:00:00", now), "3 jam yang lalu");
        assert_eq!(relative_time("2024-05-07T12:00:00", now), "3 hari yang lalu");
        assert_eq!(relative_time("2024-03-01T12:00:00", now), "2 bulan yang lalu");
        assert_eq!(relative_time("bukan tanggal", now), "bukan tanggal");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Undangan Rapat", 40), "Undangan Rapat");
        assert_eq!(truncate("Undangan Rapat Koordinasi", 14), "Undangan Rapat…");
    }
}
