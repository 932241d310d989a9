use chrono::NaiveDate;

/// Full-date shapes seen in CORD-19 `publish_time` values.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%b %d, %Y", "%B %d, %Y"];

/// Tolerant publication-date parser.
///
/// Accepts full dates in several spellings, ISO datetimes (the date prefix
/// is kept), and the reduced-precision `YYYY-MM` and `YYYY` forms, which
/// resolve to the first day of the period. Anything else is `None`; the
/// caller treats that as a missing value rather than an error.
pub fn parse_publish_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Datetime values keep their date prefix.
    if trimmed.len() > 10
        && let Some(prefix) = trimmed.get(..10)
        && let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
    {
        return Some(date);
    }
    // YYYY-MM resolves to the first of the month.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    // Bare year resolves to January 1st.
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = trimmed.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}
