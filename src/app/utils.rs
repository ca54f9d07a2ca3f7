// src/app/utils.rs
use chrono::{Datelike, NaiveDate};

/// `$1,234,567` — fixed locale, no fractional digits.
pub(crate) fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    format!("${grouped}")
}

/// `139` minutes → `2h 19m`.
pub(crate) fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{hours}h {mins}m")
}

pub(crate) fn format_rating(vote_average: f64) -> String {
    format!("⭐ {vote_average:.1}")
}

/// `2024-06-11` → `11 Jun 2024`; unparseable dates pass through verbatim,
/// absent ones render as an em-dash placeholder.
pub(crate) fn format_release_date(date: Option<&str>) -> String {
    let Some(d) = date.filter(|d| !d.is_empty()) else {
        return "—".to_string();
    };
    match NaiveDate::parse_from_str(d, "%Y-%m-%d") {
        Ok(nd) => nd.format("%d %b %Y").to_string(),
        Err(_) => d.to_string(),
    }
}

pub(crate) fn release_year(date: Option<&str>) -> Option<i32> {
    let d = date.filter(|d| !d.is_empty())?;
    NaiveDate::parse_from_str(d, "%Y-%m-%d")
        .ok()
        .map(|nd| nd.year())
}

/// First `max_chars` characters with a trailing ellipsis when truncated
/// (char-boundary safe; the wire data is arbitrary UTF-8).
pub(crate) fn snippet(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_with_no_cents() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(63_000_000), "$63,000,000");
        assert_eq!(format_currency(100_853_753), "$100,853,753");
        assert_eq!(format_currency(1_000), "$1,000");
    }

    #[test]
    fn runtime_splits_hours_and_minutes() {
        assert_eq!(format_runtime(139), "2h 19m");
        assert_eq!(format_runtime(60), "1h 0m");
        assert_eq!(format_runtime(45), "0h 45m");
        assert_eq!(format_runtime(0), "0h 0m");
    }

    #[test]
    fn rating_renders_one_decimal() {
        assert_eq!(format_rating(8.438), "⭐ 8.4");
        assert_eq!(format_rating(10.0), "⭐ 10.0");
    }

    #[test]
    fn release_date_formats_or_passes_through() {
        assert_eq!(format_release_date(Some("1999-10-15")), "15 Oct 1999");
        assert_eq!(format_release_date(Some("soon")), "soon");
        assert_eq!(format_release_date(Some("")), "—");
        assert_eq!(format_release_date(None), "—");
    }

    #[test]
    fn release_year_extracts_from_iso_dates_only() {
        assert_eq!(release_year(Some("1999-10-15")), Some(1999));
        assert_eq!(release_year(Some("")), None);
        assert_eq!(release_year(Some("not a date")), None);
        assert_eq!(release_year(None), None);
    }

    #[test]
    fn snippet_truncates_on_char_boundaries() {
        assert_eq!(snippet("short", 100), "short");
        assert_eq!(snippet("abcdef", 3), "abc…");
        // multi-byte chars must not split
        assert_eq!(snippet("héllo wörld", 4), "héll…");
    }
}
