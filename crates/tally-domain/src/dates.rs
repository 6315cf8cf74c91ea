//! Date parsing for extracted transaction dates
//!
//! Extractors emit dates as text in a handful of formats; anything that
//! fails to parse against all of them is treated as missing downstream.

use chrono::NaiveDate;

/// Formats accepted from the upstream extractors.
/// Day-first wins for ambiguous all-numeric dates.
pub const SUPPORTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

/// Parse an extracted date string against the supported formats
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    SUPPORTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
