//! Parsing and formatting for the spreadsheet's date cell.
//!
//! The sheet stores dates as text in day/month/year order, e.g.
//! "31/01/2026 09:30", with one-digit days and months also in circulation
//! ("5/1/2026 9:30"). Rows written by other clients may carry ISO-8601 dates
//! instead. Parsing never fails hard: a cell that fits neither format leaves
//! the record undated while its raw display text is kept verbatim.

use time::{
    Date, Month, PrimitiveDateTime, Time,
    format_description::{BorrowedFormatItem, well_known::Iso8601},
    macros::format_description,
};

/// The canonical date format written back to the sheet on add and edit.
const DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

/// Parse a raw date cell into a wall-clock date-time.
///
/// A string containing `/` is read as `day/month/year`, optionally followed
/// by a space and `hour:minute`; a missing or garbled time component means
/// midnight. Anything else is read as ISO-8601, first as a full date-time
/// and then as a bare date at midnight.
///
/// Returns `None` for empty or unparseable input. No timezone conversion is
/// applied; the sheet holds local wall-clock times.
pub fn parse_display_date(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();

    if raw.is_empty() {
        None
    } else if raw.contains('/') {
        parse_day_month_year(raw)
    } else {
        parse_iso(raw)
    }
}

/// Format a wall-clock date-time as the two-digit `DD/MM/YYYY HH:mm` form
/// used for every cell this app writes.
pub fn format_display_date(date_time: PrimitiveDateTime) -> String {
    date_time
        .format(DISPLAY_FORMAT)
        .expect("formatting a complete date-time cannot fail")
}

fn parse_day_month_year(raw: &str) -> Option<PrimitiveDateTime> {
    let (date_text, time_text) = match raw.split_once(' ') {
        Some((date_text, time_text)) => (date_text, Some(time_text)),
        None => (raw, None),
    };

    let mut parts = date_text.splitn(3, '/');
    let day: u8 = parts.next()?.trim().parse().ok()?;
    let month: u8 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;

    let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;
    let time = time_text
        .and_then(parse_wall_clock_time)
        .unwrap_or(Time::MIDNIGHT);

    Some(PrimitiveDateTime::new(date, time))
}

fn parse_wall_clock_time(text: &str) -> Option<Time> {
    let (hour, minute) = text.trim().split_once(':')?;

    Time::from_hms(hour.parse().ok()?, minute.parse().ok()?, 0).ok()
}

fn parse_iso(raw: &str) -> Option<PrimitiveDateTime> {
    if let Ok(date_time) = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
        return Some(date_time);
    }

    Date::parse(raw, &Iso8601::DEFAULT)
        .ok()
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
}
