use chrono::{Duration, NaiveDate};

/// Day zero of the serial scheme: 1900-01-01 is serial 2, not 1.
///
/// The spreadsheet serial format counts a 1900-02-29 that never existed
/// and starts at 1 rather than 0, so every date after February 1900 sits
/// two days past `1900-01-01`. Files in the wild are written with that
/// offset, so it is reproduced here as-is.
const SERIAL_OFFSET: i64 = 2;

/// Converts a spreadsheet day-count into a calendar date.
///
/// No range checks are done: zero and negative serials yield dates in
/// 1899. `None` only when the result falls outside what chrono can
/// represent.
pub fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let days = Duration::try_days(serial.checked_sub(SERIAL_OFFSET)?)?;
    epoch.checked_add_signed(days)
}

/// Parses the text of a date cell into a serial day-count.
///
/// Only whole numbers are accepted; anything else leaves the date empty.
/// Integral float cells are already rendered without a fraction when the
/// row is read.
pub fn parse_serial(cell: &str) -> Option<i64> {
    cell.trim().parse::<i64>().ok()
}
