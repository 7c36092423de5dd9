//! File naming conventions for merged output and archived inputs.

use chrono::{DateTime, NaiveDate, TimeZone};
use std::ffi::OsString;
use std::path::Path;

/// Prefix of generated output names.
pub const OUTPUT_PREFIX: &str = "merged";

/// Output name for a run started at `timestamp`: `merged_YYYYMMDD_HHMM.pdf`.
pub fn output_file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{OUTPUT_PREFIX}_{}.pdf", timestamp.format("%Y%m%d_%H%M"))
}

/// Archive name for `source` on `date`: `YYYY-MM-DD_<original name>`.
///
/// Only the final path component of `source` is kept.
pub fn archive_file_name(date: NaiveDate, source: &Path) -> OsString {
    let mut name = OsString::from(format!("{}_", date.format("%Y-%m-%d")));
    match source.file_name() {
        Some(file_name) => name.push(file_name),
        None => name.push(source.as_os_str()),
    }
    name
}
