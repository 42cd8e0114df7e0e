//! Date helper functions

use chrono::{DateTime, FixedOffset, Locale, TimeZone};

use crate::cms::CmsError;

/// Parse a CMS publication timestamp.
///
/// The CMS emits RFC 3339 timestamps, sometimes without the colon in the
/// zone offset ("+0000"), which the strict parser rejects.
pub fn parse_publication_date(raw: &str, uid: &str) -> Result<DateTime<FixedOffset>, CmsError> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map_err(|e| CmsError::malformed(Some(uid), format!("bad publication date `{raw}`: {e}")))
}

/// Format a date using a Moment.js-compatible format string and a
/// BCP 47 language tag (e.g. "pt-BR" renders "19 abril 2021")
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str, language: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format_localized(&chrono_format, locale_for(language))
        .to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Resolve a BCP 47 tag to a chrono locale, falling back to POSIX
fn locale_for(language: &str) -> Locale {
    Locale::try_from(language.replace('-', "_").as_str()).unwrap_or(Locale::POSIX)
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Process from longest to shortest patterns within each category
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month (uppercase M)
        ("MMMM", "%B"), // Full month name
        ("MMM", "%b"),  // Abbreviated month name
        ("MM", "%m"),   // Two-digit month
        // Day of month (uppercase D)
        ("DD", "%d"),
        // Hour
        ("HH", "%H"),
        ("hh", "%I"),
        // Minute (lowercase m after MM is done)
        ("mm", "%M"),
        // Second
        ("ss", "%S"),
        // Day of week
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
