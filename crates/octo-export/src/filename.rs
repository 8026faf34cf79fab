//! Publish dates in file names.
//!
//! Posts are conventionally named `YYYY-MM-DD-slug.ext`. These helpers read
//! that prefix back, derive the canonical date from a document's `date`
//! field, and compute the renamed path. None of this runs during export.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use octo_renderer::InlineFormatter;
use regex::Regex;

use crate::error::ExportError;
use crate::field::FieldResolver;
use crate::options::ExportOptions;

static DATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+-[0-9]+-[0-9]+").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Leading date prefix of the path's file name.
///
/// The prefix is three digit runs joined by dashes. It is returned verbatim
/// and not checked against the calendar, so `23-5-1-x` yields `23-5-1`.
/// `None` means the name carries no date; that is an ordinary outcome.
#[must_use]
pub fn date_prefix(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    DATE_PREFIX_RE.find(name).map(|m| m.as_str())
}

/// Parse a date the way a user would write it.
///
/// Accepts ISO dates, date-times with or without seconds, RFC 3339,
/// `YYYY/MM/DD`, bracketed timestamps such as `[2023-05-01 Mon 10:00]`,
/// and spelled-out months (`May 1, 2023`). When the whole text is not a
/// date, its first word is tried on its own.
///
/// # Errors
///
/// Returns [`ExportError::InvalidDate`] if no format matches.
pub fn parse_user_date(text: &str) -> Result<NaiveDate, ExportError> {
    let trimmed = text
        .trim()
        .trim_start_matches(['[', '<'])
        .trim_end_matches([']', '>'])
        .trim();

    parse_exact(trimmed)
        .or_else(|| {
            trimmed
                .split_whitespace()
                .next()
                .filter(|first| *first != trimmed)
                .and_then(parse_exact)
        })
        .ok_or_else(|| ExportError::InvalidDate(text.to_owned()))
}

fn parse_exact(text: &str) -> Option<NaiveDate> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Some(date_time.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|date_time| date_time.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        })
}

/// Canonical publish date from the document's `date` field.
///
/// The field is resolved like any other front matter field, so inline
/// markup in it is formatted before parsing.
///
/// # Errors
///
/// Returns [`ExportError::MissingDate`] when the field is unset or empty,
/// [`ExportError::InvalidDate`] when it cannot be parsed, and propagates
/// inline formatting failures.
pub fn metadata_date<F: InlineFormatter>(
    options: &ExportOptions,
    formatter: &F,
) -> Result<NaiveDate, ExportError> {
    let raw = FieldResolver::new(options, formatter).resolve("date", None)?;
    if raw.trim().is_empty() {
        return Err(ExportError::MissingDate);
    }
    let date = parse_user_date(&raw)?;
    tracing::debug!(raw = %raw, %date, "Parsed metadata date");
    Ok(date)
}

/// Path with the file name's date prefix set to `date`.
///
/// An existing prefix is replaced; a name without one gets `YYYY-MM-DD-`
/// in front. The directory and the rest of the name are kept. A path
/// whose file name is not valid UTF-8 is returned unchanged.
#[must_use]
pub fn dated_path(path: &Path, date: NaiveDate) -> PathBuf {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return path.to_path_buf();
    };
    let canonical = date.format("%Y-%m-%d").to_string();

    let renamed = match DATE_PREFIX_RE.find(name) {
        Some(prefix) => format!("{canonical}{}", &name[prefix.end()..]),
        None => format!("{canonical}-{name}"),
    };
    path.with_file_name(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use octo_renderer::MarkdownInline;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_date_prefix() {
        assert_eq!(
            date_prefix(Path::new("2023-05-01-hello.html")),
            Some("2023-05-01")
        );
        assert_eq!(date_prefix(Path::new("hello.html")), None);
        assert_eq!(date_prefix(Path::new("23-5-1-x")), Some("23-5-1"));
    }

    #[test]
    fn test_date_prefix_ignores_directories() {
        assert_eq!(
            date_prefix(Path::new("2020-01-01/posts/2023-05-01-hello.md")),
            Some("2023-05-01")
        );
        assert_eq!(date_prefix(Path::new("2020-01-01/hello.md")), None);
    }

    #[test]
    fn test_parse_user_date_formats() {
        let expected = ymd(2023, 5, 1);
        for text in [
            "2023-05-01",
            " 2023-05-01 ",
            "2023/05/01",
            "2023-05-01 10:30",
            "2023-05-01T10:30:00",
            "2023-05-01T10:30:00+02:00",
            "[2023-05-01 Mon]",
            "<2023-05-01 Mon 10:30>",
            "May 1, 2023",
            "1 May 2023",
        ] {
            assert_eq!(parse_user_date(text).unwrap(), expected, "{text:?}");
        }
    }

    #[test]
    fn test_parse_user_date_rejects_garbage() {
        for text in ["", "soon", "2023-13-40"] {
            let err = parse_user_date(text).unwrap_err();
            assert!(matches!(err, ExportError::InvalidDate(_)), "{text:?}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dated_path_keeps_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("posts").join(OsStr::from_bytes(b"caf\xe9.md"));

        assert_eq!(dated_path(&path, ymd(2023, 5, 1)), path);
    }

    #[test]
    fn test_metadata_date() {
        let options = ExportOptions::new().with("date", "2023-05-01");
        assert_eq!(
            metadata_date(&options, &MarkdownInline).unwrap(),
            ymd(2023, 5, 1)
        );
    }

    #[test]
    fn test_metadata_date_missing() {
        let err = metadata_date(&ExportOptions::new(), &MarkdownInline).unwrap_err();
        assert!(matches!(err, ExportError::MissingDate));

        let options = ExportOptions::new().with("date", "");
        let err = metadata_date(&options, &MarkdownInline).unwrap_err();
        assert!(matches!(err, ExportError::MissingDate));
    }

    #[test]
    fn test_dated_path_replaces_prefix() {
        assert_eq!(
            dated_path(Path::new("posts/2020-1-1-hello.md"), ymd(2023, 5, 1)),
            PathBuf::from("posts/2023-05-01-hello.md")
        );
    }

    #[test]
    fn test_dated_path_adds_prefix() {
        assert_eq!(
            dated_path(Path::new("posts/hello.md"), ymd(2023, 5, 1)),
            PathBuf::from("posts/2023-05-01-hello.md")
        );
    }

    #[test]
    fn test_dated_path_keeps_matching_name() {
        let path = Path::new("2023-05-01-hello.md");
        assert_eq!(dated_path(path, ymd(2023, 5, 1)), path.to_path_buf());
    }
}
