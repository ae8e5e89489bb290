//! Conversion of the IANA root zone database text format.
//!
//! This is a private module.

use std::collections::BTreeSet;
use std::string::String;

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};
use tracing::debug;

use super::TopLevelDomains;
use crate::error::RootZoneError;
use crate::suffix::Suffix;

//------------ convert -------------------------------------------------------

/// Converts the text of the IANA root zone database.
///
/// The first non-empty line must be the version header. All following
/// non-empty lines are top level domains which are stored in their ASCII
/// form. Comments after the header are rejected.
pub(super) fn convert(
    content: &str,
) -> Result<TopLevelDomains, RootZoneError> {
    let mut header = None;
    let mut records = BTreeSet::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if header.is_none() {
            header = Some(parse_header(line)?);
        } else if line.contains('#') {
            return Err(RootZoneError::InvalidLine(line.into()));
        } else {
            records.insert(parse_record(line)?);
        }
    }

    match header {
        Some((version, last_updated)) if !records.is_empty() => {
            debug!(
                "loaded {} top level domains, version {version}",
                records.len()
            );
            Ok(TopLevelDomains::new(version, last_updated, records))
        }
        _ => Err(RootZoneError::FailedConversion),
    }
}

/// Parses the version header.
///
/// The header looks like `# Version 2024041500, Last Updated Mon Apr 15
/// 07:07:01 2024 UTC`.
fn parse_header(
    line: &str,
) -> Result<(String, OffsetDateTime), RootZoneError> {
    let err = || RootZoneError::InvalidVersionLine(line.into());
    let (version, date) = line
        .strip_prefix("# Version ")
        .and_then(|rest| rest.split_once(", Last Updated "))
        .ok_or_else(err)?;
    if version.is_empty() || !version.bytes().all(|ch| ch.is_ascii_digit()) {
        return Err(err());
    }
    let last_updated = parse_date(date).ok_or_else(err)?;
    Ok((version.into(), last_updated))
}

/// Parses a date in the format `Www Mmm dd hh:mm:ss yyyy UTC`.
fn parse_date(date: &str) -> Option<OffsetDateTime> {
    let mut tokens = date.split_whitespace();
    let _weekday = tokens.next()?;
    let month = parse_month(tokens.next()?)?;
    let day: u8 = tokens.next()?.parse().ok()?;
    let time = tokens.next()?;
    let year: i32 = tokens.next()?.parse().ok()?;
    match tokens.next() {
        None | Some("UTC") | Some("GMT") => {}
        Some(_) => return None,
    }
    if tokens.next().is_some() {
        return None;
    }

    let mut time = time.split(':');
    let hour: u8 = time.next()?.parse().ok()?;
    let minute: u8 = time.next()?.parse().ok()?;
    let second: u8 = time.next()?.parse().ok()?;
    if time.next().is_some() {
        return None;
    }

    Some(
        PrimitiveDateTime::new(
            Date::from_calendar_date(year, month, day).ok()?,
            Time::from_hms(hour, minute, second).ok()?,
        )
        .assume_utc(),
    )
}

fn parse_month(month: &str) -> Option<Month> {
    Some(match month {
        "Jan" => Month::January,
        "Feb" => Month::February,
        "Mar" => Month::March,
        "Apr" => Month::April,
        "May" => Month::May,
        "Jun" => Month::June,
        "Jul" => Month::July,
        "Aug" => Month::August,
        "Sep" => Month::September,
        "Oct" => Month::October,
        "Nov" => Month::November,
        "Dec" => Month::December,
        _ => return None,
    })
}

/// Parses a top level domain into its ASCII form.
fn parse_record(line: &str) -> Result<String, RootZoneError> {
    let err = |error| RootZoneError::InvalidRootZoneDomain {
        line: line.into(),
        error,
    };
    let suffix = Suffix::from_iana(line)
        .and_then(|suffix| suffix.to_ascii())
        .map_err(err)?;
    Ok(suffix.value().unwrap_or_default().into())
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header() {
        let (version, last_updated) = parse_header(
            "# Version 2024041500, Last Updated Mon Apr 15 07:07:01 2024 UTC",
        )
        .unwrap();
        assert_eq!(version, "2024041500");
        assert_eq!(last_updated.year(), 2024);
        assert_eq!(last_updated.month(), Month::April);
        assert_eq!(last_updated.day(), 15);
        assert_eq!(last_updated.hour(), 7);
        assert_eq!(last_updated.second(), 1);
        assert!(last_updated.offset().is_utc());
    }

    #[test]
    fn invalid_headers() {
        for line in [
            "COM",
            "# Version , Last Updated Mon Apr 15 07:07:01 2024 UTC",
            "# Version 20240415a0, Last Updated Mon Apr 15 07:07:01 2024 UTC",
            "# Version 2024041500, Last Updated Mon Foo 15 07:07:01 2024 UTC",
            "# Version 2024041500, Last Updated Mon Apr 31 07:07:01 2024 UTC",
            "# Version 2024041500, Last Updated Mon Apr 15 07:07 2024 UTC",
            "# Version 2024041500",
        ] {
            assert!(
                matches!(
                    parse_header(line),
                    Err(RootZoneError::InvalidVersionLine(_))
                ),
                "{line}"
            );
        }
    }

    #[test]
    fn records() {
        assert_eq!(parse_record("COM").unwrap(), "com");
        assert_eq!(parse_record("XN--55QX5D").unwrap(), "xn--55qx5d");
        assert!(matches!(
            parse_record("CO.UK"),
            Err(RootZoneError::InvalidRootZoneDomain { .. })
        ));
    }

    #[test]
    fn content() {
        let tlds = convert(
            "# Version 2024041500, Last Updated Mon Apr 15 07:07:01 2024 UTC\n\
             COM\nNET\n\nXN--55QX5D\n",
        )
        .unwrap();
        assert_eq!(tlds.version(), "2024041500");
        assert_eq!(tlds.count(), 3);

        assert!(matches!(
            convert("# Version 2024041500, Last Updated Mon Apr 15 07:07:01 2024 UTC\n"),
            Err(RootZoneError::FailedConversion)
        ));
        assert!(matches!(convert(""), Err(RootZoneError::FailedConversion)));
        assert!(matches!(
            convert(
                "# Version 2024041500, Last Updated Mon Apr 15 07:07:01 2024 UTC\n\
                 COM\n# comment\n"
            ),
            Err(RootZoneError::InvalidLine(_))
        ));
    }
}
