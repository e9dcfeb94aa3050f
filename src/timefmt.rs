//! ISO-8601 text <-> `OffsetDateTime` conversion used by every JSON body.
//!
//! Output is always RFC 3339 in UTC. Input accepts RFC 3339, a naive
//! `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) or a bare `YYYY-MM-DD`.
//! Years outside `0000..=9999` are rejected, since RFC 3339 cannot print them.

use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Malformed(#[from] time::error::Parse),

    #[error("year {0} is outside 0000..=9999")]
    YearOutOfRange(i32),
}

pub fn parse(raw: &str) -> Result<OffsetDateTime, ParseError> {
    let dt = parse_any(raw.trim())?;
    if !(0..=9999).contains(&dt.year()) {
        return Err(ParseError::YearOutOfRange(dt.year()));
    }
    Ok(dt)
}

fn parse_any(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(dt.to_offset(UtcOffset::UTC));
    }
    let with_fraction =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    if let Ok(dt) = PrimitiveDateTime::parse(raw, with_fraction) {
        return Ok(dt.assume_utc());
    }
    let whole_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(raw, whole_seconds) {
        return Ok(dt.assume_utc());
    }
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))?;
    Ok(date.midnight().assume_utc())
}

pub fn format(dt: OffsetDateTime) -> Result<String, time::error::Format> {
    dt.to_offset(UtcOffset::UTC).format(&Rfc3339)
}

pub fn serialize<S: Serializer>(dt: &OffsetDateTime, s: S) -> Result<S::Ok, S::Error> {
    let text = format(*dt).map_err(serde::ser::Error::custom)?;
    s.serialize_str(&text)
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<OffsetDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &Option<OffsetDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => super::serialize(dt, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => {
                parse(&raw).map(Some).map_err(serde::de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_rfc3339_with_offset_into_utc() {
        let dt = parse("2025-01-05T10:00:00+02:00").unwrap();
        assert_eq!(dt, datetime!(2025-01-05 08:00:00 UTC));
        assert_eq!(dt.offset(), UtcOffset::UTC);
    }

    #[test]
    fn parses_zulu_and_fractional_seconds() {
        let dt = parse("2025-01-05T10:00:00.123456Z").unwrap();
        assert_eq!(dt, datetime!(2025-01-05 10:00:00.123456 UTC));
    }

    #[test]
    fn naive_datetime_is_read_as_utc() {
        assert_eq!(
            parse("2025-03-01T12:30:00").unwrap(),
            datetime!(2025-03-01 12:30:00 UTC)
        );
        assert_eq!(
            parse("2025-03-01T12:30:00.5").unwrap(),
            datetime!(2025-03-01 12:30:00.5 UTC)
        );
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        assert_eq!(parse("2024-12-31").unwrap(), datetime!(2024-12-31 00:00 UTC));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("2025-13-01").is_err());
    }

    #[test]
    fn rejects_years_rfc3339_cannot_print() {
        assert!(matches!(
            parse("-0001-01-01"),
            Err(ParseError::YearOutOfRange(-1))
        ));
        assert!(matches!(
            parse("+10000-01-01T00:00:00"),
            Err(ParseError::YearOutOfRange(10000)) | Err(ParseError::Malformed(_))
        ));
        let edge = parse("0000-01-01").unwrap();
        assert!(format(edge).is_ok());
    }

    #[test]
    fn formats_as_utc_rfc3339() {
        let text = format(datetime!(2025-01-05 12:00:00 +03:00)).unwrap();
        assert_eq!(text, "2025-01-05T09:00:00Z");
    }
}
