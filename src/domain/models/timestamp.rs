//! Serde adapters for backend timestamps
//!
//! The backend writes local date-times without a zone, and drops the
//! seconds when they are zero. Both adapters accept either precision.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

const MINUTES: &str = "%Y-%m-%dT%H:%M";
const SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse `2025-02-14T11:00` or `2025-02-14T11:00:30[.fff]`
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, MINUTES))
        .ok()
}

fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse(raw.trim()).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid date-time `{raw}`"))
        }),
    }
}

/// Timestamps the server generates; written back with seconds
pub mod lenient {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.collect_str(&at.format(SECONDS)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_optional(deserializer)
    }
}

/// Minute-precision fields such as the visit date
pub mod minutes {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.collect_str(&at.format(MINUTES)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_optional(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_minute_precision() {
        let at = parse("2025-02-14T11:00").unwrap();
        assert_eq!(at.date(), NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
        assert_eq!((at.hour(), at.minute(), at.second()), (11, 0, 0));
    }

    #[test]
    fn test_parse_second_and_fraction_precision() {
        assert_eq!(parse("2025-02-14T11:00:30").unwrap().second(), 30);
        assert_eq!(
            parse("2025-02-14T11:00:30.250").unwrap().nanosecond(),
            250_000_000
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("14/02/2025 11:00").is_none());
        assert!(parse("2025-02-14").is_none());
    }
}
