//! Timestamp handling for Jira's inconsistent date formats.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Jira date format without a colon in the timezone offset, with milliseconds.
const JIRA_FORMAT_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";
/// Same quirk without the millisecond component.
const JIRA_FORMAT_SECS: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A Jira timestamp. The API emits RFC 3339 in some places and a
/// `2026-01-16T16:55:41.785+0900` variant (no colon in the offset) in
/// others; both decode to the same instant. Ordering and equality compare
/// instants, so values parsed from different offsets are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JiraTime(pub DateTime<FixedOffset>);

impl JiraTime {
    /// Parses a timestamp, trying RFC 3339 first and then the two Jira
    /// no-colon-offset variants. The first format that succeeds wins.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s)
            .or_else(|_| DateTime::parse_from_str(s, JIRA_FORMAT_MILLIS))
            .or_else(|_| DateTime::parse_from_str(s, JIRA_FORMAT_SECS))
            .map(JiraTime)
    }

    /// Parses a timestamp where a literal `null` or an empty string means
    /// the value is absent rather than malformed.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, chrono::ParseError> {
        if s.is_empty() || s == "null" {
            return Ok(None);
        }
        Self::parse(s).map(Some)
    }

    /// Canonical RFC 3339 encoding. Sub-second precision is kept when the
    /// parsed value carried any.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Display for JiraTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for JiraTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for JiraTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        JiraTime::parse(&raw).map_err(DeError::custom)
    }
}

/// Deserializes an optional timestamp field, treating JSON null, `"null"`
/// and the empty string as absent.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<JiraTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None => Ok(None),
        Some(s) => JiraTime::parse_optional(s).map_err(DeError::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::JiraTime;

    #[test]
    fn parses_rfc3339_with_colon_offset() {
        let parsed = JiraTime::parse("2026-01-16T16:55:41+09:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-01-16T16:55:41+09:00");
    }

    #[test]
    fn parses_jira_offset_with_millis() {
        let parsed = JiraTime::parse("2026-01-16T16:55:41.785+0900").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-01-16T16:55:41.785+09:00");
    }

    #[test]
    fn parses_jira_offset_without_millis() {
        let parsed = JiraTime::parse("2026-01-16T16:55:41-0500").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-01-16T16:55:41-05:00");
    }

    #[test]
    fn canonical_encoding_round_trips_to_same_instant() {
        for raw in [
            "2026-01-16T16:55:41+09:00",
            "2026-01-16T16:55:41.785+0900",
            "2026-01-16T16:55:41-0500",
        ] {
            let parsed = JiraTime::parse(raw).unwrap();
            let reparsed = JiraTime::parse(&parsed.to_rfc3339()).unwrap();
            assert_eq!(parsed, reparsed);
        }
    }

    #[test]
    fn null_and_empty_are_absent() {
        assert_eq!(JiraTime::parse_optional("null").unwrap(), None);
        assert_eq!(JiraTime::parse_optional("").unwrap(), None);
    }

    #[test]
    fn malformed_input_fails() {
        assert!(JiraTime::parse("not-a-date").is_err());
        assert!(JiraTime::parse_optional("not-a-date").is_err());
    }

    #[test]
    fn ordering_compares_instants_across_offsets() {
        // Same wall-clock, different offsets: +09:00 is the earlier instant.
        let tokyo = JiraTime::parse("2026-01-16T12:00:00+0900").unwrap();
        let utc = JiraTime::parse("2026-01-16T12:00:00Z").unwrap();
        assert!(tokyo < utc);
    }

    #[test]
    fn serde_round_trip_emits_rfc3339() {
        let parsed = JiraTime::parse("2026-01-16T16:55:41.785+0900").unwrap();
        let encoded = serde_json::to_string(&parsed).unwrap();
        assert_eq!(encoded, "\"2026-01-16T16:55:41.785+09:00\"");
        let decoded: JiraTime = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, parsed);
    }
}
