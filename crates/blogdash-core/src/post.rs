//! Post records as served by the remote collection service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::PostId;

/// Label used wherever a post has no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A post record.
///
/// Fields this crate does not interpret (body, tags, ...) are kept in
/// `extra` so nothing is lost when a record passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier, unique within a collection.
    pub id: PostId,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(
        default,
        with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Post {
    /// Create a post with just an id and title.
    pub fn new(id: PostId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: None,
            created_at: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// The author name, or [`UNKNOWN_AUTHOR`] when absent or empty.
    pub fn author_label(&self) -> &str {
        match self.author.as_deref() {
            Some(author) if !author.is_empty() => author,
            _ => UNKNOWN_AUTHOR,
        }
    }

    /// Creation date as `YYYY-MM-DD`, or `-` when unknown.
    pub fn display_date(&self) -> String {
        self.created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Lenient `createdAt` codec.
///
/// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates and epoch milliseconds.
/// Anything unreadable becomes `None` rather than failing the whole record.
mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(parse(&Value::deserialize(deserializer)?))
    }

    fn parse(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            Value::String(s) => parse_str(s.trim()),
            _ => None,
        }
    }

    fn parse_str(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Some(t.with_timezone(&Utc));
        }
        if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(t.and_utc());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc())
    }
}
