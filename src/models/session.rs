use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{BcsError, Result};

/// A calendar entry, with timestamps kept as ISO-8601 UTC minus the zone marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: i64,
    pub course_id: Option<i64>,
    pub name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub chapter: Option<String>,
    pub context: String,
    pub classroom: Option<serde_json::Value>,
    pub video_url_list: Vec<String>,
}

impl Session {
    pub fn starts_at(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.start_time)
    }
}

/// The provider's calendar category for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextCode {
    Academic,
    Career,
    Orientation,
    Other(String),
}

impl ContextCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "academic" => ContextCode::Academic,
            "career" => ContextCode::Career,
            "orientation" => ContextCode::Orientation,
            other => ContextCode::Other(other.to_string()),
        }
    }
}

/// Drops a single trailing `Z` designator, if present.
pub fn strip_zone(ts: &str) -> &str {
    ts.strip_suffix('Z').unwrap_or(ts)
}

/// Parse a zone-less ISO-8601 timestamp, fractional seconds optional.
pub fn parse_timestamp(ts: &str) -> Result<NaiveDateTime> {
    strip_zone(ts)
        .parse::<NaiveDateTime>()
        .map_err(|e| BcsError::InvalidTimestamp(format!("{}: {}", ts, e)))
}
