//! Opaque keyset-pagination cursors.
//!
//! A cursor names the last-seen position `(created_at, id)` in the feed
//! ordering. Decoding is deliberately tolerant: any component that fails to
//! parse degrades to its zero value, so malformed client input restarts the
//! feed instead of erroring the request.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::CursorToken;

/// Last-seen position in the `(created_at DESC, id DESC)` feed ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl Cursor {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    /// Start-of-feed marker: epoch time, id 0.
    pub fn zero() -> Self {
        Self {
            created_at: DateTime::UNIX_EPOCH,
            id: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Parse a cursor from its two wire components.
    ///
    /// The time component accepts an RFC3339 string or a unix-epoch seconds
    /// integer; the id component accepts a decimal integer. Empty or
    /// unparseable components yield the zero value for that component.
    pub fn decode(cursor: &str, cursor_id: &str) -> Self {
        let created_at = parse_time(cursor.trim()).unwrap_or(DateTime::UNIX_EPOCH);
        let id = cursor_id.trim().parse::<i64>().unwrap_or(0);
        Self { created_at, id }
    }

    /// Encode this cursor into its wire components. `decode` recovers the
    /// exact same pair (timestamps carry microsecond precision, matching
    /// the store's timestamptz resolution).
    pub fn encode(&self) -> CursorToken {
        CursorToken {
            cursor: self
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            cursor_id: self.id.to_string(),
        }
    }
}

fn parse_time(input: &str) -> Option<DateTime<Utc>> {
    if input.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    input
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
