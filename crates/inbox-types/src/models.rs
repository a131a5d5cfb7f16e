use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single contact-form submission as persisted and served.
///
/// Field names are camelCase on the wire and on disk so the stored
/// document and the API response share one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build a new message with a fresh id, stamped at `created_at` cut to
    /// the precision it is stored with.
    pub fn new(name: String, email: String, message: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            message,
            created_at: stored_precision(created_at),
        }
    }

    /// Drop anything below the millisecond so the value equals what a
    /// write-then-read of the document yields.
    pub fn normalize(&mut self) {
        self.created_at = stored_precision(self.created_at);
    }
}

/// Timestamps are persisted with millisecond precision.
pub fn stored_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// Order a collection newest-first by `created_at`.
///
/// Ties keep the later-appended entry in front, so a message created in the
/// same millisecond as its predecessor still lists first.
pub fn newest_first(mut items: Vec<Message>) -> Vec<Message> {
    items.reverse();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

/// Format a timestamp the way every `createdAt` and health `time` is written:
/// UTC, millisecond precision, `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for `DateTime<Utc>` as `2025-01-31T12:34:56.789Z`.
/// Reading accepts any RFC 3339 offset and normalises to UTC.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
