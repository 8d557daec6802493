use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::models::{OwnerCard, VideoCard};
use crate::utils::utils::seconds_to_minutes_seconds;

/// Owner as the server sent it: populated, or just a reference id.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerRef<'a> {
    Embedded(&'a Map<String, Value>),
    Reference(&'a str),
}

/// Avatar or thumbnail as the server sent it.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRef<'a> {
    Url(&'a str),
    Object(&'a Map<String, Value>),
    Missing,
}

impl<'a> MediaRef<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(url)) => MediaRef::Url(url),
            Some(Value::Object(map)) => MediaRef::Object(map),
            _ => MediaRef::Missing,
        }
    }

    /// Never fails: anything without a usable URL resolves to `""`.
    pub fn url(&self) -> String {
        match self {
            MediaRef::Url(url) => url.to_string(),
            MediaRef::Object(map) => map
                .get("url")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            MediaRef::Missing => String::new(),
        }
    }
}

impl<'a> OwnerRef<'a> {
    /// `owner` wins over `ownerDetails`; aggregation lookups may wrap the
    /// latter in a one-element array.
    pub fn resolve(record: &'a Value) -> Option<Self> {
        let raw = present(record.get("owner")).or_else(|| present(record.get("ownerDetails")))?;
        match raw {
            Value::Object(map) => Some(OwnerRef::Embedded(map)),
            Value::String(id) => Some(OwnerRef::Reference(id)),
            Value::Array(items) => match items.first() {
                Some(Value::Object(map)) => Some(OwnerRef::Embedded(map)),
                _ => None,
            },
            _ => None,
        }
    }

    fn into_card(self) -> OwnerCard {
        match self {
            OwnerRef::Embedded(map) => OwnerCard {
                id: identity(map.get("_id")),
                username: map.get("username").and_then(Value::as_str).map(str::to_string),
                avatar_url: MediaRef::from_value(map.get("avatar")).url(),
            },
            OwnerRef::Reference(id) => OwnerCard {
                id: Some(id.to_string()),
                username: None,
                avatar_url: String::new(),
            },
        }
    }
}

/// Projects a server video record onto a [`VideoCard`].
///
/// Returns `None` when the record has no identity; callers skip those
/// instead of rendering partial data.
pub fn normalize(record: &Value) -> Option<VideoCard> {
    let id = identity(record.get("_id")).or_else(|| identity(record.get("id")))?;

    let duration_seconds = whole_number(record.get("duration"));
    Some(VideoCard {
        title: record
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        duration_label: seconds_to_minutes_seconds(duration_seconds),
        duration_seconds,
        views: whole_number(record.get("views")),
        created_at: timestamp(record.get("createdAt")),
        owner: OwnerRef::resolve(record).map(OwnerRef::into_card),
        thumbnail_url: MediaRef::from_value(record.get("thumbnail")).url(),
        id,
    })
}

/// Normalizes a listing, dropping records that cannot be rendered.
pub fn normalize_all(records: &[Value]) -> Vec<VideoCard> {
    records
        .iter()
        .filter_map(|record| {
            let card = normalize(record);
            if card.is_none() {
                debug!("Skipping video record without an id");
            }
            card
        })
        .collect()
}

/// Null, `""`, `0` and `false` are treated as absent.
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(v) => Some(v),
    }
}

fn identity(value: Option<&Value>) -> Option<String> {
    match present(value)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative whole number from a JSON number or numeric string; 0 otherwise.
fn whole_number(value: Option<&Value>) -> u64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
        _ => 0,
    }
}

/// RFC 3339 string or epoch milliseconds.
fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_without_identity_is_unrenderable() {
        assert_eq!(normalize(&json!({ "title": "orphan", "duration": 10 })), None);
        assert_eq!(normalize(&json!({ "_id": "", "title": "blank id" })), None);
        assert_eq!(normalize(&json!({ "_id": null })), None);
    }

    #[test]
    fn populated_owner_with_nested_urls() {
        let record = json!({
            "_id": "v1",
            "title": "Trip",
            "duration": 125,
            "views": 42,
            "createdAt": "2024-05-01T10:00:00.000Z",
            "thumbnail": { "url": "https://cdn.example.com/t.jpg", "public_id": "t" },
            "owner": {
                "_id": "u1",
                "username": "ana",
                "avatar": { "url": "https://cdn.example.com/a.jpg" }
            }
        });

        let card = normalize(&record).unwrap();
        assert_eq!(card.id, "v1");
        assert_eq!(card.title, "Trip");
        assert_eq!(card.duration_label, "2:05");
        assert_eq!(card.views, 42);
        assert_eq!(card.thumbnail_url, "https://cdn.example.com/t.jpg");
        assert_eq!(
            card.created_at.unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );

        let owner = card.owner.unwrap();
        assert_eq!(owner.id.as_deref(), Some("u1"));
        assert_eq!(owner.username.as_deref(), Some("ana"));
        assert_eq!(owner.avatar_url, "https://cdn.example.com/a.jpg");
        assert_eq!(owner.channel_path().as_deref(), Some("/channel/u1"));
    }

    #[test]
    fn flat_string_avatar_is_used_unchanged() {
        let record = json!({
            "_id": "v2",
            "ownerDetails": { "_id": "u2", "username": "bo", "avatar": "http://img/a b.png" },
            "thumbnail": "http://img/t.png"
        });

        let card = normalize(&record).unwrap();
        let owner = card.owner.unwrap();
        assert_eq!(owner.avatar_url, "http://img/a b.png");
        assert_eq!(card.thumbnail_url, "http://img/t.png");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let card = normalize(&json!({ "_id": "v3" })).unwrap();
        assert_eq!(card.duration_seconds, 0);
        assert_eq!(card.duration_label, "0:00");
        assert_eq!(card.views, 0);
        assert_eq!(card.title, "");
        assert_eq!(card.thumbnail_url, "");
        assert_eq!(card.created_at, None);
        assert_eq!(card.owner, None);
    }

    #[test]
    fn owner_takes_precedence_over_owner_details() {
        let record = json!({
            "_id": "v4",
            "owner": { "_id": "primary" },
            "ownerDetails": { "_id": "secondary" }
        });
        let owner = normalize(&record).unwrap().owner.unwrap();
        assert_eq!(owner.id.as_deref(), Some("primary"));

        let record = json!({
            "_id": "v4",
            "owner": null,
            "ownerDetails": [{ "_id": "looked-up", "username": "cy" }]
        });
        let owner = normalize(&record).unwrap().owner.unwrap();
        assert_eq!(owner.id.as_deref(), Some("looked-up"));
        assert_eq!(owner.avatar_url, "");
    }

    #[test]
    fn unpopulated_owner_reference_keeps_only_the_id() {
        let owner = normalize(&json!({ "_id": "v5", "owner": "u9" }))
            .unwrap()
            .owner
            .unwrap();
        assert_eq!(owner.id.as_deref(), Some("u9"));
        assert_eq!(owner.username, None);
        assert_eq!(owner.avatar_url, "");
    }

    #[test]
    fn zero_counts_as_missing_for_id_and_owner() {
        assert_eq!(normalize(&json!({ "_id": 0, "title": "zero id" })), None);

        let record = json!({
            "_id": "v6",
            "owner": 0,
            "ownerDetails": { "_id": "fallback", "username": "dee" }
        });
        let owner = normalize(&record).unwrap().owner.unwrap();
        assert_eq!(owner.id.as_deref(), Some("fallback"));
        assert_eq!(owner.username.as_deref(), Some("dee"));
    }

    #[test]
    fn odd_shapes_never_fail() {
        let record = json!({
            "_id": 77,
            "duration": "61.9",
            "views": -3,
            "createdAt": 1714557600000i64,
            "thumbnail": { "url": 5 },
            "owner": { "avatar": ["not", "a", "url"] }
        });
        let card = normalize(&record).unwrap();
        assert_eq!(card.id, "77");
        assert_eq!(card.duration_label, "1:01");
        assert_eq!(card.views, 0);
        assert_eq!(card.thumbnail_url, "");
        assert_eq!(card.created_at.unwrap().timestamp(), 1_714_557_600);
        assert_eq!(card.owner.unwrap().avatar_url, "");
    }

    #[test]
    fn normalize_all_omits_malformed_records() {
        let records = vec![
            json!({ "_id": "a" }),
            json!({ "title": "no id" }),
            json!("not even an object"),
            json!({ "_id": "b" }),
        ];
        let ids: Vec<_> = normalize_all(&records).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
