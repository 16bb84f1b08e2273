use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A post's stable identifier. The server serializes ids as numbers in
/// some payloads and as strings in others; both forms are normalized
/// to the string form here, and every comparison after the boundary is
/// a strict equality on that normalized value.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Default, Serialize)]
pub struct PostId(pub String);

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Text(String),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(n) => PostId(n.to_string()),
            Repr::Text(t) => PostId(t),
        })
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        PostId(value.to_string())
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        PostId(value.to_string())
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("PostID:{}", self.0))
    }
}

/// A post record as the server delivers it. The three timestamps stay
/// raw strings until hydration; everything else the server sent rides
/// along untouched in `content`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    pub id: PostId,
    #[serde(default)]
    pub posted_on: Option<String>,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub hidden_on: Option<String>,
    #[serde(flatten)]
    pub content: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MalformedRecord {
    #[error("record is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a datetime: `{value}`")]
    BadTimestamp { field: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostViewModel {
    pub id: PostId,
    pub posted: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub hidden: Option<DateTime<Utc>>,
    pub is_selected: bool,
    pub is_busy: bool,
    pub is_deleted: bool,
    /// Opaque server fields, carried verbatim.
    pub content: serde_json::Map<String, Value>,
}

impl PostViewModel {
    /// Turn a raw server record into the runtime representation:
    /// timestamps parsed, UI flags starting out false, and the rest of
    /// the record copied as-is. The input is never touched.
    pub fn hydrate(raw: &RawPost) -> Result<Self, MalformedRecord> {
        if raw.id.0.is_empty() {
            return Err(MalformedRecord::MissingField("id"));
        }
        let posted = required_datetime("posted_on", raw.posted_on.as_deref())?;
        let updated = required_datetime("updated_on", raw.updated_on.as_deref())?;
        let hidden = raw
            .hidden_on
            .as_deref()
            .map(|value| parse_datetime("hidden_on", value))
            .transpose()?;

        Ok(PostViewModel {
            id: raw.id.clone(),
            posted,
            updated,
            hidden,
            is_selected: false,
            is_busy: false,
            is_deleted: false,
            content: raw.content.clone(),
        })
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.is_some()
    }

    /// Shallow merge: fields present in `patch` override, everything
    /// else is retained. Returns a new record, `self` stays as it was.
    pub fn merged(&self, patch: &PostPatch) -> Self {
        let mut next = self.clone();
        if let Some(value) = patch.is_selected {
            next.is_selected = value;
        }
        if let Some(value) = patch.is_busy {
            next.is_busy = value;
        }
        if let Some(value) = patch.is_deleted {
            next.is_deleted = value;
        }
        if let Some(value) = patch.posted {
            next.posted = value;
        }
        if let Some(value) = patch.updated {
            next.updated = value;
        }
        if let Some(value) = patch.hidden {
            next.hidden = value;
        }
        for (key, value) in patch.content.iter() {
            next.content.insert(key.clone(), value.clone());
        }
        next
    }
}

/// A subset of post fields to overwrite. Absent fields are retained on
/// merge; `hidden` is doubly optional since "set to not hidden" is a
/// legitimate override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default)]
    pub is_selected: Option<bool>,
    #[serde(default)]
    pub is_busy: Option<bool>,
    #[serde(default)]
    pub is_deleted: Option<bool>,
    #[serde(default)]
    pub posted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hidden: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub content: serde_json::Map<String, Value>,
}

impl PostPatch {
    pub fn selected(value: bool) -> Self {
        Self {
            is_selected: Some(value),
            ..Default::default()
        }
    }

    pub fn busy(value: bool) -> Self {
        Self {
            is_busy: Some(value),
            ..Default::default()
        }
    }

    pub fn deleted(value: bool) -> Self {
        Self {
            is_deleted: Some(value),
            ..Default::default()
        }
    }

    pub fn hidden(at: Option<DateTime<Utc>>) -> Self {
        Self {
            hidden: Some(at),
            ..Default::default()
        }
    }
}

fn required_datetime(
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, MalformedRecord> {
    let Some(value) = value else {
        return Err(MalformedRecord::MissingField(field))
    };
    parse_datetime(field, value)
}

fn parse_datetime(field: &'static str, value: &str) -> Result<DateTime<Utc>, MalformedRecord> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // Django emits naive stamps when timezone support is off
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        .map_err(|_| MalformedRecord::BadTimestamp {
            field,
            value: value.to_string(),
        })
}
