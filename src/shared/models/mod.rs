//! Records exchanged with the backend.
//!
//! The backend has shipped with both integer and string ids and with
//! timezone-less timestamps, so the shared decoding helpers here accept
//! every shape seen on the wire.

pub mod analysis;
pub mod comment;
pub mod conference;
pub mod files;
pub mod paper;
pub mod sharing;
pub mod tag;
pub mod user;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use analysis::{AnalysisResult, ExperimentRequest, ExperimentResult, PaperAnalysis, SubmissionData};
pub use comment::{Comment, NewComment};
pub use conference::{ConferenceDraft, ConferenceDraftCreated, ConferencePaper};
pub use files::{format_size, CleanupReport, FileListing, StorageInfo, StoredFile};
pub use paper::{
    BatchOperation, BatchRequest, NewPaper, Paper, PaperStats, PaperStatus, PaperUpdate, PaperUpload,
    UploadReceipt,
};
pub use sharing::{ShareLink, ShareRequest};
pub use tag::Tag;
pub use user::{
    Credentials, LoginResponse, PasswordChange, ProfileUpdate, Registration, UserInfo, UserStats,
};

/// The `{"message": ..}` acknowledgement several endpoints answer with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Identifier of a record within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|never: Infallible| match never {})
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::from(value.as_str())
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(s.to_string()),
        })
    }
}

/// Lenient timestamp decoding: RFC 3339, or naive date-times taken as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}

/// Accepts `"a, b; c"`, `["a", "b"]` or `null`.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        One(String),
        Many(Vec<String>),
    }

    let items = match Option::<Repr>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Repr::Many(items)) => items,
        Some(Repr::One(joined)) => joined
            .split([',', ';', '\n'])
            .map(str::to_string)
            .collect(),
    };
    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
