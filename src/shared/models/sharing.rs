use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Body of `POST /papers/:id/share`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    #[serde(alias = "url", alias = "link")]
    pub share_link: String,
    #[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
