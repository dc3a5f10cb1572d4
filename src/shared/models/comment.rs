use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{timestamp, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: RecordId,
    #[serde(default)]
    pub paper_id: Option<RecordId>,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "username", alias = "user")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Number of comments in this thread, including this one.
    pub fn thread_len(&self) -> usize {
        1 + self.replies.iter().map(Comment::thread_len).sum::<usize>()
    }
}

/// Body of comment and reply creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub content: String,
}
