//! The ICLR 2025 collection mirrored by the backend. Read-only apart from
//! the crawler refresh and drafting a paper idea.

use crate::client::http::{ApiClient, ApiPath};
use crate::shared::error::ApiError;
use crate::shared::models::{
    ConferenceDraft, ConferenceDraftCreated, ConferencePaper, RecordId, ServerMessage,
};

pub struct ConferenceApi<'a> {
    client: &'a ApiClient,
}

fn collection() -> ApiPath {
    ApiPath::new("papers").join("iclr2025")
}

impl<'a> ConferenceApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn papers(&self) -> Result<Vec<ConferencePaper>, ApiError> {
        self.client.get(&collection()).await
    }

    pub async fn paper(&self, id: &RecordId) -> Result<ConferencePaper, ApiError> {
        self.client.get(&collection().join(id)).await
    }

    /// Matches title, abstract and tags. An empty query returns everything.
    pub async fn search(&self, query: &str) -> Result<Vec<ConferencePaper>, ApiError> {
        self.client
            .get_with_query(&collection().join("search"), &[("q", query)])
            .await
    }

    pub async fn by_topic(&self, topic: &str) -> Result<Vec<ConferencePaper>, ApiError> {
        self.client.get(&collection().join("topic").join(topic)).await
    }

    pub async fn by_track(&self, track: &str) -> Result<Vec<ConferencePaper>, ApiError> {
        self.client.get(&collection().join("track").join(track)).await
    }

    /// Re-run the backend crawler. Slow; returns the backend's summary.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        let reply: Option<ServerMessage> = self.client.post_empty(&collection().join("update")).await?;
        Ok(reply
            .and_then(|r| r.message)
            .unwrap_or_else(|| "Conference papers updated".to_string()))
    }

    pub async fn draft(&self, draft: &ConferenceDraft) -> Result<ConferenceDraftCreated, ApiError> {
        self.client.post(&collection().join("create"), draft).await
    }
}
