//! Server-side upload storage and its housekeeping.

use crate::client::http::{ApiClient, ApiPath};
use crate::shared::error::{ApiError, ValidationError};
use crate::shared::models::{CleanupReport, FileListing, ServerMessage, StorageInfo};

/// Files older than this many days are removed by a default cleanup.
pub const DEFAULT_CLEANUP_DAYS: u32 = 30;
pub const MAX_PAGE_SIZE: u32 = 100;

pub struct FilesApi<'a> {
    client: &'a ApiClient,
}

fn acknowledged(reply: Option<ServerMessage>, fallback: &str) -> String {
    reply
        .and_then(|r| r.message)
        .unwrap_or_else(|| fallback.to_string())
}

impl<'a> FilesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn storage(&self) -> Result<StorageInfo, ApiError> {
        self.client.get(&ApiPath::new("storage")).await
    }

    /// One page of stored files, 1-based. The backend caps `page_size` at
    /// 100.
    pub async fn list(&self, page: u32, page_size: u32) -> Result<FileListing, ApiError> {
        if page == 0 {
            return Err(ValidationError::new("page", "Pages start at 1").into());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ValidationError::new(
                "page_size",
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
            )
            .into());
        }
        self.client
            .get_with_query(&ApiPath::new("files"), &[("page", page), ("page_size", page_size)])
            .await
    }

    /// `path` is sent as one encoded segment, slashes included.
    pub async fn delete(&self, path: &str) -> Result<String, ApiError> {
        let reply = self.client.delete(&ApiPath::new("files").join(path)).await?;
        Ok(acknowledged(reply, "File deleted"))
    }

    pub async fn move_file(&self, source: &str, target: &str) -> Result<String, ApiError> {
        if target.trim().is_empty() {
            return Err(ValidationError::new("target_path", "Target path is required").into());
        }
        let reply = self
            .client
            .post_with_query(
                &ApiPath::new("files").join("move"),
                &[("source_path", source), ("target_path", target.trim())],
            )
            .await?;
        Ok(acknowledged(reply, "File moved"))
    }

    /// Remove uploads older than `days` days.
    pub async fn cleanup(&self, days: u32) -> Result<CleanupReport, ApiError> {
        if days == 0 {
            return Err(ValidationError::new("days", "Days must be at least 1").into());
        }
        let report: Option<CleanupReport> = self
            .client
            .post_with_query(&ApiPath::new("cleanup"), &[("days", days)])
            .await?;
        Ok(report.unwrap_or_default())
    }
}
