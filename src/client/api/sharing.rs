use serde_json::Value;

use super::paper_path;
use crate::client::http::{ApiClient, ApiPath};
use crate::shared::error::ApiError;
use crate::shared::models::{Paper, RecordId, ShareLink, ShareRequest};

pub struct SharingApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SharingApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn share(&self, id: &RecordId, request: &ShareRequest) -> Result<ShareLink, ApiError> {
        self.client.post(&paper_path(id).join("share"), request).await
    }

    pub async fn link(&self, id: &RecordId) -> Result<ShareLink, ApiError> {
        self.client.get(&paper_path(id).join("share")).await
    }

    pub async fn unshare(&self, id: &RecordId) -> Result<(), ApiError> {
        let _: Option<Value> = self.client.delete(&paper_path(id).join("share")).await?;
        Ok(())
    }

    /// Papers the user has shared.
    pub async fn shared(&self) -> Result<Vec<Paper>, ApiError> {
        self.client.get(&ApiPath::new("papers").join("shared")).await
    }
}
