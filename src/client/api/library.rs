use serde::Serialize;
use serde_json::Value;

use super::paper_path;
use crate::client::http::{ApiClient, ApiPath};
use crate::shared::error::ApiError;
use crate::shared::models::{Paper, RecordId, Tag};

/// Favorites and tags.
pub struct LibraryApi<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct TagBody<'t> {
    tag: &'t str,
}

impl<'a> LibraryApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn favorite(&self, id: &RecordId) -> Result<(), ApiError> {
        let _: Option<Value> = self.client.post_empty(&paper_path(id).join("favorite")).await?;
        Ok(())
    }

    pub async fn unfavorite(&self, id: &RecordId) -> Result<(), ApiError> {
        let _: Option<Value> = self.client.delete(&paper_path(id).join("favorite")).await?;
        Ok(())
    }

    pub async fn favorites(&self) -> Result<Vec<Paper>, ApiError> {
        self.client.get(&ApiPath::new("papers").join("favorites")).await
    }

    pub async fn add_tag(&self, id: &RecordId, tag: &str) -> Result<(), ApiError> {
        let _: Option<Value> = self
            .client
            .post(&paper_path(id).join("tags"), &TagBody { tag })
            .await?;
        Ok(())
    }

    pub async fn remove_tag(&self, id: &RecordId, tag: &str) -> Result<(), ApiError> {
        let _: Option<Value> = self
            .client
            .delete(&paper_path(id).join("tags").join(tag))
            .await?;
        Ok(())
    }

    /// Every tag in use across the user's papers.
    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.client.get(&ApiPath::new("papers").join("tags")).await
    }
}
