use serde_json::Value;

use super::paper_path;
use crate::client::http::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{Comment, NewComment, RecordId};

pub struct CommentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CommentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, paper: &RecordId) -> Result<Vec<Comment>, ApiError> {
        self.client.get(&paper_path(paper).join("comments")).await
    }

    pub async fn add(&self, paper: &RecordId, content: &str) -> Result<Comment, ApiError> {
        let body = NewComment {
            content: content.to_string(),
        };
        self.client.post(&paper_path(paper).join("comments"), &body).await
    }

    pub async fn delete(&self, paper: &RecordId, comment: &RecordId) -> Result<(), ApiError> {
        let _: Option<Value> = self
            .client
            .delete(&paper_path(paper).join("comments").join(comment))
            .await?;
        Ok(())
    }

    pub async fn reply(
        &self,
        paper: &RecordId,
        comment: &RecordId,
        content: &str,
    ) -> Result<Comment, ApiError> {
        let body = NewComment {
            content: content.to_string(),
        };
        self.client
            .post(&paper_path(paper).join("comments").join(comment).join("reply"), &body)
            .await
    }
}
