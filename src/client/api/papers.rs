use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};

use super::paper_path;
use crate::client::http::{ApiClient, ApiPath};
use crate::client::validation::{validate_upload, validate_upload_path};
use crate::shared::error::{ApiError, ValidationError};
use crate::shared::models::{
    BatchOperation, BatchRequest, NewPaper, Paper, PaperStats, PaperUpdate, PaperUpload, RecordId,
    UploadReceipt,
};

/// Paper CRUD, upload/download and listing endpoints.
pub struct PapersApi<'a> {
    client: &'a ApiClient,
}

/// Both dashboard requests, each with its own outcome.
#[derive(Debug)]
pub struct DashboardData {
    pub stats: Result<PaperStats, ApiError>,
    pub recent: Result<Vec<Paper>, ApiError>,
}

/// How one file of a multi-file upload went.
#[derive(Debug)]
pub struct UploadOutcome {
    pub file_name: String,
    pub result: Result<UploadReceipt, ApiError>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

impl<'a> PapersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Paper>, ApiError> {
        self.client.get(&ApiPath::new("papers")).await
    }

    pub async fn get(&self, id: &RecordId) -> Result<Paper, ApiError> {
        self.client.get(&paper_path(id)).await
    }

    pub async fn create(&self, paper: &NewPaper) -> Result<Paper, ApiError> {
        self.client.post(&ApiPath::new("papers"), paper).await
    }

    pub async fn update(&self, id: &RecordId, update: &PaperUpdate) -> Result<Paper, ApiError> {
        self.client.put(&paper_path(id), update).await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self.client.delete(&paper_path(id)).await?;
        Ok(())
    }

    /// Multipart upload of a single PDF. Rejected locally, without any
    /// request, when the file is not a PDF or is 10MB or larger.
    pub async fn upload(&self, upload: PaperUpload) -> Result<UploadReceipt, ApiError> {
        validate_upload(&upload)?;

        let content_type = upload
            .content_type
            .clone()
            .unwrap_or_else(|| "application/pdf".to_string());
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name.clone())
            .mime_str(&content_type)
            .map_err(ApiError::from_transport)?;
        let form = Form::new().part("file", part);

        tracing::info!(file = %upload.file_name, "uploading paper");
        self.client
            .post_multipart(&ApiPath::new("papers").join("upload"), form)
            .await
    }

    /// Upload a file from disk. It is checked from its metadata first and
    /// only read once it passes.
    pub async fn upload_path(&self, path: &Path) -> Result<UploadReceipt, ApiError> {
        validate_upload_path(path)?;
        let upload = PaperUpload::read(path).await.map_err(|e| {
            let name = PaperUpload::file_name_of(path);
            ValidationError::new("file", format!("Cannot read {name}: {e}"))
        })?;
        self.upload(upload).await
    }

    /// Upload files one at a time, reporting each separately. A failed file
    /// does not stop the rest; an expired session does, since every later
    /// request would be rejected too.
    pub async fn upload_files(&self, paths: &[PathBuf]) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let result = self.upload_path(path).await;
            let unauthorized = matches!(&result, Err(e) if e.is_unauthorized());
            if let Err(e) = &result {
                tracing::warn!(file = %path.display(), error = %e, "upload failed");
            }
            outcomes.push(UploadOutcome {
                file_name: PaperUpload::file_name_of(path),
                result,
            });
            if unauthorized {
                break;
            }
        }
        let uploaded = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::info!(uploaded, total = paths.len(), "upload batch finished");
        outcomes
    }

    /// The stored PDF.
    pub async fn download(&self, id: &RecordId) -> Result<Vec<u8>, ApiError> {
        self.client.download(&paper_path(id).join("file")).await
    }

    pub async fn export(&self, id: &RecordId) -> Result<Vec<u8>, ApiError> {
        self.client.download(&paper_path(id).join("export")).await
    }

    pub async fn stats(&self) -> Result<PaperStats, ApiError> {
        self.client.get(&ApiPath::new("papers").join("stats")).await
    }

    pub async fn recent(&self) -> Result<Vec<Paper>, ApiError> {
        self.client.get(&ApiPath::new("papers").join("recent")).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Paper>, ApiError> {
        self.client
            .get_with_query(&ApiPath::new("papers").join("search"), &[("q", query)])
            .await
    }

    pub async fn batch(
        &self,
        operation: BatchOperation,
        ids: Vec<RecordId>,
    ) -> Result<serde_json::Value, ApiError> {
        let request = BatchRequest { operation, ids };
        let result: Option<serde_json::Value> = self
            .client
            .post(&ApiPath::new("papers").join("batch"), &request)
            .await?;
        Ok(result.unwrap_or(serde_json::Value::Null))
    }

    /// Stats and recent papers, requested concurrently. A failure in one
    /// does not affect the other.
    pub async fn dashboard(&self) -> DashboardData {
        let (stats, recent) = tokio::join!(self.stats(), self.recent());
        if let Err(e) = &recent {
            tracing::debug!(error = %e, "recent papers unavailable");
        }
        DashboardData { stats, recent }
    }
}
