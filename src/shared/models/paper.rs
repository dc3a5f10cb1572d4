use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{string_or_list, timestamp, RecordId, Tag};

/// Where a paper is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    #[default]
    Draft,
    Submitted,
    Accepted,
    Rejected,
    #[serde(other)]
    Other,
}

impl PaperStatus {
    pub const ALL: [PaperStatus; 4] = [
        PaperStatus::Draft,
        PaperStatus::Submitted,
        PaperStatus::Accepted,
        PaperStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaperStatus::Draft => "Draft",
            PaperStatus::Submitted => "Submitted",
            PaperStatus::Accepted => "Accepted",
            PaperStatus::Rejected => "Rejected",
            PaperStatus::Other => "Unknown",
        }
    }
}

impl fmt::Display for PaperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A paper as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, deserialize_with = "string_or_list", skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, alias = "target_conference", skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub status: PaperStatus,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, alias = "author_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /papers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewPaper {
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaperStatus>,
}

/// Body of `PUT /papers/:id`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaperUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaperStatus>,
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperStats {
    pub total: u64,
    pub draft: u64,
    pub submitted: u64,
    pub accepted: u64,
    pub rejected: u64,
}

/// Response to a successful upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadReceipt {
    #[serde(alias = "id")]
    pub paper_id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A local file staged for `POST /papers/upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PaperUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension.
    /// Check the path with `validate_upload_path` first; this reads it whole.
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self {
            file_name: Self::file_name_of(path),
            content_type: Self::content_type_of(path),
            bytes,
        })
    }

    /// Name shown for `path` in messages and sent as the multipart filename.
    pub fn file_name_of(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn content_type_of(path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let content_type = match ext.as_str() {
            "pdf" => "application/pdf",
            "txt" => "text/plain",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            _ => "application/octet-stream",
        };
        Some(content_type.to_string())
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOperation {
    Delete,
    Favorite,
    Unfavorite,
    Analyze,
}

/// Body of `POST /papers/batch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRequest {
    pub operation: BatchOperation,
    pub ids: Vec<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_paper_from_backend_row() {
        let paper: Paper = serde_json::from_value(json!({
            "id": 7,
            "title": "Attention Is All You Need",
            "abstract": "We propose the Transformer.",
            "keywords": "attention, transformer",
            "target_conference": "NeurIPS",
            "status": "submitted",
            "author_id": 3,
            "created_at": "2024-05-01T08:00:00",
            "updated_at": null
        }))
        .unwrap();

        assert_eq!(paper.id, RecordId::Number(7));
        assert_eq!(paper.abstract_text.as_deref(), Some("We propose the Transformer."));
        assert_eq!(paper.keywords, vec!["attention", "transformer"]);
        assert_eq!(paper.conference.as_deref(), Some("NeurIPS"));
        assert_eq!(paper.status, PaperStatus::Submitted);
        assert_eq!(paper.user_id, Some(RecordId::Number(3)));
        assert!(paper.created_at.is_some());
        assert!(paper.updated_at.is_none());
        assert!(!paper.is_favorite);
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let paper: Paper = serde_json::from_value(json!({"id": "abc", "status": "withdrawn"})).unwrap();
        assert_eq!(paper.status, PaperStatus::Other);
        assert_eq!(paper.title, "");
    }

    #[test]
    fn test_paper_update_sends_only_set_fields() {
        let update = PaperUpdate {
            status: Some(PaperStatus::Accepted),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"status": "accepted"}));
    }

    #[test]
    fn test_new_paper_uses_abstract_key() {
        let paper = NewPaper {
            title: "Draft".to_string(),
            abstract_text: Some("Short".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&paper).unwrap(),
            json!({"title": "Draft", "abstract": "Short"})
        );
    }

    #[tokio::test]
    async fn test_upload_read_detects_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Paper.PDF");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let upload = PaperUpload::read(&path).await.unwrap();
        assert_eq!(upload.file_name, "Paper.PDF");
        assert_eq!(upload.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(upload.size(), 8);
    }

    #[test]
    fn test_content_type_of_unknown_and_missing_extension() {
        assert_eq!(
            PaperUpload::content_type_of(Path::new("notes.md")).as_deref(),
            Some("application/octet-stream")
        );
        assert_eq!(PaperUpload::content_type_of(Path::new("README")), None);
    }

    #[test]
    fn test_batch_request_shape() {
        let request = BatchRequest {
            operation: BatchOperation::Unfavorite,
            ids: vec![RecordId::Number(1), RecordId::Text("x".to_string())],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"operation": "unfavorite", "ids": [1, "x"]})
        );
    }
}
