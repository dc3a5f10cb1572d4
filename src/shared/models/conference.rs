use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{string_or_list, timestamp, RecordId};

/// A paper from the ICLR 2025 collection the backend mirrors.
///
/// `reviews` and `experiments` come from a crawler and have no stable
/// shape, so they stay as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConferencePaper {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub authors: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub pdf_link: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub innovations: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub reviews: Value,
    #[serde(default, alias = "similarityScore")]
    pub similarity_score: Option<f64>,
    #[serde(default)]
    pub experiments: Value,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ConferencePaper {
    pub fn author_line(&self) -> String {
        if self.authors.is_empty() {
            "Unknown authors".to_string()
        } else {
            self.authors.join(", ")
        }
    }
}

/// Body of `POST /papers/iclr2025/create`: a paper idea drafted from a topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConferenceDraft {
    pub topic: String,
    /// One innovation per line.
    pub innovations: String,
    pub datasets: Vec<String>,
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConferenceDraftCreated {
    #[serde(default)]
    pub message: Option<String>,
    pub paper: ConferencePaper,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_crawler_record_decodes() {
        let paper: ConferencePaper = serde_json::from_value(json!({
            "id": "Xy12",
            "title": "Sparse attention",
            "authors": ["Ada", "Grace"],
            "abstract": "We study sparsity.",
            "tags": ["attention", "efficiency"],
            "track": "oral",
            "pdf_link": "https://openreview.net/pdf?id=Xy12",
            "innovations": ["Linear cost"],
            "gaps": [],
            "reviews": [{"rating": 8}],
            "similarityScore": 0.8,
            "experiments": {"setup": [], "metrics": ["ppl"]}
        }))
        .unwrap();

        assert_eq!(paper.id, RecordId::Text("Xy12".to_string()));
        assert_eq!(paper.author_line(), "Ada, Grace");
        assert_eq!(paper.similarity_score, Some(0.8));
        assert_eq!(paper.track.as_deref(), Some("oral"));
        assert_eq!(paper.experiments["metrics"][0], "ppl");
    }

    #[test]
    fn test_authors_as_one_string() {
        let paper: ConferencePaper =
            serde_json::from_value(json!({"id": "1", "title": "T", "authors": "Ada; Grace"})).unwrap();
        assert_eq!(paper.authors, vec!["Ada", "Grace"]);
        assert!(paper.reviews.is_null());
    }
}
