use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{string_or_list, timestamp, RecordId};

/// Auto-generated analysis of a paper.
///
/// Produced by the backend's analysis service; fields the client does not
/// know about are kept in `extra` so nothing is dropped on display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperAnalysis {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub paper_id: Option<RecordId>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub innovation_points: Vec<String>,
    #[serde(default)]
    pub main_contribution: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default)]
    pub limitations: Option<String>,
    #[serde(default)]
    pub future_work: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaperAnalysis {
    /// Labelled free-text sections that are present, in display order.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        [
            ("Summary", &self.summary),
            ("Main contribution", &self.main_contribution),
            ("Methodology", &self.methodology),
            ("Results", &self.results),
            ("Limitations", &self.limitations),
            ("Future work", &self.future_work),
        ]
        .into_iter()
        .filter_map(|(label, text)| text.as_deref().map(|t| (label, t)))
        .filter(|(_, text)| !text.trim().is_empty())
        .collect()
    }
}

/// One item of the `POST /papers/:id/analyze` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "createdAt", deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters for an experiment run; sent as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperimentRequest {
    #[serde(flatten)]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default, alias = "createdAt", deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /papers/:id/submissions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionData {
    pub conference: String,
    pub track: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_keeps_unknown_fields() {
        let analysis: PaperAnalysis = serde_json::from_value(json!({
            "paper_id": 4,
            "keywords": "graph, diffusion",
            "innovation_points": ["faster sampling"],
            "summary": "A diffusion model over graphs.",
            "novelty_score": 0.82
        }))
        .unwrap();

        assert_eq!(analysis.keywords, vec!["graph", "diffusion"]);
        assert_eq!(analysis.innovation_points, vec!["faster sampling"]);
        assert_eq!(analysis.extra.get("novelty_score"), Some(&json!(0.82)));
        assert_eq!(analysis.sections(), vec![("Summary", "A diffusion model over graphs.")]);
    }

    #[test]
    fn test_analysis_result_camel_case_timestamp() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "id": "r1",
            "type": "keywords",
            "content": "a, b",
            "createdAt": "2024-01-02T03:04:05Z"
        }))
        .unwrap();
        assert_eq!(result.kind, "keywords");
        assert!(result.created_at.is_some());
    }

    #[test]
    fn test_experiment_request_is_flat() {
        let mut request = ExperimentRequest::default();
        request.parameters.insert("epochs".to_string(), json!(10));
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"epochs": 10}));
        assert_eq!(serde_json::to_value(ExperimentRequest::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_submission_data_shape() {
        let data = SubmissionData {
            conference: "ICLR".to_string(),
            track: "main".to_string(),
            abstract_text: "abs".to_string(),
            keywords: "kw".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"conference": "ICLR", "track": "main", "abstract": "abs", "keywords": "kw"})
        );
    }
}
