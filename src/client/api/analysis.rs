//! Analysis, experiment and submission endpoints. The analysis itself runs
//! on the backend; these calls only trigger and fetch it.

use serde_json::Value;

use super::paper_path;
use crate::client::http::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{
    AnalysisResult, ExperimentRequest, ExperimentResult, Paper, PaperAnalysis, RecordId, SubmissionData,
};

pub struct AnalysisApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalysisApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Start a new analysis run.
    pub async fn create(&self, id: &RecordId) -> Result<PaperAnalysis, ApiError> {
        self.client.post_empty(&paper_path(id).join("analysis")).await
    }

    /// Latest analysis, if one exists.
    pub async fn get(&self, id: &RecordId) -> Result<PaperAnalysis, ApiError> {
        self.client.get(&paper_path(id).join("analysis")).await
    }

    /// Quick typed analysis (keywords, summary, ...).
    pub async fn analyze(&self, id: &RecordId) -> Result<Vec<AnalysisResult>, ApiError> {
        let results: Option<Vec<AnalysisResult>> =
            self.client.post_empty(&paper_path(id).join("analyze")).await?;
        Ok(results.unwrap_or_default())
    }

    pub async fn run_experiments(
        &self,
        id: &RecordId,
        request: &ExperimentRequest,
    ) -> Result<Vec<ExperimentResult>, ApiError> {
        let results: Option<Vec<ExperimentResult>> = self
            .client
            .post(&paper_path(id).join("experiments"), request)
            .await?;
        Ok(results.unwrap_or_default())
    }

    pub async fn submit(&self, id: &RecordId, submission: &SubmissionData) -> Result<(), ApiError> {
        let _: Option<Value> = self
            .client
            .post(&paper_path(id).join("submissions"), submission)
            .await?;
        Ok(())
    }

    /// Conference suitability suggestions; opaque to the client.
    pub async fn suggest_conference(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.client
            .post_empty(&paper_path(id).join("submission").join("suggest"))
            .await
    }

    /// Structure and writing suggestions for the paper's content; opaque to
    /// the client.
    pub async fn optimize(&self, id: &RecordId) -> Result<Value, ApiError> {
        let result: Option<Value> = self.client.post_empty(&paper_path(id).join("optimize")).await?;
        Ok(result.unwrap_or(Value::Null))
    }

    pub async fn recommendations(&self, id: &RecordId) -> Result<Vec<Paper>, ApiError> {
        self.client.get(&paper_path(id).join("recommendations")).await
    }

    pub async fn similar(&self, id: &RecordId) -> Result<Vec<Paper>, ApiError> {
        self.client.get(&paper_path(id).join("similar")).await
    }

    pub async fn insights(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.client.get(&paper_path(id).join("insights")).await
    }
}
