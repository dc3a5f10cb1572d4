//! Per-view state and the text-input forms behind it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};

use crate::client::api::files::DEFAULT_CLEANUP_DAYS;
use crate::client::api::UploadOutcome;
use crate::shared::error::ValidationError;
use crate::shared::models::{
    AnalysisResult, Comment, ConferenceDraft, ConferencePaper, Credentials, ExperimentRequest,
    ExperimentResult, FileListing, NewPaper, Paper, PaperAnalysis, PaperStats, PaperStatus,
    PaperUpdate, RecordId, Registration, ShareLink, ShareRequest, StorageInfo, SubmissionData,
    UserInfo, UserStats,
};

const NOTICE_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient message shown under the top bar.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTICE_TTL
    }
}

/// Login and registration inputs.
#[derive(Debug, Default)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), self.password.clone())
    }

    pub fn registration(&self) -> Registration {
        Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }

    pub fn clear_secrets(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Create/edit form for a paper's metadata.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaperForm {
    pub title: String,
    pub abstract_text: String,
    pub authors: String,
    pub keywords: String,
    pub conference: String,
    pub year: String,
    pub doi: String,
    pub status: PaperStatus,
    pub saving: bool,
}

impl PaperForm {
    pub fn from_paper(paper: &Paper) -> Self {
        Self {
            title: paper.title.clone(),
            abstract_text: paper.abstract_text.clone().unwrap_or_default(),
            authors: paper.authors.clone().unwrap_or_default(),
            keywords: paper.keywords.join(", "),
            conference: paper.conference.clone().unwrap_or_default(),
            year: paper.year.map(|y| y.to_string()).unwrap_or_default(),
            doi: paper.doi.clone().unwrap_or_default(),
            status: paper.status,
            saving: false,
        }
    }

    fn check_title(&self) -> Result<String, ValidationError> {
        non_empty(&self.title).ok_or_else(|| ValidationError::new("title", "Title is required"))
    }

    fn parse_year(&self) -> Result<Option<i32>, ValidationError> {
        match non_empty(&self.year) {
            None => Ok(None),
            Some(year) => year
                .parse::<i32>()
                .map(Some)
                .map_err(|_| ValidationError::new("year", "Year must be a number")),
        }
    }

    pub fn to_new_paper(&self) -> Result<NewPaper, ValidationError> {
        Ok(NewPaper {
            title: self.check_title()?,
            abstract_text: non_empty(&self.abstract_text),
            authors: non_empty(&self.authors),
            keywords: non_empty(&self.keywords),
            conference: non_empty(&self.conference),
            year: self.parse_year()?,
            doi: non_empty(&self.doi),
            status: Some(self.status),
        })
    }

    pub fn to_update(&self) -> Result<PaperUpdate, ValidationError> {
        Ok(PaperUpdate {
            title: Some(self.check_title()?),
            abstract_text: non_empty(&self.abstract_text),
            authors: non_empty(&self.authors),
            keywords: non_empty(&self.keywords),
            conference: non_empty(&self.conference),
            status: Some(self.status),
        })
    }
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub stats: Option<PaperStats>,
    pub recent: Vec<Paper>,
    pub loading: bool,
}

#[derive(Debug, Default)]
pub struct PapersView {
    pub items: Vec<Paper>,
    pub search: String,
    /// Query the current list was fetched with, if any.
    pub searched: Option<String>,
    pub loading: bool,
}

/// Files staged for upload and how the last batch went.
#[derive(Debug, Default)]
pub struct UploadView {
    pub path: String,
    /// Already checked from metadata; read only when the batch runs.
    pub queue: Vec<PathBuf>,
    pub uploading: bool,
    pub results: Vec<UploadOutcome>,
}

impl UploadView {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|o| o.is_success()).count()
    }
}

/// Everything shown on a paper's detail and analysis pages.
#[derive(Debug, Default)]
pub struct DetailView {
    pub paper: Option<Paper>,
    pub analysis: Option<PaperAnalysis>,
    pub quick_results: Vec<AnalysisResult>,
    pub comments: Vec<Comment>,
    pub share: Option<ShareLink>,
    pub similar: Vec<Paper>,
    pub experiments: Vec<ExperimentResult>,
    pub suggestion: Option<Value>,
    pub optimization: Option<Value>,
    pub new_tag: String,
    pub new_comment: String,
    pub reply_to: Option<RecordId>,
    pub reply_text: String,
    pub share_days: String,
    pub submission: SubmissionData,
    pub experiment_params: String,
    pub loading: bool,
    /// Bumped whenever an action writes `analysis` or `share` directly, so
    /// a reload that started earlier does not overwrite the newer value.
    pub(crate) local_edits: u64,
}

impl DetailView {
    pub fn share_request(&self) -> Result<ShareRequest, ValidationError> {
        let expires_in_days = match non_empty(&self.share_days) {
            None => None,
            Some(days) => Some(days.parse::<u32>().map_err(|_| {
                ValidationError::new("expires_in_days", "Expiry must be a whole number of days")
            })?),
        };
        Ok(ShareRequest {
            permission: Some("read".to_string()),
            expires_in_days,
        })
    }

    /// Experiment parameters typed as a JSON object. Blank means none.
    pub fn experiment_request(&self) -> Result<ExperimentRequest, ValidationError> {
        let raw = self.experiment_params.trim();
        if raw.is_empty() {
            return Ok(ExperimentRequest::default());
        }
        let parameters: Map<String, Value> = serde_json::from_str(raw).map_err(|_| {
            ValidationError::new("parameters", "Parameters must be a JSON object")
        })?;
        Ok(ExperimentRequest { parameters })
    }

    /// Prefill the submission form from the loaded paper.
    pub fn prefill_submission(&mut self) {
        if let Some(paper) = &self.paper {
            if self.submission.conference.is_empty() {
                self.submission.conference = paper.conference.clone().unwrap_or_default();
            }
            if self.submission.abstract_text.is_empty() {
                self.submission.abstract_text = paper.abstract_text.clone().unwrap_or_default();
            }
            if self.submission.keywords.is_empty() {
                self.submission.keywords = paper.keywords.join(", ");
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ProfileView {
    pub user: Option<UserInfo>,
    pub stats: Option<UserStats>,
    pub interests: Vec<String>,
    pub interests_input: String,
    pub name_input: String,
    pub old_password: String,
    pub new_password: String,
    pub loading: bool,
}

impl ProfileView {
    pub fn parsed_interests(&self) -> Vec<String> {
        self.interests_input
            .split(',')
            .filter_map(non_empty)
            .collect()
    }
}

/// Which slice of the conference collection is listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConferenceFilter {
    #[default]
    All,
    Search(String),
    Topic(String),
    Track(String),
}

pub const CONFERENCE_TRACKS: [&str; 3] = ["oral", "spotlight", "poster"];

#[derive(Debug, Default)]
pub struct ConferenceView {
    pub items: Vec<ConferencePaper>,
    pub filter: ConferenceFilter,
    pub search: String,
    pub topic: String,
    pub selected: Option<ConferencePaper>,
    pub loading: bool,
    pub refreshing: bool,
}

impl ConferenceView {
    /// Tags seen in the current list, for the topic picker.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .items
            .iter()
            .flat_map(|paper| paper.tags.iter().cloned())
            .collect();
        topics.sort();
        topics.dedup();
        topics
    }
}

/// Drafting a paper idea into the conference collection.
#[derive(Debug, Default)]
pub struct DraftForm {
    pub topic: String,
    pub innovations: String,
    pub datasets: String,
    pub metrics: String,
    pub saving: bool,
    pub created: Option<ConferencePaper>,
}

impl DraftForm {
    pub fn to_draft(&self) -> Result<ConferenceDraft, ValidationError> {
        let topic = non_empty(&self.topic)
            .ok_or_else(|| ValidationError::new("topic", "Research topic is required"))?;
        let innovations = self
            .innovations
            .lines()
            .filter_map(non_empty)
            .collect::<Vec<_>>()
            .join("\n");
        if innovations.is_empty() {
            return Err(ValidationError::new("innovations", "Describe at least one innovation"));
        }
        let split = |raw: &str| raw.split(',').filter_map(non_empty).collect::<Vec<_>>();
        Ok(ConferenceDraft {
            topic,
            innovations,
            datasets: split(&self.datasets),
            metrics: split(&self.metrics),
        })
    }
}

pub const FILES_PAGE_SIZE: u32 = 20;

/// Server-side storage and one page of stored uploads.
#[derive(Debug)]
pub struct FilesView {
    pub storage: Option<StorageInfo>,
    pub listing: FileListing,
    pub page: u32,
    /// Path of the file being moved, with the destination typed so far.
    pub moving: Option<(String, String)>,
    pub cleanup_days: String,
    pub loading: bool,
}

impl Default for FilesView {
    fn default() -> Self {
        Self {
            storage: None,
            listing: FileListing::default(),
            page: 1,
            moving: None,
            cleanup_days: DEFAULT_CLEANUP_DAYS.to_string(),
            loading: false,
        }
    }
}

impl FilesView {
    pub fn cleanup_days(&self) -> Result<u32, ValidationError> {
        match self.cleanup_days.trim().parse::<u32>() {
            Ok(days) if days > 0 => Ok(days),
            _ => Err(ValidationError::new("days", "Days must be a whole number of at least 1")),
        }
    }
}
