//! User-triggered backend calls and how their results land in the views.

use std::future::Future;
use std::path::PathBuf;

use serde_json::Value;

use super::{AppState, ConferenceFilter, NoticeKind};
use crate::client::api::UploadOutcome;
use crate::client::validation::validate_upload_path;
use crate::client::Route;
use crate::egui_app::tasks::{drain_ready, Pending};
use crate::shared::error::{ApiError, ValidationError};
use crate::shared::models::{
    AnalysisResult, ConferenceDraftCreated, ConferencePaper, ExperimentResult, Paper,
    PaperAnalysis, PasswordChange, ProfileUpdate, RecordId, ShareLink,
};

/// What a finished action hands back to the UI.
#[derive(Debug)]
pub enum ActionDone {
    /// Confirm and reload the current view.
    Reload(String),
    /// Confirm and move elsewhere.
    Navigate(Route, String),
    Uploaded(Vec<UploadOutcome>),
    Analysis(PaperAnalysis),
    QuickAnalysis(Vec<AnalysisResult>),
    Experiments(Vec<ExperimentResult>),
    Suggestion(Value),
    Similar(Vec<Paper>),
    Share(ShareLink),
    Unshared,
    Interests(Vec<String>),
    Optimized(Value),
    ConferencePaper(ConferencePaper),
    Drafted(ConferenceDraftCreated),
    ConferenceRefreshed(String),
}

impl AppState {
    fn run<F>(&mut self, future: F)
    where
        F: Future<Output = Result<ActionDone, ApiError>> + Send + 'static,
    {
        let task = Pending::spawn(self.runtime.handle(), self.generation, future);
        self.actions.push(task);
    }

    fn reject(&mut self, err: ValidationError) {
        self.show_notice(NoticeKind::Error, err.message);
    }

    pub(super) fn poll_actions(&mut self) {
        for result in drain_ready(&mut self.actions, self.generation) {
            match result {
                Ok(done) => self.apply(done),
                Err(err) => {
                    self.upload.uploading = false;
                    self.paper_form.saving = false;
                    self.draft.saving = false;
                    self.conference.refreshing = false;
                    self.report("Request failed", &err);
                }
            }
        }
    }

    fn apply(&mut self, done: ActionDone) {
        match done {
            ActionDone::Reload(message) => {
                self.show_notice(NoticeKind::Success, message);
                self.refresh();
            }
            ActionDone::Navigate(route, message) => {
                self.show_notice(NoticeKind::Success, message);
                self.navigate(route);
            }
            ActionDone::Uploaded(outcomes) => {
                self.upload.uploading = false;
                self.upload.results = outcomes;
                let total = self.upload.results.len();
                let succeeded = self.upload.succeeded();
                let (kind, message) = match (succeeded, total) {
                    (0, _) => (NoticeKind::Error, "No papers were uploaded".to_string()),
                    (1, 1) => {
                        let message = self.upload.results[0]
                            .result
                            .as_ref()
                            .ok()
                            .and_then(|receipt| receipt.message.clone());
                        (NoticeKind::Success, message.unwrap_or_else(|| "Paper uploaded".to_string()))
                    }
                    (s, t) if s == t => (NoticeKind::Success, format!("Uploaded {t} papers")),
                    (s, t) => (NoticeKind::Info, format!("Uploaded {s} of {t} papers")),
                };
                self.show_notice(kind, message);
            }
            ActionDone::Analysis(analysis) => {
                self.detail.local_edits += 1;
                self.detail.analysis = Some(analysis);
                self.show_notice(NoticeKind::Success, "Analysis updated");
            }
            ActionDone::QuickAnalysis(results) => self.detail.quick_results = results,
            ActionDone::Experiments(results) => {
                self.show_notice(
                    NoticeKind::Success,
                    format!("{} experiment result(s)", results.len()),
                );
                self.detail.experiments = results;
            }
            ActionDone::Suggestion(value) => self.detail.suggestion = Some(value),
            ActionDone::Similar(papers) => {
                if papers.is_empty() {
                    self.show_notice(NoticeKind::Info, "No similar papers found");
                }
                self.detail.similar = papers;
            }
            ActionDone::Share(link) => {
                self.detail.local_edits += 1;
                self.detail.share = Some(link);
                self.show_notice(NoticeKind::Success, "Share link created");
            }
            ActionDone::Unshared => {
                self.detail.local_edits += 1;
                self.detail.share = None;
                self.show_notice(NoticeKind::Success, "Sharing disabled");
            }
            ActionDone::Interests(interests) => {
                self.profile.interests_input = interests.join(", ");
                self.profile.interests = interests;
                self.show_notice(NoticeKind::Success, "Interests saved");
            }
            ActionDone::Optimized(value) => self.detail.optimization = Some(value),
            ActionDone::ConferencePaper(paper) => self.conference.selected = Some(paper),
            ActionDone::Drafted(created) => {
                self.draft = Default::default();
                let message = created
                    .message
                    .unwrap_or_else(|| format!("Drafted \"{}\"", created.paper.title));
                self.show_notice(NoticeKind::Success, message);
                self.draft.created = Some(created.paper);
            }
            ActionDone::ConferenceRefreshed(message) => {
                self.conference.refreshing = false;
                self.show_notice(NoticeKind::Success, message);
                self.refresh();
            }
        }
    }

    // Papers

    pub fn search_papers(&mut self) {
        let query = self.papers.search.trim().to_string();
        self.papers.searched = (!query.is_empty()).then_some(query);
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.papers.search.clear();
        self.papers.searched = None;
        self.refresh();
    }

    pub fn toggle_favorite(&mut self, id: RecordId, is_favorite: bool) {
        let client = self.client.clone();
        self.run(async move {
            if is_favorite {
                client.library().unfavorite(&id).await?;
                Ok(ActionDone::Reload("Removed from favorites".to_string()))
            } else {
                client.library().favorite(&id).await?;
                Ok(ActionDone::Reload("Added to favorites".to_string()))
            }
        });
    }

    pub fn delete_paper(&mut self, id: RecordId) {
        let client = self.client.clone();
        let leaving_detail = matches!(
            &self.route,
            Route::PaperDetail(current) | Route::PaperAnalysis(current) | Route::EditPaper(current)
                if *current == id
        );
        self.run(async move {
            client.papers().delete(&id).await?;
            if leaving_detail {
                Ok(ActionDone::Navigate(Route::Papers, "Paper deleted".to_string()))
            } else {
                Ok(ActionDone::Reload("Paper deleted".to_string()))
            }
        });
    }

    /// Stage a file for upload after checking its extension and size. The
    /// file is not read here. Returns whether it was accepted.
    pub fn queue_upload(&mut self, path: PathBuf) -> bool {
        if let Err(err) = validate_upload_path(&path) {
            self.reject(err);
            return false;
        }
        if !self.upload.queue.contains(&path) {
            self.upload.queue.push(path);
        }
        true
    }

    /// Stage the path typed into the upload form.
    pub fn queue_typed_path(&mut self) -> bool {
        let raw = self.upload.path.trim().to_string();
        if raw.is_empty() {
            self.reject(ValidationError::new("file", "Choose a PDF file to upload"));
            return false;
        }
        let accepted = self.queue_upload(PathBuf::from(raw));
        if accepted {
            self.upload.path.clear();
        }
        accepted
    }

    pub fn unqueue_upload(&mut self, index: usize) {
        if index < self.upload.queue.len() {
            self.upload.queue.remove(index);
        }
    }

    /// Upload every staged file, plus a typed path not yet staged. Files are
    /// read and sent one after another on the runtime.
    pub fn upload_queued(&mut self) {
        if !self.upload.path.trim().is_empty() && !self.queue_typed_path() {
            return;
        }
        if self.upload.queue.is_empty() {
            return self.reject(ValidationError::new("file", "Choose a PDF file to upload"));
        }

        let paths = std::mem::take(&mut self.upload.queue);
        self.upload.uploading = true;
        self.upload.results.clear();
        let client = self.client.clone();
        self.run(async move {
            let outcomes = client.papers().upload_files(&paths).await;
            Ok(ActionDone::Uploaded(outcomes))
        });
    }

    pub fn create_paper(&mut self) {
        let paper = match self.paper_form.to_new_paper() {
            Ok(paper) => paper,
            Err(err) => return self.reject(err),
        };
        self.paper_form.saving = true;
        let client = self.client.clone();
        self.run(async move {
            let created = client.papers().create(&paper).await?;
            Ok(ActionDone::Navigate(
                Route::PaperDetail(created.id),
                "Paper created".to_string(),
            ))
        });
    }

    pub fn save_paper(&mut self, id: RecordId) {
        let update = match self.paper_form.to_update() {
            Ok(update) => update,
            Err(err) => return self.reject(err),
        };
        self.paper_form.saving = true;
        let client = self.client.clone();
        self.run(async move {
            client.papers().update(&id, &update).await?;
            Ok(ActionDone::Navigate(Route::PaperDetail(id), "Paper saved".to_string()))
        });
    }

    // Tags and comments

    pub fn add_tag(&mut self, id: RecordId) {
        let tag = self.detail.new_tag.trim().to_string();
        if tag.is_empty() {
            return;
        }
        self.detail.new_tag.clear();
        let client = self.client.clone();
        self.run(async move {
            client.library().add_tag(&id, &tag).await?;
            Ok(ActionDone::Reload(format!("Tagged \"{tag}\"")))
        });
    }

    pub fn remove_tag(&mut self, id: RecordId, tag: String) {
        let client = self.client.clone();
        self.run(async move {
            client.library().remove_tag(&id, &tag).await?;
            Ok(ActionDone::Reload(format!("Removed tag \"{tag}\"")))
        });
    }

    pub fn add_comment(&mut self, id: RecordId) {
        let content = self.detail.new_comment.trim().to_string();
        if content.is_empty() {
            return self.reject(ValidationError::new("content", "Comment cannot be empty"));
        }
        self.detail.new_comment.clear();
        let client = self.client.clone();
        self.run(async move {
            client.comments().add(&id, &content).await?;
            Ok(ActionDone::Reload("Comment posted".to_string()))
        });
    }

    pub fn reply_comment(&mut self, paper: RecordId) {
        let Some(comment) = self.detail.reply_to.take() else {
            return;
        };
        let content = self.detail.reply_text.trim().to_string();
        self.detail.reply_text.clear();
        if content.is_empty() {
            return self.reject(ValidationError::new("content", "Reply cannot be empty"));
        }
        let client = self.client.clone();
        self.run(async move {
            client.comments().reply(&paper, &comment, &content).await?;
            Ok(ActionDone::Reload("Reply posted".to_string()))
        });
    }

    pub fn delete_comment(&mut self, paper: RecordId, comment: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            client.comments().delete(&paper, &comment).await?;
            Ok(ActionDone::Reload("Comment deleted".to_string()))
        });
    }

    // Analysis, submission, experiments

    pub fn create_analysis(&mut self, id: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            let analysis = client.analysis().create(&id).await?;
            Ok(ActionDone::Analysis(analysis))
        });
    }

    pub fn quick_analyze(&mut self, id: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            let results = client.analysis().analyze(&id).await?;
            Ok(ActionDone::QuickAnalysis(results))
        });
    }

    pub fn run_experiments(&mut self, id: RecordId) {
        let request = match self.detail.experiment_request() {
            Ok(request) => request,
            Err(err) => return self.reject(err),
        };
        let client = self.client.clone();
        self.run(async move {
            let results = client.analysis().run_experiments(&id, &request).await?;
            Ok(ActionDone::Experiments(results))
        });
    }

    pub fn submit_paper(&mut self, id: RecordId) {
        let submission = self.detail.submission.clone();
        if submission.conference.trim().is_empty() {
            return self.reject(ValidationError::new("conference", "Conference is required"));
        }
        let client = self.client.clone();
        self.run(async move {
            client.analysis().submit(&id, &submission).await?;
            Ok(ActionDone::Reload(format!(
                "Submitted to {}",
                submission.conference.trim()
            )))
        });
    }

    pub fn suggest_conference(&mut self, id: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            let suggestion = client.analysis().suggest_conference(&id).await?;
            Ok(ActionDone::Suggestion(suggestion))
        });
    }

    pub fn load_similar(&mut self, id: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            let papers = client.analysis().similar(&id).await?;
            Ok(ActionDone::Similar(papers))
        });
    }

    pub fn optimize_paper(&mut self, id: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            let suggestions = client.analysis().optimize(&id).await?;
            Ok(ActionDone::Optimized(suggestions))
        });
    }

    // Sharing

    pub fn share_paper(&mut self, id: RecordId) {
        let request = match self.detail.share_request() {
            Ok(request) => request,
            Err(err) => return self.reject(err),
        };
        let client = self.client.clone();
        self.run(async move {
            let link = client.sharing().share(&id, &request).await?;
            Ok(ActionDone::Share(link))
        });
    }

    pub fn unshare_paper(&mut self, id: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            client.sharing().unshare(&id).await?;
            Ok(ActionDone::Unshared)
        });
    }

    // Profile

    pub fn save_profile_name(&mut self) {
        let name = self.profile.name_input.trim().to_string();
        let update = ProfileUpdate {
            name: (!name.is_empty()).then_some(name),
            ..ProfileUpdate::default()
        };
        let client = self.client.clone();
        self.run(async move {
            client.account().update_profile(&update).await?;
            Ok(ActionDone::Reload("Profile updated".to_string()))
        });
    }

    pub fn save_interests(&mut self) {
        let interests = self.profile.parsed_interests();
        let client = self.client.clone();
        self.run(async move {
            let saved = client.users().update_interests(interests).await?;
            Ok(ActionDone::Interests(saved))
        });
    }

    pub fn change_password(&mut self) {
        let change = PasswordChange {
            old_password: std::mem::take(&mut self.profile.old_password),
            new_password: std::mem::take(&mut self.profile.new_password),
        };
        if change.old_password.is_empty() || change.new_password.is_empty() {
            return self.reject(ValidationError::new("password", "Both passwords are required"));
        }
        let client = self.client.clone();
        self.run(async move {
            client.account().change_password(&change).await?;
            Ok(ActionDone::Reload("Password changed".to_string()))
        });
    }

    // Conference collection

    /// List a slice of the collection. Blank search or topic lists everything.
    pub fn filter_conference(&mut self, filter: ConferenceFilter) {
        let filter = match filter {
            ConferenceFilter::Search(q) | ConferenceFilter::Topic(q) if q.trim().is_empty() => {
                ConferenceFilter::All
            }
            ConferenceFilter::Search(q) => ConferenceFilter::Search(q.trim().to_string()),
            other => other,
        };
        self.conference.filter = filter;
        self.conference.selected = None;
        self.refresh();
    }

    pub fn open_conference_paper(&mut self, id: RecordId) {
        let client = self.client.clone();
        self.run(async move {
            let paper = client.conference().paper(&id).await?;
            Ok(ActionDone::ConferencePaper(paper))
        });
    }

    /// Have the backend crawl the collection again.
    pub fn refresh_conference(&mut self) {
        self.conference.refreshing = true;
        let client = self.client.clone();
        self.run(async move {
            let message = client.conference().refresh().await?;
            Ok(ActionDone::ConferenceRefreshed(message))
        });
    }

    pub fn submit_draft(&mut self) {
        let draft = match self.draft.to_draft() {
            Ok(draft) => draft,
            Err(err) => return self.reject(err),
        };
        self.draft.saving = true;
        let client = self.client.clone();
        self.run(async move {
            let created = client.conference().draft(&draft).await?;
            Ok(ActionDone::Drafted(created))
        });
    }

    // Stored files

    pub fn files_page(&mut self, page: u32) {
        self.files.page = page.clamp(1, self.files.listing.page_count());
        self.refresh();
    }

    pub fn delete_file(&mut self, path: String) {
        let client = self.client.clone();
        self.run(async move {
            let message = client.files().delete(&path).await?;
            Ok(ActionDone::Reload(message))
        });
    }

    /// Move the file picked with `files.moving` to the typed destination.
    pub fn move_file(&mut self) {
        let Some((source, target)) = self.files.moving.take() else {
            return;
        };
        if target.trim().is_empty() {
            self.files.moving = Some((source, target));
            return self.reject(ValidationError::new("target_path", "Target path is required"));
        }
        let client = self.client.clone();
        self.run(async move {
            let message = client.files().move_file(&source, &target).await?;
            Ok(ActionDone::Reload(message))
        });
    }

    pub fn cleanup_files(&mut self) {
        let days = match self.files.cleanup_days() {
            Ok(days) => days,
            Err(err) => return self.reject(err),
        };
        let client = self.client.clone();
        self.run(async move {
            let report = client.files().cleanup(days).await?;
            let message = report
                .message
                .unwrap_or_else(|| format!("Removed {} file(s)", report.cleaned_count));
            Ok(ActionDone::Reload(message))
        });
    }
}
