use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::client::api::DashboardData;
use crate::client::{
    ApiClient, FileTokenStore, GuardDecision, RedirectQueue, Route, RouteGuard, Session,
    SessionManager, SessionStore,
};
use crate::client::validation::{validate_credentials, validate_registration};
use crate::egui_app::tasks::{take_ready, Pending};
use crate::shared::config::{AppConfig, ConfigError};
use crate::shared::error::ApiError;
use crate::shared::models::{
    Comment, ConferencePaper, FileListing, Paper, PaperAnalysis, RecordId, ShareLink, StorageInfo,
    UserInfo, UserStats,
};

mod actions;
pub mod forms;

pub use actions::ActionDone;
pub use forms::{
    AuthForm, ConferenceFilter, ConferenceView, DashboardView, DetailView, DraftForm, FilesView,
    Notice, NoticeKind, PaperForm, PapersView, ProfileView, UploadView, CONFERENCE_TRACKS,
    FILES_PAGE_SIZE,
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Results of loading a paper's detail page; each part fails on its own.
struct DetailData {
    /// `DetailView::local_edits` when the load started.
    local_edits: u64,
    paper: Result<Paper, ApiError>,
    comments: Result<Vec<Comment>, ApiError>,
    analysis: Result<PaperAnalysis, ApiError>,
    share: Result<ShareLink, ApiError>,
}

struct FilesData {
    storage: Result<StorageInfo, ApiError>,
    listing: Result<FileListing, ApiError>,
}

struct ProfileData {
    user: Result<UserInfo, ApiError>,
    stats: Result<UserStats, ApiError>,
    interests: Result<Vec<String>, ApiError>,
}

/// Central application state shared across egui views.
pub struct AppState {
    runtime: Runtime,
    pub config: AppConfig,
    pub client: ApiClient,
    pub auth: SessionManager,
    redirects: Arc<RedirectQueue>,
    guard: RouteGuard,

    pub route: Route,
    /// Bumped on navigation only; results for older generations are dropped.
    /// Reloading a view replaces its slot instead.
    generation: u64,
    pub notice: Option<Notice>,
    pub current_user: Option<UserInfo>,

    pub auth_form: AuthForm,
    pub dashboard: DashboardView,
    pub papers: PapersView,
    pub upload: UploadView,
    pub paper_form: PaperForm,
    pub detail: DetailView,
    pub profile: ProfileView,
    pub conference: ConferenceView,
    pub draft: DraftForm,
    pub files: FilesView,

    login_task: Option<Pending<Result<Session, ApiError>>>,
    register_task: Option<Pending<Result<UserInfo, ApiError>>>,
    user_task: Option<Pending<Result<UserInfo, ApiError>>>,
    dashboard_task: Option<Pending<DashboardData>>,
    papers_task: Option<Pending<Result<Vec<Paper>, ApiError>>>,
    edit_task: Option<Pending<Result<Paper, ApiError>>>,
    detail_task: Option<Pending<DetailData>>,
    profile_task: Option<Pending<ProfileData>>,
    conference_task: Option<Pending<Result<Vec<ConferencePaper>, ApiError>>>,
    files_task: Option<Pending<FilesData>>,
    actions: Vec<Pending<Result<ActionDone, ApiError>>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, StartupError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("paper-killer-io")
            .enable_all()
            .build()?;

        let session = SessionStore::restore(Arc::new(FileTokenStore::new(&config.token_path)));
        let redirects = Arc::new(RedirectQueue::new());
        let client = ApiClient::new(&config, session.clone(), redirects.clone())?;
        let auth = SessionManager::new(client.clone(), &config);
        let guard = RouteGuard::new(session.clone());

        tracing::info!(server = %config.server_url, authenticated = session.is_authenticated(), "app state initialized");

        let mut state = Self {
            runtime,
            config,
            client,
            auth,
            redirects,
            guard,
            route: Route::Home,
            generation: 0,
            notice: None,
            current_user: session.user(),
            auth_form: AuthForm::default(),
            dashboard: DashboardView::default(),
            papers: PapersView::default(),
            upload: UploadView::default(),
            paper_form: PaperForm::default(),
            detail: DetailView::default(),
            profile: ProfileView::default(),
            conference: ConferenceView::default(),
            draft: DraftForm::default(),
            files: FilesView::default(),
            login_task: None,
            register_task: None,
            user_task: None,
            dashboard_task: None,
            papers_task: None,
            edit_task: None,
            detail_task: None,
            profile_task: None,
            conference_task: None,
            files_task: None,
            actions: Vec::new(),
        };

        let start = if state.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Home
        };
        state.navigate(start);
        Ok(state)
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// Whether any background work is outstanding.
    pub fn is_busy(&self) -> bool {
        self.login_task.is_some()
            || self.register_task.is_some()
            || self.user_task.is_some()
            || self.dashboard_task.is_some()
            || self.papers_task.is_some()
            || self.edit_task.is_some()
            || self.detail_task.is_some()
            || self.profile_task.is_some()
            || self.conference_task.is_some()
            || self.files_task.is_some()
            || !self.actions.is_empty()
            || self.notice.is_some()
    }

    pub fn show_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice::new(kind, text));
    }

    /// Surface a failed call. A 401 was already handled by the client.
    pub(crate) fn report(&mut self, what: &str, err: &ApiError) {
        if err.is_unauthorized() {
            return;
        }
        tracing::debug!(error = %err, "{what} failed");
        self.show_notice(NoticeKind::Error, format!("{what}: {}", err.user_message()));
    }

    /// Switch views. Protected routes fall back to login without a session.
    pub fn navigate(&mut self, requested: Route) {
        let route = match self.guard.resolve(requested) {
            GuardDecision::Render(route) => route,
            GuardDecision::Redirect(route) => route,
        };
        self.generation += 1;
        tracing::debug!(route = %route, generation = self.generation, "navigate");
        self.route = route;
        self.enter_route();
    }

    /// Reload the data behind the current view. Actions still in flight on
    /// this view keep their results.
    pub fn refresh(&mut self) {
        tracing::debug!(route = %self.route, generation = self.generation, "refresh");
        self.enter_route();
    }

    fn enter_route(&mut self) {
        self.auth_form.loading = false;
        let handle = self.runtime.handle().clone();
        let generation = self.generation;

        if self.is_authenticated() && self.current_user.is_none() {
            let auth = self.auth.clone();
            self.user_task = Some(Pending::spawn(&handle, generation, async move {
                auth.current_user().await
            }));
        }

        match self.route.clone() {
            Route::Home | Route::Login | Route::Register => {}
            Route::Dashboard => {
                self.dashboard.loading = true;
                let client = self.client.clone();
                self.dashboard_task = Some(Pending::spawn(&handle, generation, async move {
                    client.papers().dashboard().await
                }));
            }
            Route::Papers => {
                self.papers.loading = true;
                let client = self.client.clone();
                let query = self.papers.searched.clone();
                self.papers_task = Some(Pending::spawn(&handle, generation, async move {
                    match query {
                        Some(q) => client.papers().search(&q).await,
                        None => client.papers().list().await,
                    }
                }));
            }
            Route::NewPaper => {
                self.paper_form = PaperForm::default();
            }
            Route::Upload => {
                self.upload.uploading = false;
            }
            Route::EditPaper(id) => {
                self.paper_form = PaperForm {
                    saving: true,
                    ..PaperForm::default()
                };
                let client = self.client.clone();
                self.edit_task = Some(Pending::spawn(&handle, generation, async move {
                    client.papers().get(&id).await
                }));
            }
            Route::PaperDetail(id) | Route::PaperAnalysis(id) => {
                if self.detail.paper.as_ref().map(|p| &p.id) != Some(&id) {
                    self.detail = DetailView::default();
                }
                self.detail.loading = true;
                let local_edits = self.detail.local_edits;
                let client = self.client.clone();
                self.detail_task = Some(Pending::spawn(&handle, generation, async move {
                    let papers = client.papers();
                    let comments = client.comments();
                    let analysis = client.analysis();
                    let sharing = client.sharing();
                    let (paper, comments, analysis, share) = tokio::join!(
                        papers.get(&id),
                        comments.list(&id),
                        analysis.get(&id),
                        sharing.link(&id),
                    );
                    DetailData {
                        local_edits,
                        paper,
                        comments,
                        analysis,
                        share,
                    }
                }));
            }
            Route::Files => {
                self.files.loading = true;
                let client = self.client.clone();
                let page = self.files.page;
                self.files_task = Some(Pending::spawn(&handle, generation, async move {
                    let files = client.files();
                    let (storage, listing) =
                        tokio::join!(files.storage(), files.list(page, FILES_PAGE_SIZE));
                    FilesData { storage, listing }
                }));
            }
            Route::Conference => {
                self.conference.loading = true;
                let client = self.client.clone();
                let filter = self.conference.filter.clone();
                self.conference_task = Some(Pending::spawn(&handle, generation, async move {
                    let conference = client.conference();
                    match filter {
                        ConferenceFilter::All => conference.papers().await,
                        ConferenceFilter::Search(q) => conference.search(&q).await,
                        ConferenceFilter::Topic(topic) => conference.by_topic(&topic).await,
                        ConferenceFilter::Track(track) => conference.by_track(&track).await,
                    }
                }));
            }
            Route::WritePaper => {
                self.draft.saving = false;
            }
            Route::Profile => {
                self.profile.loading = true;
                let client = self.client.clone();
                self.profile_task = Some(Pending::spawn(&handle, generation, async move {
                    let account = client.account();
                    let users = client.users();
                    let (user, stats, interests) =
                        tokio::join!(account.profile(), users.stats(), users.interests());
                    ProfileData {
                        user,
                        stats,
                        interests,
                    }
                }));
            }
        }
    }

    /// Per-frame bookkeeping: forced redirects, the guard, finished tasks.
    pub fn tick(&mut self) {
        if let Some(route) = self.redirects.take() {
            self.current_user = None;
            self.show_notice(NoticeKind::Error, "Your session has expired, please log in again");
            self.navigate(route);
        }

        if let GuardDecision::Redirect(route) = self.guard.resolve(self.route.clone()) {
            self.navigate(route);
        }

        self.poll_auth();
        self.poll_views();
        self.poll_actions();

        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    fn poll_auth(&mut self) {
        let generation = self.generation;

        if let Some(result) = take_ready(&mut self.login_task, generation) {
            self.auth_form.loading = false;
            match result {
                Ok(session) => {
                    self.current_user = session.user;
                    self.auth_form.clear_secrets();
                    self.auth_form.clear_error();
                    self.notice = None;
                    self.navigate(Route::Dashboard);
                }
                Err(err) => self.auth_form.set_error(err.user_message()),
            }
        }

        if let Some(result) = take_ready(&mut self.register_task, generation) {
            self.auth_form.loading = false;
            match result {
                Ok(user) => {
                    if let Some(email) = user.email.filter(|e| !e.is_empty()) {
                        self.auth_form.email = email;
                    }
                    self.auth_form.clear_secrets();
                    self.auth_form.clear_error();
                    self.show_notice(NoticeKind::Success, "Account created, please log in");
                    self.navigate(Route::Login);
                }
                Err(err) => self.auth_form.set_error(err.user_message()),
            }
        }

        if let Some(result) = take_ready(&mut self.user_task, generation) {
            match result {
                Ok(user) => self.current_user = Some(user),
                Err(err) => tracing::debug!(error = %err, "could not load current user"),
            }
        }
    }

    fn poll_views(&mut self) {
        let generation = self.generation;

        if let Some(data) = take_ready(&mut self.dashboard_task, generation) {
            self.dashboard.loading = false;
            match data.stats {
                Ok(stats) => self.dashboard.stats = Some(stats),
                Err(err) => self.report("Loading statistics", &err),
            }
            match data.recent {
                Ok(recent) => self.dashboard.recent = recent,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load recent papers");
                    self.dashboard.recent.clear();
                }
            }
        }

        if let Some(result) = take_ready(&mut self.papers_task, generation) {
            self.papers.loading = false;
            match result {
                Ok(items) => self.papers.items = items,
                Err(err) => self.report("Loading papers", &err),
            }
        }

        if let Some(result) = take_ready(&mut self.edit_task, generation) {
            match result {
                Ok(paper) => self.paper_form = PaperForm::from_paper(&paper),
                Err(err) => {
                    self.paper_form.saving = false;
                    self.report("Loading paper", &err);
                }
            }
        }

        if let Some(data) = take_ready(&mut self.detail_task, generation) {
            self.detail.loading = false;
            match data.paper {
                Ok(paper) => {
                    self.detail.paper = Some(paper);
                    self.detail.prefill_submission();
                }
                Err(err) => self.report("Loading paper", &err),
            }
            match data.comments {
                Ok(comments) => self.detail.comments = comments,
                Err(err) => tracing::warn!(error = %err, "failed to load comments"),
            }
            // No analysis or share link yet is a normal 404.
            if data.local_edits == self.detail.local_edits {
                self.detail.analysis = data.analysis.ok();
                self.detail.share = data.share.ok();
            } else {
                tracing::debug!("keeping analysis and share written since the reload started");
            }
        }

        if let Some(result) = take_ready(&mut self.conference_task, generation) {
            self.conference.loading = false;
            match result {
                Ok(items) => self.conference.items = items,
                Err(err) => self.report("Loading conference papers", &err),
            }
        }

        if let Some(data) = take_ready(&mut self.files_task, generation) {
            self.files.loading = false;
            match data.storage {
                Ok(storage) => self.files.storage = Some(storage),
                Err(err) => tracing::warn!(error = %err, "failed to load storage usage"),
            }
            match data.listing {
                Ok(listing) => {
                    self.files.page = listing.page.max(1);
                    self.files.listing = listing;
                }
                Err(err) => self.report("Loading files", &err),
            }
        }

        if let Some(data) = take_ready(&mut self.profile_task, generation) {
            self.profile.loading = false;
            match data.user {
                Ok(user) => {
                    self.profile.name_input = user.name.clone().unwrap_or_default();
                    self.current_user = Some(user.clone());
                    self.profile.user = Some(user);
                }
                Err(err) => self.report("Loading profile", &err),
            }
            match data.stats {
                Ok(stats) => self.profile.stats = Some(stats),
                Err(err) => tracing::warn!(error = %err, "failed to load user statistics"),
            }
            match data.interests {
                Ok(interests) => {
                    self.profile.interests_input = interests.join(", ");
                    self.profile.interests = interests;
                }
                Err(err) => tracing::debug!(error = %err, "no interests available"),
            }
        }
    }

    pub fn handle_login(&mut self) {
        self.auth_form.clear_error();
        let credentials = self.auth_form.credentials();
        if let Err(err) = validate_credentials(&credentials) {
            self.auth_form.set_error(err.message);
            return;
        }

        self.auth_form.loading = true;
        let auth = self.auth.clone();
        self.login_task = Some(Pending::spawn(self.runtime.handle(), self.generation, async move {
            auth.login(&credentials).await
        }));
    }

    pub fn handle_register(&mut self) {
        self.auth_form.clear_error();
        let registration = self.auth_form.registration();
        if let Err(err) = validate_registration(&registration) {
            self.auth_form.set_error(err.message);
            return;
        }

        self.auth_form.loading = true;
        let auth = self.auth.clone();
        self.register_task = Some(Pending::spawn(self.runtime.handle(), self.generation, async move {
            auth.register(&registration).await
        }));
    }

    pub fn logout(&mut self) {
        self.auth.logout();
        self.current_user = None;
        self.auth_form = AuthForm::default();
        self.dashboard = DashboardView::default();
        self.papers = PapersView::default();
        self.detail = DetailView::default();
        self.profile = ProfileView::default();
        self.files = FilesView::default();
        self.upload = UploadView::default();
        self.navigate(Route::Login);
    }

    pub fn toggle_auth_mode(&mut self) {
        self.auth_form.clear_error();
        self.auth_form.clear_secrets();
        let next = if self.route == Route::Register {
            Route::Login
        } else {
            Route::Register
        };
        self.navigate(next);
    }

    pub fn open_paper(&mut self, id: RecordId) {
        self.navigate(Route::PaperDetail(id));
    }
}
