//! Resource-access functions.
//!
//! One async method per backend operation, grouped by resource. Each builds
//! its path, delegates to [`ApiClient`] and returns the payload or the
//! wrapper's error unchanged.
//!
//! ```rust,no_run
//! # async fn example(client: paper_killer::client::ApiClient) -> Result<(), paper_killer::shared::error::ApiError> {
//! let papers = client.papers().list().await?;
//! if let Some(first) = papers.first() {
//!     client.library().favorite(&first.id).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod analysis;
pub mod comments;
pub mod conference;
pub mod files;
pub mod library;
pub mod papers;
pub mod sharing;
pub mod users;

pub use account::AccountApi;
pub use analysis::AnalysisApi;
pub use comments::CommentsApi;
pub use conference::ConferenceApi;
pub use files::FilesApi;
pub use library::LibraryApi;
pub use papers::{DashboardData, PapersApi, UploadOutcome};
pub use sharing::SharingApi;
pub use users::UsersApi;

use crate::client::http::{ApiClient, ApiPath};
use crate::shared::models::RecordId;

impl ApiClient {
    pub fn papers(&self) -> PapersApi<'_> {
        PapersApi::new(self)
    }

    pub fn analysis(&self) -> AnalysisApi<'_> {
        AnalysisApi::new(self)
    }

    /// Favorites and tags.
    pub fn library(&self) -> LibraryApi<'_> {
        LibraryApi::new(self)
    }

    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi::new(self)
    }

    pub fn sharing(&self) -> SharingApi<'_> {
        SharingApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    /// The ICLR 2025 collection.
    pub fn conference(&self) -> ConferenceApi<'_> {
        ConferenceApi::new(self)
    }

    /// Server-side upload storage.
    pub fn files(&self) -> FilesApi<'_> {
        FilesApi::new(self)
    }
}

/// `/papers/:id`
pub(crate) fn paper_path(id: &RecordId) -> ApiPath {
    ApiPath::new("papers").join(id)
}
