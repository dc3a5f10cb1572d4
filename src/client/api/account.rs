use serde_json::Value;

use crate::client::http::{ApiClient, ApiPath};
use crate::shared::error::ApiError;
use crate::shared::models::{PasswordChange, ProfileUpdate, UserInfo};

/// Account settings under `/auth`.
pub struct AccountApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AccountApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Result<UserInfo, ApiError> {
        self.client
            .get(&ApiPath::from_segments(["auth", "profile"]))
            .await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserInfo, ApiError> {
        self.client
            .put(&ApiPath::from_segments(["auth", "profile"]), update)
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let _: Option<Value> = self
            .client
            .put(&ApiPath::from_segments(["auth", "password"]), change)
            .await?;
        Ok(())
    }
}
