use serde::{Deserialize, Serialize};

use crate::client::http::{ApiClient, ApiPath};
use crate::shared::error::ApiError;
use crate::shared::models::{Comment, Paper, ProfileUpdate, Tag, UserInfo, UserStats};

/// Endpoints about the signed-in user under `/users`.
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct AvatarBody<'s> {
    avatar: &'s str,
}

#[derive(Serialize, Deserialize)]
struct Interests {
    #[serde(default)]
    interests: Vec<String>,
}

fn users(segment: &str) -> ApiPath {
    ApiPath::new("users").join(segment)
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<UserStats, ApiError> {
        self.client.get(&users("stats")).await
    }

    pub async fn favorites(&self) -> Result<Vec<Paper>, ApiError> {
        self.client.get(&users("favorites")).await
    }

    pub async fn comments(&self) -> Result<Vec<Comment>, ApiError> {
        self.client.get(&users("comments")).await
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.client.get(&users("tags")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserInfo, ApiError> {
        self.client.put(&users("profile"), update).await
    }

    pub async fn update_avatar(&self, avatar_url: &str) -> Result<UserInfo, ApiError> {
        self.client
            .put(&users("avatar"), &AvatarBody { avatar: avatar_url })
            .await
    }

    pub async fn interests(&self) -> Result<Vec<String>, ApiError> {
        let body: Interests = self.client.get(&users("interests")).await?;
        Ok(body.interests)
    }

    pub async fn update_interests(&self, interests: Vec<String>) -> Result<Vec<String>, ApiError> {
        let body: Option<Interests> = self
            .client
            .put(&users("interests"), &Interests { interests })
            .await?;
        Ok(body.map(|b| b.interests).unwrap_or_default())
    }
}
