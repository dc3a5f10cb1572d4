//! Session lifecycle: login, registration, logout.

use serde::Serialize;

use crate::client::http::{ApiClient, ApiPath};
use crate::client::session::Session;
use crate::client::validation::{validate_credentials, validate_registration};
use crate::shared::config::{AppConfig, LoginFormat};
use crate::shared::error::ApiError;
use crate::shared::models::{Credentials, LoginResponse, Registration, UserInfo};

/// Owns the authenticated-session lifecycle exposed to the rest of the app.
#[derive(Debug, Clone)]
pub struct SessionManager {
    client: ApiClient,
    login_path: ApiPath,
    login_format: LoginFormat,
}

/// OAuth2 password-grant fields; the email goes in `username`.
#[derive(Serialize)]
struct PasswordForm<'a> {
    username: &'a str,
    password: &'a str,
}

impl SessionManager {
    pub fn new(client: ApiClient, config: &AppConfig) -> Self {
        Self {
            client,
            login_path: ApiPath::from_segments(config.login_segments()),
            login_format: config.login_format,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Exchange credentials for a token and establish the session. On any
    /// failure the previous session is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        validate_credentials(credentials)?;
        let credentials = Credentials::new(credentials.email.trim(), credentials.password.as_str());

        let sent = match self.login_format {
            LoginFormat::Json => self.client.post_anonymous(&self.login_path, &credentials).await,
            LoginFormat::Form => {
                let form = PasswordForm {
                    username: &credentials.email,
                    password: &credentials.password,
                };
                self.client.post_form_anonymous(&self.login_path, &form).await
            }
        };
        let response: LoginResponse =
            sent.inspect_err(|e| tracing::info!(email = %credentials.email, error = %e, "login failed"))?;

        let token = response.token.trim().to_string();
        if token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_string()));
        }

        let session = self.client.session().establish(token, response.user)?;
        tracing::info!(email = %credentials.email, "logged in");
        Ok(session)
    }

    /// Create an account. Does not sign the user in; they log in next.
    pub async fn register(&self, registration: &Registration) -> Result<UserInfo, ApiError> {
        validate_registration(registration)?;
        let registration = Registration {
            username: registration.username.trim().to_string(),
            email: registration.email.trim().to_string(),
            password: registration.password.clone(),
            confirm_password: registration.confirm_password.clone(),
        };

        let user: Option<UserInfo> = self
            .client
            .post_anonymous(&ApiPath::from_segments(["auth", "register"]), &registration)
            .await
            .inspect_err(|e| tracing::info!(username = %registration.username, error = %e, "registration failed"))?;

        tracing::info!(username = %registration.username, "registered");
        Ok(user.unwrap_or_default())
    }

    /// Clear the session in memory and on disk. Never fails.
    pub fn logout(&self) {
        self.client.session().clear();
        tracing::info!("logged out");
    }

    /// Profile of the signed-in user.
    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.client.get(&ApiPath::from_segments(["auth", "me"])).await
    }
}
