//! HTTP request wrapper.
//!
//! Every backend call goes through [`ApiClient`]. Outbound, it attaches the
//! current session token as a bearer header. Inbound, it hands back only the
//! decoded payload, and when the backend rejects the session (401) it
//! clears the session and tells the [`Navigator`] to send the user to login
//! before returning the error.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::navigation::Navigator;
use crate::client::session::SessionStore;
use crate::shared::config::AppConfig;
use crate::shared::error::ApiError;

/// A backend path relative to the base URL, built segment by segment so
/// identifiers and tag names are percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    pub fn new(first: impl fmt::Display) -> Self {
        Self {
            segments: vec![first.to_string()],
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        Self {
            segments: segments.into_iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn join(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Whether a request carries the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Session,
    /// Credential exchange: no bearer header, and a 401 means bad
    /// credentials rather than an expired session.
    Anonymous,
}

/// The single choke point for backend calls. Cheap to clone; clones share
/// the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &AppConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::from_transport)?;
        Ok(Self {
            http,
            base_url: config.server_url.clone(),
            session,
            navigator,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    pub fn endpoint(&self, path: &ApiPath) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("cannot append paths to {}", self.base_url)))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &ApiPath) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        self.send_json(request, AuthMode::Session).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &ApiPath, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.send_json(request, AuthMode::Session).await
    }

    pub async fn post<T, B>(&self, path: &ApiPath, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send_json(request, AuthMode::Session).await
    }

    /// POST with parameters in the query string and no body.
    pub async fn post_with_query<T, Q>(&self, path: &ApiPath, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.query(query);
        self.send_json(request, AuthMode::Session).await
    }

    /// POST with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &ApiPath) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path)?;
        self.send_json(request, AuthMode::Session).await
    }

    pub async fn put<T, B>(&self, path: &ApiPath, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send_json(request, AuthMode::Session).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &ApiPath) -> Result<T, ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.send_json(request, AuthMode::Session).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path)?.multipart(form);
        self.send_json(request, AuthMode::Session).await
    }

    /// Raw response body, for file downloads and exports.
    pub async fn download(&self, path: &ApiPath) -> Result<Vec<u8>, ApiError> {
        let request = self.request(Method::GET, path)?;
        let response = self.execute(request, AuthMode::Session).await?;
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
        Ok(bytes.to_vec())
    }

    /// POST without the session, for login and registration.
    pub(crate) async fn post_anonymous<T, B>(&self, path: &ApiPath, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send_json(request, AuthMode::Anonymous).await
    }

    /// Form-encoded POST without the session, for OAuth2-style token endpoints.
    pub(crate) async fn post_form_anonymous<T, B>(&self, path: &ApiPath, form: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.form(form);
        self.send_json(request, AuthMode::Anonymous).await
    }

    fn request(&self, method: Method, path: &ApiPath) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        Ok(self.http.request(method, url))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: AuthMode,
    ) -> Result<T, ApiError> {
        let response = self.execute(request, auth).await?;
        let body = response.bytes().await.map_err(ApiError::from_transport)?;
        decode_payload(&body)
    }

    async fn execute(&self, request: RequestBuilder, auth: AuthMode) -> Result<Response, ApiError> {
        let mut request = request.build().map_err(ApiError::from_transport)?;
        if auth == AuthMode::Session {
            if let Some(token) = self.session.token() {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                    ApiError::Transport("session token is not a valid header value".to_string())
                })?;
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
        }

        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::debug!(%method, %url, error = %e, "request failed");
            ApiError::from_transport(e)
        })?;

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "received response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(status, &body);

        if status == StatusCode::UNAUTHORIZED && auth == AuthMode::Session {
            tracing::warn!(%method, %url, %detail, "session rejected, signing out");
            self.session.clear();
            self.navigator.redirect_to_login();
            return Err(ApiError::Unauthorized { detail });
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .finish()
    }
}

/// Decode a success body. An empty body reads as JSON `null`.
fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"null").map_err(ApiError::from);
    }
    serde_json::from_slice(body).map_err(ApiError::from)
}

/// Human-readable detail from a backend error body.
fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(serde_json::Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
