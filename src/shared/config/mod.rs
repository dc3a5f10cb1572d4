//! Application configuration module
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. The result is validated once by
//! [`AppConfigBuilder::build`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

/// Default backend base URL
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8003/api";
/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default credential-exchange endpoint, relative to the base URL
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

const APP_DIR: &str = "paper-killer";

pub const ENV_CONFIG_FILE: &str = "PAPER_KILLER_CONFIG";
pub const ENV_API_URL: &str = "PAPER_KILLER_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PAPER_KILLER_TIMEOUT_SECS";
pub const ENV_LOGIN_PATH: &str = "PAPER_KILLER_LOGIN_PATH";
pub const ENV_TOKEN_PATH: &str = "PAPER_KILLER_TOKEN_PATH";
pub const ENV_LOGIN_FORMAT: &str = "PAPER_KILLER_LOGIN_FORMAT";

/// How credentials are encoded for the login endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginFormat {
    /// `{"email": .., "password": ..}`
    #[default]
    Json,
    /// OAuth2 password form: `username=<email>&password=..`
    Form,
}

impl FromStr for LoginFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LoginFormat::Json),
            "form" => Ok(LoginFormat::Form),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LoginFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoginFormat::Json => "json",
            LoginFormat::Form => "form",
        })
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL every API path is appended to
    pub server_url: Url,
    /// Fixed request timeout
    pub timeout: Duration,
    /// Path of the credential-exchange endpoint
    pub login_path: String,
    /// Body encoding of the login request
    pub login_format: LoginFormat,
    /// File holding the persisted session token
    pub token_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default server URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            login_format: LoginFormat::Json,
            token_path: default_token_path(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Defaults, then the config file (if any), then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        let file = std::env::var(ENV_CONFIG_FILE)
            .ok()
            .map(PathBuf::from)
            .or_else(default_config_path);
        if let Some(path) = file {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config file");
                builder = builder.merge_file(&path)?;
            }
        }
        builder.merge_env()?.build()
    }

    /// Segments of the login path, ready for `ApiPath::from_segments`.
    pub fn login_segments(&self) -> Vec<String> {
        self.login_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn default_token_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join("token"))
        .unwrap_or_else(|| PathBuf::from(".paper-killer-token"))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// On-disk shape of the config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    server_url: Option<String>,
    timeout_secs: Option<u64>,
    login_path: Option<String>,
    login_format: Option<LoginFormat>,
    token_path: Option<PathBuf>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    timeout: Option<Duration>,
    login_path: Option<String>,
    login_format: Option<LoginFormat>,
    token_path: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    pub fn login_format(mut self, format: LoginFormat) -> Self {
        self.login_format = Some(format);
        self
    }

    pub fn token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Overlay values from a TOML document.
    pub fn merge_toml(mut self, source: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(path) = file.login_path {
            self.login_path = Some(path);
        }
        if let Some(format) = file.login_format {
            self.login_format = Some(format);
        }
        if let Some(path) = file.token_path {
            self.token_path = Some(path);
        }
        Ok(self)
    }

    /// Overlay values from a TOML file on disk.
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.merge_toml(&source, path)
    }

    /// Overlay values from the process environment.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.server_url = Some(url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(path) = lookup(ENV_LOGIN_PATH) {
            self.login_path = Some(path);
        }
        if let Some(raw) = lookup(ENV_LOGIN_FORMAT) {
            let format = raw.parse::<LoginFormat>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOGIN_FORMAT,
                value: raw.clone(),
            })?;
            self.login_format = Some(format);
        }
        if let Some(path) = lookup(ENV_TOKEN_PATH) {
            self.token_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let raw_url = self
            .server_url
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let server_url =
            Url::parse(&raw_url).map_err(|e| ConfigError::InvalidUrl(format!("{raw_url}: {e}")))?;
        if !matches!(server_url.scheme(), "http" | "https") || server_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(raw_url));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::MissingValue("timeout"));
        }

        let login_path = self
            .login_path
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
        if login_path.trim_matches('/').is_empty() {
            return Err(ConfigError::MissingValue("login_path"));
        }

        Ok(AppConfig {
            server_url,
            timeout,
            login_path,
            login_format: self.login_format.unwrap_or_default(),
            token_path: self.token_path.unwrap_or_else(default_token_path),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::builder().build().unwrap();
        assert_eq!(config.server_url.as_str(), "http://localhost:8003/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.login_path, "/auth/login");
        assert_eq!(config.login_segments(), vec!["auth", "login"]);
        assert_eq!(config.login_format, LoginFormat::Json);
    }

    #[test]
    fn test_rejects_bad_urls() {
        let err = AppConfig::builder().server_url("not a url").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));

        let err = AppConfig::builder()
            .server_url("mailto:someone@example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = AppConfig::builder()
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingValue("timeout"));
    }

    #[test]
    fn test_merge_toml() {
        let source = r#"
            server_url = "https://papers.example.org/api"
            timeout_secs = 30
            login_path = "/auth/token"
            login_format = "form"
        "#;
        let config = AppConfig::builder()
            .merge_toml(source, Path::new("config.toml"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.server_url.as_str(), "https://papers.example.org/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.login_segments(), vec!["auth", "token"]);
        assert_eq!(config.login_format, LoginFormat::Form);
    }

    #[test]
    fn test_merge_toml_rejects_unknown_keys() {
        let err = AppConfig::builder()
            .merge_toml("colour = \"blue\"", Path::new("config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, "http://10.0.0.5:9000/api"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_TOKEN_PATH, "/tmp/pk-token"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::builder()
            .merge_toml("server_url = \"http://file.example/api\"", Path::new("c.toml"))
            .unwrap()
            .merge_vars(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.server_url.as_str(), "http://10.0.0.5:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.token_path, PathBuf::from("/tmp/pk-token"));
    }

    #[test]
    fn test_env_rejects_bad_timeout() {
        let err = AppConfig::builder()
            .merge_vars(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_env_login_format() {
        let config = AppConfig::builder()
            .merge_vars(|key| (key == ENV_LOGIN_FORMAT).then(|| " Form ".to_string()))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.login_format, LoginFormat::Form);

        let err = AppConfig::builder()
            .merge_vars(|key| (key == ENV_LOGIN_FORMAT).then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_LOGIN_FORMAT, .. }));
    }

    #[test]
    #[serial_test::serial]
    fn test_load_reads_process_environment() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "timeout_secs = 7\n").unwrap();

        std::env::set_var(ENV_CONFIG_FILE, &file);
        std::env::set_var(ENV_API_URL, "http://127.0.0.1:8123/api");
        let config = AppConfig::load();
        std::env::remove_var(ENV_CONFIG_FILE);
        std::env::remove_var(ENV_API_URL);

        let config = config.unwrap();
        assert_eq!(config.server_url.as_str(), "http://127.0.0.1:8123/api");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }
}
