use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordId;

/// User information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub id: Option<RecordId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl UserInfo {
    /// Best available label for the top bar.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// Login form payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form payload. The confirmation never leaves the client.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credential exchange response. Accepts both `token` and the OAuth2-style
/// `access_token`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    #[serde(alias = "total_papers")]
    pub total_papers: u64,
    #[serde(alias = "favorite_papers")]
    pub favorite_papers: u64,
    #[serde(alias = "total_comments")]
    pub total_comments: u64,
    #[serde(alias = "total_tags")]
    pub total_tags: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_accepts_access_token() {
        let response: LoginResponse =
            serde_json::from_value(json!({"access_token": "abc", "token_type": "bearer"})).unwrap();
        assert_eq!(response.token, "abc");
        assert!(response.user.is_none());

        let response: LoginResponse = serde_json::from_value(json!({
            "token": "tok123",
            "user": {"id": "u1", "email": "a@b.com", "name": "Ada"}
        }))
        .unwrap();
        assert_eq!(response.token, "tok123");
        assert_eq!(response.user.unwrap().display_name(), Some("Ada"));
    }

    #[test]
    fn test_registration_never_sends_confirmation() {
        let registration = Registration {
            username: "ada_l".to_string(),
            email: "ada@example.com".to_string(),
            password: "Secret#123".to_string(),
            confirm_password: "Secret#123".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&registration).unwrap(),
            json!({"username": "ada_l", "email": "ada@example.com", "password": "Secret#123"})
        );
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let credentials = Credentials::new("a@b.com", "secret1");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("secret1"));
    }

    #[test]
    fn test_user_stats_both_casings() {
        let camel: UserStats = serde_json::from_value(json!({"totalPapers": 4, "totalTags": 2})).unwrap();
        let snake: UserStats = serde_json::from_value(json!({"total_papers": 4, "total_tags": 2})).unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.total_papers, 4);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let user = UserInfo {
            username: Some("ada".to_string()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), Some("ada"));
        assert_eq!(UserInfo::default().display_name(), None);
    }
}
