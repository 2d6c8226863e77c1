//! User account entity and its public representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Always equal to the email; kept for clients that display a handle.
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Two upper-case letters shown in avatars: from the name, or the email when the name is blank.
    pub fn initials(&self) -> String {
        let source = if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        };
        source.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Account data returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "ana@example.com")]
    pub username: String,
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = "AN")]
    pub initials: String,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
    #[serde(rename = "lastLogin")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let initials = user.initials();
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            name: user.name,
            initials,
            joined_at: user.date_joined,
            last_login: user.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User {
            id: 1,
            email: email.to_string(),
            username: email.to_string(),
            password_hash: String::new(),
            name: name.to_string(),
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_initials_from_name() {
        assert_eq!(user("maria", "m@example.com").initials(), "MA");
    }

    #[test]
    fn test_initials_fall_back_to_email() {
        assert_eq!(user("", "zoe@example.com").initials(), "ZO");
    }

    #[test]
    fn test_response_uses_camel_case_timestamps() {
        let body = serde_json::to_value(UserResponse::from(user("Li", "li@example.com"))).unwrap();
        assert!(body.get("joinedAt").is_some());
        assert!(body["lastLogin"].is_null());
        assert!(body.get("password_hash").is_none());
    }
}
