//! Role Model

use serde::{Deserialize, Serialize};

/// Caller role carried in the `role` claim of a bearer credential
///
/// Closed over the three roles the marketplace knows. Anything else is kept
/// verbatim in `Unrecognized` so dispatch sites must decide what an unknown
/// role gets instead of silently falling through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Artist,
    Admin,
    Unrecognized(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Artist => "artist",
            Self::Admin => "admin",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "user" => Self::User,
            "artist" => Self::Artist,
            "admin" => Self::Admin,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
