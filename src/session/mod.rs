//! Session credential handling.
//!
//! A session is a bearer token plus the signed-in user's record. Both live in
//! persistent client storage under two keys that are always written and
//! cleared together. [`SessionStore`] is the only code that touches those keys.

pub mod storage;
pub mod store;

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::SessionStore;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";

/// Role of the signed-in actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Customer,
    Driver,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Driver => "DRIVER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    /// Accepts `ADMIN` as well as the `ROLE_ADMIN` form some backends emit.
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match bare {
            "CUSTOMER" | "USER" => Ok(Role::Customer),
            "DRIVER" | "SHIPPER" => Ok(Role::Driver),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ApiError::invalid_role(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// The signed-in user, as persisted under [`USER_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    #[serde(alias = "username", alias = "fullName", default)]
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A complete session: token and user, read together.
pub struct Session {
    pub token: SecretString,
    pub user: UserRecord,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user asked to sign out.
    Logout,
    /// The backend rejected the credential (401/403).
    Invalidated,
}

/// Published on every session change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(UserRecord),
    SignedOut(SignOutReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_prefixed_forms() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ROLE_ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("role_driver".parse::<Role>().unwrap(), Role::Driver);
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Customer);
        assert!("ROLE_".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_record_json() {
        let user: UserRecord =
            serde_json::from_str(r#"{"id":7,"username":"linh","role":"ROLE_ADMIN"}"#).unwrap();
        assert_eq!(user.name, "linh");
        assert!(user.is_admin());

        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":7,"name":"linh","role":"ADMIN"}"#);
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session {
            token: SecretString::from("tok-123".to_string()),
            user: UserRecord {
                id: 1,
                name: "a".to_string(),
                role: Role::Customer,
                email: None,
            },
        };
        let debug = format!("{session:?}");
        assert!(!debug.contains("tok-123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
