use serde::{Deserialize, Serialize};

/// The user record returned by the identity verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    pub google_id: String,
}

/// An authenticated session as kept in memory and in durable storage.
///
/// Stored payloads written before the token was kept (a bare user record)
/// still deserialize, with no token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(flatten)]
    pub user: SessionUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn new(user: SessionUser, token: Option<String>) -> Self {
        Self { user, token }
    }
}
