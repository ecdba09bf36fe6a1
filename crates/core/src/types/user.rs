//! Signed-in account profile.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// The profile of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Display string, e.g. "March 2023".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_since: Option<String>,
}

impl User {
    /// Create a profile with only the required fields set.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: Email) -> Self {
        Self {
            id,
            name: name.into(),
            email,
            avatar: None,
            phone: None,
            location: None,
            member_since: None,
        }
    }
}
