//! Session identity established at login.

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::role::Role;

/// Who is connected, established once at login.
///
/// Owned by the authentication collaborator; the realtime core only reads
/// it to join the right room. Destroyed on logout, which tears down the
/// socket along with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub role: Role,
    #[serde(rename = "username")]
    pub display_name: String,
}

impl SessionIdentity {
    pub fn new(user_id: UserId, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            display_name: display_name.into(),
        }
    }
}
