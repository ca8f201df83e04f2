//! User roles and the room each role joins for event delivery.
//!
//! Rooms are server-side delivery scopes: a chef connection joins the chef
//! room and only receives events relevant to the kitchen, and so on. The
//! room names match the ones the backend registers.

use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Chef,
    Staff,
    Manager,
    /// Admins share the manager room; they see everything managers see.
    Admin,
    Customer,
}

impl Role {
    /// The delivery room this role joins after connecting.
    pub fn room(&self) -> Room {
        match self {
            Role::Chef => Room::Chef,
            Role::Staff => Room::Staff,
            Role::Manager | Role::Admin => Room::Manager,
            Role::Customer => Room::Customer,
        }
    }

    /// Wire name of the role, as sent in the join-room message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Chef => "chef",
            Role::Staff => "staff",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Server-side delivery scope keyed by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    #[serde(rename = "chef_room")]
    Chef,
    #[serde(rename = "staff_room")]
    Staff,
    #[serde(rename = "manager_room")]
    Manager,
    #[serde(rename = "customer_room")]
    Customer,
}

impl Room {
    /// Wire name of the room, as the server addresses it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Chef => "chef_room",
            Room::Staff => "staff_room",
            Room::Manager => "manager_room",
            Room::Customer => "customer_room",
        }
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
