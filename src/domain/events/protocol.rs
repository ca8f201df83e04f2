//! Client-to-server control messages.
//!
//! The only thing the core ever says to the server: which room it wants
//! to be in. Domain mutations go over REST, never over the socket.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Room, SessionIdentity, UserId};

/// All message types the client sends over the socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join the delivery room for the session's role.
    ///
    /// Emitted immediately after transport open. No acknowledgement is
    /// required for the join to count as successful.
    JoinRoom {
        user_id: UserId,
        role: Role,
        username: String,
    },

    /// Leave the current room; emitted on graceful disconnect.
    LeaveRoom { room: Room },
}

impl ClientMessage {
    /// Build the join message for a session identity.
    pub fn join_room(identity: &SessionIdentity) -> Self {
        ClientMessage::JoinRoom {
            user_id: identity.user_id,
            role: identity.role,
            username: identity.display_name.clone(),
        }
    }

    /// Build the leave message for a session identity.
    pub fn leave_room(identity: &SessionIdentity) -> Self {
        ClientMessage::LeaveRoom {
            room: identity.role.room(),
        }
    }
}
