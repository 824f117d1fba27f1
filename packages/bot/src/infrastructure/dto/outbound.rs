//! Outbound action DTOs.

use serde::{Deserialize, Serialize};

/// Action the host should perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundAction {
    /// Post a text message to the room
    Text { room_id: String, text: String },
    /// Mute a member of the room for `duration` seconds
    GroupBan {
        room_id: String,
        user_id: String,
        duration: u32,
    },
}
