//! Inbound chat event DTOs.

use serde::{Deserialize, Serialize};

/// A chat message delivered by the host.
///
/// Context fields are optional: the host leaves them out when it cannot
/// resolve the chat stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    #[serde(default)]
    pub room_id: Option<String>,
    /// "group" or "private"
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub text: String,
}
