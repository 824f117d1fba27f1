//! Conversion logic between DTOs and domain entities.

use thiserror::Error;

use crate::domain::{ChatContext, RoomId, RoomType, UserId, UserName, ValueObjectError};
use crate::infrastructure::dto::inbound::ChatEvent;

/// Why a chat context could not be resolved from an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("missing field '{0}'")]
    Missing(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValueObjectError),
}

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<&ChatEvent> for ChatContext {
    type Error = ContextError;

    fn try_from(event: &ChatEvent) -> Result<Self, Self::Error> {
        let room_id = event
            .room_id
            .clone()
            .ok_or(ContextError::Missing("room_id"))?;
        let room_type = event
            .room_type
            .as_deref()
            .ok_or(ContextError::Missing("room_type"))?;
        let user_id = event
            .user_id
            .clone()
            .ok_or(ContextError::Missing("user_id"))?;

        Ok(Self {
            room_id: RoomId::new(room_id)?,
            room_type: RoomType::parse(room_type)?,
            user_id: UserId::new(user_id)?,
            // ニックネームがなければ ID で代用する
            user_name: UserName::new(
                event
                    .user_name
                    .clone()
                    .unwrap_or_else(|| event.user_id.clone().unwrap_or_default()),
            ),
        })
    }
}
