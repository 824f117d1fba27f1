//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Room ID must not be empty")]
    RoomIdEmpty,

    #[error("User ID must not be empty")]
    UserIdEmpty,

    #[error("Unknown room type: '{0}'")]
    UnknownRoomType(String),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("No game is running in room '{0}'")]
    GameNotFound(String),

    #[error("User '{0}' has already joined this game")]
    DuplicateParticipant(String),
}

/// チャットへのメッセージ送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatGatewayError {
    #[error("Failed to send message: {0}")]
    SendFailed(String),
}

/// 禁言（ミュート）操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    #[error("Mute command rejected: {0}")]
    Rejected(String),

    #[error("Moderation service unavailable: {0}")]
    Unavailable(String),
}
