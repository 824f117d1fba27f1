//! 外部サービスへのインターフェース
//!
//! - `ChatGateway`: ルームへのテキスト送信
//! - `ModerationService`: ユーザーの禁言（ミュート）
//!
//! どちらもホストのチャットプラットフォームが提供する機能で、
//! 実装は Infrastructure 層にある。

use async_trait::async_trait;

use super::{ChatGatewayError, ModerationError, RoomId, UserId};

/// チャットへのメッセージ送信
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// ルームにテキストを送信し、送信完了まで待つ
    async fn send_text(&self, room_id: &RoomId, text: &str) -> Result<(), ChatGatewayError>;
}

/// 禁言操作
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// `user_id` を `room_id` で `duration_secs` 秒間ミュートする
    async fn mute(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        duration_secs: u32,
    ) -> Result<(), ModerationError>;
}
