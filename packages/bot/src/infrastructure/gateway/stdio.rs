//! JSON Lines を使った ChatGateway / ModerationService 実装
//!
//! ## 責務
//!
//! - テキスト送信と禁言コマンドを `OutboundAction` に変換してキューに積む
//! - キューから取り出して書き込み先（通常は標準出力）へ 1 行ずつ書く
//!
//! ## 設計ノート
//!
//! 送信側（`StdioGateway`）と書き込み側（`spawn_writer`）はチャンネルで分離している。
//! ゲームのタスクは書き込み完了を待たずに次へ進める。

use async_trait::async_trait;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::mpsc,
    task::JoinHandle,
};

use crate::{
    domain::{ChatGateway, ChatGatewayError, ModerationError, ModerationService, RoomId, UserId},
    infrastructure::dto::outbound::OutboundAction,
};

/// JSON Lines を使った ChatGateway / ModerationService 実装
///
/// ## 使用例
///
/// ```ignore
/// let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
/// let gateway = StdioGateway::new(tx);
/// let writer = spawn_writer(rx, tokio::io::stdout());
///
/// gateway.send_text(&room_id, "hello").await?;
/// ```
#[derive(Debug, Clone)]
pub struct StdioGateway {
    /// 書き込みタスクへのキュー（1 要素 = JSON 1 行）
    sender: mpsc::UnboundedSender<String>,
}

impl StdioGateway {
    pub fn new(sender: mpsc::UnboundedSender<String>) -> Self {
        Self { sender }
    }

    fn push(&self, action: &OutboundAction) -> Result<(), String> {
        let line = serde_json::to_string(action).map_err(|e| e.to_string())?;
        self.sender.send(line).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl ChatGateway for StdioGateway {
    async fn send_text(&self, room_id: &RoomId, text: &str) -> Result<(), ChatGatewayError> {
        self.push(&OutboundAction::Text {
            room_id: room_id.as_str().to_string(),
            text: text.to_string(),
        })
        .map_err(ChatGatewayError::SendFailed)?;
        tracing::debug!("Queued text message for room '{}'", room_id);
        Ok(())
    }
}

#[async_trait]
impl ModerationService for StdioGateway {
    async fn mute(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        duration_secs: u32,
    ) -> Result<(), ModerationError> {
        self.push(&OutboundAction::GroupBan {
            room_id: room_id.as_str().to_string(),
            user_id: user_id.as_str().to_string(),
            duration: duration_secs,
        })
        .map_err(ModerationError::Unavailable)?;
        tracing::debug!(
            "Queued mute of '{}' in room '{}' for {} s",
            user_id,
            room_id,
            duration_secs
        );
        Ok(())
    }
}

/// キューの内容を `writer` に 1 行ずつ書き出すタスクを起動する
///
/// 送信側がすべて drop されるか、書き込みに失敗すると終了する。
pub fn spawn_writer<W>(mut rx: mpsc::UnboundedReceiver<String>, mut writer: W) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            let written: std::io::Result<()> = async {
                writer.write_all(line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await
            }
            .await;
            if let Err(e) = written {
                tracing::error!("Failed to write outbound action: {}", e);
                break;
            }
        }
    })
}
