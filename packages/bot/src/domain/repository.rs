//! Repository trait 定義
//!
//! ルームごとのゲーム状態を保持するストアへのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 排他制御について
//!
//! 個々のメソッドはアトミックだが、「読んで、判定して、書き換える」一連の操作の
//! 排他は呼び出し側（`RoomGameManager` のルーム単位ロック）が保証する。

use async_trait::async_trait;

use super::{GameState, Participant, RepositoryError, RoomId};

/// Game Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// ルームのゲーム状態を取得（コピーを返す）
    async fn get(&self, room_id: &RoomId) -> Option<GameState>;

    /// ゲーム状態を保存（同じルームの既存の状態は置き換える）
    async fn insert(&self, state: GameState);

    /// 参加者を追加し、追加後の参加者数を返す
    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
    ) -> Result<usize, RepositoryError>;

    /// ゲーム状態を取り除いて返す（存在しなければ `None`）
    async fn remove(&self, room_id: &RoomId) -> Option<GameState>;

    /// 進行中のゲーム数
    async fn count_active_games(&self) -> usize;
}
