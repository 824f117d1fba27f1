//! InMemory Game Repository 実装
//!
//! ドメイン層が定義する GameRepository trait の具体的な実装。
//! ルーム ID をキーにした HashMap をインメモリストアとして使用します。
//! プロセスを再起動すると進行中のゲームは消える。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{GameRepository, GameState, Participant, RepositoryError, RoomId};

/// インメモリ Game Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    /// ルーム ID → ゲーム状態
    games: Mutex<HashMap<RoomId, GameState>>,
}

impl InMemoryGameRepository {
    /// 空の InMemoryGameRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn get(&self, room_id: &RoomId) -> Option<GameState> {
        let games = self.games.lock().await;
        games.get(room_id).cloned()
    }

    async fn insert(&self, state: GameState) {
        let mut games = self.games.lock().await;
        if let Some(previous) = games.insert(state.room_id.clone(), state) {
            tracing::debug!(
                "Replaced game {} in room {}",
                previous.game_id,
                previous.room_id
            );
        }
    }

    async fn add_participant(
        &self,
        room_id: &RoomId,
        participant: Participant,
    ) -> Result<usize, RepositoryError> {
        let mut games = self.games.lock().await;
        let state = games
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::GameNotFound(room_id.as_str().to_string()))?;
        state.add_participant(participant)
    }

    async fn remove(&self, room_id: &RoomId) -> Option<GameState> {
        let mut games = self.games.lock().await;
        games.remove(room_id)
    }

    async fn count_active_games(&self) -> usize {
        let games = self.games.lock().await;
        games.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, UserId, UserName};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryGameRepository の基本操作（取得・保存・参加者追加・削除）
    //
    // 【なぜこのテストが必要か】
    // - ルームごとに状態が 1 つだけ存在することを保証する必要がある
    // - 重複参加の拒否がストアでも守られることを確認する
    // ========================================

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn participant(id: &str) -> Participant {
        Participant::new(
            UserId::new(id.to_string()).unwrap(),
            UserName::new(id.to_string()),
        )
    }

    fn game(room_id: &str, first: &str) -> GameState {
        GameState::start(room(room_id), participant(first), Timestamp::new(0))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        // テスト項目: 保存したゲーム状態をルーム ID で取得できる
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let state = game("r1", "alice");

        // when (操作):
        repo.insert(state.clone()).await;

        // then (期待する結果):
        assert_eq!(repo.get(&room("r1")).await, Some(state));
        assert_eq!(repo.get(&room("r2")).await, None);
        assert_eq!(repo.count_active_games().await, 1);
    }

    #[tokio::test]
    async fn test_insert_replaces_existing_room() {
        // テスト項目: 同じルームに保存すると置き換えられ、状態は 1 つだけ
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        repo.insert(game("r1", "alice")).await;

        // when (操作):
        let newer = game("r1", "bob");
        repo.insert(newer.clone()).await;

        // then (期待する結果):
        assert_eq!(repo.get(&room("r1")).await, Some(newer));
        assert_eq!(repo.count_active_games().await, 1);
    }

    #[tokio::test]
    async fn test_add_participant_returns_position() {
        // テスト項目: 参加者追加で追加後の人数が返り、重複は拒否される
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        repo.insert(game("r1", "alice")).await;

        // when (操作):
        let bob = repo.add_participant(&room("r1"), participant("bob")).await;
        let again = repo.add_participant(&room("r1"), participant("bob")).await;

        // then (期待する結果):
        assert_eq!(bob, Ok(2));
        assert_eq!(
            again,
            Err(RepositoryError::DuplicateParticipant("bob".to_string()))
        );
        assert_eq!(repo.get(&room("r1")).await.unwrap().participant_count(), 2);
    }

    #[tokio::test]
    async fn test_add_participant_to_missing_game() {
        // テスト項目: ゲームのないルームへの参加者追加はエラーになる
        // given (前提条件):
        let repo = InMemoryGameRepository::new();

        // when (操作):
        let result = repo.add_participant(&room("r1"), participant("bob")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::GameNotFound("r1".to_string())));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        // テスト項目: 削除は 1 回目だけ状態を返し、2 回目は None（冪等）
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let state = game("r1", "alice");
        repo.insert(state.clone()).await;

        // when (操作):
        let first = repo.remove(&room("r1")).await;
        let second = repo.remove(&room("r1")).await;

        // then (期待する結果):
        assert_eq!(first, Some(state));
        assert_eq!(second, None);
        assert_eq!(repo.count_active_games().await, 0);
    }
}
