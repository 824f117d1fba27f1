//! エンティティ
//!
//! - `GameState`: ルームごとに 1 つだけ存在する進行中のゲーム
//! - `Participant`: ゲームの参加者
//! - `ChatContext`: コマンドを受け取ったチャットの情報

use super::{
    error::RepositoryError,
    value_object::{GameId, RoomId, RoomType, Timestamp, UserId, UserName},
};

/// ゲームの参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: UserId,
    pub user_name: UserName,
}

impl Participant {
    pub fn new(user_id: UserId, user_name: UserName) -> Self {
        Self { user_id, user_name }
    }
}

/// ルームごとのゲーム状態
///
/// `participants` は参加順に並び、追加のみ行われる。
/// 同じ `user_id` が 2 回現れることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub room_id: RoomId,
    pub game_id: GameId,
    pub start_time: Timestamp,
    participants: Vec<Participant>,
}

impl GameState {
    /// 最初の参加者でゲームを開始する
    pub fn start(room_id: RoomId, first: Participant, start_time: Timestamp) -> Self {
        Self {
            room_id,
            game_id: GameId::generate(),
            start_time,
            participants: vec![first],
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participants.iter().any(|p| &p.user_id == user_id)
    }

    /// 参加者を末尾に追加し、追加後の参加者数（= 参加順位）を返す
    pub fn add_participant(&mut self, participant: Participant) -> Result<usize, RepositoryError> {
        if self.has_participant(&participant.user_id) {
            return Err(RepositoryError::DuplicateParticipant(
                participant.user_id.into_string(),
            ));
        }
        self.participants.push(participant);
        Ok(self.participants.len())
    }

    /// 待機時間を超えているか（`elapsed > max_wait_secs`）
    pub fn is_stale(&self, now: Timestamp, max_wait_secs: u64) -> bool {
        now.millis_since(self.start_time) > max_wait_secs.saturating_mul(1000)
    }
}

/// コマンドを受け取ったチャットの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub room_id: RoomId,
    pub room_type: RoomType,
    pub user_id: UserId,
    pub user_name: UserName,
}
