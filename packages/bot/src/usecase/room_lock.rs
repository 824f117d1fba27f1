//! ルーム単位の排他ロック
//!
//! 参加・抽選・タイムアウト監視は同じルームに対して同時に走りうる。
//! 「状態を読む → 判定する → 書き換える／削除する」を 1 つのルームについて
//! 直列化するため、ルーム ID ごとに非同期 Mutex を割り当てる。
//! 別ルームの操作は互いに待たない。

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RoomId;

/// ルーム ID をキーにしたロックの集合
#[derive(Debug, Default)]
pub struct RoomLocks {
    locks: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームのロックを取得する（ガードを drop すると解放）
    pub async fn lock(&self, room_id: &RoomId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // 誰も保持・待機していないロックは捨てる
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(room_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// 現在割り当てられているロックの数
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
