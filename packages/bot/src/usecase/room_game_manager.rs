//! UseCase: ルーム単位のゲーム進行
//!
//! ## 状態遷移
//!
//! ```text
//! Absent --join--> Open --(満員 / タイムアウト)--> Resolving --> Absent
//!                   |
//!                   +--(期限切れで次の join)--> Absent --> Open（新しいゲーム）
//! ```
//!
//! ## 排他制御
//!
//! join・draw・タイムアウト監視はすべて同じルームのロック（`RoomLocks`）の中で
//! 状態を読み書きする。抽選はロック内で最初に状態をストアから取り除くため、
//! 1 つのゲームに対して抽選が 2 回走ることはなく、途中で失敗しても状態は残らない。
//! 抽選中（Resolving）に来た join はロックを待ち、抽選完了後に新しいゲームを始める。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - join / draw / watchdog の状態遷移とチャットへの通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加、満員での抽選、タイムアウトでの抽選
//! - 異常系：重複参加、禁言失敗、メッセージ送信失敗
//! - エッジケース：期限切れゲームへの参加、1 人モード、古い監視タスク

use std::{sync::Arc, time::Duration};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use roulette_shared::time::timestamp_to_jst_rfc3339;
use tokio::sync::Mutex;

use crate::{
    config::{ConfigError, GameSettings, PacingSettings},
    domain::{
        ChatGateway, GameId, GameRepository, GameState, ModerationError, ModerationService,
        Participant, RoomId, Timestamp, UserId, UserName, announcement, format_duration,
    },
};

use super::{error::JoinError, room_lock::RoomLocks};

/// join の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// 新しいゲームを開始した
    Started { position: usize, max: usize },
    /// 進行中のゲームに参加した
    Joined { position: usize, max: usize },
    /// すでにこのゲームに参加している
    DuplicateJoin,
}

/// 抽選の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawResult {
    pub victim: Participant,
    pub duration_secs: u32,
    /// 禁言に成功したか
    pub muted: bool,
}

/// ルームごとのゲームを管理する
///
/// clone しても同じストア・ロックを共有する（タイムアウト監視タスクに渡すため）。
#[derive(Clone)]
pub struct RoomGameManager {
    /// Repository（ゲーム状態ストアの抽象化）
    repository: Arc<dyn GameRepository>,
    /// ChatGateway（メッセージ送信の抽象化）
    chat: Arc<dyn ChatGateway>,
    /// ModerationService（禁言の抽象化）
    moderation: Arc<dyn ModerationService>,
    settings: GameSettings,
    pacing: PacingSettings,
    locks: Arc<RoomLocks>,
    rng: Arc<Mutex<StdRng>>,
    log_prefix: String,
}

impl RoomGameManager {
    /// 新しい RoomGameManager を作成
    ///
    /// # Errors
    ///
    /// `settings` が不正（最大人数 0、最小禁言時間 > 最大禁言時間など）なら
    /// `ConfigError::Invalid` を返す。
    pub fn new(
        repository: Arc<dyn GameRepository>,
        chat: Arc<dyn ChatGateway>,
        moderation: Arc<dyn ModerationService>,
        settings: GameSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            repository,
            chat,
            moderation,
            settings,
            pacing: PacingSettings::default(),
            locks: Arc::new(RoomLocks::new()),
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
            log_prefix: "[russian_roulette]".to_string(),
        })
    }

    pub fn with_pacing(mut self, pacing: PacingSettings) -> Self {
        self.pacing = pacing;
        self
    }

    /// 乱数生成器を差し替える（テストで結果を固定するため）
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }

    /// ルームのゲーム状態のコピーを取得
    pub async fn snapshot(&self, room_id: &RoomId) -> Option<GameState> {
        self.repository.get(room_id).await
    }

    /// 進行中のゲーム数
    pub async fn active_games(&self) -> usize {
        self.repository.count_active_games().await
    }

    /// ゲームに参加する
    ///
    /// 呼び出し側がグループチャットであることを確認済みである前提。
    /// 満員になった場合（1 人モードでは開始と同時に）、戻る前に抽選まで行う。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加するルーム
    /// * `user_id` / `user_name` - 参加者
    /// * `now` - 参加時刻（期限切れ判定に使う）
    pub async fn join(
        &self,
        room_id: RoomId,
        user_id: UserId,
        user_name: UserName,
        now: Timestamp,
    ) -> Result<JoinOutcome, JoinError> {
        let _guard = self.locks.lock(&room_id).await;
        let max = self.settings.max_participants;
        let participant = Participant::new(user_id, user_name);

        if let Some(state) = self.repository.get(&room_id).await {
            let elapsed_ms = now.millis_since(state.start_time);
            tracing::debug!(
                "{} Game in room {} has been open for {} ms",
                self.log_prefix,
                room_id,
                elapsed_ms
            );

            if state.is_stale(now, self.settings.max_wait_time) {
                tracing::info!(
                    "{} Game in room {} timed out, starting over",
                    self.log_prefix,
                    room_id
                );
                self.repository.remove(&room_id).await;
            } else if state.has_participant(&participant.user_id) {
                self.announce(&room_id, announcement::DUPLICATE_JOIN).await;
                return Ok(JoinOutcome::DuplicateJoin);
            } else {
                let user_name = participant.user_name.clone();
                let position = self
                    .repository
                    .add_participant(&room_id, participant)
                    .await?;
                self.announce(
                    &room_id,
                    &announcement::joined(user_name.as_str(), position, max),
                )
                .await;

                if position >= max {
                    tracing::info!(
                        "{} Room {} is full ({} / {}), drawing",
                        self.log_prefix,
                        room_id,
                        position,
                        max
                    );
                    self.draw_locked(&room_id).await;
                }
                return Ok(JoinOutcome::Joined { position, max });
            }
        }

        self.start_game(&room_id, participant, now).await;
        Ok(JoinOutcome::Started { position: 1, max })
    }

    /// 新しいゲームを開始する（ルームのロックを保持した状態で呼ぶ）
    async fn start_game(&self, room_id: &RoomId, first: Participant, now: Timestamp) {
        let max = self.settings.max_participants;
        let user_name = first.user_name.clone();
        let state = GameState::start(room_id.clone(), first, now);
        let game_id = state.game_id;
        self.repository.insert(state).await;
        tracing::info!(
            "{} Game {} started in room {} by {} at {}",
            self.log_prefix,
            game_id,
            room_id,
            user_name,
            timestamp_to_jst_rfc3339(now.value()).unwrap_or_default()
        );

        if max > 1 {
            self.spawn_watchdog(room_id.clone(), game_id);
        }

        self.announce(room_id, announcement::GAME_RULES).await;
        pause(self.pacing.start_notice_delay()).await;
        self.announce(room_id, &announcement::joined(user_name.as_str(), 1, max))
            .await;

        if max == 1 {
            pause(self.pacing.single_player_delay()).await;
            tracing::info!("{} Single-player mode, drawing", self.log_prefix);
            self.draw_locked(room_id).await;
        }
    }

    /// 抽選を行う
    ///
    /// ルームにゲームがなければ何もしない（`None`）。
    pub async fn draw(&self, room_id: &RoomId) -> Option<DrawResult> {
        let _guard = self.locks.lock(room_id).await;
        self.draw_locked(room_id).await
    }

    /// 抽選本体（ルームのロックを保持した状態で呼ぶ）
    async fn draw_locked(&self, room_id: &RoomId) -> Option<DrawResult> {
        // 先に取り除く: 以降で何が起きても状態は残らない
        let Some(state) = self.repository.remove(room_id).await else {
            tracing::info!(
                "{} Game in room {} is already gone, nothing to draw",
                self.log_prefix,
                room_id
            );
            return None;
        };

        let (victim, duration_secs) = {
            let mut rng = self.rng.lock().await;
            let Some(victim) = state.participants().choose(&mut *rng).cloned() else {
                tracing::warn!(
                    "{} Game {} in room {} had no participants",
                    self.log_prefix,
                    state.game_id,
                    room_id
                );
                return None;
            };
            let duration_secs =
                rng.random_range(self.settings.min_mute_time..=self.settings.max_mute_time);
            (victim, duration_secs)
        };

        tracing::info!(
            "{} Drew {} ({}) in room {} out of {} participants, mute for {}",
            self.log_prefix,
            victim.user_name,
            victim.user_id,
            room_id,
            state.participant_count(),
            format_duration(u64::from(duration_secs))
        );
        self.announce(room_id, &announcement::victim(victim.user_name.as_str()))
            .await;
        pause(self.pacing.suspense_delay()).await;

        let muted = match self
            .moderation
            .mute(room_id, &victim.user_id, duration_secs)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "{} Muted {} in room {}",
                    self.log_prefix,
                    victim.user_id,
                    room_id
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "{} Failed to mute {} in room {}: {}",
                    self.log_prefix,
                    victim.user_id,
                    room_id,
                    e
                );
                let notice = match &e {
                    ModerationError::Rejected(_) => announcement::MUTE_FAILED.to_string(),
                    ModerationError::Unavailable(reason) => announcement::draw_error(reason),
                };
                self.announce(room_id, &notice).await;
                false
            }
        };

        self.announce(
            room_id,
            &announcement::consequence(victim.user_name.as_str(), duration_secs),
        )
        .await;

        Some(DrawResult {
            victim,
            duration_secs,
            muted,
        })
    }

    fn spawn_watchdog(&self, room_id: RoomId, game_id: GameId) {
        let manager = self.clone();
        tokio::spawn(async move { manager.watchdog(room_id, game_id).await });
    }

    /// タイムアウト監視
    ///
    /// 待機時間が過ぎた時点で `game_id` のゲームがまだ残っていれば抽選する。
    /// 待機中は 30 秒ごと（残り 30 秒からは 10 秒ごと）に状況をログに出す。
    pub async fn watchdog(&self, room_id: RoomId, game_id: GameId) {
        tracing::debug!(
            "{} Watchdog armed for game {} in room {} ({} s)",
            self.log_prefix,
            game_id,
            room_id,
            self.settings.max_wait_time
        );

        let mut remaining = self.settings.max_wait_time;
        for interval in watchdog_intervals(self.settings.max_wait_time) {
            tokio::time::sleep(Duration::from_secs(interval)).await;
            remaining -= interval;
            if !self.log_progress(&room_id, game_id, remaining).await {
                tracing::debug!(
                    "{} Game {} in room {} is gone, watchdog stands down",
                    self.log_prefix,
                    game_id,
                    room_id
                );
                return;
            }
        }

        let _guard = self.locks.lock(&room_id).await;
        match self.repository.get(&room_id).await {
            Some(state) if state.game_id == game_id => {
                if state.participant_count() > 0 {
                    tracing::info!(
                        "{} Game {} in room {} timed out with {} participants, drawing",
                        self.log_prefix,
                        game_id,
                        room_id,
                        state.participant_count()
                    );
                    self.draw_locked(&room_id).await;
                } else {
                    self.repository.remove(&room_id).await;
                }
            }
            Some(_) => tracing::debug!(
                "{} Room {} is running a newer game, watchdog for {} stands down",
                self.log_prefix,
                room_id,
                game_id
            ),
            None => tracing::debug!(
                "{} Game {} in room {} already resolved",
                self.log_prefix,
                game_id,
                room_id
            ),
        }
    }

    /// 待機中のゲームの状況をログに出す
    ///
    /// `game_id` のゲームがもうルームに残っていなければ何も出さず `false` を返す。
    async fn log_progress(&self, room_id: &RoomId, game_id: GameId, remaining: u64) -> bool {
        let Some(state) = self.repository.get(room_id).await else {
            return false;
        };
        if state.game_id != game_id {
            return false;
        }
        let participants: Vec<String> = state
            .participants()
            .iter()
            .map(|p| format!("  - {}({})", p.user_name, p.user_id))
            .collect();
        tracing::info!(
            "{} Room {}: {} left, {} participants\n{}",
            self.log_prefix,
            room_id,
            format_duration(remaining),
            state.participant_count(),
            participants.join("\n")
        );
        true
    }

    /// チャットへ送信する。失敗はログに残してゲーム進行は続ける。
    async fn announce(&self, room_id: &RoomId, text: &str) {
        if let Err(e) = self.chat.send_text(room_id, text).await {
            tracing::warn!(
                "{} Failed to send message to room {}: {}",
                self.log_prefix,
                room_id,
                e
            );
        }
    }
}

/// 監視タスクのスリープ間隔（秒）
///
/// 残りが 30 秒を超える間は 30 秒ごと、それ以降は 10 秒ごと。合計は `total_secs`。
pub fn watchdog_intervals(total_secs: u64) -> Vec<u64> {
    let mut intervals = Vec::new();
    let mut remaining = total_secs;
    while remaining > 0 {
        let step: u64 = if remaining <= 30 { 10 } else { 30 };
        let step = step.min(remaining);
        intervals.push(step);
        remaining -= step;
    }
    intervals
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
