//! The roulette chat command.
//!
//! Resolves the chat context, checks the venue, and hands the join to the
//! `RoomGameManager`. Every failure ends here as a chat notice.

use std::sync::Arc;

use roulette_shared::time::Clock;

use crate::{
    domain::{ChatContext, ChatGateway, RoomId, RoomType, Timestamp, announcement},
    infrastructure::dto::inbound::ChatEvent,
    usecase::{JoinError, JoinOutcome, RoomGameManager},
};

/// Result of feeding one chat event to the command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not our command (or the plugin is disabled)
    Ignored,
    Handled(JoinOutcome),
    Failed(JoinError),
}

pub struct RouletteCommand {
    manager: RoomGameManager,
    chat: Arc<dyn ChatGateway>,
    clock: Arc<dyn Clock>,
    trigger: String,
    enabled: bool,
}

impl RouletteCommand {
    pub fn new(
        manager: RoomGameManager,
        chat: Arc<dyn ChatGateway>,
        clock: Arc<dyn Clock>,
        trigger: impl Into<String>,
    ) -> Self {
        Self {
            manager,
            chat,
            clock,
            trigger: trigger.into(),
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn manager(&self) -> &RoomGameManager {
        &self.manager
    }

    /// Whether `text` invokes this command. Always false while disabled.
    pub fn matches(&self, text: &str) -> bool {
        self.enabled && text.trim() == self.trigger
    }

    /// Handle one chat event.
    pub async fn execute(&self, event: &ChatEvent) -> CommandOutcome {
        if !self.matches(&event.text) {
            return CommandOutcome::Ignored;
        }

        tracing::info!(
            "Roulette command from user {:?} in room {:?}",
            event.user_id,
            event.room_id
        );
        match self.join(event).await {
            Ok(outcome) => {
                tracing::debug!("Join outcome: {:?}", outcome);
                CommandOutcome::Handled(outcome)
            }
            Err(e) => {
                tracing::warn!("Roulette command failed: {}", e);
                self.notify_failure(event, &e).await;
                CommandOutcome::Failed(e)
            }
        }
    }

    async fn join(&self, event: &ChatEvent) -> Result<JoinOutcome, JoinError> {
        let context = ChatContext::try_from(event)
            .map_err(|e| JoinError::ContextUnavailable(e.to_string()))?;
        if context.room_type != RoomType::Group {
            return Err(JoinError::WrongVenue);
        }

        let now = Timestamp::new(self.clock.now_millis());
        self.manager
            .join(context.room_id, context.user_id, context.user_name, now)
            .await
    }

    async fn notify_failure(&self, event: &ChatEvent, error: &JoinError) {
        // ルームすら分からなければ通知先がない
        let Some(room_id) = event
            .room_id
            .clone()
            .and_then(|id| RoomId::new(id).ok())
        else {
            return;
        };

        let text = match error {
            JoinError::ContextUnavailable(_) => announcement::CONTEXT_UNAVAILABLE.to_string(),
            JoinError::WrongVenue => announcement::WRONG_VENUE.to_string(),
            JoinError::Repository(e) => announcement::command_error(&e.to_string()),
        };
        if let Err(e) = self.chat.send_text(&room_id, &text).await {
            tracing::warn!("Failed to send failure notice to room {}: {}", room_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{GameSettings, PacingSettings},
        domain::{
            GameState, MockChatGateway, MockGameRepository, MockModerationService, Participant,
            RepositoryError, UserId, UserName,
        },
        infrastructure::repository::InMemoryGameRepository,
    };
    use roulette_shared::time::FixedClock;

    fn event(room_type: &str, text: &str) -> ChatEvent {
        ChatEvent {
            room_id: Some("group-1".to_string()),
            room_type: Some(room_type.to_string()),
            user_id: Some("10001".to_string()),
            user_name: Some("alice".to_string()),
            text: text.to_string(),
        }
    }

    fn create_command(chat: MockChatGateway) -> RouletteCommand {
        let chat: Arc<dyn ChatGateway> = Arc::new(chat);
        let manager = RoomGameManager::new(
            Arc::new(InMemoryGameRepository::new()),
            chat.clone(),
            Arc::new(MockModerationService::new()),
            GameSettings::default(),
        )
        .unwrap()
        .with_pacing(PacingSettings::immediate());
        RouletteCommand::new(manager, chat, Arc::new(FixedClock::new(0)), "麦麦开枪")
    }

    #[tokio::test]
    async fn test_other_messages_are_ignored() {
        // テスト項目: トリガー以外のメッセージは無視される
        // given (前提条件):
        let command = create_command(MockChatGateway::new());

        // when (操作):
        let outcome = command.execute(&event("group", "hello")).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_disabled_plugin_ignores_trigger() {
        // テスト項目: プラグインが無効ならトリガーでも無視される
        // given (前提条件):
        let command = create_command(MockChatGateway::new()).with_enabled(false);

        // when (操作):
        let outcome = command.execute(&event("group", "麦麦开枪")).await;

        // then (期待する結果):
        assert_eq!(outcome, CommandOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_private_chat_is_wrong_venue() {
        // テスト項目: プライベートチャットでは WrongVenue となり、案内が送られる
        // given (前提条件):
        let mut chat = MockChatGateway::new();
        chat.expect_send_text()
            .withf(|_, text| text == announcement::WRONG_VENUE)
            .times(1)
            .returning(|_, _| Ok(()));
        let command = create_command(chat);

        // when (操作):
        let outcome = command.execute(&event("private", "麦麦开枪")).await;

        // then (期待する結果): ゲームは作られない
        assert_eq!(outcome, CommandOutcome::Failed(JoinError::WrongVenue));
        assert_eq!(command.manager().active_games().await, 0);
    }

    #[tokio::test]
    async fn test_missing_user_is_context_unavailable() {
        // テスト項目: ユーザー情報がないイベントは ContextUnavailable となる
        // given (前提条件):
        let mut chat = MockChatGateway::new();
        chat.expect_send_text()
            .withf(|_, text| text == announcement::CONTEXT_UNAVAILABLE)
            .times(1)
            .returning(|_, _| Ok(()));
        let command = create_command(chat);
        let event = ChatEvent {
            user_id: None,
            ..event("group", "麦麦开枪")
        };

        // when (操作):
        let outcome = command.execute(&event).await;

        // then (期待する結果):
        assert!(matches!(
            outcome,
            CommandOutcome::Failed(JoinError::ContextUnavailable(_))
        ));
        assert_eq!(command.manager().active_games().await, 0);
    }

    #[tokio::test]
    async fn test_trigger_in_group_starts_game() {
        // テスト項目: グループチャットでのトリガーはゲーム開始になる（前後の空白は無視）
        // given (前提条件):
        let mut chat = MockChatGateway::new();
        chat.expect_send_text().times(2).returning(|_, _| Ok(()));
        let command = create_command(chat);

        // when (操作):
        let outcome = command.execute(&event("group", "  麦麦开枪 ")).await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            CommandOutcome::Handled(JoinOutcome::Started { position: 1, max: 6 })
        );
        assert_eq!(command.manager().active_games().await, 1);
    }

    #[tokio::test]
    async fn test_repository_failure_is_reported_as_error() {
        // テスト項目: 参加者の追加に失敗した場合、エラー内容がチャットに通知される
        // given (前提条件): 進行中のゲームはあるが、参加者の追加が失敗するストア
        let existing = GameState::start(
            RoomId::new("group-1".to_string()).unwrap(),
            Participant::new(
                UserId::new("20002".to_string()).unwrap(),
                UserName::new("bob".to_string()),
            ),
            Timestamp::new(0),
        );
        let mut repository = MockGameRepository::new();
        repository
            .expect_get()
            .returning(move |_| Some(existing.clone()));
        repository
            .expect_add_participant()
            .times(1)
            .returning(|room_id, _| Err(RepositoryError::GameNotFound(room_id.to_string())));
        let expected = announcement::command_error(
            &RepositoryError::GameNotFound("group-1".to_string()).to_string(),
        );
        let mut chat = MockChatGateway::new();
        chat.expect_send_text()
            .withf(move |_, text| text == expected)
            .times(1)
            .returning(|_, _| Ok(()));
        let chat: Arc<dyn ChatGateway> = Arc::new(chat);
        let manager = RoomGameManager::new(
            Arc::new(repository),
            chat.clone(),
            Arc::new(MockModerationService::new()),
            GameSettings::default(),
        )
        .unwrap()
        .with_pacing(PacingSettings::immediate());
        let command =
            RouletteCommand::new(manager, chat, Arc::new(FixedClock::new(0)), "麦麦开枪");

        // when (操作):
        let outcome = command.execute(&event("group", "麦麦开枪")).await;

        // then (期待する結果):
        assert!(matches!(
            outcome,
            CommandOutcome::Failed(JoinError::Repository(RepositoryError::GameNotFound(_)))
        ));
    }
}
