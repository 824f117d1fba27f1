//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RepositoryError;

/// ゲーム参加コマンドのエラー
///
/// どのエラーもコマンド境界で止まり、チャットへの通知に変換される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// チャット情報（ルーム・ユーザー）を取得できなかった
    #[error("Chat context unavailable: {0}")]
    ContextUnavailable(String),

    /// グループチャット以外で実行された
    #[error("The game can only be played in a group chat")]
    WrongVenue,

    /// ストア操作の失敗（想定外）
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
