//! UseCase 層
//!
//! ルーム単位のゲーム進行（参加・抽選・タイムアウト監視）を実装します。

pub mod error;
pub mod room_game_manager;
pub mod room_lock;

pub use error::JoinError;
pub use room_game_manager::{DrawResult, JoinOutcome, RoomGameManager, watchdog_intervals};
pub use room_lock::RoomLocks;
