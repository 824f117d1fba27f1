//! ChatGateway / ModerationService の実装
//!
//! - `stdio`: JSON Lines でホストに送る実装
//! - 将来的に: ホストの HTTP API を直接呼ぶ実装など

pub mod stdio;

pub use stdio::{StdioGateway, spawn_writer};
