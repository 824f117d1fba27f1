//! Infrastructure 層
//!
//! ドメイン層が定義する trait（`GameRepository`, `ChatGateway`, `ModerationService`）の
//! 具体的な実装と、ホストとのやり取りに使う DTO を提供します。

pub mod dto;
pub mod gateway;
pub mod repository;
