//! Russian roulette minigame for group chats.
//!
//! Players join a per-room round with a chat command; once the round is full
//! or its wait window runs out, one participant is drawn at random and muted
//! through the host's moderation API.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
