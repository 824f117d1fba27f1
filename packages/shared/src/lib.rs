//! Utilities shared by the roulette bot crates.

pub mod logger;
pub mod time;
