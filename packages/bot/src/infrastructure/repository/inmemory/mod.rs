//! InMemory 実装

pub mod game;

pub use game::InMemoryGameRepository;
