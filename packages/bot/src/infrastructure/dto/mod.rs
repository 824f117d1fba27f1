//! Data Transfer Objects (DTOs) exchanged with the chat host.
//!
//! The host feeds chat events in and receives actions out, one JSON document
//! per line:
//! - `inbound`: chat events
//! - `outbound`: text messages and mute commands

pub mod conversion;
pub mod inbound;
pub mod outbound;
