//! Chat-facing layer: command handling and the event loop fed by the host.

mod bot;
mod command;
mod signal;

pub use bot::Bot;
pub use command::{CommandOutcome, RouletteCommand};
pub use signal::shutdown_signal;
