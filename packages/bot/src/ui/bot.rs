//! Event loop that feeds host chat events to the roulette command.

use std::{future::Future, sync::Arc};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinSet,
};

use crate::infrastructure::dto::inbound::ChatEvent;

use super::command::{CommandOutcome, RouletteCommand};

/// Roulette chat bot
///
/// Reads JSON Lines chat events and handles each one on its own task, so a
/// draw pausing in one room never delays joins in another.
///
/// # Example
///
/// ```ignore
/// let bot = Bot::new(Arc::new(command));
/// let stdin = tokio::io::BufReader::new(tokio::io::stdin());
/// bot.run(stdin, shutdown_signal()).await?;
/// ```
pub struct Bot {
    command: Arc<RouletteCommand>,
}

impl Bot {
    pub fn new(command: Arc<RouletteCommand>) -> Self {
        Self { command }
    }

    /// Run until the input ends or `shutdown` resolves.
    ///
    /// Commands already in flight are awaited before returning. Returns the
    /// number of events that invoked the command.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails.
    pub async fn run<R, S>(&self, reader: R, shutdown: S) -> std::io::Result<usize>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        let mut lines = reader.lines();
        let mut in_flight = JoinSet::new();
        let mut handled = 0;
        tokio::pin!(shutdown);

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, no longer reading events");
                    break;
                }
            };
            let Some(line) = line else {
                tracing::info!("Input closed");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let event: ChatEvent = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Skipping malformed chat event: {}", e);
                    continue;
                }
            };
            if !self.command.matches(&event.text) {
                continue;
            }

            handled += 1;
            let command = self.command.clone();
            in_flight.spawn(async move { command.execute(&event).await });

            // 終わったタスクはこまめに回収する
            while let Some(result) = in_flight.try_join_next() {
                log_task_result(result);
            }
        }

        while let Some(result) = in_flight.join_next().await {
            log_task_result(result);
        }
        Ok(handled)
    }
}

fn log_task_result(result: Result<CommandOutcome, tokio::task::JoinError>) {
    match result {
        Ok(CommandOutcome::Failed(e)) => tracing::debug!("Command finished with error: {}", e),
        Ok(_) => {}
        Err(e) => tracing::error!("Command task panicked: {}", e),
    }
}
