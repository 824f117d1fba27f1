//! Russian roulette chat bot.
//!
//! Reads chat events from stdin (one JSON document per line) and writes the
//! resulting chat messages and mute commands to stdout, one JSON document per
//! line. Logs go to stderr.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roulette-bot
//! cargo run --bin roulette-bot -- --config config.toml --log-level DEBUG
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use roulette_bot::{
    config::AppConfig,
    domain::ChatGateway,
    infrastructure::{
        gateway::{StdioGateway, spawn_writer},
        repository::InMemoryGameRepository,
    },
    ui::{Bot, RouletteCommand, shutdown_signal},
    usecase::RoomGameManager,
};
use roulette_shared::{logger::setup_logger, time::SystemClock};
use tokio::{io::BufReader, sync::mpsc};

#[derive(Parser, Debug)]
#[command(name = "roulette-bot")]
#[command(about = "Russian roulette minigame for group chats", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured log level (DEBUG, INFO, WARNING, ERROR)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
        if let Err(e) = config.logging.validate() {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), config.logging.filter_level());

    // Initialize dependencies in order:
    // 1. Outbound writer + gateway
    // 2. Repository
    // 3. RoomGameManager
    // 4. Command + Bot

    // 1. Gateway (stdout JSON Lines)
    let (tx, rx) = mpsc::unbounded_channel();
    let writer = spawn_writer(rx, tokio::io::stdout());
    let gateway = Arc::new(StdioGateway::new(tx));

    // 2. Repository (in-memory store)
    let repository = Arc::new(InMemoryGameRepository::new());

    // 3. RoomGameManager
    let manager = match RoomGameManager::new(
        repository,
        gateway.clone(),
        gateway.clone(),
        config.game_constants.clone(),
    ) {
        Ok(manager) => manager
            .with_pacing(config.pacing.clone())
            .with_log_prefix(config.logging.prefix.clone()),
        Err(e) => {
            tracing::error!("Failed to create game manager: {}", e);
            std::process::exit(1);
        }
    };

    // 4. Command + Bot
    let chat: Arc<dyn ChatGateway> = gateway;
    let command = RouletteCommand::new(
        manager,
        chat,
        Arc::new(SystemClock),
        config.command.trigger.clone(),
    )
    .with_enabled(config.plugin.enabled);
    let bot = Bot::new(Arc::new(command));

    tracing::info!(
        "Roulette bot ready (trigger: '{}', max participants: {}, wait: {} s)",
        config.command.trigger,
        config.game_constants.max_participants,
        config.game_constants.max_wait_time
    );

    let stdin = BufReader::new(tokio::io::stdin());
    match bot.run(stdin, shutdown_signal()).await {
        Ok(handled) => tracing::info!("Handled {} roulette commands", handled),
        Err(e) => {
            tracing::error!("Failed to read chat events: {}", e);
            std::process::exit(1);
        }
    }

    // 監視タスクが送信側を持ち続けるので、書き込みの完了は短時間だけ待つ
    drop(bot);
    if tokio::time::timeout(Duration::from_secs(1), writer)
        .await
        .is_err()
    {
        tracing::debug!("Pending games dropped at shutdown");
    }
    tracing::info!("Bot shutdown complete");
}
