//! Configuration management for the roulette bot.
//!
//! Settings are loaded from a TOML file. Every field has a default, so a
//! missing file or a partial file is fine.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub plugin: PluginSettings,
    pub game_constants: GameSettings,
    pub logging: LoggingSettings,
    pub command: CommandSettings,
    pub pacing: PacingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    pub config_version: String,
    /// When disabled every incoming chat event is ignored
    pub enabled: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            config_version: "1.0.0".to_string(),
            enabled: true,
        }
    }
}

/// Game constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Seconds a round stays open before the watchdog forces a draw
    pub max_wait_time: u64,
    /// Participants needed for an immediate draw (1 = single-player mode)
    pub max_participants: usize,
    /// Shortest mute in seconds
    pub min_mute_time: u32,
    /// Longest mute in seconds
    pub max_mute_time: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_wait_time: 120,
            max_participants: 6,
            min_mute_time: 60,
            max_mute_time: 3600,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_participants == 0 {
            return Err(ConfigError::Invalid(
                "game_constants.max_participants must be at least 1".to_string(),
            ));
        }
        if self.max_wait_time == 0 {
            return Err(ConfigError::Invalid(
                "game_constants.max_wait_time must be greater than 0".to_string(),
            ));
        }
        if self.min_mute_time > self.max_mute_time {
            return Err(ConfigError::Invalid(format!(
                "game_constants.min_mute_time ({}) exceeds max_mute_time ({})",
                self.min_mute_time, self.max_mute_time
            )));
        }
        Ok(())
    }
}

const LOG_LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARNING", "ERROR"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of DEBUG, INFO, WARNING, ERROR
    pub level: String,
    pub prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            prefix: "[russian_roulette]".to_string(),
        }
    }
}

impl LoggingSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if LOG_LEVELS.contains(&self.level.to_uppercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "logging.level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.level
            )))
        }
    }

    /// Level name understood by `tracing_subscriber::EnvFilter`
    pub fn filter_level(&self) -> &'static str {
        match self.level.to_uppercase().as_str() {
            "DEBUG" => "debug",
            "WARNING" => "warn",
            "ERROR" => "error",
            _ => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSettings {
    /// Exact message text that joins the game
    pub trigger: String,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            trigger: "麦麦开枪".to_string(),
        }
    }
}

/// Pauses between announcements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    /// Between the rules message and the first join confirmation
    pub start_notice_delay_ms: u64,
    /// Before the instant draw in single-player mode
    pub single_player_delay_ms: u64,
    /// Between the victim announcement and the mute
    pub suspense_delay_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            start_notice_delay_ms: 500,
            single_player_delay_ms: 1000,
            suspense_delay_ms: 5000,
        }
    }
}

impl PacingSettings {
    /// No pauses at all
    pub fn immediate() -> Self {
        Self {
            start_notice_delay_ms: 0,
            single_player_delay_ms: 0,
            suspense_delay_ms: 0,
        }
    }

    pub fn start_notice_delay(&self) -> Duration {
        Duration::from_millis(self.start_notice_delay_ms)
    }

    pub fn single_player_delay(&self) -> Duration {
        Duration::from_millis(self.single_player_delay_ms)
    }

    pub fn suspense_delay(&self) -> Duration {
        Duration::from_millis(self.suspense_delay_ms)
    }
}

impl AppConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game_constants.validate()?;
        self.logging.validate()?;
        if self.command.trigger.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "command.trigger must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        // テスト項目: 空の設定ファイルではすべてデフォルト値になる
        // given (前提条件):
        let content = "";

        // when (操作):
        let config = AppConfig::from_toml_str(content).unwrap();

        // then (期待する結果):
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.game_constants.max_wait_time, 120);
        assert_eq!(config.game_constants.max_participants, 6);
        assert_eq!(config.game_constants.min_mute_time, 60);
        assert_eq!(config.game_constants.max_mute_time, 3600);
        assert!(config.plugin.enabled);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        // テスト項目: 一部の項目だけ指定した場合、残りはデフォルト値になる
        // given (前提条件):
        let content = r#"
            [game_constants]
            max_participants = 1

            [logging]
            level = "DEBUG"
        "#;

        // when (操作):
        let config = AppConfig::from_toml_str(content).unwrap();

        // then (期待する結果):
        assert_eq!(config.game_constants.max_participants, 1);
        assert_eq!(config.game_constants.max_wait_time, 120);
        assert_eq!(config.logging.filter_level(), "debug");
        assert_eq!(config.logging.prefix, "[russian_roulette]");
    }

    #[test]
    fn test_min_mute_above_max_is_rejected() {
        // テスト項目: 最小禁言時間が最大禁言時間を超える設定はエラーになる
        // given (前提条件):
        let content = r#"
            [game_constants]
            min_mute_time = 100
            max_mute_time = 10
        "#;

        // when (操作):
        let result = AppConfig::from_toml_str(content);

        // then (期待する結果):
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_participants_is_rejected() {
        // テスト項目: 最大参加人数 0 はエラーになる
        // given (前提条件):
        let content = "[game_constants]\nmax_participants = 0\n";

        // when (操作):
        let result = AppConfig::from_toml_str(content);

        // then (期待する結果):
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        // テスト項目: 許可されていないログレベルはエラーになる
        // given (前提条件):
        let content = "[logging]\nlevel = \"TRACE\"\n";

        // when (操作):
        let result = AppConfig::from_toml_str(content);

        // then (期待する結果):
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        // テスト項目: TOML として不正な内容はパースエラーになる
        // given (前提条件):
        let content = "[game_constants\nmax_participants = ";

        // when (操作):
        let result = AppConfig::from_toml_str(content);

        // then (期待する結果):
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        // テスト項目: 設定ファイルが存在しない場合はデフォルト値で起動できる
        // given (前提条件):
        let path = Path::new("/nonexistent/roulette-bot/config.toml");

        // when (操作):
        let config = AppConfig::load(path).unwrap();

        // then (期待する結果):
        assert_eq!(config, AppConfig::default());
    }
}
