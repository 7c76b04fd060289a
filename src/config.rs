//! Tracker configuration file (pillar-tracker.toml)
//!
//! Example:
//!
//! ```toml
//! node_url = "http://127.0.0.1:35997"
//! telegram_bot_api_key = "123456:ABC-DEF"
//! telegram_channel_id = "@pillar_watch"
//! telegram_dev_chat_id = "123456789"
//! telegram_pinned_message_id = 42
//! cache_file = "data_store/pillar_data.json"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

fn default_cache_file() -> PathBuf {
    PathBuf::from("data_store/pillar_data.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP endpoint of the node's JSON-RPC interface.
    pub node_url: String,

    /// Telegram bot token.
    pub telegram_bot_api_key: String,

    /// Channel receiving event notifications and hosting the pinned message.
    pub telegram_channel_id: String,

    /// Optional chat for error reports. Absent means errors are only logged.
    #[serde(default)]
    pub telegram_dev_chat_id: Option<String>,

    /// Message id of the pinned leaderboard message to edit in place.
    pub telegram_pinned_message_id: i64,

    /// Snapshot cache location.
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.node_url.is_empty() {
            return Err(Error::Config("node_url must not be empty".to_string()));
        }
        if self.telegram_bot_api_key.is_empty() {
            return Err(Error::Config(
                "telegram_bot_api_key must not be empty".to_string(),
            ));
        }
        if self.telegram_channel_id.is_empty() {
            return Err(Error::Config(
                "telegram_channel_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Chat to report errors to, if one is configured.
    pub fn dev_chat(&self) -> Option<&str> {
        self.telegram_dev_chat_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}
