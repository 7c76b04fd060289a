//! Telegram Bot API client
//!
//! Two calls: one-off event notifications via `sendMessage` and the pinned
//! leaderboard update via `editMessageText`. Both return the HTTP status code
//! so the caller can log delivery; transport failures and non-2xx responses
//! surface as `Delivery` errors.

use reqwest::blocking::Client;
use serde_json::json;
use std::time::Duration;

use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const API_BASE: &str = "https://api.telegram.org";

/// Message delivery seam. The orchestrator only needs these two calls, so
/// tests can substitute a recording stub for the live Bot API.
pub trait Notifier {
    fn send_message(&self, chat_id: &str, text: &str) -> Result<u16>;
    fn edit_message(&self, chat_id: &str, message_id: i64, text: &str) -> Result<u16>;
}

pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(bot_api_key: &str) -> Result<Self> {
        Self::with_base_url(API_BASE, bot_api_key)
    }

    /// Point the client at a different API host (tests).
    pub fn with_base_url(base: &str, bot_api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Delivery(e.to_string()))?;
        Ok(Self {
            client,
            base_url: format!("{base}/bot{bot_api_key}"),
        })
    }

    fn post(&self, method: &str, body: serde_json::Value) -> Result<u16> {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(&body)
            .send()
            .map_err(|e| Error::Delivery(format!("{method}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(Error::Delivery(format!("{method}: {status}: {detail}")));
        }
        Ok(status.as_u16())
    }

}

impl Notifier for TelegramClient {
    /// Send a one-off message to a chat or channel.
    fn send_message(&self, chat_id: &str, text: &str) -> Result<u16> {
        self.post(
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": text,
            }),
        )
    }

    /// Edit an existing message in place.
    fn edit_message(&self, chat_id: &str, message_id: i64, text: &str) -> Result<u16> {
        self.post(
            "editMessageText",
            json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "text": text,
            }),
        )
    }
}
