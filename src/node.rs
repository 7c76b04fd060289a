//! Node JSON-RPC client
//!
//! Blocking HTTP client for the two node calls a run needs: the frontier
//! momentum and the full Pillar listing. Any RPC-level error payload is fatal
//! to the run.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{Pillar, PillarMap, PillarSnapshot};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PILLAR_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// The frontier momentum fields the tracker cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct Momentum {
    pub height: u64,
}

#[derive(Debug, Deserialize)]
struct PillarPage {
    count: usize,
    list: Vec<Pillar>,
}

pub struct NodeClient {
    client: Client,
    url: String,
}

impl NodeClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: RpcResponse<T> = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| Error::Fetch(format!("{method}: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Fetch(format!("{method}: {e}")))?
            .json()
            .map_err(|e| Error::Fetch(format!("{method}: invalid response: {e}")))?;

        if let Some(err) = response.error {
            return Err(Error::Fetch(format!(
                "{method}: node error {}: {}",
                err.code, err.message
            )));
        }
        response
            .result
            .ok_or_else(|| Error::Fetch(format!("{method}: empty result")))
    }

    /// Current chain tip.
    pub fn frontier_momentum(&self) -> Result<Momentum> {
        self.call("ledger.getFrontierMomentum", json!([]))
    }

    /// Fetch every Pillar, paging until the reported count is collected.
    pub fn all_pillars(&self) -> Result<PillarSnapshot> {
        let mut pillars = PillarMap::new();
        let mut page = 0u32;

        loop {
            let chunk: PillarPage =
                self.call("embedded.pillar.getAll", json!([page, PILLAR_PAGE_SIZE]))?;
            let fetched = chunk.list.len();

            for pillar in chunk.list {
                pillars.insert(pillar.owner_address.clone(), pillar);
            }

            if pillars.len() >= chunk.count || fetched == 0 {
                break;
            }
            page += 1;
        }

        Ok(PillarSnapshot::new(pillars))
    }
}
