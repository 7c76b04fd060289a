//! Pillar data as returned by the node and cached on disk

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Raw token units per whole ZNN.
pub const ZNN_DECIMALS: u64 = 100_000_000;

/// Momentum production stats for the current epoch window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarStats {
    #[serde(default)]
    pub produced_momentums: Option<u64>,
    #[serde(default)]
    pub expected_momentums: Option<u64>,
}

/// A single Pillar entry.
///
/// `owner_address` is the Pillar's identity across runs; everything else is
/// optional on the wire so one malformed entry surfaces as a per-message
/// `FieldMissing` instead of rejecting the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    pub owner_address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub give_momentum_reward_percentage: Option<u8>,
    #[serde(default)]
    pub give_delegate_reward_percentage: Option<u8>,
    #[serde(default)]
    pub weight: Option<u64>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub current_stats: Option<PillarStats>,
}

impl Pillar {
    pub(crate) fn require_name(&self, context: &'static str) -> Result<&str> {
        self.name
            .as_deref()
            .ok_or(Error::field_missing("name", context))
    }

    pub(crate) fn require_momentum_percentage(&self, context: &'static str) -> Result<u8> {
        self.give_momentum_reward_percentage
            .ok_or(Error::field_missing("giveMomentumRewardPercentage", context))
    }

    pub(crate) fn require_delegate_percentage(&self, context: &'static str) -> Result<u8> {
        self.give_delegate_reward_percentage
            .ok_or(Error::field_missing("giveDelegateRewardPercentage", context))
    }
}

/// All Pillars at one point in time, keyed by owner address.
///
/// Membership is unordered; the leaderboard reconstructs rank order by sorting
/// on `rank` at format time.
pub type PillarMap = BTreeMap<String, Pillar>;

/// The cached snapshot shape, also the node's `getAllPillars` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PillarSnapshot {
    pub pillars: PillarMap,
}

impl PillarSnapshot {
    pub fn new(pillars: PillarMap) -> Self {
        Self { pillars }
    }

    pub fn len(&self) -> usize {
        self.pillars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pillars.is_empty()
    }
}
