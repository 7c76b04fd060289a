//! Pillar Tracker
//!
//! Polls a node for the current Pillar set, diffs it against the locally
//! cached snapshot, and notifies a Telegram channel about creations,
//! dismantlements, renames, and reward share changes. A single pinned message
//! with the current reward sharing leaderboard is edited in place each run.
//!
//! One invocation is one run: fetch, diff, format, notify, persist, exit.
//! Scheduling is left to the caller (cron or similar).

pub mod config;
pub mod diff;
pub mod error;
pub mod format;
pub mod node;
pub mod run;
pub mod store;
pub mod telegram;
pub mod types;

pub use config::Config;
pub use diff::{ChangeEvent, RewardShareChange, ShareChange};
pub use error::{Error, Result};
pub use run::{run, RunSummary};
pub use store::SnapshotStore;
pub use types::{Pillar, PillarMap, PillarSnapshot, PillarStats};
