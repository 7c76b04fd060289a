//! Run orchestrator
//!
//! One run: fetch the frontier momentum and Pillar set, update the pinned
//! leaderboard, diff against the cached snapshot, deliver one message per
//! event, then persist the fresh snapshot as the new baseline. Any error
//! stops the run before the baseline is advanced; the caller decides process
//! behavior.

use crate::config::Config;
use crate::diff::{self, ChangeEvent};
use crate::error::Result;
use crate::format;
use crate::node::NodeClient;
use crate::store::SnapshotStore;
use crate::telegram::{Notifier, TelegramClient};
use crate::types::PillarSnapshot;

/// Counts for the completion log line.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub pillar_count: usize,
    pub momentum_height: u64,
    pub events_sent: usize,
}

/// Fetch from the node and execute one full tracker run.
pub fn run(config: &Config) -> Result<RunSummary> {
    let node = NodeClient::new(&config.node_url)?;
    let telegram = TelegramClient::new(&config.telegram_bot_api_key)?;
    let store = SnapshotStore::new(&config.cache_file);

    let momentum = node.frontier_momentum()?;
    let current = node.all_pillars()?;

    execute(config, &telegram, &store, momentum.height, current)
}

/// The run body after fetching, separated so the delivery and persistence
/// sequencing is testable without a node.
pub fn execute(
    config: &Config,
    notifier: &dyn Notifier,
    store: &SnapshotStore,
    momentum_height: u64,
    current: PillarSnapshot,
) -> Result<RunSummary> {
    let previous = store.load()?;

    let pinned = format::leaderboard(&current.pillars, momentum_height)?;
    let status = notifier.edit_message(
        &config.telegram_channel_id,
        config.telegram_pinned_message_id,
        &pinned,
    )?;
    tracing::info!("Pinned message updated: {status}");

    let events = diff::diff(previous.as_ref().map(|s| &s.pillars), &current.pillars)?;
    let mut events_sent = 0;
    for event in &events {
        let (text, label) = render(event)?;
        let status = notifier.send_message(&config.telegram_channel_id, &text)?;
        tracing::info!("{label}: {status}");
        events_sent += 1;
    }

    store.save(&current)?;

    Ok(RunSummary {
        pillar_count: current.len(),
        momentum_height,
        events_sent,
    })
}

/// Render one event into its message text plus a delivery log label.
fn render(event: &ChangeEvent) -> Result<(String, String)> {
    match event {
        ChangeEvent::Dismantled(pillar) => {
            let text = format::dismantled(pillar)?;
            let name = pillar.require_name("dismantled message")?;
            Ok((text, format!("Pillar dismantled message sent ({name})")))
        }
        ChangeEvent::Created(pillar) => {
            let text = format::created(pillar)?;
            let name = pillar.require_name("created message")?;
            Ok((text, format!("Pillar created message sent ({name})")))
        }
        ChangeEvent::Renamed { old_name, new_name } => Ok((
            format::renamed(old_name, new_name),
            format!("Pillar name changed message sent ({old_name} -> {new_name})"),
        )),
        ChangeEvent::RewardShareChanged(change) => Ok((
            format::reward_share_changed(change),
            format!("Reward share changed message sent ({})", change.name),
        )),
    }
}
