//! Diff-and-classify engine
//!
//! Compares the cached Pillar set against a freshly fetched one and produces
//! classified change events. Four independent passes run in a fixed order:
//! dismantled, created, renamed, reward share changed. Within a pass events
//! follow address order, so a given pair of snapshots always yields the same
//! event sequence.

use crate::error::Result;
use crate::types::{Pillar, PillarMap};

/// One percentage field's transition. `new` is `None` when the field did not
/// change; the old value is always carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareChange {
    pub old: u8,
    pub new: Option<u8>,
}

impl ShareChange {
    fn compare(old: u8, new: u8) -> Self {
        Self {
            old,
            new: (old != new).then_some(new),
        }
    }

    pub fn changed(&self) -> bool {
        self.new.is_some()
    }
}

/// Reward sharing transition for one Pillar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardShareChange {
    pub name: String,
    pub owner_address: String,
    pub momentum: ShareChange,
    pub delegate: ShareChange,
}

/// A classified difference between two snapshots. Produced and consumed within
/// a single run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Dismantled(Pillar),
    Created(Pillar),
    Renamed { old_name: String, new_name: String },
    RewardShareChanged(RewardShareChange),
}

/// Classify the differences between `previous` and `current`.
///
/// `previous == None` means first run: no events, the caller just persists
/// `current` as the new baseline.
///
/// A Pillar counts as dismantled only when the current set is also smaller than
/// the previous one, and as created only when it is larger. A same-size
/// replacement therefore produces neither event; see DESIGN.md.
pub fn diff(previous: Option<&PillarMap>, current: &PillarMap) -> Result<Vec<ChangeEvent>> {
    let Some(previous) = previous else {
        return Ok(Vec::new());
    };

    let mut events = Vec::new();

    // Dismantled: gone from the current set, and the set shrank.
    for (address, pillar) in previous {
        if !current.contains_key(address) && current.len() < previous.len() {
            events.push(ChangeEvent::Dismantled(pillar.clone()));
        }
    }

    // Created: absent from the cached set, and the set grew.
    for (address, pillar) in current {
        if !previous.contains_key(address) && current.len() > previous.len() {
            events.push(ChangeEvent::Created(pillar.clone()));
        }
    }

    // Renamed: same address, different name. Identity is the owner address,
    // so a rename is never a create/dismantle pair.
    for (address, pillar) in current {
        if let Some(cached) = previous.get(address) {
            let old_name = cached.require_name("rename check")?;
            let new_name = pillar.require_name("rename check")?;
            if old_name != new_name {
                events.push(ChangeEvent::Renamed {
                    old_name: old_name.to_string(),
                    new_name: new_name.to_string(),
                });
            }
        }
    }

    // Reward share changes: either percentage differs.
    for (address, pillar) in current {
        if let Some(cached) = previous.get(address) {
            let momentum = ShareChange::compare(
                cached.require_momentum_percentage("reward share check")?,
                pillar.require_momentum_percentage("reward share check")?,
            );
            let delegate = ShareChange::compare(
                cached.require_delegate_percentage("reward share check")?,
                pillar.require_delegate_percentage("reward share check")?,
            );

            if momentum.changed() || delegate.changed() {
                events.push(ChangeEvent::RewardShareChanged(RewardShareChange {
                    name: pillar.require_name("reward share check")?.to_string(),
                    owner_address: address.clone(),
                    momentum,
                    delegate,
                }));
            }
        }
    }

    Ok(events)
}
