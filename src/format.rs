//! Message formatting
//!
//! Pure text rendering for event notifications and the pinned leaderboard.
//! Every function either returns the complete message or fails with
//! `FieldMissing`; no partial text is ever produced.

use chrono::{DateTime, Utc};

use crate::diff::RewardShareChange;
use crate::error::{Error, Result};
use crate::types::{Pillar, PillarMap, ZNN_DECIMALS};

/// Right-arrow glyph used in change notifications (U+27A1).
const ARROW: char = '\u{27A1}';

/// Only the top ranks fit the pinned message under Telegram's 4096 character
/// limit.
const LEADERBOARD_CUTOFF: u32 = 70;

pub fn dismantled(pillar: &Pillar) -> Result<String> {
    let name = pillar.require_name("dismantled message")?;
    Ok(format!("Pillar dismantled!\nPillar: {name}"))
}

pub fn created(pillar: &Pillar) -> Result<String> {
    let name = pillar.require_name("created message")?;
    let momentum = pillar.require_momentum_percentage("created message")?;
    let delegate = pillar.require_delegate_percentage("created message")?;
    Ok(format!(
        "New Pillar spawned!\n\
         Say hello to {name}\n\
         Momentum rewards sharing: {momentum}%\n\
         Delegate rewards sharing: {delegate}%\n"
    ))
}

pub fn renamed(old_name: &str, new_name: &str) -> String {
    format!("Pillar name changed!\n{old_name} {ARROW} {new_name}")
}

/// A changed field renders as `old% ➡ new%`, an unchanged one as `old%` alone.
pub fn reward_share_changed(change: &RewardShareChange) -> String {
    let mut m = format!("Pillar: {}\n", change.name);

    match change.momentum.new {
        Some(new) => {
            let old = change.momentum.old;
            m.push_str(&format!("Momentum rewards sharing: {old}% {ARROW} {new}%\n"));
        }
        None => {
            let old = change.momentum.old;
            m.push_str(&format!("Momentum rewards sharing: {old}%\n"));
        }
    }

    match change.delegate.new {
        Some(new) => {
            let old = change.delegate.old;
            m.push_str(&format!("Delegate rewards sharing: {old}% {ARROW} {new}%"));
        }
        None => {
            let old = change.delegate.old;
            m.push_str(&format!("Delegate rewards sharing: {old}%"));
        }
    }

    m
}

/// Render the pinned leaderboard for the current moment.
pub fn leaderboard(pillars: &PillarMap, momentum_height: u64) -> Result<String> {
    leaderboard_at(pillars, momentum_height, Utc::now())
}

/// Leaderboard rendering with an explicit timestamp.
///
/// Rows are ordered by ascending rank and cut off at rank 70; the header only
/// carries the "(top 70)" qualifier when Pillars were actually cut.
pub fn leaderboard_at(
    pillars: &PillarMap,
    momentum_height: u64,
    now: DateTime<Utc>,
) -> Result<String> {
    let mut m = if pillars.len() > LEADERBOARD_CUTOFF as usize {
        String::from("Pillar reward sharing rates (top 70)\n")
    } else {
        String::from("Pillar reward sharing rates\n")
    };
    m.push_str(&format!(
        "Last updated: {} (UTC)\n",
        now.format("%Y-%m-%d %H:%M:%S")
    ));
    m.push_str(&format!("Momentum height: {momentum_height}\n"));
    m.push_str("M = momentum reward sharing %\n");
    m.push_str("D = delegate reward sharing %\n");
    m.push_str("W = Pillar weight (ZNN) \n");
    m.push_str("P/E = produced/expected momentums\n\n");

    let mut ranked: Vec<&Pillar> = pillars.values().collect();
    ranked.sort_by_key(|p| p.rank.unwrap_or(u32::MAX));

    for pillar in ranked {
        let rank = pillar
            .rank
            .ok_or(Error::field_missing("rank", "leaderboard"))?;
        if rank >= LEADERBOARD_CUTOFF {
            continue;
        }

        let name = pillar.require_name("leaderboard")?;
        let momentum = pillar.require_momentum_percentage("leaderboard")?;
        let delegate = pillar.require_delegate_percentage("leaderboard")?;
        let weight = pillar
            .weight
            .ok_or(Error::field_missing("weight", "leaderboard"))?;
        let stats = pillar
            .current_stats
            .as_ref()
            .ok_or(Error::field_missing("currentStats", "leaderboard"))?;
        let produced = stats
            .produced_momentums
            .ok_or(Error::field_missing("producedMomentums", "leaderboard"))?;
        let expected = stats
            .expected_momentums
            .ok_or(Error::field_missing("expectedMomentums", "leaderboard"))?;

        let weight_znn = (weight as f64 / ZNN_DECIMALS as f64).round() as u64;
        m.push_str(&format!(
            "{} - {} -> M: {}% D: {}% W: {} P/E: {}/{}\n",
            rank + 1,
            name,
            momentum,
            delegate,
            weight_znn,
            produced,
            expected
        ));
    }

    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ShareChange;
    use crate::types::PillarStats;
    use chrono::TimeZone;

    fn pillar(rank: u32, name: &str) -> Pillar {
        Pillar {
            owner_address: format!("z1addr{rank:03}"),
            name: Some(name.to_string()),
            give_momentum_reward_percentage: Some(10),
            give_delegate_reward_percentage: Some(50),
            weight: Some(25_000_000_000),
            rank: Some(rank),
            current_stats: Some(PillarStats {
                produced_momentums: Some(42),
                expected_momentums: Some(44),
            }),
        }
    }

    fn map_of(pillars: Vec<Pillar>) -> PillarMap {
        pillars
            .into_iter()
            .map(|p| (p.owner_address.clone(), p))
            .collect()
    }

    #[test]
    fn dismantled_message_body() {
        let p = pillar(0, "Alpha");
        assert_eq!(dismantled(&p).unwrap(), "Pillar dismantled!\nPillar: Alpha");
    }

    #[test]
    fn dismantled_without_name_is_field_missing() {
        let mut p = pillar(0, "Alpha");
        p.name = None;
        assert!(matches!(
            dismantled(&p).unwrap_err(),
            Error::FieldMissing { field: "name", .. }
        ));
    }

    #[test]
    fn created_message_body() {
        let p = pillar(0, "Alpha");
        assert_eq!(
            created(&p).unwrap(),
            "New Pillar spawned!\n\
             Say hello to Alpha\n\
             Momentum rewards sharing: 10%\n\
             Delegate rewards sharing: 50%\n"
        );
    }

    #[test]
    fn renamed_uses_arrow_glyph() {
        assert_eq!(renamed("X", "Y"), "Pillar name changed!\nX \u{27A1} Y");
    }

    #[test]
    fn unchanged_delegate_renders_single_value() {
        let change = RewardShareChange {
            name: "Alpha".to_string(),
            owner_address: "z1a".to_string(),
            momentum: ShareChange { old: 10, new: Some(20) },
            delegate: ShareChange { old: 50, new: None },
        };
        assert_eq!(
            reward_share_changed(&change),
            "Pillar: Alpha\n\
             Momentum rewards sharing: 10% \u{27A1} 20%\n\
             Delegate rewards sharing: 50%"
        );
    }

    #[test]
    fn both_fields_changed_render_arrows() {
        let change = RewardShareChange {
            name: "Alpha".to_string(),
            owner_address: "z1a".to_string(),
            momentum: ShareChange { old: 10, new: Some(0) },
            delegate: ShareChange { old: 50, new: Some(100) },
        };
        assert_eq!(
            reward_share_changed(&change),
            "Pillar: Alpha\n\
             Momentum rewards sharing: 10% \u{27A1} 0%\n\
             Delegate rewards sharing: 50% \u{27A1} 100%"
        );
    }

    #[test]
    fn leaderboard_cuts_at_rank_70_and_qualifies_header() {
        let pillars = map_of((0..75).map(|i| pillar(i, &format!("P{i}"))).collect());
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let text = leaderboard_at(&pillars, 1_000_000, now).unwrap();
        assert!(text.starts_with("Pillar reward sharing rates (top 70)\n"));
        assert!(text.contains("\n70 - P69 ->"));
        assert!(!text.contains("71 - P70"));
        assert_eq!(text.lines().filter(|l| l.contains(" -> ")).count(), 70);
    }

    #[test]
    fn small_leaderboard_has_no_qualifier_and_full_listing() {
        let pillars = map_of((0..10).map(|i| pillar(i, &format!("P{i}"))).collect());
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let text = leaderboard_at(&pillars, 42, now).unwrap();
        assert!(text.starts_with("Pillar reward sharing rates\n"));
        assert!(text.contains("Last updated: 2024-05-01 12:00:00 (UTC)\n"));
        assert!(text.contains("Momentum height: 42\n"));
        assert_eq!(text.lines().filter(|l| l.contains(" -> ")).count(), 10);
    }

    #[test]
    fn rows_are_ordered_by_rank_not_address() {
        // Addresses sort z1addr001 < z1addr002 but ranks are swapped.
        let mut first = pillar(1, "Second");
        first.owner_address = "z1addr001".to_string();
        let mut second = pillar(0, "First");
        second.owner_address = "z1addr002".to_string();
        let pillars = map_of(vec![first, second]);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let text = leaderboard_at(&pillars, 1, now).unwrap();
        let rows: Vec<&str> = text.lines().filter(|l| l.contains(" -> ")).collect();
        assert!(rows[0].starts_with("1 - First"));
        assert!(rows[1].starts_with("2 - Second"));
    }

    #[test]
    fn weight_is_rendered_in_whole_znn() {
        let pillars = map_of(vec![pillar(0, "Alpha")]);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let text = leaderboard_at(&pillars, 1, now).unwrap();
        assert!(text.contains("1 - Alpha -> M: 10% D: 50% W: 250 P/E: 42/44\n"));
    }

    #[test]
    fn leaderboard_legend_block() {
        let pillars = map_of(vec![pillar(0, "Alpha")]);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let text = leaderboard_at(&pillars, 1, now).unwrap();
        assert!(text.contains(
            "M = momentum reward sharing %\n\
             D = delegate reward sharing %\n\
             W = Pillar weight (ZNN) \n\
             P/E = produced/expected momentums\n\n"
        ));
    }

    #[test]
    fn leaderboard_missing_stats_is_field_missing() {
        let mut p = pillar(0, "Alpha");
        p.current_stats = None;
        let pillars = map_of(vec![p]);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert!(matches!(
            leaderboard_at(&pillars, 1, now).unwrap_err(),
            Error::FieldMissing { field: "currentStats", .. }
        ));
    }
}
