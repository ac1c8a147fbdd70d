//! Pure functions governing pick ordering, turn computation, and settings
//! validation. No I/O; every function is total over its documented domain.

use crate::errors::{CoreError, CoreResult};
use crate::models::{DraftKind, DraftPick, Settings};

/// Round containing global pick `p`, 1-based, for a league of `team_count` teams.
pub fn round(pick_number: i32, team_count: i32) -> i32 {
    if pick_number <= 0 {
        return 1;
    }
    (pick_number - 1) / team_count + 1
}

/// Position within the round, 1-based.
pub fn round_pick(pick_number: i32, team_count: i32) -> i32 {
    ((pick_number - 1).rem_euclid(team_count)) + 1
}

/// Team slot (1-based) on the clock for global pick `p`.
pub fn team_for_pick(pick_number: i32, kind: DraftKind, team_count: i32) -> i32 {
    let rp = round_pick(pick_number, team_count);
    match kind {
        DraftKind::Linear | DraftKind::Auction => rp,
        DraftKind::Snake => {
            if round(pick_number, team_count) % 2 == 1 {
                rp
            } else {
                team_count - rp + 1
            }
        }
    }
}

/// Whether the team occupying slot `user_slot` is on the clock for this pick.
pub fn is_user_pick(pick_number: i32, user_slot: i32, kind: DraftKind, team_count: i32) -> bool {
    team_for_pick(pick_number, kind, team_count) == user_slot
}

/// A draft with `team_count` teams and `round_count` rounds is complete once
/// the current pick counter reaches the total number of picks.
pub fn is_complete(current_pick: i32, team_count: i32, round_count: i32) -> bool {
    current_pick >= team_count * round_count
}

/// Validates a session's immutable settings against its round count and the
/// draft's team layout. Keeper duplicate-player checking lives on
/// `Settings::new` itself, since it needs no team context; the per-team
/// keeper cap does need `kind`/`team_count` to know which team each keeper
/// seeds onto, so it lives here instead.
pub fn settings_valid(
    settings: &Settings,
    round_count: i32,
    kind: DraftKind,
    team_count: i32,
) -> CoreResult<()> {
    let slots = &settings.roster_slots;
    let total = slots.qb + slots.rb + slots.wr + slots.te + slots.flex + slots.dst + slots.k + slots.bench;
    if total != round_count {
        return Err(CoreError::Validation(format!(
            "roster slots ({total}) must sum to round count ({round_count})"
        )));
    }
    if !(0..=600).contains(&settings.timer_seconds) {
        return Err(CoreError::Validation(
            "timer_seconds must be between 0 and 600".to_string(),
        ));
    }

    let mut per_team = vec![0i32; team_count as usize + 1];
    for (i, _keeper) in settings.keeper_players.iter().enumerate() {
        let pick_number = i as i32 + 1;
        let team = team_for_pick(pick_number, kind, team_count);
        per_team[team as usize] += 1;
        if per_team[team as usize] > round_count {
            return Err(CoreError::Validation(format!(
                "team {team} has more keepers than available rounds ({round_count})"
            )));
        }
    }
    Ok(())
}

/// Generates the synthetic keeper picks seeded at the start of a session.
///
/// Policy (documented open-question decision): keepers are assigned the
/// lowest contiguous pick numbers, one per keeper, in team order starting at
/// pick 1. A team with more than one keeper receives consecutive picks within
/// round 1 in the order its keepers were listed.
pub fn keeper_seed(
    settings: &Settings,
    kind: DraftKind,
    team_count: i32,
    actor: &str,
) -> Vec<DraftPick> {
    let mut picks = Vec::with_capacity(settings.keeper_players.len());
    for (i, keeper) in settings.keeper_players.iter().enumerate() {
        let pick_number = i as i32 + 1;
        let team_number = team_for_pick(pick_number, kind, team_count);
        picks.push(DraftPick::new_keeper(
            pick_number,
            round(pick_number, team_count),
            round_pick(pick_number, team_count),
            team_number,
            keeper.player_id,
            keeper.player_name.clone(),
            keeper.position.clone(),
            actor,
        ));
    }
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RosterSlots, ScoringType};

    #[test]
    fn snake_ordering_matches_scenario_s1() {
        let t = 12;
        assert_eq!(team_for_pick(1, DraftKind::Snake, t), 1);
        assert_eq!(team_for_pick(12, DraftKind::Snake, t), 12);
        assert_eq!(team_for_pick(13, DraftKind::Snake, t), 12);
        assert_eq!(team_for_pick(24, DraftKind::Snake, t), 1);
        assert_eq!(team_for_pick(25, DraftKind::Snake, t), 1);
        assert_eq!(team_for_pick(180, DraftKind::Snake, t), 12);
    }

    #[test]
    fn linear_ordering_repeats_round_pick() {
        let t = 10;
        assert_eq!(team_for_pick(1, DraftKind::Linear, t), 1);
        assert_eq!(team_for_pick(11, DraftKind::Linear, t), 1);
        assert_eq!(team_for_pick(21, DraftKind::Linear, t), 1);
    }

    #[test]
    fn completion_is_inclusive_ge() {
        assert!(!is_complete(179, 12, 15));
        assert!(is_complete(180, 12, 15));
    }

    #[test]
    fn user_pick_sequence_scenario_s2() {
        let t = 12;
        let u = 5;
        for p in [5, 20, 29, 44, 53] {
            assert!(is_user_pick(p, u, DraftKind::Snake, t), "pick {p}");
        }
    }

    fn sample_settings() -> Settings {
        Settings::new(
            ScoringType::Ppr,
            RosterSlots {
                qb: 1,
                rb: 2,
                wr: 2,
                te: 1,
                flex: 1,
                dst: 1,
                k: 1,
                bench: 6,
            },
            60,
            false,
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn settings_valid_checks_slot_sum() {
        let settings = sample_settings();
        assert!(settings_valid(&settings, 15, DraftKind::Snake, 12).is_ok());
        assert!(settings_valid(&settings, 14, DraftKind::Snake, 12).is_err());
    }

    #[test]
    fn settings_valid_rejects_keeper_cap_overrun() {
        use crate::models::KeeperPlayer;
        let keepers: Vec<KeeperPlayer> = (0..3)
            .map(|i| KeeperPlayer {
                player_id: uuid::Uuid::new_v4(),
                player_name: format!("Keeper {i}"),
                position: "RB".to_string(),
            })
            .collect();
        let settings = Settings::new(
            ScoringType::Ppr,
            RosterSlots { qb: 1, rb: 0, wr: 0, te: 0, flex: 0, dst: 0, k: 0, bench: 0 },
            60,
            false,
            keepers,
        )
        .unwrap();

        // 2-team linear draft: keepers at picks 1, 2, 3 assign team 1 to
        // both pick 1 and pick 3, exceeding the 1-round cap.
        assert!(settings_valid(&settings, 1, DraftKind::Linear, 2).is_err());
    }
}
