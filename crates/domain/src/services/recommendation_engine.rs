use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::errors::CoreResult;
use crate::models::{DraftSession, DraftState, Player, Recommendation};
use crate::repositories::{AdpSource, PlayerCatalog};

const MISSING_ADP: f64 = 200.0;

struct PositionTier {
    elite: f64,
    good: f64,
    avg: f64,
}

fn tier_for(position: &str) -> PositionTier {
    match position {
        "QB" => PositionTier { elite: 300.0, good: 250.0, avg: 200.0 },
        "RB" => PositionTier { elite: 200.0, good: 150.0, avg: 100.0 },
        "WR" => PositionTier { elite: 180.0, good: 140.0, avg: 90.0 },
        "TE" => PositionTier { elite: 140.0, good: 100.0, avg: 60.0 },
        "DST" => PositionTier { elite: 120.0, good: 100.0, avg: 80.0 },
        "K" => PositionTier { elite: 130.0, good: 110.0, avg: 90.0 },
        _ => PositionTier { elite: 150.0, good: 100.0, avg: 50.0 },
    }
}

/// Piecewise-linear projection score: 0-40 below average, 40-65 to good,
/// 65-85 to elite, 85-100 with a capped overshoot above elite.
fn projection_score(position: &str, points: f64) -> f64 {
    let tier = tier_for(position);
    let score = if points <= tier.avg {
        if tier.avg <= 0.0 {
            0.0
        } else {
            40.0 * (points / tier.avg).max(0.0)
        }
    } else if points <= tier.good {
        40.0 + (points - tier.avg) / (tier.good - tier.avg) * 25.0
    } else if points <= tier.elite {
        65.0 + (points - tier.good) / (tier.elite - tier.good) * 20.0
    } else {
        85.0 + ((points - tier.elite) / tier.elite * 15.0).min(15.0)
    };
    score.clamp(0.0, 100.0)
}

struct Required {
    qb: i32,
    rb: i32,
    wr: i32,
    te: i32,
    dst: i32,
    k: i32,
}

fn required_counts(session: &DraftSession) -> Required {
    let slots = &session.settings.roster_slots;
    Required {
        qb: slots.qb,
        rb: slots.rb + slots.flex,
        wr: slots.wr + slots.flex,
        te: slots.te + slots.flex,
        dst: slots.dst,
        k: slots.k,
    }
}

fn required_for(required: &Required, position: &str) -> i32 {
    match position {
        "QB" => required.qb,
        "RB" => required.rb,
        "WR" => required.wr,
        "TE" => required.te,
        "DST" => required.dst,
        "K" => required.k,
        _ => 0,
    }
}

struct StageWeights {
    value: f64,
    projection: f64,
    need: f64,
}

fn stage_weights(current_pick: i32) -> StageWeights {
    if current_pick <= 36 {
        StageWeights { value: 0.4, projection: 0.5, need: 0.1 }
    } else if current_pick <= 96 {
        StageWeights { value: 0.3, projection: 0.4, need: 0.3 }
    } else {
        StageWeights { value: 0.2, projection: 0.3, need: 0.5 }
    }
}

fn position_adjustment(position: &str, current_pick: i32) -> f64 {
    match position {
        "K" | "DST" if current_pick < 100 => 0.3,
        "K" | "DST" if current_pick < 130 => 0.7,
        "RB" | "WR" if current_pick < 50 => 1.1,
        "TE" if current_pick > 30 && current_pick < 80 => 1.15,
        _ => 1.0,
    }
}

fn build_reasoning(
    value_score: f64,
    proj_score: f64,
    need_score: f64,
    adp: f64,
    position: &str,
) -> String {
    let mut phrases = Vec::new();
    if value_score >= 70.0 {
        phrases.push(format!("Excellent value (ADP: {adp:.0})"));
    } else if value_score <= 30.0 {
        phrases.push(format!("Reaching ahead of ADP ({adp:.0})"));
    }
    if need_score >= 60.0 {
        phrases.push("High positional need".to_string());
    }
    if proj_score >= 85.0 {
        phrases.push(format!("Elite {position} projection"));
    } else if proj_score >= 65.0 {
        phrases.push(format!("Strong {position} projection"));
    }
    if phrases.is_empty() {
        phrases.push("Solid value at the current pick".to_string());
    }
    phrases.join(". ")
}

/// Scores and ranks available players for the upcoming pick. Grounded on the
/// teacher's `PlayerScore`/`build_rationale` pattern in `auto_pick.rs`,
/// replacing BPA/strategy weights with value-over-ADP, projection tier, and
/// positional need.
pub struct RecommendationEngine {
    catalog: Arc<dyn PlayerCatalog>,
    adp: Arc<dyn AdpSource>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn PlayerCatalog>, adp: Arc<dyn AdpSource>) -> Self {
        Self { catalog, adp }
    }

    pub async fn recommend(
        &self,
        session: &DraftSession,
        state: &DraftState,
        count: usize,
    ) -> CoreResult<Vec<Recommendation>> {
        let owned_ids = state.rosters.get(&session.user_slot).cloned().unwrap_or_default();

        let mut needed_ids: Vec<Uuid> = state.available.iter().copied().collect();
        needed_ids.extend(owned_ids.iter().copied());
        let players = self.catalog.get_available(&needed_ids).await?;
        let players_by_id: HashMap<Uuid, &Player> = players.iter().map(|p| (p.id, p)).collect();

        let available: Vec<&Player> = players
            .iter()
            .filter(|p| state.available.contains(&p.id))
            .collect();
        let ids: Vec<Uuid> = available.iter().map(|p| p.id).collect();

        let projections = self
            .catalog
            .get_projections(&ids, session.settings.scoring_type)
            .await?;
        let adp_map = self.adp.get_adp(session.settings.scoring_type).await?;

        let current_pick = session.current_pick + 1;
        let weights = stage_weights(current_pick);
        let required = required_counts(session);

        let owned_total = owned_ids.len() as i32;
        let mut owned_by_position: HashMap<&str, i32> = HashMap::new();
        for id in &owned_ids {
            if let Some(player) = players_by_id.get(id) {
                *owned_by_position.entry(player.position.as_str()).or_insert(0) += 1;
            }
        }
        let need_damping = 1.0 - 0.5 * (1.0 - (owned_total as f64 / 15.0)).max(0.0);

        let mut recommendations: Vec<Recommendation> = available
            .into_iter()
            .map(|player| {
                let adp = *adp_map.get(&player.id).unwrap_or(&MISSING_ADP);
                let points = *projections.get(&player.id).unwrap_or(&0.0);

                let v = adp - current_pick as f64;
                let value_score = (50.0 + 2.0 * v).clamp(0.0, 100.0);

                let proj_score = projection_score(&player.position, points);

                let owned = *owned_by_position.get(player.position.as_str()).unwrap_or(&0);
                let req = required_for(&required, &player.position);
                let deficit = (req - owned).max(0);
                let need_raw = if req > 0 {
                    (100.0 * deficit as f64 / req as f64).clamp(0.0, 100.0)
                } else {
                    0.0
                };
                let need_score = (need_raw * need_damping).clamp(0.0, 100.0);

                let mut final_score = value_score * weights.value
                    + proj_score * weights.projection
                    + need_score * weights.need;
                final_score *= position_adjustment(&player.position, current_pick);
                let final_score = final_score.clamp(0.0, 100.0);

                let reasoning =
                    build_reasoning(value_score, proj_score, need_score, adp, &player.position);

                Recommendation {
                    player_id: player.id,
                    name: player.name.clone(),
                    position: player.position.clone(),
                    team: player.team.clone(),
                    score: final_score,
                    value_over_adp: v,
                    need_score,
                    projection_points: points,
                    adp,
                    reasoning,
                }
            })
            .collect();

        // Ties broken by higher projection, then lower ADP.
        recommendations.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap()
                .then_with(|| b.projection_points.partial_cmp(&a.projection_points).unwrap())
                .then_with(|| a.adp.partial_cmp(&b.adp).unwrap())
        });
        recommendations.truncate(count);
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_score_bands() {
        assert_eq!(projection_score("RB", 0.0), 0.0);
        assert!((projection_score("RB", 100.0) - 40.0).abs() < 1e-9);
        assert!((projection_score("RB", 150.0) - 65.0).abs() < 1e-9);
        assert!((projection_score("RB", 200.0) - 85.0).abs() < 1e-9);
        assert!(projection_score("RB", 260.0) > 85.0);
    }

    #[test]
    fn kicker_discounted_early_lifted_late() {
        assert_eq!(position_adjustment("K", 10), 0.3);
        assert_eq!(position_adjustment("K", 110), 0.7);
        assert_eq!(position_adjustment("K", 150), 1.0);
    }

    #[test]
    fn stage_weights_shift_toward_need_late() {
        let early = stage_weights(10);
        let late = stage_weights(150);
        assert!(late.need > early.need);
        assert!(late.value < early.value);
    }
}
