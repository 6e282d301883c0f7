//! Non-fatal data problems worth reporting upstream.

use crate::models::{MatchResults, SlotId, TeamStanding};
use serde::Serialize;
use std::collections::BTreeMap;

/// Distinct team names that slugify to the same id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SlugCollision {
    pub id: String,
    pub names: Vec<String>,
}

pub fn slug_collisions(standings: &[TeamStanding]) -> Vec<SlugCollision> {
    let mut by_id: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for team in standings {
        by_id.entry(&team.id).or_default().push(team.name.clone());
    }
    by_id
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(id, names)| SlugCollision {
            id: id.to_string(),
            names,
        })
        .collect()
}

/// Playoff match ids (in first-seen order) that name no bracket slot.
pub fn unknown_playoff_ids(results: &MatchResults) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();
    for id in results.matches().filter_map(|m| m.playoff_match_id.as_deref()) {
        if id.parse::<SlotId>().is_err() && !unknown.iter().any(|u| u == id) {
            unknown.push(id.to_string());
        }
    }
    unknown
}
