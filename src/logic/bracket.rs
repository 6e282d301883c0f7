//! Playoff bracket: seed from qualification standings, overlay finished playoff
//! matches, derive the remaining participants from the topology.

use crate::config::SeasonConfig;
use crate::logic::diagnostics::unknown_playoff_ids;
use crate::logic::extract::PhaseFilter;
use crate::logic::standings::{build_standings, sort_teams};
use crate::logic::topology::{Feed, SEED_COUNT, TOPOLOGY};
use crate::models::{
    Bracket, BracketMatch, FinishedMatch, MatchResults, Participant, SlotId, SortBy,
};
use std::collections::HashMap;

/// Build the double-elimination bracket.
///
/// 1. Rank qualification matches only (playoff results never affect seeding).
/// 2. With fewer than 8 ranked teams, return the empty skeleton.
/// 3. Attach the first finished match tagged with each slot id.
/// 4. Fill every still-unseeded side from seeding or from its feeder slot's
///    winner/loser, falling back to a `WinnerOf`/`LoserOf` placeholder.
pub fn build_bracket(results: &MatchResults, config: &SeasonConfig) -> Bracket {
    let mut bracket = Bracket::skeleton();

    for id in unknown_playoff_ids(results) {
        log::warn!("Playoff match id {:?} does not match any bracket slot", id);
    }

    let standings = sort_teams(
        &build_standings(results, config, PhaseFilter::Qualification),
        SortBy::Points,
    );
    if standings.len() < SEED_COUNT {
        return bracket;
    }
    let seeds: Vec<&str> = standings
        .iter()
        .take(SEED_COUNT)
        .map(|t| t.standing.name.as_str())
        .collect();

    let played = playoff_matches(results);
    for node in &TOPOLOGY {
        if let Some(m) = played.get(&node.id) {
            apply_result(bracket.slot_mut(node.id), m);
        }
    }

    for node in &TOPOLOGY {
        let top = resolve(&bracket, &seeds, node.top);
        let bottom = resolve(&bracket, &seeds, node.bottom);
        let slot = bracket.slot_mut(node.id);
        if slot.top.is_unseeded() {
            slot.top = top;
        }
        if slot.bottom.is_unseeded() {
            slot.bottom = bottom;
        }
    }

    bracket
}

/// First finished, aggregable match for each known slot id.
fn playoff_matches(results: &MatchResults) -> HashMap<SlotId, FinishedMatch<'_>> {
    let mut by_slot = HashMap::new();
    for m in results.matches().filter_map(|m| m.finished()) {
        let Some(slot) = m.playoff_match_id.and_then(|id| id.parse::<SlotId>().ok()) else {
            continue;
        };
        by_slot.entry(slot).or_insert(m);
    }
    by_slot
}

fn apply_result(slot: &mut BracketMatch, m: &FinishedMatch<'_>) {
    slot.top = Participant::Team(m.home.to_string());
    slot.bottom = Participant::Team(m.away.to_string());
    slot.score = Some(format!("{}:{}", m.home_maps, m.away_maps));
    if let Some((winner, loser)) = m.outcome() {
        slot.winner = Some(winner.to_string());
        slot.loser = Some(loser.to_string());
    }
}

fn resolve(bracket: &Bracket, seeds: &[&str], feed: Feed) -> Participant {
    let resolved = match feed {
        Feed::Seed(rank) => seeds.get(rank).map(|name| name.to_string()),
        Feed::Winner(slot) => bracket.slot(slot).winner.clone(),
        Feed::Loser(slot) => bracket.slot(slot).loser.clone(),
    };
    match resolved {
        Some(name) => Participant::Team(name),
        None => Participant::Placeholder(feed.placeholder()),
    }
}
