//! Views over standings for the qualification page: week-over-week table and loss groups.

use crate::config::SeasonConfig;
use crate::logic::extract::{extract_finished_by_week, PhaseFilter};
use crate::logic::standings::{aggregate, build_standings, sort_teams};
use crate::models::{MatchResults, RankedTeam, SortBy};
use serde::Serialize;
use std::collections::HashMap;

/// One row of the standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(flatten)]
    pub team: RankedTeam,
    /// Previous position minus current position: positive means the team climbed.
    pub position_delta: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsTable {
    pub sort_by: SortBy,
    /// Title of the latest week with finished matches.
    pub updated_after: Option<String>,
    pub teams: Vec<TableRow>,
}

/// Sorted standings with the position change since the previous finished week.
pub fn standings_table(
    results: &MatchResults,
    config: &SeasonConfig,
    sort_by: SortBy,
    phase: PhaseFilter,
) -> StandingsTable {
    let weeks = extract_finished_by_week(results, phase);
    let updated_after = weeks.last().and_then(|w| w.title).map(str::to_string);

    let previous: HashMap<String, usize> = match weeks.split_last() {
        Some((_, earlier)) if !earlier.is_empty() => {
            let earlier_matches = earlier.iter().flat_map(|w| w.matches.iter().copied());
            let standings = aggregate(earlier_matches, config);
            sort_teams(&standings, sort_by)
                .into_iter()
                .map(|t| (t.standing.id, t.position))
                .collect()
        }
        _ => HashMap::new(),
    };

    let teams = sort_teams(&build_standings(results, config, phase), sort_by)
        .into_iter()
        .map(|team| {
            let position_delta = previous
                .get(&team.standing.id)
                .map_or(0, |&prev| prev as i64 - team.position as i64);
            TableRow { team, position_delta }
        })
        .collect();

    StandingsTable {
        sort_by,
        updated_after,
        teams,
    }
}

/// Loss counts shown as separate Swiss-stage tables.
pub const LOSS_GROUPS: [u32; 3] = [0, 1, 2];

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LossGroup {
    pub losses: u32,
    pub teams: Vec<RankedTeam>,
}

/// Teams split by loss count (0, 1, 2), each group in points order.
pub fn loss_groups(
    results: &MatchResults,
    config: &SeasonConfig,
    phase: PhaseFilter,
) -> Vec<LossGroup> {
    let ranked = sort_teams(&build_standings(results, config, phase), SortBy::Points);
    LOSS_GROUPS
        .into_iter()
        .map(|losses| LossGroup {
            losses,
            teams: ranked
                .iter()
                .filter(|t| t.standing.losses == losses)
                .cloned()
                .collect(),
        })
        .collect()
}
