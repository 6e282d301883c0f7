//! Standings: aggregate finished matches per team, apply deductions, rank.

use crate::config::{PointSystem, SeasonConfig};
use crate::logic::diagnostics::slug_collisions;
use crate::logic::extract::{extract_finished, PhaseFilter};
use crate::models::{
    collation_key, MatchResult, MatchResults, RankedTeam, Side, SortBy, TeamStanding,
};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Aggregate matches into unordered per-team standings (first-appearance order).
///
/// Matches that are not finished, lack teams or score, or carry an empty team name
/// are skipped. Deductions from `config` are applied once to the final totals.
pub fn aggregate<'a, I>(matches: I, config: &SeasonConfig) -> Vec<TeamStanding>
where
    I: IntoIterator<Item = &'a MatchResult>,
{
    let mut teams: Vec<TeamStanding> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in matches {
        let Some(m) = m.finished() else {
            continue;
        };
        let home = ensure_team(&mut teams, &mut index, m.home);
        let away = ensure_team(&mut teams, &mut index, m.away);

        let (home_points, away_points) = match config.point_system {
            PointSystem::MapWins => (i64::from(m.home_maps), i64::from(m.away_maps)),
            PointSystem::WinDraw {
                points_per_win,
                points_per_draw,
            } => match m.winner {
                Some(Side::Home) => (points_per_win, 0),
                Some(Side::Away) => (0, points_per_win),
                None => (points_per_draw, points_per_draw),
            },
        };

        teams[home].record_match(m.home_maps, m.away_maps, home_points);
        teams[away].record_match(m.away_maps, m.home_maps, away_points);

        match m.winner {
            Some(Side::Home) => {
                teams[home].record_win();
                teams[away].record_loss();
            }
            Some(Side::Away) => {
                teams[away].record_win();
                teams[home].record_loss();
            }
            None => {}
        }
    }

    for team in &mut teams {
        if let Some(deduction) = config.point_deductions.get(&team.name) {
            team.apply_deduction(*deduction);
        }
    }
    teams
}

fn ensure_team(
    teams: &mut Vec<TeamStanding>,
    index: &mut HashMap<String, usize>,
    name: &str,
) -> usize {
    if let Some(&i) = index.get(name) {
        return i;
    }
    teams.push(TeamStanding::new(name));
    index.insert(name.to_string(), teams.len() - 1);
    teams.len() - 1
}

/// Better-first ordering: primary key, the other of points/map diff, map wins, then name.
pub fn compare_standings(a: &TeamStanding, b: &TeamStanding, sort_by: SortBy) -> Ordering {
    let keys = |t: &TeamStanding| match sort_by {
        SortBy::Points => (t.points, t.map_diff()),
        SortBy::MapDiff => (t.map_diff(), t.points),
    };
    keys(b)
        .cmp(&keys(a))
        .then_with(|| b.map_wins.cmp(&a.map_wins))
        .then_with(|| collation_key(&a.name).cmp(&collation_key(&b.name)))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort standings and assign 1-based positions. The input is left untouched.
pub fn sort_teams(standings: &[TeamStanding], sort_by: SortBy) -> Vec<RankedTeam> {
    let mut sorted = standings.to_vec();
    sorted.sort_by(|a, b| compare_standings(a, b, sort_by));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, standing)| RankedTeam {
            position: i + 1,
            map_diff: standing.map_diff(),
            standing,
        })
        .collect()
}

/// Extract, aggregate and report ambiguous team identities.
pub fn build_standings(
    results: &MatchResults,
    config: &SeasonConfig,
    phase: PhaseFilter,
) -> Vec<TeamStanding> {
    let standings = aggregate(extract_finished(results, phase), config);
    for collision in slug_collisions(&standings) {
        log::warn!(
            "Teams {:?} share the id {:?}; position tracking may mix them up",
            collision.names,
            collision.id
        );
    }
    standings
}
