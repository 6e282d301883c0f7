//! Pull finished, aggregable matches out of the match-results document.

use crate::models::{MatchResult, MatchResults};
use serde::{Deserialize, Serialize};

/// Which phase of the season to include.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseFilter {
    /// Only matches without a `playoffMatchId`. Seeding always uses this.
    #[default]
    Qualification,
    All,
}

impl PhaseFilter {
    fn admits(self, m: &MatchResult) -> bool {
        match self {
            PhaseFilter::Qualification => m.playoff_match_id.is_none(),
            PhaseFilter::All => true,
        }
    }
}

/// Finished matches of one week, in document order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FinishedWeek<'a> {
    pub id: Option<&'a str>,
    pub title: Option<&'a str>,
    pub matches: Vec<&'a MatchResult>,
}

/// Finished matches grouped by week. Week order is preserved; weeks left empty are dropped.
pub fn extract_finished_by_week(
    results: &MatchResults,
    filter: PhaseFilter,
) -> Vec<FinishedWeek<'_>> {
    results
        .weeks()
        .map(|week| FinishedWeek {
            id: week.id.as_deref(),
            title: week.title.as_deref(),
            matches: week
                .matches
                .iter()
                .filter(|m| m.finished().is_some() && filter.admits(m))
                .collect(),
        })
        .filter(|week| !week.matches.is_empty())
        .collect()
}

/// All finished matches as one flat sequence.
pub fn extract_finished(results: &MatchResults, filter: PhaseFilter) -> Vec<&MatchResult> {
    extract_finished_by_week(results, filter)
        .into_iter()
        .flat_map(|week| week.matches)
        .collect()
}
