//! Match results as published in the season's match-results document.

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Finished,
    Canceled,
    /// Any status string we do not recognise.
    #[serde(other)]
    Unknown,
}

/// One side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Teams {
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub away: String,
}

/// Maps won by each side within a best-of-N series. A missing side counts as 0.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
        }
    }

    pub fn home_maps(&self) -> u32 {
        self.home.unwrap_or(0)
    }

    pub fn away_maps(&self) -> u32 {
        self.away.unwrap_or(0)
    }
}

/// A finished, scheduled or canceled contest between two named teams.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Teams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    /// Authoritative when present; otherwise inferred from the score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    /// Bracket slot this match decides (`G1`, `L3`, `GF`, ...). Absent for qualification matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playoff_match_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_of: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
}

/// Why a match was left out of aggregation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    NotFinished,
    MissingTeams,
    MissingScore,
    EmptyTeamName,
}

/// A match that passed validation: finished, both names non-empty, score present.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinishedMatch<'a> {
    pub home: &'a str,
    pub away: &'a str,
    pub home_maps: u32,
    pub away_maps: u32,
    pub winner: Option<Side>,
    pub playoff_match_id: Option<&'a str>,
}

impl FinishedMatch<'_> {
    /// `(winner, loser)` names, or `None` for a drawn series.
    pub fn outcome(&self) -> Option<(&str, &str)> {
        match self.winner {
            Some(Side::Home) => Some((self.home, self.away)),
            Some(Side::Away) => Some((self.away, self.home)),
            None => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Eligibility<'a> {
    Aggregable(FinishedMatch<'a>),
    Skipped(SkipReason),
}

impl MatchResult {
    /// Classify this match before it reaches the standings engine.
    pub fn classify(&self) -> Eligibility<'_> {
        if self.status != MatchStatus::Finished {
            return Eligibility::Skipped(SkipReason::NotFinished);
        }
        let Some(teams) = &self.teams else {
            return Eligibility::Skipped(SkipReason::MissingTeams);
        };
        let Some(score) = &self.score else {
            return Eligibility::Skipped(SkipReason::MissingScore);
        };
        if teams.home.is_empty() || teams.away.is_empty() {
            return Eligibility::Skipped(SkipReason::EmptyTeamName);
        }
        let home_maps = score.home_maps();
        let away_maps = score.away_maps();
        let winner = self.winner.or_else(|| {
            if home_maps > away_maps {
                Some(Side::Home)
            } else if away_maps > home_maps {
                Some(Side::Away)
            } else {
                None
            }
        });
        Eligibility::Aggregable(FinishedMatch {
            home: &teams.home,
            away: &teams.away,
            home_maps,
            away_maps,
            winner,
            playoff_match_id: self.playoff_match_id.as_deref(),
        })
    }

    /// The validated view of this match, if it can be aggregated.
    pub fn finished(&self) -> Option<FinishedMatch<'_>> {
        match self.classify() {
            Eligibility::Aggregable(m) => Some(m),
            Eligibility::Skipped(_) => None,
        }
    }
}

/// One week of the season with its matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Week {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_matches")]
    pub matches: Vec<MatchResult>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    #[serde(default)]
    pub weeks: Vec<Week>,
}

/// The match-results document: rounds → weeks → matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResults {
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl MatchResults {
    /// Wrap a flat list of matches as a single round with a single week.
    pub fn from_matches(matches: Vec<MatchResult>) -> Self {
        Self {
            rounds: vec![Round {
                weeks: vec![Week {
                    id: None,
                    title: None,
                    matches,
                }],
            }],
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &Week> {
        self.rounds.iter().flat_map(|r| r.weeks.iter())
    }

    /// Every match in document order, regardless of status.
    pub fn matches(&self) -> impl Iterator<Item = &MatchResult> {
        self.weeks().flat_map(|w| w.matches.iter())
    }
}

/// Entries that don't fit `MatchResult` are dropped instead of failing the whole document.
fn lenient_matches<'de, D>(deserializer: D) -> Result<Vec<MatchResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<MatchResult>(value) {
            Ok(m) => Some(m),
            Err(e) => {
                log::debug!("Dropping malformed match entry: {}", e);
                None
            }
        })
        .collect())
}
