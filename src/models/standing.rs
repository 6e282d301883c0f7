//! TeamStanding and the ranked view produced by sorting.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Aggregate statistics for one team across a set of finished matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    /// Slug derived from `name`.
    pub id: String,
    /// Display name; the aggregation key.
    pub name: String,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub map_wins: u64,
    pub map_losses: u64,
    /// Accumulated points after deductions. May go negative.
    pub points: i64,
}

impl TeamStanding {
    /// Create an empty record for the given team name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
            ..Self::default()
        }
    }

    pub fn map_diff(&self) -> i64 {
        let wins = i64::try_from(self.map_wins).unwrap_or(i64::MAX);
        let losses = i64::try_from(self.map_losses).unwrap_or(i64::MAX);
        wins.saturating_sub(losses)
    }

    /// Count one finished match. Totals saturate instead of overflowing.
    pub fn record_match(&mut self, maps_won: u32, maps_lost: u32, points: i64) {
        self.matches = self.matches.saturating_add(1);
        self.map_wins = self.map_wins.saturating_add(u64::from(maps_won));
        self.map_losses = self.map_losses.saturating_add(u64::from(maps_lost));
        self.points = self.points.saturating_add(points);
    }

    pub fn record_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
    }

    pub fn record_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
    }

    pub fn apply_deduction(&mut self, points: i64) {
        self.points = self.points.saturating_sub(points);
    }
}

/// Primary sort key for a standings table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Points,
    MapDiff,
}

/// A standing after sorting: 1-based position and map difference attached.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTeam {
    pub position: usize,
    pub map_diff: i64,
    #[serde(flatten)]
    pub standing: TeamStanding,
}

/// Stable slug id for a team name: lowercase, diacritics stripped,
/// non-alphanumeric runs collapsed to a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in fold(name.trim().chars()) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "team".to_string()
    } else {
        slug
    }
}

/// Case- and accent-insensitive comparison key ("base" sensitivity) in Russian
/// alphabet order: non-letters first, then Cyrillic, then every other script.
pub fn collation_key(name: &str) -> Vec<(u8, char)> {
    let mut key = Vec::with_capacity(name.len());
    for c in name.chars() {
        // Й is a letter of its own, not a decorated И.
        if matches!(c, 'й' | 'Й') {
            key.push((1, 'й'));
            continue;
        }
        key.extend(fold(std::iter::once(c)).map(|f| (script_rank(f), f)));
    }
    key
}

fn script_rank(c: char) -> u8 {
    if !c.is_alphabetic() {
        0
    } else if matches!(c, '\u{0400}'..='\u{052F}') {
        1
    } else {
        2
    }
}

fn fold<I: Iterator<Item = char>>(chars: I) -> impl Iterator<Item = char> {
    chars
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
