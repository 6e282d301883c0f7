//! Season configuration: point system and penalty registry, plus JSON loading.

use crate::models::MatchResults;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from loading or validating season data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How points are earned. Exactly one mode is active per season.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PointSystem {
    /// One point per map won.
    #[default]
    MapWins,
    /// Classic series points: a win is worth `points_per_win`, a drawn series
    /// `points_per_draw` to each side.
    #[serde(rename_all = "camelCase")]
    WinDraw {
        points_per_win: i64,
        #[serde(default)]
        points_per_draw: i64,
    },
}

/// Static configuration shipped alongside the match data.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonConfig {
    #[serde(default)]
    pub point_system: PointSystem,
    /// Flat deductions keyed by exact team name.
    #[serde(default)]
    pub point_deductions: BTreeMap<String, i64>,
}

impl SeasonConfig {
    /// Parse and validate a season config document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: SeasonConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_deduction(mut self, team: impl Into<String>, points: i64) -> Self {
        self.point_deductions.insert(team.into(), points);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let PointSystem::WinDraw {
            points_per_win,
            points_per_draw,
        } = self.point_system
        {
            if points_per_win < 0 || points_per_draw < 0 {
                return Err(ConfigError::Invalid(
                    "points per win/draw must not be negative".to_string(),
                ));
            }
            if points_per_draw > points_per_win {
                return Err(ConfigError::Invalid(format!(
                    "a draw ({}) cannot be worth more than a win ({})",
                    points_per_draw, points_per_win
                )));
            }
        }
        if let Some((team, points)) = self.point_deductions.iter().find(|(_, p)| **p < 0) {
            return Err(ConfigError::Invalid(format!(
                "deduction for {} must not be negative (got {})",
                team, points
            )));
        }
        Ok(())
    }
}

impl MatchResults {
    /// Parse a match-results document. Malformed match entries are dropped, not fatal.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}
