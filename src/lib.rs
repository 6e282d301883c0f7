//! Esports season backend: qualification standings and the playoff bracket,
//! computed from static match-results data.

pub mod config;
pub mod export;
pub mod logic;
pub mod models;

pub use config::{ConfigError, PointSystem, SeasonConfig};
pub use export::write_standings_csv;
pub use logic::{
    aggregate, build_bracket, build_standings, compare_standings, extract_finished,
    extract_finished_by_week, loss_groups, slug_collisions, sort_teams, standings_table,
    unknown_playoff_ids, Feed, FinishedWeek, LossGroup, PhaseFilter, SlotNode, StandingsTable,
    TableRow, SEED_COUNT, TOPOLOGY,
};
pub use models::{
    slugify, Bracket, BracketMatch, MatchResult, MatchResults, MatchStatus, Participant,
    Placeholder, RankedTeam, Score, Side, SkipReason, SlotId, SlotState, SortBy, TeamStanding,
    Teams, Week,
};
