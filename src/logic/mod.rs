//! Season business logic: finished-match extraction, standings, tables, playoff bracket.

mod bracket;
mod diagnostics;
mod extract;
mod standings;
mod table;
mod topology;

pub use bracket::build_bracket;
pub use diagnostics::{slug_collisions, unknown_playoff_ids, SlugCollision};
pub use extract::{extract_finished, extract_finished_by_week, FinishedWeek, PhaseFilter};
pub use standings::{aggregate, build_standings, compare_standings, sort_teams};
pub use table::{loss_groups, standings_table, LossGroup, StandingsTable, TableRow, LOSS_GROUPS};
pub use topology::{Feed, SlotNode, SEED_COUNT, TOPOLOGY};
