//! CSV export of a standings table.

use crate::logic::StandingsTable;
use std::io::Write;

const HEADER: [&str; 10] = [
    "position",
    "delta",
    "team",
    "matches",
    "wins",
    "losses",
    "map_wins",
    "map_losses",
    "map_diff",
    "points",
];

/// Write one header row and one row per team.
pub fn write_standings_csv<W: Write>(table: &StandingsTable, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for row in &table.teams {
        let s = &row.team.standing;
        wtr.write_record([
            row.team.position.to_string(),
            row.position_delta.to_string(),
            s.name.clone(),
            s.matches.to_string(),
            s.wins.to_string(),
            s.losses.to_string(),
            s.map_wins.to_string(),
            s.map_losses.to_string(),
            row.team.map_diff.to_string(),
            s.points.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
