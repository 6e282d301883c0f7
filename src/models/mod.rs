//! Data structures for the season: match results, team standings, playoff bracket.

mod bracket;
mod match_result;
mod standing;

pub use bracket::{Bracket, BracketMatch, Participant, Placeholder, SlotId, SlotState};
pub use match_result::{
    Eligibility, FinishedMatch, MatchResult, MatchResults, MatchStatus, Round, Score, Side,
    SkipReason, Teams, Week,
};
pub use standing::{collation_key, slugify, RankedTeam, SortBy, TeamStanding};
