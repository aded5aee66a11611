//! Data structures for the league: bracket sheet, teams, tournaments.

mod bracket;
mod team;
mod tournament;

pub use bracket::{
    BracketError, Bracket, Entrant, MatchCodes, Pairing, Results, Side, BYE, MAX_BRACKET_SIZE,
};
pub use team::{Team, TeamId, TeamRegistry};
pub use tournament::{BracketSheet, Tournament, TournamentError, TournamentId, TournamentState};
