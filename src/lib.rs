//! League bracket web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    auto_advance_byes, bracket_size, find_match_by_code, generate_bracket,
    generate_bracket_with_rng, generate_code, generate_code_with_rng, generate_codes,
    generate_codes_with_rng, join_tournament, record_match_winner, record_winner_by_code,
    restart_tournament, set_winner, start_tournament, start_tournament_with_rng, Advancement,
    CODE_ALPHABET, CODE_LENGTH,
};
pub use models::{
    Bracket, BracketError, BracketSheet, Entrant, MatchCodes, Pairing, Results, Side, Team,
    TeamId, TeamRegistry, Tournament, TournamentError, TournamentId, TournamentState, BYE,
    MAX_BRACKET_SIZE,
};
