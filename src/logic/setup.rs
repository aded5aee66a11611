//! Setup phase: start a tournament (generate its bracket sheet) or restart it.

use crate::logic::advancement::auto_advance_byes;
use crate::logic::codes::generate_codes_with_rng;
use crate::logic::seeding::generate_bracket_with_rng;
use crate::models::{BracketSheet, Results, Tournament, TournamentError, TournamentState};
use rand::Rng;

/// Start the tournament: Registration -> InProgress, with a freshly seeded bracket.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    start_tournament_with_rng(tournament, &mut rand::thread_rng())
}

/// Start with the given RNG for seeding and match codes.
///
/// Bracket, results and codes are created together; matches against a bye are resolved
/// immediately so play starts with only real pairings open.
pub fn start_tournament_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Registration {
        return Err(TournamentError::InvalidState);
    }
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }

    let mut bracket = generate_bracket_with_rng(&tournament.teams, rng)?;
    let codes = generate_codes_with_rng(&bracket, rng);
    let mut results = Results::for_bracket(&bracket);
    let byes = auto_advance_byes(&mut bracket, &mut results);

    log::info!(
        "Tournament {} started: {} teams, bracket of {}, {} bye(s) resolved",
        tournament.name,
        tournament.teams.len(),
        bracket.size(),
        byes
    );

    tournament.sheet = Some(BracketSheet {
        bracket,
        results,
        codes,
    });
    tournament.champion = None;
    tournament.state = TournamentState::InProgress;
    Ok(())
}

/// Restart: back to Registration with the same roster. The bracket sheet is discarded.
pub fn restart_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    tournament.sheet = None;
    tournament.champion = None;
    tournament.state = TournamentState::Registration;
    log::info!("Tournament {} restarted", tournament.name);
    Ok(())
}
