//! Play phase: record match results on a tournament's bracket sheet.

use crate::logic::advancement::{auto_advance_byes, set_winner, Advancement};
use crate::logic::codes::find_match_by_code;
use crate::models::{Entrant, Tournament, TournamentError, TournamentState};

/// Record the winner of one match (InProgress only).
///
/// Byes exposed by the result are resolved straight away. Deciding the final sets the champion
/// and completes the tournament.
pub fn record_match_winner(
    tournament: &mut Tournament,
    round: usize,
    match_index: usize,
    winner: &str,
) -> Result<Advancement, TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    let sheet = tournament
        .sheet
        .as_mut()
        .ok_or(TournamentError::InvalidState)?;

    let advancement = set_winner(
        &mut sheet.bracket,
        &mut sheet.results,
        round,
        match_index,
        winner.trim(),
    )?;
    auto_advance_byes(&mut sheet.bracket, &mut sheet.results);

    if let Some(champion) = sheet.results.champion().and_then(Entrant::team_name) {
        tournament.champion = Some(champion.to_string());
        tournament.state = TournamentState::Completed;
        log::info!("Tournament {} completed: {} wins", tournament.name, champion);
    }
    Ok(advancement)
}

/// Record a winner for the match identified by its code.
pub fn record_winner_by_code(
    tournament: &mut Tournament,
    code: &str,
    winner: &str,
) -> Result<Advancement, TournamentError> {
    let (round, match_index) = tournament
        .sheet
        .as_ref()
        .and_then(|s| find_match_by_code(&s.codes, code))
        .ok_or_else(|| TournamentError::UnknownMatchCode(code.trim().to_string()))?;
    record_match_winner(tournament, round, match_index, winner)
}
