//! Registration phase: registered teams join a tournament's roster.

use crate::models::{TeamRegistry, Tournament, TournamentError};

/// Add a registered team to the tournament (Registration only).
///
/// The roster keeps the registry's spelling of the name.
pub fn join_tournament(
    registry: &TeamRegistry,
    tournament: &mut Tournament,
    team_name: &str,
) -> Result<(), TournamentError> {
    let team = registry
        .get(team_name)
        .ok_or_else(|| TournamentError::TeamNotFound(team_name.trim().to_string()))?;
    tournament.add_team(&team.name)?;
    log::info!("Team {} joined tournament {}", team.name, tournament.name);
    Ok(())
}
