//! Team and the league-wide TeamRegistry.

use crate::models::bracket::BYE;
use crate::models::tournament::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registered team.
pub type TeamId = Uuid;

/// A registered team: its name is what the bracket engine sees.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Captain's gamertag, if given at registration.
    pub gamertag: Option<String>,
    pub players: Vec<String>,
    pub registered_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: impl Into<String>, gamertag: Option<String>, players: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            gamertag,
            players,
            registered_at: Utc::now(),
        }
    }
}

/// All teams known to the league. Names are unique (case-insensitive).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team. Name is trimmed; blank players are dropped.
    pub fn register(
        &mut self,
        name: &str,
        gamertag: Option<&str>,
        players: &[String],
    ) -> Result<&Team, TournamentError> {
        let name = validate_team_name(name)?;
        if self.get(name).is_some() {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        let gamertag = gamertag
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);
        let players = players
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        self.teams.push(Team::new(name, gamertag, players));
        log::info!("Registered team {name}");
        Ok(&self.teams[self.teams.len() - 1])
    }

    /// Look up a team by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Team> {
        let name = name.trim();
        self.teams.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }
}

/// Trimmed, non-empty and not the bye sentinel.
pub(crate) fn validate_team_name(name: &str) -> Result<&str, TournamentError> {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case(BYE) {
        return Err(TournamentError::InvalidTeamName(name.to_string()));
    }
    Ok(name)
}
