//! Tournament, TournamentState and the bracket sheet it carries.

use crate::models::bracket::{Bracket, BracketError, MatchCodes, Results, MAX_BRACKET_SIZE};
use crate::models::team::validate_team_name;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    #[error("Invalid state for this action")]
    InvalidState,
    #[error("Need at least 2 teams to start")]
    NotEnoughTeams,
    #[error("Tournament is full ({max} teams)")]
    TournamentFull { max: usize },
    #[error("Team name already registered: {0}")]
    DuplicateTeamName(String),
    #[error("Invalid team name: {0:?}")]
    InvalidTeamName(String),
    #[error("Team not found: {0}")]
    TeamNotFound(String),
    #[error("No match with code {0}")]
    UnknownMatchCode(String),
    #[error(transparent)]
    Bracket(#[from] BracketError),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Teams joining; no bracket yet.
    #[default]
    Registration,
    /// Bracket generated, results being recorded.
    InProgress,
    /// Final decided.
    Completed,
}

/// Bracket, results and match codes, created together and always the same shape.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSheet {
    pub bracket: Bracket,
    pub results: Results,
    pub codes: MatchCodes,
}

/// Full tournament state: roster, phase and (once started) the bracket sheet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// Names of joined teams, in join order.
    pub teams: Vec<String>,
    pub state: TournamentState,
    pub sheet: Option<BracketSheet>,
    pub champion: Option<String>,
}

impl Tournament {
    /// Create a new tournament in Registration state with no teams.
    pub fn new(name: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date,
            created_at: Utc::now(),
            teams: Vec::new(),
            state: TournamentState::Registration,
            sheet: None,
            champion: None,
        }
    }

    /// Create a tournament with an initial roster. Each name goes through `add_team`, so the
    /// roster is trimmed, unique, free of `BYE` and at most 16 long. Still in Registration.
    pub fn with_teams<S: AsRef<str>>(
        name: impl Into<String>,
        teams: impl IntoIterator<Item = S>,
    ) -> Result<Self, TournamentError> {
        let mut tournament = Self::new(name, None);
        for team in teams {
            tournament.add_team(team.as_ref())?;
        }
        Ok(tournament)
    }

    pub fn has_team(&self, name: &str) -> bool {
        let name = name.trim();
        self.teams.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    /// Add a team to the roster (Registration only). Names are unique, case-insensitive.
    pub fn add_team(&mut self, name: &str) -> Result<(), TournamentError> {
        if self.state != TournamentState::Registration {
            return Err(TournamentError::InvalidState);
        }
        let name = validate_team_name(name)?;
        if self.has_team(name) {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        if self.teams.len() >= MAX_BRACKET_SIZE {
            return Err(TournamentError::TournamentFull {
                max: MAX_BRACKET_SIZE,
            });
        }
        self.teams.push(name.to_string());
        Ok(())
    }

    /// Remove a team from the roster (Registration only).
    pub fn remove_team(&mut self, name: &str) -> Result<(), TournamentError> {
        if self.state != TournamentState::Registration {
            return Err(TournamentError::InvalidState);
        }
        let name = name.trim();
        let idx = self
            .teams
            .iter()
            .position(|t| t.eq_ignore_ascii_case(name))
            .ok_or_else(|| TournamentError::TeamNotFound(name.to_string()))?;
        self.teams.remove(idx);
        Ok(())
    }
}
