//! Bracket, Results and MatchCodes: three structures sharing the same round/match shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest bracket the engine supports (round-0 slots, byes included).
pub const MAX_BRACKET_SIZE: usize = 16;

/// Sentinel used for a bye slot. Reserved: no team may use this name.
pub const BYE: &str = "BYE";

/// Errors raised by the bracket engine. Every failure leaves the inputs untouched.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BracketError {
    /// Bad team list passed to generation (count, duplicates, reserved name).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No match at round {round}, match {match_index}")]
    OutOfRange { round: usize, match_index: usize },
    /// Winner is not one of the two occupants (or a bye named over a real team).
    #[error("{winner} is not a valid winner for this match")]
    InvalidWinner { winner: String },
    #[error("Match at round {round}, match {match_index} already has a winner")]
    AlreadyDecided { round: usize, match_index: usize },
    /// A slot is still waiting on the winner of a previous-round match. Narrower than
    /// `InvalidWinner`: no name can win a match with an empty slot.
    #[error("Match at round {round}, match {match_index} is waiting for a previous result")]
    MatchNotReady { round: usize, match_index: usize },
}

/// Occupant of a filled slot: a real team or a bye.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Entrant {
    Team(String),
    Bye,
}

impl Entrant {
    pub fn is_bye(&self) -> bool {
        matches!(self, Entrant::Bye)
    }

    /// Team name, or `None` for a bye.
    pub fn team_name(&self) -> Option<&str> {
        match self {
            Entrant::Team(name) => Some(name),
            Entrant::Bye => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Entrant::Team(name) => name,
            Entrant::Bye => BYE,
        }
    }
}

impl From<String> for Entrant {
    fn from(s: String) -> Self {
        if s == BYE {
            Entrant::Bye
        } else {
            Entrant::Team(s)
        }
    }
}

impl From<&str> for Entrant {
    fn from(s: &str) -> Self {
        Entrant::from(s.to_string())
    }
}

impl From<Entrant> for String {
    fn from(e: Entrant) -> Self {
        match e {
            Entrant::Team(name) => name,
            Entrant::Bye => BYE.to_string(),
        }
    }
}

impl fmt::Display for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which slot of a pairing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Even match indexes feed slot A of the next round, odd ones slot B.
    pub fn for_match_index(match_index: usize) -> Self {
        if match_index % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }
}

/// One match: two slots, each empty until an entrant is placed or advanced into it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub a: Option<Entrant>,
    pub b: Option<Entrant>,
}

impl Pairing {
    pub fn new(a: Entrant, b: Entrant) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
        }
    }

    /// Both slots populated.
    pub fn is_ready(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    pub fn has_bye(&self) -> bool {
        self.a.as_ref().is_some_and(Entrant::is_bye) || self.b.as_ref().is_some_and(Entrant::is_bye)
    }

    pub fn slot(&self, side: Side) -> Option<&Entrant> {
        match side {
            Side::A => self.a.as_ref(),
            Side::B => self.b.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Option<Entrant> {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// True if `entrant` occupies either slot.
    pub fn contains(&self, entrant: &Entrant) -> bool {
        self.a.as_ref() == Some(entrant) || self.b.as_ref() == Some(entrant)
    }
}

/// Rounds of pairings. Round 0 is the first round; the last round holds the final.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bracket {
    pub rounds: Vec<Vec<Pairing>>,
}

impl Bracket {
    /// Number of round-0 slots, byes included.
    pub fn size(&self) -> usize {
        self.rounds.first().map_or(0, |r| r.len() * 2)
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn pairing(&self, round: usize, match_index: usize) -> Option<&Pairing> {
        self.rounds.get(round).and_then(|r| r.get(match_index))
    }

    pub fn pairing_mut(&mut self, round: usize, match_index: usize) -> Option<&mut Pairing> {
        self.rounds.get_mut(round).and_then(|r| r.get_mut(match_index))
    }

    /// Round-0 occupants in slot order.
    pub fn entrants(&self) -> impl Iterator<Item = &Entrant> + '_ {
        self.rounds
            .first()
            .into_iter()
            .flatten()
            .flat_map(|p| p.a.iter().chain(p.b.iter()))
    }

    /// Match count per round, e.g. `[4, 2, 1]` for an 8-slot bracket.
    pub fn shape(&self) -> Vec<usize> {
        self.rounds.iter().map(Vec::len).collect()
    }
}

/// Recorded winner per match, `None` until decided.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Results {
    pub rounds: Vec<Vec<Option<Entrant>>>,
}

impl Results {
    /// Empty results with the same shape as `bracket`.
    pub fn for_bracket(bracket: &Bracket) -> Self {
        Self {
            rounds: bracket.rounds.iter().map(|r| vec![None; r.len()]).collect(),
        }
    }

    pub fn winner(&self, round: usize, match_index: usize) -> Option<&Entrant> {
        self.rounds
            .get(round)
            .and_then(|r| r.get(match_index))
            .and_then(Option::as_ref)
    }

    /// Winner of the final, once recorded.
    pub fn champion(&self) -> Option<&Entrant> {
        self.rounds
            .last()
            .and_then(|r| r.first())
            .and_then(Option::as_ref)
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }

    /// Number of matches with a recorded winner.
    pub fn decided_count(&self) -> usize {
        self.rounds.iter().flatten().filter(|w| w.is_some()).count()
    }
}

/// Display code per match, generated once when the bracket is created.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchCodes {
    pub rounds: Vec<Vec<String>>,
}

impl MatchCodes {
    pub fn code(&self, round: usize, match_index: usize) -> Option<&str> {
        self.rounds
            .get(round)
            .and_then(|r| r.get(match_index))
            .map(String::as_str)
    }
}
