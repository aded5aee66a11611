//! Winner advancement: record a result and move the winner into the next round.

use crate::models::{Bracket, BracketError, Entrant, Results, Side};
use serde::{Deserialize, Serialize};

/// Where a recorded winner went.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advancement {
    /// Winner written into `side` of the given next-round match.
    Advanced {
        round: usize,
        match_index: usize,
        side: Side,
    },
    /// The final was decided.
    Champion(Entrant),
}

/// Record `winner` for a match and advance it.
///
/// Fails without touching either structure if the match does not exist, already has a winner,
/// is still waiting on a previous round, or `winner` is not one of its occupants. A bye can only
/// win a match against another bye.
pub fn set_winner(
    bracket: &mut Bracket,
    results: &mut Results,
    round: usize,
    match_index: usize,
    winner: &str,
) -> Result<Advancement, BracketError> {
    let out_of_range = BracketError::OutOfRange { round, match_index };
    let pairing = bracket.pairing(round, match_index).ok_or(out_of_range.clone())?;
    let recorded = results
        .rounds
        .get(round)
        .and_then(|r| r.get(match_index))
        .ok_or(out_of_range)?;

    if recorded.is_some() {
        return Err(BracketError::AlreadyDecided { round, match_index });
    }
    let (Some(a), Some(b)) = (&pairing.a, &pairing.b) else {
        return Err(BracketError::MatchNotReady { round, match_index });
    };

    let winner = Entrant::from(winner);
    let bye_over_team = winner.is_bye() && !(a.is_bye() && b.is_bye());
    if !pairing.contains(&winner) || bye_over_team {
        return Err(BracketError::InvalidWinner {
            winner: winner.to_string(),
        });
    }

    let next = if round + 1 < bracket.round_count() {
        let next_index = match_index / 2;
        if bracket.pairing(round + 1, next_index).is_none() {
            return Err(BracketError::OutOfRange {
                round: round + 1,
                match_index: next_index,
            });
        }
        Some((next_index, Side::for_match_index(match_index)))
    } else {
        None
    };

    results.rounds[round][match_index] = Some(winner.clone());

    match next {
        Some((next_index, side)) => {
            if let Some(p) = bracket.pairing_mut(round + 1, next_index) {
                *p.slot_mut(side) = Some(winner);
            }
            Ok(Advancement::Advanced {
                round: round + 1,
                match_index: next_index,
                side,
            })
        }
        None => Ok(Advancement::Champion(winner)),
    }
}

/// Resolve every ready, undecided match that holds a bye, round by round.
///
/// The non-bye occupant wins; a double-bye match advances a bye. Walking rounds in order means
/// byes exposed by earlier resolutions are handled in the same call. Returns the number of
/// matches resolved.
pub fn auto_advance_byes(bracket: &mut Bracket, results: &mut Results) -> usize {
    let mut resolved = 0;
    for round in 0..bracket.round_count() {
        for match_index in 0..bracket.rounds[round].len() {
            if results.winner(round, match_index).is_some() {
                continue;
            }
            let pairing = &bracket.rounds[round][match_index];
            if !pairing.is_ready() || !pairing.has_bye() {
                continue;
            }
            let winner = match (&pairing.a, &pairing.b) {
                (Some(Entrant::Team(name)), _) | (_, Some(Entrant::Team(name))) => name.clone(),
                _ => Entrant::Bye.to_string(),
            };
            match set_winner(bracket, results, round, match_index, &winner) {
                Ok(_) => {
                    log::debug!("Bye resolved: round {round}, match {match_index} -> {winner}");
                    resolved += 1;
                }
                Err(e) => log::warn!("Could not resolve bye at round {round}, match {match_index}: {e}"),
            }
        }
    }
    resolved
}
