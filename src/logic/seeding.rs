//! Bracket generation: random seeding, bye padding and round allocation.

use crate::models::{Bracket, BracketError, Entrant, Pairing, BYE, MAX_BRACKET_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Smallest power of two >= `team_count` (at least 2).
pub fn bracket_size(team_count: usize) -> usize {
    team_count.max(2).next_power_of_two()
}

/// Generate a single-elimination bracket with a random seeding order.
pub fn generate_bracket<S: AsRef<str>>(team_names: &[S]) -> Result<Bracket, BracketError> {
    generate_bracket_with_rng(team_names, &mut rand::thread_rng())
}

/// Generate a bracket using the given RNG for the seeding shuffle.
///
/// 1. Validate: 2..=16 names, unique, none equal to `BYE`.
/// 2. Shuffle (Fisher-Yates) and pad with byes to the bracket size.
/// 3. Place alternately from the front and the back of the seed array.
/// 4. Round 0 pairs consecutive seeds; later rounds start empty, halving each time.
pub fn generate_bracket_with_rng<S, R>(team_names: &[S], rng: &mut R) -> Result<Bracket, BracketError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    validate_team_names(team_names)?;

    let size = bracket_size(team_names.len());
    let mut order: Vec<Entrant> = team_names
        .iter()
        .map(|n| Entrant::Team(n.as_ref().to_string()))
        .collect();
    order.shuffle(rng);
    order.resize(size, Entrant::Bye);

    let seeds = place_seeds(order);

    let first_round: Vec<Pairing> = seeds
        .chunks_exact(2)
        .map(|pair| Pairing::new(pair[0].clone(), pair[1].clone()))
        .collect();

    let mut rounds = vec![first_round];
    let mut match_count = size / 2;
    while match_count > 1 {
        match_count /= 2;
        rounds.push(vec![Pairing::default(); match_count]);
    }

    Ok(Bracket { rounds })
}

/// Even positions fill from the front, odd positions from the back.
fn place_seeds(order: Vec<Entrant>) -> Vec<Entrant> {
    let size = order.len();
    let mut seeds = vec![Entrant::Bye; size];
    let mut left = 0;
    let mut right = size;
    for (i, entrant) in order.into_iter().enumerate() {
        if i % 2 == 0 {
            seeds[left] = entrant;
            left += 1;
        } else {
            right -= 1;
            seeds[right] = entrant;
        }
    }
    seeds
}

fn validate_team_names<S: AsRef<str>>(team_names: &[S]) -> Result<(), BracketError> {
    let n = team_names.len();
    if n < 2 {
        return Err(BracketError::InvalidInput(format!(
            "need at least 2 teams, got {n}"
        )));
    }
    if n > MAX_BRACKET_SIZE {
        return Err(BracketError::InvalidInput(format!(
            "at most {MAX_BRACKET_SIZE} teams supported, got {n}"
        )));
    }
    let mut seen = HashSet::with_capacity(n);
    for name in team_names.iter().map(AsRef::as_ref) {
        if name == BYE {
            return Err(BracketError::InvalidInput(format!(
                "{BYE} is reserved and cannot be a team name"
            )));
        }
        if !seen.insert(name) {
            return Err(BracketError::InvalidInput(format!(
                "team {name} listed more than once"
            )));
        }
    }
    Ok(())
}
