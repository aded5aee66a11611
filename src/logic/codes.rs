//! Match codes: short random display tokens, one per match.

use crate::models::{Bracket, MatchCodes};
use rand::Rng;

/// Uppercase letters and digits without the look-alikes 0/O and 1/I.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const CODE_LENGTH: usize = 6;

pub fn generate_code() -> String {
    generate_code_with_rng(&mut rand::thread_rng())
}

pub fn generate_code_with_rng<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// One code per match, same shape as `bracket`. Codes may collide.
pub fn generate_codes(bracket: &Bracket) -> MatchCodes {
    generate_codes_with_rng(bracket, &mut rand::thread_rng())
}

pub fn generate_codes_with_rng<R: Rng + ?Sized>(bracket: &Bracket, rng: &mut R) -> MatchCodes {
    MatchCodes {
        rounds: bracket
            .rounds
            .iter()
            .map(|r| r.iter().map(|_| generate_code_with_rng(rng)).collect())
            .collect(),
    }
}

/// Find `(round, match_index)` for a code (case-insensitive). First hit wins.
pub fn find_match_by_code(codes: &MatchCodes, code: &str) -> Option<(usize, usize)> {
    let code = code.trim();
    codes.rounds.iter().enumerate().find_map(|(round, r)| {
        r.iter()
            .position(|c| c.eq_ignore_ascii_case(code))
            .map(|match_index| (round, match_index))
    })
}
