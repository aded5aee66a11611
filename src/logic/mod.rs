//! League business logic: the bracket engine (seeding, advancement, codes) and the
//! tournament phases built on it.

mod advancement;
mod codes;
mod play;
mod registration;
mod seeding;
mod setup;

pub use advancement::{auto_advance_byes, set_winner, Advancement};
pub use codes::{
    find_match_by_code, generate_code, generate_code_with_rng, generate_codes,
    generate_codes_with_rng, CODE_ALPHABET, CODE_LENGTH,
};
pub use play::{record_match_winner, record_winner_by_code};
pub use registration::join_tournament;
pub use seeding::{bracket_size, generate_bracket, generate_bracket_with_rng};
pub use setup::{restart_tournament, start_tournament, start_tournament_with_rng};
