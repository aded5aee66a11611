//! Integration tests for the tournament lifecycle: registration, start, play, restart.

use league_bracket_web::{
    join_tournament, record_match_winner, record_winner_by_code, restart_tournament,
    start_tournament, start_tournament_with_rng, Advancement, BracketError, Entrant,
    TeamRegistry, Tournament, TournamentError, TournamentState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn started_tournament(n: usize) -> Tournament {
    let mut t = Tournament::with_teams("Cup", (0..n).map(|i| format!("Team {i}"))).unwrap();
    start_tournament_with_rng(&mut t, &mut StdRng::seed_from_u64(n as u64)).unwrap();
    t
}

/// First ready match with no winner yet, as (round, match, slot-A name).
fn next_open_match(t: &Tournament) -> Option<(usize, usize, String)> {
    let sheet = t.sheet.as_ref()?;
    for (round, matches) in sheet.bracket.rounds.iter().enumerate() {
        for (m, pairing) in matches.iter().enumerate() {
            if pairing.is_ready() && sheet.results.winner(round, m).is_none() {
                let a = pairing.a.as_ref()?;
                return Some((round, m, a.as_str().to_string()));
            }
        }
    }
    None
}

fn play_out(t: &mut Tournament) {
    for _ in 0..16 {
        match next_open_match(t) {
            Some((round, m, winner)) => {
                record_match_winner(t, round, m, &winner).unwrap();
            }
            None => break,
        }
    }
}

#[test]
fn registry_rejects_duplicate_and_reserved_names() {
    let mut registry = TeamRegistry::new();
    let team = registry
        .register(" Ice Hawks ", Some("hawk99"), &["Ann".into(), " ".into()])
        .unwrap();
    assert_eq!(team.name, "Ice Hawks");
    assert_eq!(team.players, vec!["Ann".to_string()]);

    assert_eq!(
        registry.register("ice hawks", None, &[]).unwrap_err(),
        TournamentError::DuplicateTeamName("ice hawks".into())
    );
    assert!(matches!(
        registry.register("BYE", None, &[]),
        Err(TournamentError::InvalidTeamName(_))
    ));
    assert!(matches!(
        registry.register("   ", None, &[]),
        Err(TournamentError::InvalidTeamName(_))
    ));
    assert_eq!(registry.teams().len(), 1);
}

#[test]
fn only_registered_teams_can_join() {
    let mut registry = TeamRegistry::new();
    registry.register("Ice Hawks", None, &[]).unwrap();
    let mut t = Tournament::new("Cup", None);

    join_tournament(&registry, &mut t, "ice hawks").unwrap();
    assert_eq!(t.teams, vec!["Ice Hawks".to_string()]);

    assert!(matches!(
        join_tournament(&registry, &mut t, "Ghosts"),
        Err(TournamentError::TeamNotFound(_))
    ));
    assert!(matches!(
        join_tournament(&registry, &mut t, "Ice Hawks"),
        Err(TournamentError::DuplicateTeamName(_))
    ));
}

#[test]
fn roster_is_capped_at_sixteen() {
    let mut t = Tournament::with_teams("Cup", (0..16).map(|i| format!("Team {i}"))).unwrap();
    assert_eq!(
        t.add_team("Late"),
        Err(TournamentError::TournamentFull { max: 16 })
    );
}

#[test]
fn start_needs_two_teams() {
    let mut t = Tournament::with_teams("Cup", ["Solo"]).unwrap();
    assert_eq!(start_tournament(&mut t), Err(TournamentError::NotEnoughTeams));
    assert_eq!(t.state, TournamentState::Registration);
    assert!(t.sheet.is_none());
}

#[test]
fn start_builds_sheet_and_resolves_byes() {
    let t = started_tournament(5);
    assert_eq!(t.state, TournamentState::InProgress);
    let sheet = t.sheet.as_ref().unwrap();
    assert_eq!(sheet.bracket.shape(), vec![4, 2, 1]);
    assert_eq!(sheet.codes.rounds.len(), 3);
    assert_eq!(sheet.results.rounds.len(), 3);
    for (m, pairing) in sheet.bracket.rounds[0].iter().enumerate() {
        assert_eq!(pairing.has_bye(), sheet.results.winner(0, m).is_some());
    }
    assert!(matches!(
        start_tournament(&mut t.clone()),
        Err(TournamentError::InvalidState)
    ));
}

#[test]
fn roster_is_locked_once_started() {
    let mut t = started_tournament(4);
    assert_eq!(t.add_team("Late"), Err(TournamentError::InvalidState));
    assert_eq!(t.remove_team("Team 0"), Err(TournamentError::InvalidState));
}

#[test]
fn playing_every_match_completes_the_tournament() {
    for n in [2, 3, 5, 7, 8, 12, 16] {
        let mut t = started_tournament(n);
        play_out(&mut t);
        assert_eq!(t.state, TournamentState::Completed, "n = {n}");
        let champion = t.champion.clone().unwrap();
        assert!(t.teams.contains(&champion));
        let sheet = t.sheet.as_ref().unwrap();
        assert_eq!(sheet.results.champion(), Some(&Entrant::Team(champion)));
        assert!(matches!(
            record_match_winner(&mut t, 0, 0, "Team 0"),
            Err(TournamentError::InvalidState)
        ));
    }
}

#[test]
fn double_result_is_reported_as_already_decided() {
    let mut t = started_tournament(4);
    let (round, m, winner) = next_open_match(&t).unwrap();
    record_match_winner(&mut t, round, m, &winner).unwrap();
    assert_eq!(
        record_match_winner(&mut t, round, m, &winner),
        Err(TournamentError::Bracket(BracketError::AlreadyDecided {
            round,
            match_index: m
        }))
    );
}

#[test]
fn winner_can_be_recorded_by_match_code() {
    let mut t = started_tournament(4);
    let (round, m, winner) = next_open_match(&t).unwrap();
    let code = t.sheet.as_ref().unwrap().codes.code(round, m).unwrap().to_lowercase();

    let adv = record_winner_by_code(&mut t, &code, &winner).unwrap();
    assert!(matches!(adv, Advancement::Advanced { round: 1, .. }));

    assert_eq!(
        record_winner_by_code(&mut t, "??????", &winner),
        Err(TournamentError::UnknownMatchCode("??????".into()))
    );
}

#[test]
fn restart_discards_bracket_and_keeps_roster() {
    let mut t = started_tournament(6);
    let (round, m, winner) = next_open_match(&t).unwrap();
    record_match_winner(&mut t, round, m, &winner).unwrap();

    restart_tournament(&mut t).unwrap();
    assert_eq!(t.state, TournamentState::Registration);
    assert!(t.sheet.is_none());
    assert_eq!(t.teams.len(), 6);

    t.add_team("Late").unwrap();
    start_tournament(&mut t).unwrap();
    assert_eq!(t.sheet.as_ref().unwrap().bracket.size(), 8);
    assert_eq!(
        restart_tournament(&mut Tournament::new("Fresh", None)),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn remove_team_during_registration() {
    let mut t = Tournament::with_teams("Cup", ["Hawks", "Owls", "Bears"]).unwrap();
    t.remove_team("owls").unwrap();
    assert_eq!(t.teams, vec!["Hawks".to_string(), "Bears".to_string()]);
    assert_eq!(
        t.remove_team("Owls"),
        Err(TournamentError::TeamNotFound("Owls".into()))
    );
}

#[test]
fn initial_roster_is_validated_like_joins() {
    let t = Tournament::with_teams("Cup", [" Hawks ", "Owls"]).unwrap();
    assert_eq!(t.teams, vec!["Hawks".to_string(), "Owls".to_string()]);

    assert_eq!(
        Tournament::with_teams("Cup", ["Hawks", "hawks"]).unwrap_err(),
        TournamentError::DuplicateTeamName("hawks".into())
    );
    assert!(matches!(
        Tournament::with_teams("Cup", ["Hawks", "BYE"]),
        Err(TournamentError::InvalidTeamName(_))
    ));
    assert_eq!(
        Tournament::with_teams("Cup", (0..17).map(|i| format!("Team {i}"))).unwrap_err(),
        TournamentError::TournamentFull { max: 16 }
    );
}
