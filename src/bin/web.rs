//! Single binary web server: team registry, tournaments and brackets via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, ServiceConfig},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use league_bracket_web::{
    join_tournament, record_match_winner, record_winner_by_code, restart_tournament,
    start_tournament, BracketError, TeamRegistry, Tournament, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory store: the league's team registry plus tournaments by id.
/// Tournaments are removed after `INACTIVITY_TIMEOUT` without requests.
#[derive(Default)]
struct League {
    registry: TeamRegistry,
    tournaments: HashMap<TournamentId, TournamentEntry>,
}

impl League {
    fn insert(&mut self, tournament: Tournament) {
        self.tournaments.insert(
            tournament.id,
            TournamentEntry {
                tournament,
                last_activity: Instant::now(),
            },
        );
    }

    /// Drop tournaments idle for at least `timeout`; returns how many were removed.
    fn evict_inactive(&mut self, timeout: Duration) -> usize {
        let before = self.tournaments.len();
        self.tournaments
            .retain(|_, entry| entry.last_activity.elapsed() < timeout);
        before - self.tournaments.len()
    }
}

type AppState = Data<RwLock<League>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 3600);

/// How often the cleanup task runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
    #[serde(default)]
    gamertag: Option<String>,
    #[serde(default)]
    players: Vec<String>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct JoinTournamentBody {
    team_name: String,
}

#[derive(Deserialize)]
struct SetWinnerBody {
    round: usize,
    match_index: usize,
    winner: String,
}

#[derive(Deserialize)]
struct SetWinnerByCodeBody {
    code: String,
    winner: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team name (e.g. /api/tournaments/{id}/teams/{name})
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    name: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::DuplicateTeamName(_)
        | TournamentError::Bracket(BracketError::AlreadyDecided { .. }) => {
            HttpResponse::Conflict().json(body)
        }
        TournamentError::TeamNotFound(_)
        | TournamentError::UnknownMatchCode(_)
        | TournamentError::Bracket(BracketError::OutOfRange { .. }) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `f` on one tournament under the write lock; respond with the tournament or the error.
fn with_tournament<T>(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&TeamRegistry, &mut Tournament) -> Result<T, TournamentError>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let league = &mut *g;
    let entry = match league.tournaments.get_mut(&id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match f(&league.registry, &mut *t) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => {
            log::warn!("Tournament {} rejected request: {}", id, e);
            error_response(&e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-bracket-web",
    })
}

/// Register a team with the league (409 if the name is taken).
#[post("/api/teams")]
async fn api_register_team(state: AppState, body: Json<RegisterTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g
        .registry
        .register(&body.name, body.gamertag.as_deref(), &body.players)
    {
        Ok(team) => HttpResponse::Created().json(team),
        Err(e) => error_response(&e),
    }
}

#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.registry.teams()),
        Err(_) => lock_error(),
    }
}

#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament name required" }));
    }
    let tournament = Tournament::new(name, body.date);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!("Created tournament {} ({})", tournament.name, tournament.id);
    let response = HttpResponse::Created().json(&tournament);
    g.insert(tournament);
    response
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut list: Vec<&Tournament> = g.tournaments.values().map(|e| &e.tournament).collect();
    list.sort_by_key(|t| t.created_at);
    HttpResponse::Ok().json(list)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, _| Ok(()))
}

/// Delete a tournament outright (any state).
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.tournaments.remove(&path.id) {
        Some(entry) => {
            log::info!("Deleted tournament {} ({})", entry.tournament.name, path.id);
            HttpResponse::NoContent().finish()
        }
        None => no_tournament(),
    }
}

/// Join a registered team to the tournament (Registration only).
#[post("/api/tournaments/{id}/teams")]
async fn api_join_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<JoinTournamentBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |registry, t| {
        join_tournament(registry, t, &body.team_name)
    })
}

/// Take a team off the roster (Registration only).
#[delete("/api/tournaments/{id}/teams/{name}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, t| t.remove_team(&path.name))
}

/// Generate the bracket and start play (Registration -> InProgress).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, t| start_tournament(t))
}

/// Record the winner of a match by round and match index.
#[put("/api/tournaments/{id}/winner")]
async fn api_set_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |_, t| {
        record_match_winner(t, body.round, body.match_index, &body.winner)
    })
}

/// Record the winner of a match identified by its match code.
#[put("/api/tournaments/{id}/winner-by-code")]
async fn api_set_winner_by_code(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetWinnerByCodeBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |_, t| {
        record_winner_by_code(t, &body.code, &body.winner)
    })
}

/// Discard the bracket and reopen registration with the same roster.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, t| restart_tournament(t))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(League::default()));

    // Background task: every 30 minutes, remove tournaments inactive for a week
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = match state_cleanup.write() {
                Ok(mut g) => g.evict_inactive(INACTIVITY_TIMEOUT),
                Err(_) => continue,
            };
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(bind)?
        .run()
        .await
}

fn routes(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_register_team)
        .service(api_list_teams)
        .service(api_create_tournament)
        .service(api_list_tournaments)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_join_tournament)
        .service(api_remove_team)
        .service(api_start_tournament)
        .service(api_set_winner)
        .service(api_set_winner_by_code)
        .service(api_restart_tournament);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, TestRequest};

    fn league_with(tournament: Tournament) -> AppState {
        let mut league = League::default();
        league.insert(tournament);
        Data::new(RwLock::new(league))
    }

    #[actix_web::test]
    async fn delete_team_route_updates_roster() {
        let t = Tournament::with_teams("Cup", ["Hawks", "Owls", "Ice Bears"]).unwrap();
        let id = t.id;
        let state = league_with(t);
        let app = init_service(App::new().app_data(state.clone()).configure(routes)).await;

        let req = TestRequest::delete()
            .uri(&format!("/api/tournaments/{id}/teams/owls"))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

        let req = TestRequest::delete()
            .uri(&format!("/api/tournaments/{id}/teams/Ice%20Bears"))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

        let req = TestRequest::delete()
            .uri(&format!("/api/tournaments/{id}/teams/Owls"))
            .to_request();
        assert_eq!(
            call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let g = state.read().unwrap();
        assert_eq!(g.tournaments[&id].tournament.teams, vec!["Hawks".to_string()]);
    }

    #[actix_web::test]
    async fn delete_team_route_rejects_started_tournament() {
        let mut t = Tournament::with_teams("Cup", ["Hawks", "Owls"]).unwrap();
        start_tournament(&mut t).unwrap();
        let id = t.id;
        let state = league_with(t);
        let app = init_service(App::new().app_data(state.clone()).configure(routes)).await;

        let req = TestRequest::delete()
            .uri(&format!("/api/tournaments/{id}/teams/Owls"))
            .to_request();
        assert_eq!(
            call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(state.read().unwrap().tournaments[&id].tournament.teams.len(), 2);
    }

    #[actix_web::test]
    async fn delete_tournament_route_removes_entry() {
        let t = Tournament::new("Cup", None);
        let id = t.id;
        let state = league_with(t);
        let app = init_service(App::new().app_data(state.clone()).configure(routes)).await;

        let req = TestRequest::delete()
            .uri(&format!("/api/tournaments/{id}"))
            .to_request();
        assert_eq!(
            call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );
        assert!(state.read().unwrap().tournaments.is_empty());

        let req = TestRequest::get()
            .uri(&format!("/api/tournaments/{id}"))
            .to_request();
        assert_eq!(
            call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn idle_tournaments_are_evicted() {
        let mut league = League::default();
        league.insert(Tournament::new("Old", None));
        league.insert(Tournament::new("Older", None));

        assert_eq!(league.evict_inactive(Duration::from_secs(3600)), 0);
        assert_eq!(league.tournaments.len(), 2);

        assert_eq!(league.evict_inactive(Duration::ZERO), 2);
        assert!(league.tournaments.is_empty());
    }
}
