//! Single binary web server: serves standings and the playoff bracket as JSON.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Data files: MATCH_RESULTS (default data/match-results.json) and
//! SEASON_CONFIG (default data/season.json, optional). Both are re-read every
//! RELOAD_INTERVAL_SECS (default 300).

use actix_files::Files;
use actix_web::{
    get,
    web::{self, Data, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use esports_season::{
    build_bracket, extract_finished_by_week, loss_groups, standings_table, write_standings_csv,
    ConfigError, MatchResults, PhaseFilter, SeasonConfig, SortBy,
};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;

/// Loaded season data. Every view is recomputed from this on each request.
struct SeasonData {
    results: MatchResults,
    config: SeasonConfig,
    loaded_at: DateTime<Utc>,
}

type AppState = Data<RwLock<SeasonData>>;

/// Where the data lives on disk.
#[derive(Clone)]
struct DataPaths {
    match_results: String,
    season_config: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    loaded_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct StandingsQuery {
    #[serde(default)]
    sort: SortBy,
    #[serde(default)]
    phase: PhaseFilter,
}

#[derive(Deserialize)]
struct PhaseQuery {
    #[serde(default)]
    phase: PhaseFilter,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_reload_interval() -> u64 {
    300
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

async fn load_season(paths: &DataPaths) -> Result<SeasonData, ConfigError> {
    let raw = tokio::fs::read_to_string(&paths.match_results).await?;
    let results = MatchResults::from_json_str(&raw)?;
    let config = match tokio::fs::read_to_string(&paths.season_config).await {
        Ok(raw) => SeasonConfig::from_json_str(&raw)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No season config at {}, using defaults", paths.season_config);
            SeasonConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    Ok(SeasonData {
        results,
        config,
        loaded_at: Utc::now(),
    })
}

macro_rules! read_state {
    ($state:expr) => {
        match $state.read() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        }
    };
}

#[get("/api/health")]
async fn api_health(state: AppState) -> HttpResponse {
    let g = read_state!(state);
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "esports-season",
        loaded_at: g.loaded_at,
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> impl Responder {
    HttpResponse::NoContent().finish()
}

/// Sorted standings with week-over-week position deltas.
#[get("/api/standings")]
async fn api_standings(state: AppState, query: Query<StandingsQuery>) -> HttpResponse {
    let g = read_state!(state);
    HttpResponse::Ok().json(standings_table(&g.results, &g.config, query.sort, query.phase))
}

/// Same table as CSV.
#[get("/api/standings.csv")]
async fn api_standings_csv(state: AppState, query: Query<StandingsQuery>) -> HttpResponse {
    let g = read_state!(state);
    let table = standings_table(&g.results, &g.config, query.sort, query.phase);
    let mut buf = Vec::new();
    match write_standings_csv(&table, &mut buf) {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(buf),
        Err(e) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Swiss-stage tables: teams with 0, 1 and 2 losses.
#[get("/api/standings/loss-groups")]
async fn api_loss_groups(state: AppState, query: Query<PhaseQuery>) -> HttpResponse {
    let g = read_state!(state);
    HttpResponse::Ok().json(loss_groups(&g.results, &g.config, query.phase))
}

/// Finished matches grouped by week.
#[get("/api/weeks")]
async fn api_weeks(state: AppState, query: Query<PhaseQuery>) -> HttpResponse {
    let g = read_state!(state);
    HttpResponse::Ok().json(extract_finished_by_week(&g.results, query.phase))
}

#[get("/api/bracket")]
async fn api_bracket(state: AppState) -> HttpResponse {
    let g = read_state!(state);
    HttpResponse::Ok().json(build_bracket(&g.results, &g.config))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let reload_secs: u64 = std::env::var("RELOAD_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default_reload_interval);
    let paths = DataPaths {
        match_results: env_or("MATCH_RESULTS", "data/match-results.json"),
        season_config: env_or("SEASON_CONFIG", "data/season.json"),
    };

    let season = load_season(&paths).await.map_err(|e| {
        log::error!("Failed to load season data from {}: {}", paths.match_results, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    log::info!(
        "Loaded {} week(s) of match results",
        season.results.weeks().count()
    );
    let state = Data::new(RwLock::new(season));

    // Background task: periodically pick up replaced data files; keep the old data on failure
    let state_reload = state.clone();
    let paths_reload = paths.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(reload_secs.max(1)));
        interval.tick().await;
        loop {
            interval.tick().await;
            match load_season(&paths_reload).await {
                Ok(season) => match state_reload.write() {
                    Ok(mut g) => {
                        *g = season;
                        log::info!("Reloaded season data from {}", paths_reload.match_results);
                    }
                    Err(_) => log::error!("Season data lock poisoned; skipping reload"),
                },
                Err(e) => log::warn!("Reload failed, keeping previous data: {}", e),
            }
        }
    });

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_standings_csv)
            .service(api_loss_groups)
            .service(api_standings)
            .service(api_weeks)
            .service(api_bracket)
            .service(Files::new("/static", "static").show_files_listing())
            .default_service(web::to(|| async {
                HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind(bind)?
    .run()
    .await
}
