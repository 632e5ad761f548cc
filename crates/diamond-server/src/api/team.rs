// Team endpoints under /api/team.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use diamond_core::model::{PlayerRecord, Position, UpcomingGame};
use serde::Serialize;

use super::players::players_at;
use super::{top_n, ApiResponse};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub team_name: String,
    pub season: String,
    pub record: String,
    pub win_percentage: f64,
    pub total_players: usize,
    pub next_game: Option<UpcomingGame>,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub position: Position,
}

impl From<&PlayerRecord> for RosterEntry {
    fn from(p: &PlayerRecord) -> Self {
        RosterEntry {
            id: p.id.clone(),
            name: p.name.clone(),
            position: p.position,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderEntry {
    pub name: String,
    pub value: f64,
    pub stat: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaders {
    pub batting: Vec<LeaderEntry>,
    pub rbis: Vec<LeaderEntry>,
    pub stolen_bases: Vec<LeaderEntry>,
    pub wins: Vec<LeaderEntry>,
    pub strikeouts: Vec<LeaderEntry>,
}

/// Top `n` players by `key`, keeping only those `keep` accepts.
fn board(
    players: &[PlayerRecord],
    n: usize,
    stat: &'static str,
    keep: impl Fn(&PlayerRecord) -> bool,
    key: impl Fn(&PlayerRecord) -> f64,
) -> Vec<LeaderEntry> {
    let candidates: Vec<&PlayerRecord> = players.iter().filter(|p| keep(*p)).collect();
    top_n(candidates, n, true, &key)
        .into_iter()
        .map(|p| LeaderEntry {
            name: p.name.clone(),
            value: key(p),
            stat,
        })
        .collect()
}

pub fn leaders(players: &[PlayerRecord], n: usize) -> Leaders {
    Leaders {
        batting: board(
            players,
            n,
            "Batting Average",
            |p| p.derived.batting_avg > 0.0,
            |p| p.derived.batting_avg,
        ),
        rbis: board(players, n, "RBIs", |_| true, |p| p.batting.rbis as f64),
        stolen_bases: board(
            players,
            n,
            "Stolen Bases",
            |_| true,
            |p| p.batting.stolen_bases as f64,
        ),
        wins: board(
            players,
            n,
            "Wins",
            |p| p.pitching.wins > 0,
            |p| p.pitching.wins as f64,
        ),
        strikeouts: board(
            players,
            n,
            "Strikeouts",
            |p| p.pitching.strikeouts > 0,
            |p| p.pitching.strikeouts as f64,
        ),
    }
}

/// GET /api/team/overview
pub async fn overview(State(state): State<AppState>) -> Json<ApiResponse<Overview>> {
    let dataset = &state.dataset;
    ApiResponse::ok(Overview {
        team_name: dataset.team_name.clone(),
        season: dataset.team.season.clone(),
        record: dataset.team.record.clone(),
        win_percentage: dataset.team.win_percentage,
        total_players: dataset.players.len(),
        next_game: dataset.upcoming.first().cloned(),
        last_updated: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/team/roster
pub async fn roster(State(state): State<AppState>) -> Json<ApiResponse<Vec<RosterEntry>>> {
    ApiResponse::list(state.dataset.players.iter().map(RosterEntry::from).collect())
}

/// GET /api/team/roster/position/:position
pub async fn roster_by_position(
    State(state): State<AppState>,
    Path(position): Path<String>,
) -> Json<ApiResponse<Vec<RosterEntry>>> {
    let entries = players_at(&state.dataset.players, &position)
        .iter()
        .map(RosterEntry::from)
        .collect();
    ApiResponse::list(entries)
}

/// GET /api/team/schedule
pub async fn schedule(State(state): State<AppState>) -> Json<ApiResponse<Vec<UpcomingGame>>> {
    ApiResponse::list(state.dataset.upcoming.clone())
}

/// GET /api/team/leaders
pub async fn team_leaders(State(state): State<AppState>) -> Json<ApiResponse<Leaders>> {
    ApiResponse::ok(leaders(&state.dataset.players, state.leaders.category))
}

pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/api/team/overview", get(overview))
        .route("/api/team/roster", get(roster))
        .route("/api/team/roster/position/:position", get(roster_by_position))
        .route("/api/team/schedule", get(schedule))
        .route("/api/team/leaders", get(team_leaders))
}
