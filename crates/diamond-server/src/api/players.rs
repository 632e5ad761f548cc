// Player endpoints under /api/players.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use diamond_core::model::{PlayerRecord, Position};

use super::{top_n, ApiError, ApiResponse};
use crate::AppState;

type PlayerList = Json<ApiResponse<Vec<PlayerRecord>>>;

/// Players whose position matches `raw`, either as a code (`P`) or a name
/// (`pitcher`). Unknown positions match nobody.
pub fn players_at(players: &[PlayerRecord], raw: &str) -> Vec<PlayerRecord> {
    match Position::from_str_pos(raw) {
        Some(position) => players
            .iter()
            .filter(|p| p.position == position)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// GET /api/players
pub async fn list_players(State(state): State<AppState>) -> PlayerList {
    ApiResponse::list(state.dataset.players.clone())
}

/// GET /api/players/:id
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlayerRecord>>, ApiError> {
    state
        .dataset
        .player(&id)
        .cloned()
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))
}

/// GET /api/players/position/:position
pub async fn players_by_position(
    State(state): State<AppState>,
    Path(position): Path<String>,
) -> PlayerList {
    ApiResponse::list(players_at(&state.dataset.players, &position))
}

/// GET /api/players/stats/batting-leaders
pub async fn batting_leaders(State(state): State<AppState>) -> PlayerList {
    let hitters = state
        .dataset
        .players
        .iter()
        .filter(|p| p.derived.batting_avg > 0.0)
        .collect();
    let leaders = top_n(hitters, state.leaders.batting, true, |p: &PlayerRecord| {
        p.derived.batting_avg
    });
    ApiResponse::list(leaders.into_iter().cloned().collect())
}

/// GET /api/players/stats/pitching-leaders
///
/// Lowest ERA first. A pitcher with a 0.00 ERA is left out along with
/// everyone who never pitched.
pub async fn pitching_leaders(State(state): State<AppState>) -> PlayerList {
    let pitchers = state
        .dataset
        .players
        .iter()
        .filter(|p| p.derived.era.is_some_and(|era| era > 0.0))
        .collect();
    let leaders = top_n(pitchers, state.leaders.pitching, false, |p: &PlayerRecord| {
        p.derived.era.unwrap_or(0.0)
    });
    ApiResponse::list(leaders.into_iter().cloned().collect())
}

pub fn player_routes() -> Router<AppState> {
    Router::new()
        .route("/api/players", get(list_players))
        .route("/api/players/:id", get(get_player))
        .route("/api/players/position/:position", get(players_by_position))
        .route("/api/players/stats/batting-leaders", get(batting_leaders))
        .route("/api/players/stats/pitching-leaders", get(pitching_leaders))
}
