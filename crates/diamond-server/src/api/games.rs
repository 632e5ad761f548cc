// Game endpoints under /api/games.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use diamond_core::model::{Game, GameResult, UpcomingGame};

use super::{ApiError, ApiResponse};
use crate::AppState;

const RECENT_GAMES: usize = 5;

type GameList = Json<ApiResponse<Vec<Game>>>;

/// GET /api/games
pub async fn list_games(State(state): State<AppState>) -> GameList {
    ApiResponse::list(state.dataset.games.clone())
}

/// GET /api/games/:id
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Game>>, ApiError> {
    state
        .dataset
        .game(&id)
        .cloned()
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))
}

/// GET /api/games/schedule/upcoming
pub async fn upcoming_games(State(state): State<AppState>) -> Json<ApiResponse<Vec<UpcomingGame>>> {
    ApiResponse::list(state.dataset.upcoming.clone())
}

/// GET /api/games/result/:result
pub async fn games_by_result(
    State(state): State<AppState>,
    Path(result): Path<String>,
) -> GameList {
    let games = match GameResult::from_str_result(&result) {
        Some(wanted) => state
            .dataset
            .games
            .iter()
            .filter(|g| g.result == wanted)
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    ApiResponse::list(games)
}

/// GET /api/games/recent/last5
pub async fn recent_games(State(state): State<AppState>) -> GameList {
    let games = state
        .dataset
        .recent_games(RECENT_GAMES)
        .into_iter()
        .cloned()
        .collect();
    ApiResponse::list(games)
}

/// GET /api/games/location/:location
pub async fn games_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> GameList {
    let games = state
        .dataset
        .games
        .iter()
        .filter(|g| g.home_away.eq_ignore_ascii_case(location.trim()))
        .cloned()
        .collect();
    ApiResponse::list(games)
}

pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/api/games", get(list_games))
        .route("/api/games/:id", get(get_game))
        .route("/api/games/schedule/upcoming", get(upcoming_games))
        .route("/api/games/result/:result", get(games_by_result))
        .route("/api/games/recent/last5", get(recent_games))
        .route("/api/games/location/:location", get(games_by_location))
}
