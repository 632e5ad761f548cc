// HTTP API handlers.
//
// Every response uses the same envelope: `{"success": true, "data": ...}`
// (plus `count` for lists), or `{"success": false, "error": "..."}`.

pub mod games;
pub mod health;
pub mod players;
pub mod stats;
pub mod team;

use std::any::Any;
use std::cmp::Ordering;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

pub use games::game_routes;
pub use health::health_routes;
pub use players::player_routes;
pub use stats::stats_routes;
pub use team::team_routes;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(ApiResponse {
            success: true,
            data,
            count: None,
        })
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Json<Self> {
        let count = data.len();
        Json(ApiResponse {
            success: true,
            data,
            count: Some(count),
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                error!("internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Fallback for paths no route matches.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Turn a handler panic into a 500 envelope instead of a dropped connection.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("handler panicked: {}", detail);
    ApiError::Internal("Internal server error".to_string()).into_response()
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Stable top-`n` of `ranked` by `key`. Ties keep input order.
pub fn top_n<T, F>(mut ranked: Vec<&T>, n: usize, descending: bool, key: F) -> Vec<&T>
where
    F: Fn(&T) -> f64,
{
    ranked.sort_by(|a, b| {
        let ord = key(*a).partial_cmp(&key(*b)).unwrap_or(Ordering::Equal);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_n_is_stable_and_truncates() {
        let values: Vec<(i32, f64)> = vec![(1, 0.3), (2, 0.5), (3, 0.3), (4, 0.1)];
        let top = top_n(values.iter().collect(), 3, true, |v: &(i32, f64)| v.1);
        let ids: Vec<i32> = top.iter().map(|v| v.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let bottom = top_n(values.iter().collect(), 2, false, |v: &(i32, f64)| v.1);
        let ids: Vec<i32> = bottom.iter().map(|v| v.0).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn list_envelope_carries_count() {
        let Json(body) = ApiResponse::list(vec![1, 2, 3]);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 3);

        let Json(single) = ApiResponse::ok("x");
        let value = serde_json::to_value(&single).unwrap();
        assert!(value.get("count").is_none());
    }
}
