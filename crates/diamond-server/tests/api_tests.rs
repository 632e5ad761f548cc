use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use diamond_core::config::LeadersConfig;
use diamond_core::model::TeamAggregate;
use diamond_server::dataset::Dataset;
use diamond_server::{build_router, AppState};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

fn sample_app() -> axum::Router {
    let dataset = Dataset::sample("Lady Eagles Softball", "2025").unwrap();
    build_router(AppState::new(dataset, LeadersConfig::default()))
}

fn empty_app() -> axum::Router {
    let dataset = Dataset {
        team_name: "Lady Eagles Softball".to_string(),
        players: Vec::new(),
        team: TeamAggregate::empty("2025"),
        games: Vec::new(),
        upcoming: Vec::new(),
    };
    build_router(AppState::new(dataset, LeadersConfig::default()))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn names(data: &Value) -> Vec<String> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Health / fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_endpoint() {
    let (status, body) = get(sample_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "diamond-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404_envelope() {
    let (status, body) = get(sample_app(), "/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Route not found");
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_players_with_count() {
    let (status, body) = get(sample_app(), "/api/players").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 9);
    assert_eq!(body["data"][0]["name"], "Sarah Johnson");
    assert_eq!(body["data"][0]["position"], "P");
}

#[tokio::test]
async fn get_player_by_id() {
    let (status, body) = get(sample_app(), "/api/players/player-emily-rodriguez").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Emily Rodriguez");
    assert_eq!(body["data"]["position"], "C");
    assert!(body["data"]["derived"]["era"].is_null());
    assert!(body.get("count").is_none());
}

#[tokio::test]
async fn unknown_player_is_404() {
    let (status, body) = get(sample_app(), "/api/players/player-nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Player not found");
}

#[tokio::test]
async fn players_by_position_accepts_code_or_name() {
    let (_, by_code) = get(sample_app(), "/api/players/position/p").await;
    let (_, by_name) = get(sample_app(), "/api/players/position/Pitcher").await;
    assert_eq!(by_code["count"], 2);
    assert_eq!(names(&by_code["data"]), names(&by_name["data"]));

    let (status, unknown) = get(sample_app(), "/api/players/position/shortstop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown["count"], 0);
}

#[tokio::test]
async fn batting_leaders_top_five() {
    let (_, body) = get(sample_app(), "/api/players/stats/batting-leaders").await;
    assert_eq!(
        names(&body["data"]),
        vec![
            "Casey Brown",
            "Emily Rodriguez",
            "Jordan Williams",
            "Sarah Johnson",
            "Quinn Anderson"
        ]
    );
}

#[tokio::test]
async fn pitching_leaders_lowest_era_first() {
    let (_, body) = get(sample_app(), "/api/players/stats/pitching-leaders").await;
    assert_eq!(names(&body["data"]), vec!["Sarah Johnson", "Maya Thompson"]);
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[tokio::test]
async fn games_list_and_lookup() {
    let (_, body) = get(sample_app(), "/api/games").await;
    assert_eq!(body["count"], 10);

    let (status, game) = get(sample_app(), "/api/games/game-2025-03-15-riverside-high").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["data"]["result"], "W");
    assert_eq!(game["data"]["score"], "8-3");
    assert_eq!(game["data"]["homeAway"], "Home");

    let (status, _) = get(sample_app(), "/api/games/game-1999-01-01-nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn games_by_result_and_location() {
    let (_, losses) = get(sample_app(), "/api/games/result/l").await;
    assert_eq!(losses["count"], 2);

    let (_, home) = get(sample_app(), "/api/games/location/HOME").await;
    assert_eq!(home["count"], 5);
}

#[tokio::test]
async fn recent_games_newest_first() {
    let (_, body) = get(sample_app(), "/api/games/recent/last5").await;
    let dates: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2025-04-16", "2025-04-12", "2025-04-09", "2025-04-05", "2025-04-02"]
    );
}

#[tokio::test]
async fn upcoming_schedule() {
    let (_, body) = get(sample_app(), "/api/games/schedule/upcoming").await;
    assert_eq!(body["count"], 5);
    assert_eq!(body["data"][0]["opponent"], "Madison High");
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn team_stats_aggregate() {
    let (_, body) = get(sample_app(), "/api/stats/team").await;
    assert_eq!(body["data"]["record"], "14-4");
    assert_eq!(body["data"]["season"], "2025");
    assert_eq!(body["data"]["runsAllowed"], 0);
}

#[tokio::test]
async fn trends_over_last_five_games() {
    let (_, body) = get(sample_app(), "/api/stats/trends").await;
    let data = &body["data"];
    assert_eq!(data["recentRecord"], "4-1");
    assert!((data["averageRunsScored"].as_f64().unwrap() - 7.2).abs() < 1e-9);
    assert!((data["averageRunsAllowed"].as_f64().unwrap() - 3.4).abs() < 1e-9);
    assert_eq!(data["recentGames"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn advanced_stats_leaderboard() {
    let (_, body) = get(sample_app(), "/api/stats/advanced").await;
    let data = &body["data"];
    assert_eq!(data["team"]["playerCount"], 9);

    let wars: Vec<f64> = data["leaderboard"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["war"].as_f64().unwrap())
        .collect();
    assert_eq!(wars.len(), 9);
    assert!(wars.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn empty_dataset_has_null_leaders_and_zero_trends() {
    let (_, batting) = get(empty_app(), "/api/stats/batting").await;
    assert!(batting["data"]["topHitter"].is_null());

    let (_, pitching) = get(empty_app(), "/api/stats/pitching").await;
    assert!(pitching["data"]["topPitcher"].is_null());

    let (_, trends) = get(empty_app(), "/api/stats/trends").await;
    assert_eq!(trends["data"]["recentRecord"], "0-0");
    assert_eq!(trends["data"]["averageRunsScored"], 0.0);

    let (_, advanced) = get(empty_app(), "/api/stats/advanced").await;
    assert!(advanced["data"]["team"].is_null());
}

#[tokio::test]
async fn season_and_fielding_summaries() {
    let (_, season) = get(sample_app(), "/api/stats/season-summary").await;
    assert_eq!(season["data"]["record"], "14-4");
    assert_eq!(season["data"]["gamesPlayed"], 20);

    let (_, fielding) = get(sample_app(), "/api/stats/fielding").await;
    assert_eq!(fielding["data"]["totalErrors"], 22);
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

#[tokio::test]
async fn team_overview_and_roster() {
    let (_, overview) = get(sample_app(), "/api/team/overview").await;
    assert_eq!(overview["data"]["teamName"], "Lady Eagles Softball");
    assert_eq!(overview["data"]["totalPlayers"], 9);
    assert_eq!(overview["data"]["nextGame"]["opponent"], "Madison High");

    let (_, roster) = get(sample_app(), "/api/team/roster").await;
    assert_eq!(roster["count"], 9);
    assert_eq!(roster["data"][1]["id"], "player-emily-rodriguez");

    let (_, catchers) = get(sample_app(), "/api/team/roster/position/C").await;
    assert_eq!(names(&catchers["data"]), vec!["Emily Rodriguez"]);
}

#[tokio::test]
async fn team_leaders_and_schedule() {
    let (_, leaders) = get(sample_app(), "/api/team/leaders").await;
    assert_eq!(leaders["data"]["batting"].as_array().unwrap().len(), 3);
    assert_eq!(leaders["data"]["stolenBases"][0]["name"], "Casey Brown");
    assert_eq!(leaders["data"]["wins"][0]["stat"], "Wins");

    let (_, schedule) = get(sample_app(), "/api/team/schedule").await;
    assert_eq!(schedule["count"], 5);
}
