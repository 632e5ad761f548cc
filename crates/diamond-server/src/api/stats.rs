// Aggregate statistics under /api/stats.

use axum::{extract::State, routing::get, Json, Router};
use chrono::NaiveDate;
use diamond_core::model::{GameResult, PlayerRecord, TeamAggregate};
use diamond_ingest::advanced::{
    advanced_leaderboard, team_advanced_metrics, AdvancedEntry, TeamAdvancedMetrics,
};
use serde::Serialize;

use super::ApiResponse;
use crate::AppState;

const TREND_GAMES: usize = 5;

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingSummary {
    pub total_at_bats: u32,
    pub total_hits: u32,
    pub total_runs: u32,
    pub total_rbis: u32,
    pub total_stolen_bases: u32,
    pub team_batting_avg: f64,
    pub top_hitter: Option<PlayerRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingSummary {
    pub total_wins: u32,
    pub total_losses: u32,
    pub total_strikeouts: u32,
    pub team_era: f64,
    pub top_pitcher: Option<PlayerRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldingSummary {
    pub fielding_percentage: f64,
    pub total_errors: u32,
    pub games_played: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub record: String,
    pub win_percentage: f64,
    pub total_runs: u32,
    pub runs_allowed: u32,
    pub run_differential: i64,
    pub games_played: u32,
    pub team_batting_avg: f64,
    pub team_era: f64,
    pub fielding_percentage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentGame {
    pub date: NaiveDate,
    pub result: GameResult,
    pub score: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub recent_record: String,
    pub average_runs_scored: f64,
    pub average_runs_allowed: f64,
    pub recent_games: Vec<RecentGame>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedStats {
    pub team: Option<TeamAdvancedMetrics>,
    pub leaderboard: Vec<AdvancedEntry>,
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

fn total<'a>(
    players: impl IntoIterator<Item = &'a PlayerRecord>,
    f: impl Fn(&PlayerRecord) -> u32,
) -> u32 {
    players
        .into_iter()
        .fold(0u32, |acc, p| acc.saturating_add(f(p)))
}

/// Highest batting average; the first of equal leaders wins.
fn top_hitter(players: &[PlayerRecord]) -> Option<&PlayerRecord> {
    players.iter().fold(None, |best: Option<&PlayerRecord>, p| match best {
        Some(b) if p.derived.batting_avg <= b.derived.batting_avg => Some(b),
        _ => Some(p),
    })
}

/// Lowest ERA among pitchers; the first of equal leaders wins.
fn top_pitcher<'a>(pitchers: &[&'a PlayerRecord]) -> Option<&'a PlayerRecord> {
    pitchers.iter().copied().fold(None, |best: Option<&PlayerRecord>, p| match best {
        Some(b) if p.derived.era >= b.derived.era => Some(b),
        _ => Some(p),
    })
}

pub fn batting_summary(players: &[PlayerRecord], team: &TeamAggregate) -> BattingSummary {
    BattingSummary {
        total_at_bats: total(players, |p| p.batting.at_bats),
        total_hits: total(players, |p| p.batting.hits),
        total_runs: total(players, |p| p.batting.runs),
        total_rbis: total(players, |p| p.batting.rbis),
        total_stolen_bases: total(players, |p| p.batting.stolen_bases),
        team_batting_avg: team.team_batting_avg,
        top_hitter: top_hitter(players).cloned(),
    }
}

pub fn pitching_summary(players: &[PlayerRecord], team: &TeamAggregate) -> PitchingSummary {
    let pitchers: Vec<&PlayerRecord> = players.iter().filter(|p| p.is_pitcher()).collect();

    PitchingSummary {
        total_wins: total(pitchers.iter().copied(), |p| p.pitching.wins),
        total_losses: total(pitchers.iter().copied(), |p| p.pitching.losses),
        total_strikeouts: total(pitchers.iter().copied(), |p| p.pitching.strikeouts),
        team_era: team.team_era,
        top_pitcher: top_pitcher(&pitchers).cloned(),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/stats/team
pub async fn team_stats(State(state): State<AppState>) -> Json<ApiResponse<TeamAggregate>> {
    ApiResponse::ok(state.dataset.team.clone())
}

/// GET /api/stats/batting
pub async fn batting_stats(State(state): State<AppState>) -> Json<ApiResponse<BattingSummary>> {
    ApiResponse::ok(batting_summary(&state.dataset.players, &state.dataset.team))
}

/// GET /api/stats/pitching
pub async fn pitching_stats(State(state): State<AppState>) -> Json<ApiResponse<PitchingSummary>> {
    ApiResponse::ok(pitching_summary(&state.dataset.players, &state.dataset.team))
}

/// GET /api/stats/fielding
pub async fn fielding_stats(State(state): State<AppState>) -> Json<ApiResponse<FieldingSummary>> {
    let team = &state.dataset.team;
    ApiResponse::ok(FieldingSummary {
        fielding_percentage: team.fielding_percentage,
        total_errors: team.total_errors,
        games_played: team.games_played,
    })
}

/// GET /api/stats/season-summary
pub async fn season_summary(State(state): State<AppState>) -> Json<ApiResponse<SeasonSummary>> {
    let team = &state.dataset.team;
    ApiResponse::ok(SeasonSummary {
        record: team.record.clone(),
        win_percentage: team.win_percentage,
        total_runs: team.total_runs,
        runs_allowed: team.runs_allowed,
        run_differential: team.run_differential,
        games_played: team.games_played,
        team_batting_avg: team.team_batting_avg,
        team_era: team.team_era,
        fielding_percentage: team.fielding_percentage,
    })
}

/// GET /api/stats/trends
pub async fn trends(State(state): State<AppState>) -> Json<ApiResponse<Trends>> {
    let recent = state.dataset.recent_games(TREND_GAMES);
    let wins = recent.iter().filter(|g| g.result == GameResult::Win).count();
    let losses = recent.len() - wins;

    let n = recent.len() as f64;
    let average = |runs: f64| if n > 0.0 { runs / n } else { 0.0 };
    let scored: u32 = recent.iter().map(|g| g.team_runs).sum();
    let allowed: u32 = recent.iter().map(|g| g.opponent_runs).sum();

    ApiResponse::ok(Trends {
        recent_record: format!("{wins}-{losses}"),
        average_runs_scored: average(scored as f64),
        average_runs_allowed: average(allowed as f64),
        recent_games: recent
            .iter()
            .map(|g| RecentGame {
                date: g.date,
                result: g.result,
                score: g.score.clone(),
            })
            .collect(),
    })
}

/// GET /api/stats/advanced
pub async fn advanced_stats(State(state): State<AppState>) -> Json<ApiResponse<AdvancedStats>> {
    let players = &state.dataset.players;
    ApiResponse::ok(AdvancedStats {
        team: team_advanced_metrics(players),
        leaderboard: advanced_leaderboard(players),
    })
}

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/api/stats/team", get(team_stats))
        .route("/api/stats/batting", get(batting_stats))
        .route("/api/stats/pitching", get(pitching_stats))
        .route("/api/stats/fielding", get(fielding_stats))
        .route("/api/stats/season-summary", get(season_summary))
        .route("/api/stats/trends", get(trends))
        .route("/api/stats/advanced", get(advanced_stats))
}
