// Team aggregate: a pure reduction over the finished player records plus the
// raw pitching rows.

use diamond_core::model::{PitchingLine, PlayerRecord, TeamAggregate};

use crate::metrics::safe_div;

fn sum_by<F>(players: &[PlayerRecord], f: F) -> u32
where
    F: Fn(&PlayerRecord) -> u32,
{
    players.iter().fold(0u32, |acc, p| acc.saturating_add(f(p)))
}

/// Innings-weighted team ERA over every pitching row that logged innings.
///
/// Rows are taken as exported, so a pitcher whose name matches no offense row
/// still counts here.
pub fn team_era(pitching_rows: &[PitchingLine]) -> f64 {
    let (innings, earned_runs) = pitching_rows
        .iter()
        .filter(|p| p.innings_pitched > 0.0)
        .fold((0.0, 0.0), |(ip, er), p| {
            (ip + p.innings_pitched, er + p.earned_runs as f64)
        });
    safe_div(earned_runs * 9.0, innings)
}

/// Build the team aggregate for `season`.
///
/// Batting average is a ratio of sums. Fielding percentage is the plain mean
/// of per-player fielding percentages, so players with few chances weigh as
/// much as everyone else.
pub fn team_aggregate(
    season: &str,
    players: &[PlayerRecord],
    pitching_rows: &[PitchingLine],
) -> TeamAggregate {
    if players.is_empty() {
        return TeamAggregate::empty(season);
    }

    let wins = sum_by(players, |p| p.pitching.wins);
    let losses = sum_by(players, |p| p.pitching.losses);
    let total_runs = sum_by(players, |p| p.batting.runs);
    let total_hits = sum_by(players, |p| p.batting.hits);
    let total_at_bats = sum_by(players, |p| p.batting.at_bats);

    let fielding_sum: f64 = players.iter().map(|p| p.derived.fielding_pct).sum();
    // Nothing from the four exports says how many runs the team gave up.
    let runs_allowed = 0u32;

    TeamAggregate {
        season: season.to_string(),
        record: format!("{wins}-{losses}"),
        wins,
        losses,
        win_percentage: safe_div(wins as f64, wins as f64 + losses as f64),
        games_played: players
            .iter()
            .map(|p| p.batting.games_played)
            .max()
            .unwrap_or(0),
        total_runs,
        runs_allowed,
        run_differential: total_runs as i64 - runs_allowed as i64,
        team_batting_avg: safe_div(total_hits as f64, total_at_bats as f64),
        team_era: team_era(pitching_rows),
        fielding_percentage: safe_div(fielding_sum, players.len() as f64),
        total_hits,
        total_home_runs: sum_by(players, |p| p.batting.home_runs),
        total_rbis: sum_by(players, |p| p.batting.rbis),
        total_stolen_bases: sum_by(players, |p| p.batting.stolen_bases),
        total_strikeouts: sum_by(players, |p| p.pitching.strikeouts),
        total_errors: sum_by(players, |p| p.fielding.errors),
    }
}
