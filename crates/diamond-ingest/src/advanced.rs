// Team-level advanced metrics and the WAR leaderboard.

use std::cmp::Ordering;

use diamond_core::model::PlayerRecord;
use serde::{Deserialize, Serialize};

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAdvancedMetrics {
    pub total_war: f64,
    pub avg_ops: f64,
    pub avg_woba: f64,
    pub avg_efficiency: i64,
    pub player_count: usize,
}

/// One row of the advanced leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedEntry {
    pub id: String,
    pub name: String,
    pub war: f64,
    pub ops: f64,
    pub woba: f64,
    pub efficiency: i64,
    pub batting_avg: f64,
    pub era: Option<f64>,
    pub fielding_pct: f64,
}

impl From<&PlayerRecord> for AdvancedEntry {
    fn from(p: &PlayerRecord) -> Self {
        AdvancedEntry {
            id: p.id.clone(),
            name: p.name.clone(),
            war: p.derived.war,
            ops: p.derived.ops,
            woba: p.derived.woba,
            efficiency: p.derived.efficiency,
            batting_avg: p.derived.batting_avg,
            era: p.derived.era,
            fielding_pct: p.derived.fielding_pct,
        }
    }
}

/// Roster-wide summary of the derived scores. `None` for an empty roster.
pub fn team_advanced_metrics(players: &[PlayerRecord]) -> Option<TeamAdvancedMetrics> {
    if players.is_empty() {
        return None;
    }
    let n = players.len() as f64;
    let total_war: f64 = players.iter().map(|p| p.derived.war).sum();
    let total_ops: f64 = players.iter().map(|p| p.derived.ops).sum();
    let total_woba: f64 = players.iter().map(|p| p.derived.woba).sum();
    let total_efficiency: i64 = players.iter().map(|p| p.derived.efficiency).sum();

    Some(TeamAdvancedMetrics {
        total_war: round_to(total_war, 1),
        avg_ops: round_to(total_ops / n, 3),
        avg_woba: round_to(total_woba / n, 3),
        avg_efficiency: (total_efficiency as f64 / n).round() as i64,
        player_count: players.len(),
    })
}

/// Players who appeared in a game, best WAR first. Equal WAR keeps roster
/// order.
pub fn advanced_leaderboard(players: &[PlayerRecord]) -> Vec<AdvancedEntry> {
    let mut entries: Vec<AdvancedEntry> = players
        .iter()
        .filter(|p| p.batting.games_played > 0)
        .map(AdvancedEntry::from)
        .collect();
    entries.sort_by(|a, b| b.war.partial_cmp(&a.war).unwrap_or(Ordering::Equal));
    entries
}
