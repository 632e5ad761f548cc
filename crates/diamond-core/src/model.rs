// Shared data model: player records, team aggregates, and schedule entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Lowercase `text` and collapse every whitespace run into a single `-`.
///
/// Edges are not trimmed: `" Jane  Doe "` becomes `"-jane-doe-"`. Names that
/// differ only in surrounding whitespace are distinct join keys, so they get
/// distinct slugs too.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_gap {
                slug.push('-');
                in_gap = true;
            }
        } else {
            slug.extend(c.to_lowercase());
            in_gap = false;
        }
    }
    slug
}

/// Deterministic player identity derived from the display name.
///
/// Re-ingesting the same name always yields the same id.
pub fn player_id(name: &str) -> String {
    format!("player-{}", slugify(name))
}

// ---------------------------------------------------------------------------
// Position / trend
// ---------------------------------------------------------------------------

/// Position inferred from the stat sheets. The exports do not carry a real
/// fielding position, so anyone who neither pitched nor caught is `Infield`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "IF")]
    Infield,
}

impl Position {
    /// Parse either the short code (`P`, `C`, `IF`) or the long name,
    /// case-insensitively.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "P" | "PITCHER" => Some(Position::Pitcher),
            "C" | "CATCHER" => Some(Position::Catcher),
            "IF" | "INFIELD" => Some(Position::Infield),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::Infield => "IF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

/// Batting-average bucket. Not a time series: recomputed from scratch on
/// every ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

// ---------------------------------------------------------------------------
// Per-category stat lines
// ---------------------------------------------------------------------------

/// Counting stats from the offense export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingLine {
    pub games_played: u32,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbis: u32,
    pub runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub stolen_bases: u32,
    pub caught_stealing: u32,
}

/// Counting stats from the pitching export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingLine {
    pub innings_pitched: f64,
    pub wins: u32,
    pub losses: u32,
    pub saves: u32,
    pub hits_allowed: u32,
    pub earned_runs: u32,
    pub walks_allowed: u32,
    pub strikeouts: u32,
}

/// Counting stats from the defense export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldingLine {
    pub total_chances: u32,
    pub assists: u32,
    pub putouts: u32,
    pub errors: u32,
    pub double_plays: u32,
}

/// Counting stats from the catching export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchingLine {
    pub innings_caught: f64,
    pub passed_balls: u32,
    pub stolen_bases_allowed: u32,
    pub caught_stealing: u32,
}

/// Everything computed from the counting stats.
///
/// `era` and `whip` are `None` when the player threw no innings, so a
/// display can render "N/A" instead of a misleading 0.00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub batting_avg: f64,
    pub on_base_pct: f64,
    pub slugging_pct: f64,
    pub ops: f64,
    pub woba: f64,
    pub era: Option<f64>,
    pub whip: Option<f64>,
    pub fielding_pct: f64,
    pub trend: Trend,
    pub war: f64,
    pub efficiency: i64,
}

/// One player, assembled from the four category exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub batting: BattingLine,
    pub pitching: PitchingLine,
    pub fielding: FieldingLine,
    pub catching: CatchingLine,
    pub derived: DerivedStats,
}

impl PlayerRecord {
    /// Whether the player has a computed ERA (i.e. threw at least one out).
    pub fn is_pitcher(&self) -> bool {
        self.derived.era.is_some()
    }
}

// ---------------------------------------------------------------------------
// Team aggregate
// ---------------------------------------------------------------------------

/// Team-level reduction over one ingestion run's players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregate {
    pub season: String,
    pub record: String,
    pub wins: u32,
    pub losses: u32,
    pub win_percentage: f64,
    pub games_played: u32,
    pub total_runs: u32,
    pub runs_allowed: u32,
    pub run_differential: i64,
    pub team_batting_avg: f64,
    pub team_era: f64,
    pub fielding_percentage: f64,
    pub total_hits: u32,
    pub total_home_runs: u32,
    pub total_rbis: u32,
    pub total_stolen_bases: u32,
    pub total_strikeouts: u32,
    pub total_errors: u32,
}

impl TeamAggregate {
    /// The aggregate for a run with no players.
    pub fn empty(season: &str) -> Self {
        TeamAggregate {
            season: season.to_string(),
            record: "0-0".to_string(),
            wins: 0,
            losses: 0,
            win_percentage: 0.0,
            games_played: 0,
            total_runs: 0,
            runs_allowed: 0,
            run_differential: 0,
            team_batting_avg: 0.0,
            team_era: 0.0,
            fielding_percentage: 0.0,
            total_hits: 0,
            total_home_runs: 0,
            total_rbis: 0,
            total_stolen_bases: 0,
            total_strikeouts: 0,
            total_errors: 0,
        }
    }
}

/// Output contract of an ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDataset {
    pub players: Vec<PlayerRecord>,
    pub team_aggregate: TeamAggregate,
}

impl StatsDataset {
    /// A successful run that produced no players ("no data yet").
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

impl GameResult {
    pub fn from_str_result(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "W" | "WIN" => Some(GameResult::Win),
            "L" | "LOSS" => Some(GameResult::Loss),
            _ => None,
        }
    }
}

/// A completed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub date: NaiveDate,
    pub opponent: String,
    pub home_away: String,
    pub result: GameResult,
    pub score: String,
    pub team_runs: u32,
    pub opponent_runs: u32,
    pub highlights: String,
}

impl Game {
    pub fn new(
        date: NaiveDate,
        opponent: &str,
        home_away: &str,
        team_runs: u32,
        opponent_runs: u32,
        highlights: &str,
    ) -> Self {
        let result = if team_runs > opponent_runs {
            GameResult::Win
        } else {
            GameResult::Loss
        };
        Game {
            id: game_id(date, opponent),
            date,
            opponent: opponent.to_string(),
            home_away: home_away.to_string(),
            result,
            score: format!("{team_runs}-{opponent_runs}"),
            team_runs,
            opponent_runs,
            highlights: highlights.to_string(),
        }
    }
}

/// A scheduled game that has not been played yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingGame {
    pub id: String,
    pub date: NaiveDate,
    pub opponent: String,
    pub home_away: String,
    pub time: String,
    pub location: String,
}

/// Deterministic game identity: `game-<date>-<opponent-slug>`.
pub fn game_id(date: NaiveDate, opponent: &str) -> String {
    format!("game-{}-{}", date.format("%Y-%m-%d"), slugify(opponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_is_stable_slug() {
        assert_eq!(player_id("Jane Doe"), "player-jane-doe");
        assert_eq!(player_id("Jane Doe"), player_id("Jane Doe"));
    }

    #[test]
    fn player_id_collapses_whitespace_runs() {
        assert_eq!(player_id("Mary  Ann\tSmith"), "player-mary-ann-smith");
    }

    #[test]
    fn player_id_keeps_edge_whitespace() {
        assert_eq!(player_id("Jane Doe "), "player-jane-doe-");
        assert_eq!(player_id("  Jane Doe"), "player--jane-doe");
        assert_ne!(player_id("Jane Doe"), player_id("Jane Doe "));
    }

    #[test]
    fn position_parses_codes_and_names() {
        assert_eq!(Position::from_str_pos("p"), Some(Position::Pitcher));
        assert_eq!(Position::from_str_pos("Catcher"), Some(Position::Catcher));
        assert_eq!(Position::from_str_pos("IF"), Some(Position::Infield));
        assert_eq!(Position::from_str_pos("SS"), None);
    }

    #[test]
    fn position_serializes_as_short_code() {
        let json = serde_json::to_string(&Position::Infield).unwrap();
        assert_eq!(json, "\"IF\"");
    }

    #[test]
    fn empty_aggregate_has_zero_record() {
        let team = TeamAggregate::empty("2025");
        assert_eq!(team.record, "0-0");
        assert_eq!(team.season, "2025");
        assert_eq!(team.total_hits, 0);
    }

    #[test]
    fn game_result_follows_score() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let game = Game::new(date, "Riverside High", "Home", 8, 3, "");
        assert_eq!(game.result, GameResult::Win);
        assert_eq!(game.score, "8-3");
        assert_eq!(game.id, "game-2024-03-15-riverside-high");

        let loss = Game::new(date, "Westside Prep", "Away", 4, 7, "");
        assert_eq!(loss.result, GameResult::Loss);
    }

    #[test]
    fn null_era_serializes_as_null() {
        let derived = DerivedStats {
            batting_avg: 0.3,
            on_base_pct: 0.3,
            slugging_pct: 0.3,
            ops: 0.6,
            woba: 0.27,
            era: None,
            whip: None,
            fielding_pct: 0.0,
            trend: Trend::Stable,
            war: 0.0,
            efficiency: 15,
        };
        let value = serde_json::to_value(&derived).unwrap();
        assert!(value["era"].is_null());
        assert_eq!(value["trend"], "stable");
        assert_eq!(value["battingAvg"], 0.3);
    }
}
