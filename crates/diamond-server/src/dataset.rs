// The immutable dataset the HTTP handlers read from.
//
// Built once at startup, either from the bundled sample league or from the
// export files named in the config.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use diamond_core::config::{Config, DataSource};
use diamond_core::model::{game_id, Game, PlayerRecord, TeamAggregate, UpcomingGame};
use diamond_ingest::{ingest, ingest_files, IngestError, RawSources, SourcePaths};
use serde::Deserialize;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Bundled sample league
// ---------------------------------------------------------------------------

const SAMPLE_OFFENSE: &str = include_str!("../data/offense.csv");
const SAMPLE_PITCHING: &str = include_str!("../data/pitching.csv");
const SAMPLE_DEFENSE: &str = include_str!("../data/defense.csv");
const SAMPLE_CATCHING: &str = include_str!("../data/catching.csv");
const SAMPLE_GAMES: &str = include_str!("../data/games.csv");
const SAMPLE_SCHEDULE: &str = include_str!("../data/schedule.csv");

// ---------------------------------------------------------------------------
// Raw CSV rows
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawGame {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Opponent")]
    opponent: String,
    #[serde(rename = "Home/Away")]
    home_away: String,
    #[serde(rename = "Runs")]
    runs: u32,
    #[serde(rename = "Opponent Runs")]
    opponent_runs: u32,
    #[serde(rename = "Highlights", default)]
    highlights: String,
}

#[derive(Debug, Deserialize)]
struct RawUpcoming {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Opponent")]
    opponent: String,
    #[serde(rename = "Home/Away")]
    home_away: String,
    #[serde(rename = "Time", default)]
    time: String,
    #[serde(rename = "Location", default)]
    location: String,
}

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr)
}

fn load_games_from_reader<R: Read>(rdr: R) -> Result<Vec<Game>, csv::Error> {
    let mut reader = csv_reader(rdr);
    // Header problems are fatal; a single bad row is not.
    reader.headers()?;
    let mut games = Vec::new();
    for result in reader.deserialize::<RawGame>() {
        match result {
            Ok(raw) => games.push(Game::new(
                raw.date,
                &raw.opponent,
                &raw.home_away,
                raw.runs,
                raw.opponent_runs,
                &raw.highlights,
            )),
            Err(e) => warn!("skipping malformed game row: {}", e),
        }
    }
    Ok(games)
}

fn load_schedule_from_reader<R: Read>(rdr: R) -> Result<Vec<UpcomingGame>, csv::Error> {
    let mut reader = csv_reader(rdr);
    reader.headers()?;
    let mut upcoming = Vec::new();
    for result in reader.deserialize::<RawUpcoming>() {
        match result {
            Ok(raw) => upcoming.push(UpcomingGame {
                id: game_id(raw.date, &raw.opponent),
                date: raw.date,
                opponent: raw.opponent,
                home_away: raw.home_away,
                time: raw.time,
                location: raw.location,
            }),
            Err(e) => warn!("skipping malformed schedule row: {}", e),
        }
    }
    Ok(upcoming)
}

fn load_games(path: &Path) -> Result<Vec<Game>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_games_from_reader(file).map_err(|e| DatasetError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

fn load_schedule(path: &Path) -> Result<Vec<UpcomingGame>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_schedule_from_reader(file).map_err(|e| DatasetError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Everything the API serves. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub team_name: String,
    pub players: Vec<PlayerRecord>,
    pub team: TeamAggregate,
    pub games: Vec<Game>,
    pub upcoming: Vec<UpcomingGame>,
}

impl Dataset {
    /// The bundled sample league, run through the same pipeline as real
    /// exports.
    pub fn sample(team_name: &str, season: &str) -> Result<Self, DatasetError> {
        let sources = RawSources {
            offense: SAMPLE_OFFENSE.to_string(),
            pitching: SAMPLE_PITCHING.to_string(),
            defense: SAMPLE_DEFENSE.to_string(),
            catching: SAMPLE_CATCHING.to_string(),
        };
        let ingestion = ingest(&sources, season)?;
        let games = load_games_from_reader(SAMPLE_GAMES.as_bytes()).map_err(|e| {
            DatasetError::Csv {
                path: "<sample games>".to_string(),
                source: e,
            }
        })?;
        let upcoming = load_schedule_from_reader(SAMPLE_SCHEDULE.as_bytes()).map_err(|e| {
            DatasetError::Csv {
                path: "<sample schedule>".to_string(),
                source: e,
            }
        })?;

        Ok(Dataset {
            team_name: team_name.to_string(),
            players: ingestion.dataset.players,
            team: ingestion.dataset.team_aggregate,
            games,
            upcoming,
        })
    }

    /// Build the dataset the config asks for. Relative paths resolve against
    /// `base_dir`.
    pub async fn from_config(config: &Config, base_dir: &Path) -> Result<Self, DatasetError> {
        let dataset = match config.server.source {
            DataSource::Sample => {
                info!("Serving the bundled sample league");
                Dataset::sample(&config.team.name, &config.team.season)?
            }
            DataSource::Csv => {
                let paths = SourcePaths::from_config(&config.data_paths, base_dir)?;
                info!("Ingesting league exports from {}", paths.offense.display());
                let ingestion = ingest_files(&paths, &config.team.season).await?;

                let games = match &config.data_paths.games {
                    Some(p) => load_games(&base_dir.join(p))?,
                    None => Vec::new(),
                };
                let upcoming = match &config.data_paths.schedule {
                    Some(p) => load_schedule(&base_dir.join(p))?,
                    None => Vec::new(),
                };

                Dataset {
                    team_name: config.team.name.clone(),
                    players: ingestion.dataset.players,
                    team: ingestion.dataset.team_aggregate,
                    games,
                    upcoming,
                }
            }
        };

        info!(
            "Dataset ready: {} players, {} games, {} upcoming",
            dataset.players.len(),
            dataset.games.len(),
            dataset.upcoming.len()
        );
        Ok(dataset)
    }

    pub fn player(&self, id: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Up to `n` games, most recent first. Games on the same date keep file
    /// order.
    pub fn recent_games(&self, n: usize) -> Vec<&Game> {
        let mut games: Vec<&Game> = self.games.iter().collect();
        games.sort_by(|a, b| b.date.cmp(&a.date));
        games.truncate(n);
        games
    }
}
