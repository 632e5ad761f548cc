// Ingestion pipeline: four export texts in, one StatsDataset out.

use std::path::{Path, PathBuf};

use diamond_core::config::DataPaths;
use diamond_core::model::{PitchingLine, StatsDataset};
use tracing::{debug, info};

use crate::columns::StatCategory;
use crate::join::{join_players, pitching_line, JoinDiagnostics};
use crate::metrics::build_player;
use crate::record::parse_table;
use crate::team::team_aggregate;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to process CSV files: cannot read {category} export {path}: {source}")]
    Read {
        category: StatCategory,
        path: String,
        source: std::io::Error,
    },

    #[error("failed to process CSV files: malformed {category} export: {source}")]
    Parse {
        category: StatCategory,
        source: csv::Error,
    },

    #[error("failed to process CSV files: no path configured for the {category} export")]
    MissingPath { category: StatCategory },
}

// ---------------------------------------------------------------------------
// Inputs / outputs
// ---------------------------------------------------------------------------

/// The four export texts for one run.
#[derive(Debug, Clone, Default)]
pub struct RawSources {
    pub offense: String,
    pub pitching: String,
    pub defense: String,
    pub catching: String,
}

impl RawSources {
    pub fn get(&self, category: StatCategory) -> &str {
        match category {
            StatCategory::Offense => &self.offense,
            StatCategory::Pitching => &self.pitching,
            StatCategory::Defense => &self.defense,
            StatCategory::Catching => &self.catching,
        }
    }
}

/// Where the four exports live on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePaths {
    pub offense: PathBuf,
    pub pitching: PathBuf,
    pub defense: PathBuf,
    pub catching: PathBuf,
}

impl SourcePaths {
    /// Build from the `[data_paths]` config section. Relative paths resolve
    /// against `base_dir`.
    pub fn from_config(paths: &DataPaths, base_dir: &Path) -> Result<Self, IngestError> {
        let resolve = |value: &Option<String>, category: StatCategory| {
            value
                .as_deref()
                .map(|p| base_dir.join(p))
                .ok_or(IngestError::MissingPath { category })
        };
        Ok(SourcePaths {
            offense: resolve(&paths.offense, StatCategory::Offense)?,
            pitching: resolve(&paths.pitching, StatCategory::Pitching)?,
            defense: resolve(&paths.defense, StatCategory::Defense)?,
            catching: resolve(&paths.catching, StatCategory::Catching)?,
        })
    }

    pub fn get(&self, category: StatCategory) -> &Path {
        match category {
            StatCategory::Offense => &self.offense,
            StatCategory::Pitching => &self.pitching,
            StatCategory::Defense => &self.defense,
            StatCategory::Catching => &self.catching,
        }
    }
}

/// Result of one run: the dataset plus join diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    pub dataset: StatsDataset,
    pub diagnostics: JoinDiagnostics,
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

/// Run the pipeline over in-memory export texts.
///
/// Deterministic: the same sources always produce the same output.
pub fn ingest(sources: &RawSources, season: &str) -> Result<Ingestion, IngestError> {
    let parse = |category: StatCategory| {
        parse_table(category, sources.get(category))
            .map_err(|source| IngestError::Parse { category, source })
    };
    let offense = parse(StatCategory::Offense)?;
    let pitching = parse(StatCategory::Pitching)?;
    let defense = parse(StatCategory::Defense)?;
    let catching = parse(StatCategory::Catching)?;

    for table in [&offense, &pitching, &defense, &catching] {
        debug!("{} export: {} player rows", table.category, table.len());
    }

    let (joined, diagnostics) = join_players(&offense, &pitching, &defense, &catching);
    let players: Vec<_> = joined.into_iter().map(build_player).collect();

    let pitching_rows: Vec<PitchingLine> = pitching.rows.iter().map(pitching_line).collect();
    let team_aggregate = team_aggregate(season, &players, &pitching_rows);

    info!(
        "Ingested {} players: record {}, team AVG {:.3}, team ERA {:.2}",
        players.len(),
        team_aggregate.record,
        team_aggregate.team_batting_avg,
        team_aggregate.team_era
    );

    Ok(Ingestion {
        dataset: StatsDataset {
            players,
            team_aggregate,
        },
        diagnostics,
    })
}

async fn read_source(category: StatCategory, path: &Path) -> Result<String, IngestError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Read {
            category,
            path: path.display().to_string(),
            source,
        })
}

/// Read the four exports concurrently. The first failure aborts the read.
pub async fn read_sources(paths: &SourcePaths) -> Result<RawSources, IngestError> {
    let (offense, pitching, defense, catching) = tokio::try_join!(
        read_source(StatCategory::Offense, &paths.offense),
        read_source(StatCategory::Pitching, &paths.pitching),
        read_source(StatCategory::Defense, &paths.defense),
        read_source(StatCategory::Catching, &paths.catching),
    )?;
    Ok(RawSources {
        offense,
        pitching,
        defense,
        catching,
    })
}

/// Read the four exports from disk and run the pipeline.
pub async fn ingest_files(paths: &SourcePaths, season: &str) -> Result<Ingestion, IngestError> {
    let sources = read_sources(paths).await?;
    ingest(&sources, season)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_resolves_against_base_dir() {
        let paths = DataPaths {
            offense: Some("data/offense.csv".into()),
            pitching: Some("data/pitching.csv".into()),
            defense: Some("/abs/defense.csv".into()),
            catching: Some("data/catching.csv".into()),
            games: None,
            schedule: None,
        };
        let resolved = SourcePaths::from_config(&paths, Path::new("/srv/league")).unwrap();
        assert_eq!(resolved.offense, PathBuf::from("/srv/league/data/offense.csv"));
        assert_eq!(resolved.get(StatCategory::Defense), Path::new("/abs/defense.csv"));
    }

    #[test]
    fn from_config_reports_missing_path() {
        let paths = DataPaths {
            offense: Some("o.csv".into()),
            pitching: None,
            defense: Some("d.csv".into()),
            catching: Some("c.csv".into()),
            games: None,
            schedule: None,
        };
        let err = SourcePaths::from_config(&paths, Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingPath {
                category: StatCategory::Pitching
            }
        ));
        assert!(err.to_string().starts_with("failed to process CSV files"));
    }

    #[test]
    fn empty_sources_give_empty_dataset() {
        let ingestion = ingest(&RawSources::default(), "2025").unwrap();
        assert!(ingestion.dataset.is_empty());
        assert_eq!(ingestion.dataset.team_aggregate.record, "0-0");
    }
}
