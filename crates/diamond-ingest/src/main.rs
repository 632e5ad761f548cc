// Batch ingestion entry point.
//
// Reads the four league exports, runs the pipeline, and prints the resulting
// dataset as JSON. Logs go to stderr so stdout carries only the dataset.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use diamond_core::config;
use diamond_ingest::columns::{expected_headers, StatCategory};
use diamond_ingest::record::validate_headers;
use diamond_ingest::{ingest_files, SourcePaths};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "diamond-ingest", about = "Turn league stat exports into a dashboard dataset")]
struct Args {
    /// Directory holding config/ and defaults/
    #[arg(long, default_value = ".")]
    config: PathBuf,

    #[arg(long)]
    offense: Option<PathBuf>,
    #[arg(long)]
    pitching: Option<PathBuf>,
    #[arg(long)]
    defense: Option<PathBuf>,
    #[arg(long)]
    catching: Option<PathBuf>,

    /// Write the dataset here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only check each export's header row, without ingesting
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let config = config::load_config_at(&args.config).context("failed to load configuration")?;
    info!(
        "Config loaded: team={}, season={}",
        config.team.name, config.team.season
    );

    let paths = resolve_paths(&args, &config.data_paths)?;

    if args.check {
        return check_headers(&paths).await;
    }

    let ingestion = ingest_files(&paths, &config.team.season)
        .await
        .context("ingestion failed")?;

    if ingestion.diagnostics.is_clean() {
        info!("All exports joined cleanly");
    } else {
        for (category, names) in &ingestion.diagnostics.missing {
            if !names.is_empty() {
                warn!("{} player(s) have no {} row", names.len(), category);
            }
        }
    }

    let json = serde_json::to_string_pretty(&ingestion.dataset)
        .context("failed to serialize dataset")?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote dataset to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Command-line paths win over `[data_paths]`, one export at a time.
fn resolve_paths(
    args: &Args,
    data_paths: &config::DataPaths,
) -> anyhow::Result<SourcePaths> {
    let pick = |flag: &Option<PathBuf>, configured: &Option<String>, category: StatCategory| {
        flag.clone()
            .or_else(|| configured.as_ref().map(|p| args.config.join(p)))
            .with_context(|| format!("no path given for the {category} export"))
    };
    Ok(SourcePaths {
        offense: pick(&args.offense, &data_paths.offense, StatCategory::Offense)?,
        pitching: pick(&args.pitching, &data_paths.pitching, StatCategory::Pitching)?,
        defense: pick(&args.defense, &data_paths.defense, StatCategory::Defense)?,
        catching: pick(&args.catching, &data_paths.catching, StatCategory::Catching)?,
    })
}

async fn check_headers(paths: &SourcePaths) -> anyhow::Result<()> {
    let mut failed = Vec::new();
    for category in StatCategory::ALL {
        let path = paths.get(category);
        let ok = match tokio::fs::read_to_string(path).await {
            Ok(text) => validate_headers(category, &text, expected_headers(category)),
            Err(e) => {
                error!("cannot read {} export {}: {}", category, path.display(), e);
                false
            }
        };
        if ok {
            info!("{} export OK: {}", category, path.display());
        } else {
            warn!("{} export failed header check: {}", category, path.display());
            failed.push(category.as_str());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("header check failed for: {}", failed.join(", "))
    }
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("diamond_ingest=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
