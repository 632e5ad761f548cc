// Configuration loading and parsing (config/dashboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Name of the single config file, relative to `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub team: TeamConfig,
    pub server: ServerConfig,
    pub data_paths: DataPaths,
    pub leaders: LeadersConfig,
}

/// Raw deserialization target for the whole dashboard.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DashboardFile {
    team: TeamConfig,
    server: ServerConfig,
    #[serde(default)]
    data_paths: DataPaths,
    #[serde(default)]
    leaders: LeadersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub season: String,
}

/// Where the REST facade gets its players from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// The sample league exports compiled into the server binary.
    #[default]
    Sample,
    /// The four export files listed under `[data_paths]`.
    Csv,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default)]
    pub source: DataSource,
}

/// Paths to the league exports. All optional here; which ones are required
/// depends on the consumer (see `validate` and the ingest CLI).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataPaths {
    pub offense: Option<String>,
    pub pitching: Option<String>,
    pub defense: Option<String>,
    pub catching: Option<String>,
    pub games: Option<String>,
    pub schedule: Option<String>,
}

impl DataPaths {
    /// Names of the four category exports that are not configured.
    pub fn missing_exports(&self) -> Vec<&'static str> {
        [
            ("offense", &self.offense),
            ("pitching", &self.pitching),
            ("defense", &self.defense),
            ("catching", &self.catching),
        ]
        .into_iter()
        .filter(|(_, path)| path.as_deref().map_or(true, |p| p.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

/// Top-N sizes for the leaderboard endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadersConfig {
    #[serde(default = "default_batting_leaders")]
    pub batting: usize,
    #[serde(default = "default_pitching_leaders")]
    pub pitching: usize,
    #[serde(default = "default_category_leaders")]
    pub category: usize,
}

fn default_batting_leaders() -> usize {
    5
}

fn default_pitching_leaders() -> usize {
    3
}

fn default_category_leaders() -> usize {
    3
}

impl Default for LeadersConfig {
    fn default() -> Self {
        LeadersConfig {
            batting: default_batting_leaders(),
            pitching: default_pitching_leaders(),
            category: default_category_leaders(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/dashboard.toml` relative to `base_dir`.
///
/// Does not copy defaults; see `load_config_at` for that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: DashboardFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        team: file.team,
        server: file.server,
        data_paths: file.data_paths,
        leaders: file.leaders,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/dashboard.toml` from `defaults/dashboard.toml` when it is
/// missing. Returns the path written, or `None` when a config already exists.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let defaults = std::fs::read(&source).map_err(|_| ConfigError::DefaultsCopyError {
        message: format!(
            "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} in {}; \
             run from the project root or pass --config",
            base_dir.display()
        ),
    })?;

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }

    // create_new: never clobber a config that appeared in the meantime
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            })
        }
    };
    std::io::Write::write_all(&mut dest, &defaults).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;

    info!("Seeded {} from defaults", target.display());
    Ok(Some(target))
}

/// Seed `base_dir/config` from defaults if needed, then load.
pub fn load_config_at(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_file(base_dir)?;
    load_config_from(base_dir)
}

/// Convenience wrapper: `load_config_at` relative to the current directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_at(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.team.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "team.name".into(),
            message: "must not be empty".into(),
        });
    }

    if config.team.season.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "team.season".into(),
            message: "must not be empty".into(),
        });
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    let leaders = &config.leaders;
    let leader_fields: &[(&str, usize)] = &[
        ("leaders.batting", leaders.batting),
        ("leaders.pitching", leaders.pitching),
        ("leaders.category", leaders.category),
    ];
    for (name, val) in leader_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    if config.server.source == DataSource::Csv {
        if let Some(missing) = config.data_paths.missing_exports().first() {
            return Err(ConfigError::ValidationError {
                field: format!("data_paths.{missing}"),
                message: "required when server.source = \"csv\"".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
