use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TranscriptError};

/// Default directory name for transcript data.
const DATA_DIR: &str = ".transcripts";
/// Default database filename.
const DB_FILE: &str = "records.db";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";

/// Configuration resolved from the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the tool operates on.
    pub root: PathBuf,
    /// Path to the `.transcripts/` directory.
    pub data_dir: PathBuf,
    /// Path to the `SQLite` database.
    pub db_path: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .transcripts/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Recommendation configuration.
    pub recommend: RecommendSettings,
    /// Output configuration.
    pub output: OutputSettings,
    /// Document discovery configuration.
    pub scan: ScanSettings,
}

/// Recommendation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendSettings {
    /// Minimum grade for a course to count as approved.
    pub passing_grade: f64,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self { passing_grade: 3.0 }
    }
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "minified" (default) or "pretty".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "minified".into(),
        }
    }
}

impl OutputSettings {
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

/// Document discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Path fragments excluded from batch runs.
    pub exclude_patterns: Vec<String>,
    /// Maximum document size in MB (larger files are skipped).
    pub max_file_size_mb: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![".transcripts/".into(), ".git/".into(), "target/".into()],
            max_file_size_mb: 20,
        }
    }
}

impl Config {
    /// Create config for a given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data_dir = root.join(DATA_DIR);
        let db_path = data_dir.join(DB_FILE);
        let config_path = data_dir.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            root,
            data_dir,
            db_path,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| TranscriptError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
                None
            }
        }
    }

    /// Save current settings to config.toml.
    pub fn save_settings(&self) -> Result<()> {
        self.ensure_data_dir()?;
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| TranscriptError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Ensure the `.transcripts/` directory exists.
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Check whether the database exists.
    #[must_use]
    pub fn db_exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Check if a path should be excluded based on settings. Patterns match
    /// whole path segments.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = format!("/{}/", path.to_string_lossy().replace('\\', "/"));
        self.settings
            .scan
            .exclude_patterns
            .iter()
            .map(|p| p.trim_matches('/'))
            .any(|p| !p.is_empty() && path_str.contains(&format!("/{p}/")))
    }
}
