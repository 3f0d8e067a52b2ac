use crate::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How candidate lists are ordered between pipeline stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    /// Keep series order at every stage
    #[default]
    Series,
    /// Sort by price after detection and by recurrence count after
    /// clustering, both descending and stable
    Ranked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Number of most recent samples to analyse
    pub sample_window: usize,
    /// Half-width of the window used to pick local extrema
    pub local_window_radius: usize,
    /// Fractional price proximity, 0.05 means +-5%
    pub similarity_tolerance: f64,
    /// Minimum recurrence count for a level to be reported
    pub minority_threshold: usize,
    #[serde(default)]
    pub candidate_order: CandidateOrder,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_window: 300,
            local_window_radius: 3,
            similarity_tolerance: 0.05,
            minority_threshold: 5,
            candidate_order: CandidateOrder::Series,
        }
    }
}

impl DetectorConfig {
    /// Rejects configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sample_window == 0 {
            return Err(Error::ConfigError(
                "sample_window must be at least 1".to_string(),
            ));
        }
        let tolerance = self.similarity_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 || tolerance >= 1.0 {
            return Err(Error::ConfigError(format!(
                "similarity_tolerance must lie strictly between 0 and 1, got {}",
                tolerance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// chrono format string for the date column
    pub date_format: String,
    pub has_headers: bool,
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y.%m.%d".to_string(),
            has_headers: false,
            delimiter: ',',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub date_format: String,
    pub format: ReportFormat,
    /// Print every intermediate list, not just the final levels
    pub show_stages: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            format: ReportFormat::Text,
            show_stages: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub detector: DetectorConfig,
    pub input: InputConfig,
    pub report: ReportConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        if self.input.date_format.trim().is_empty() {
            return Err(Error::ConfigError("input.date_format is empty".to_string()));
        }
        if !self.input.delimiter.is_ascii() {
            return Err(Error::ConfigError(format!(
                "input.delimiter must be a single ASCII character, got {:?}",
                self.input.delimiter
            )));
        }
        Ok(())
    }
}

fn defaults_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let defaults = Config::default();
    let builder = ConfigLib::builder()
        .set_default("detector.sample_window", defaults.detector.sample_window as i64)?
        .set_default(
            "detector.local_window_radius",
            defaults.detector.local_window_radius as i64,
        )?
        .set_default(
            "detector.similarity_tolerance",
            defaults.detector.similarity_tolerance,
        )?
        .set_default(
            "detector.minority_threshold",
            defaults.detector.minority_threshold as i64,
        )?
        .set_default("detector.candidate_order", "series")?
        .set_default("input.date_format", defaults.input.date_format)?
        .set_default("input.has_headers", defaults.input.has_headers)?
        .set_default("input.delimiter", defaults.input.delimiter.to_string())?
        .set_default("report.date_format", defaults.report.date_format)?
        .set_default("report.format", "text")?
        .set_default("report.show_stages", defaults.report.show_stages)?;
    Ok(builder)
}

/// Loads the configuration from defaults, an optional TOML file and `SR_*`
/// environment variables, in that order of precedence.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
    let mut builder = defaults_builder()?;

    if let Some(path) = path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        builder = builder.add_source(File::from(path));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("SR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub const DEFAULT_CONFIG: &str = r#"
# sr-detector Default Configuration

[detector]
sample_window = 300        # most recent samples to analyse
local_window_radius = 3    # samples on each side when picking extrema
similarity_tolerance = 0.05
minority_threshold = 5
candidate_order = "series" # or "ranked"

[input]
date_format = "%Y.%m.%d"
has_headers = false
delimiter = ","

[report]
date_format = "%Y-%m-%d"
format = "text"            # or "json"
show_stages = false
"#;

/// Creates `<dir>/default.toml` if it doesn't exist and returns its path
pub fn ensure_default_config<P: AsRef<Path>>(dir: P) -> Result<std::path::PathBuf> {
    let config_dir = dir.as_ref();
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)?;
    }

    let default_config_path = config_dir.join("default.toml");
    if !default_config_path.exists() {
        std::fs::write(&default_config_path, DEFAULT_CONFIG)?;
    }

    Ok(default_config_path)
}
