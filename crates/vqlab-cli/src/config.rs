//! Experiment configuration.
//!
//! Loaded from a YAML file, then overridden by environment variables:
//!
//! | variable                   | field                |
//! |----------------------------|----------------------|
//! | `VQLAB_LOG_LEVEL`          | `logging.level`      |
//! | `VQLAB_LOG_FORMAT`         | `logging.format`     |
//! | `VQLAB_RESULTS_DIR`        | `results_dir`        |
//! | `VQLAB_PARALLEL_PROCESSES` | `parallel_processes` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use vqlab_circuit::CircuitKind;
use vqlab_optim::{DEFAULT_CHECKPOINT_INTERVAL, OptimizationSettings};
use vqlab_report::DEFAULT_MOVING_AVERAGE_WINDOW;

/// Complete experiment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub optimization: OptimizationConfig,

    /// Directory receiving the report artifacts.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Worker count; defaults to the available parallelism.
    #[serde(default)]
    pub parallel_processes: Option<usize>,

    /// Number of independent runs.
    #[serde(default = "default_runs")]
    pub runs: usize,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// Checkpoint to resume from; empty or absent starts fresh.
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub load_path: Option<PathBuf>,

    #[serde(default = "default_steps")]
    pub steps: usize,

    #[serde(default = "default_stepsize")]
    pub stepsize: f64,

    /// Circuit tag: `default` or `alternate`.
    #[serde(default = "default_circuit")]
    pub circuit: String,

    /// Checkpoint written during the run.
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub save_path: Option<PathBuf>,

    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,

    /// Seed for the random initial parameters.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Report options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_moving_average_window")]
    pub moving_average_window: usize,

    /// Convert the HTML report to PDF.
    #[serde(default)]
    pub pdf: bool,

    /// `wkhtmltopdf` binary used for PDF conversion.
    #[serde(default = "default_wkhtmltopdf")]
    pub wkhtmltopdf: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Console,
    /// One JSON object per event.
    Json,
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_runs() -> usize {
    1
}

fn default_steps() -> usize {
    100
}

fn default_stepsize() -> f64 {
    0.1
}

fn default_circuit() -> String {
    CircuitKind::Default.as_str().to_string()
}

fn default_checkpoint_interval() -> usize {
    DEFAULT_CHECKPOINT_INTERVAL
}

fn default_moving_average_window() -> usize {
    DEFAULT_MOVING_AVERAGE_WINDOW
}

fn default_wkhtmltopdf() -> PathBuf {
    PathBuf::from("wkhtmltopdf")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn empty_path_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            optimization: OptimizationConfig::default(),
            results_dir: default_results_dir(),
            parallel_processes: None,
            runs: default_runs(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            load_path: None,
            steps: default_steps(),
            stepsize: default_stepsize(),
            circuit: default_circuit(),
            save_path: None,
            checkpoint_interval: default_checkpoint_interval(),
            seed: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            moving_average_window: default_moving_average_window(),
            pdf: false,
            wkhtmltopdf: default_wkhtmltopdf(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load `path`, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_file(path)?.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file without environment overrides or validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
    }

    /// Parse YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Only variables that are present override; absent ones leave the
    /// loaded values unchanged.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("VQLAB_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("VQLAB_LOG_FORMAT") {
            self.logging.format = v.parse()?;
        }
        if let Some(v) = lookup("VQLAB_RESULTS_DIR") {
            self.results_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("VQLAB_PARALLEL_PROCESSES") {
            let workers = v.parse().map_err(|_| {
                ConfigError::Validation(format!("Invalid VQLAB_PARALLEL_PROCESSES: {v}"))
            })?;
            self.parallel_processes = Some(workers);
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let opt = &self.optimization;

        if !opt.stepsize.is_finite() || opt.stepsize <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "stepsize must be finite and greater than 0, got {}",
                opt.stepsize
            )));
        }

        opt.circuit_kind()?;

        if opt.checkpoint_interval == 0 {
            return Err(ConfigError::Validation(
                "checkpoint_interval must be greater than 0".to_string(),
            ));
        }

        if self.parallel_processes == Some(0) {
            return Err(ConfigError::Validation(
                "parallel_processes must be greater than 0".to_string(),
            ));
        }

        if self.runs == 0 {
            return Err(ConfigError::Validation(
                "runs must be greater than 0".to_string(),
            ));
        }

        if self.report.moving_average_window == 0 {
            return Err(ConfigError::Validation(
                "moving_average_window must be greater than 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Worker count: `parallel_processes`, or the available parallelism.
    pub fn workers(&self) -> usize {
        self.parallel_processes.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

impl OptimizationConfig {
    /// Parsed circuit tag.
    pub fn circuit_kind(&self) -> Result<CircuitKind, ConfigError> {
        self.circuit
            .parse()
            .map_err(|e: vqlab_circuit::CircuitError| ConfigError::Validation(e.to_string()))
    }

    /// Optimizer settings shared by every run; `save_path` is per run and
    /// left unset.
    pub fn settings(&self) -> Result<OptimizationSettings, ConfigError> {
        Ok(OptimizationSettings {
            steps: self.steps,
            stepsize: self.stepsize,
            circuit: self.circuit_kind()?,
            save_path: None,
            checkpoint_interval: self.checkpoint_interval,
        })
    }
}

impl LoggingConfig {
    /// Level raised by `verbose` steps (`-v`, `-vv`, ...), capped at `trace`.
    pub fn with_verbosity(&self, verbose: u8) -> Self {
        let base = LOG_LEVELS
            .iter()
            .position(|l| *l == self.level)
            .unwrap_or(2);
        let idx = (base + verbose as usize).min(LOG_LEVELS.len() - 1);
        Self {
            level: LOG_LEVELS[idx].to_string(),
            format: self.format,
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(LogFormat::Console),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Validation(format!(
                "Invalid log format: {other}"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Console => f.write_str("console"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FULL: &str = r#"
optimization:
  load_path: ""
  steps: 50
  stepsize: 0.05
  circuit: alternate
  save_path: checkpoints/state.json
  checkpoint_interval: 5
  seed: 42
results_dir: out
parallel_processes: 3
runs: 4
report:
  moving_average_window: 7
  pdf: true
  wkhtmltopdf: /usr/local/bin/wkhtmltopdf
logging:
  level: debug
  format: json
"#;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.optimization.steps, 100);
        assert_eq!(config.optimization.stepsize, 0.1);
        assert_eq!(config.optimization.circuit, "default");
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.runs, 1);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_yaml(FULL).unwrap();
        let opt = &config.optimization;
        assert_eq!(opt.load_path, None);
        assert_eq!(opt.steps, 50);
        assert_eq!(opt.circuit_kind().unwrap(), CircuitKind::Alternate);
        assert_eq!(opt.save_path, Some(PathBuf::from("checkpoints/state.json")));
        assert_eq!(opt.checkpoint_interval, 5);
        assert_eq!(opt.seed, Some(42));
        assert_eq!(config.workers(), 3);
        assert_eq!(config.runs, 4);
        assert!(config.report.pdf);
        assert_eq!(config.report.moving_average_window, 7);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_null_load_path() {
        let config = Config::from_yaml("optimization:\n  load_path:\n").unwrap();
        assert_eq!(config.optimization.load_path, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_yaml(FULL)
            .unwrap()
            .merge_env(env(&[
                ("VQLAB_LOG_LEVEL", "warn"),
                ("VQLAB_LOG_FORMAT", "console"),
                ("VQLAB_RESULTS_DIR", "/tmp/vqlab"),
                ("VQLAB_PARALLEL_PROCESSES", "8"),
            ]))
            .unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Console);
        assert_eq!(config.results_dir, PathBuf::from("/tmp/vqlab"));
        assert_eq!(config.parallel_processes, Some(8));
        // Untouched by the environment.
        assert_eq!(config.optimization.steps, 50);
    }

    #[test]
    fn test_env_bad_values() {
        let bad_workers = Config::default().merge_env(env(&[("VQLAB_PARALLEL_PROCESSES", "many")]));
        assert!(matches!(bad_workers, Err(ConfigError::Validation(_))));

        let bad_format = Config::default().merge_env(env(&[("VQLAB_LOG_FORMAT", "xml")]));
        assert!(matches!(bad_format, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            "optimization:\n  stepsize: 0\n",
            "optimization:\n  stepsize: -0.5\n",
            "optimization:\n  circuit: bogus\n",
            "optimization:\n  checkpoint_interval: 0\n",
            "parallel_processes: 0\n",
            "runs: 0\n",
            "report:\n  moving_average_window: 0\n",
            "logging:\n  level: loud\n",
        ];
        for yaml in cases {
            let config = Config::from_yaml(yaml).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{yaml}"
            );
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::from_yaml("optimization: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_yaml("logging:\n  format: xml\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/vqlab/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_verbosity() {
        let logging = LoggingConfig::default();
        assert_eq!(logging.with_verbosity(0).level, "info");
        assert_eq!(logging.with_verbosity(1).level, "debug");
        assert_eq!(logging.with_verbosity(5).level, "trace");
    }

    #[test]
    fn test_settings() {
        let config = Config::from_yaml(FULL).unwrap();
        let settings = config.optimization.settings().unwrap();
        assert_eq!(settings.steps, 50);
        assert_eq!(settings.circuit, CircuitKind::Alternate);
        assert!(settings.save_path.is_none());
    }
}
