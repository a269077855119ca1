//! vqlab driver
//!
//! Configuration, logging and the parallel driver behind the `vqlab` binary.
//! A run is: load `config.yaml`, build the initial parameters (fresh, seeded
//! or resumed from a checkpoint), optimize each run on a bounded worker pool,
//! then compute metrics and write a report per run.

pub mod config;
pub mod context;
pub mod driver;
pub mod experiment;
pub mod logging;

pub use config::{Config, ConfigError, LogFormat, LoggingConfig, OptimizationConfig, ReportConfig};
pub use context::AppContext;
pub use driver::{ParallelDriver, RunReport, RunSpec};
pub use experiment::run_experiment;
pub use logging::init_logging;
