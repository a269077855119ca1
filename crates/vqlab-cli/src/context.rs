//! Application context threaded from `main` into the experiment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use vqlab_optim::{load_state, random_params};
use vqlab_report::{HtmlToPdf, WkHtmlToPdf};

use crate::config::{Config, LoggingConfig};
use crate::driver::{ParallelDriver, RunSpec};

/// Loaded configuration plus command-line adjustments.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    /// Number of `-v` flags.
    pub verbose: u8,
    /// Whether stderr is attached to a terminal.
    pub interactive: bool,
}

impl AppContext {
    pub fn new(config: Config, verbose: u8) -> Self {
        Self {
            config,
            verbose,
            interactive: console::user_attended_stderr(),
        }
    }

    /// Effective logging configuration.
    pub fn logging(&self) -> LoggingConfig {
        self.config.logging.with_verbosity(self.verbose)
    }

    /// Per-run inputs.
    ///
    /// With a `load_path`, run 0 resumes from the checkpoint's parameters and
    /// any further runs start from random ones. With more than one run, each
    /// run writes into `results_dir/run_NNN` and its checkpoint path gets a
    /// `_run_NNN` suffix.
    pub fn build_runs(&self) -> anyhow::Result<Vec<RunSpec>> {
        let opt = &self.config.optimization;
        let num_params = opt.circuit_kind()?.num_params();
        let runs = self.config.runs;

        let mut rng = match opt.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut resumed = match &opt.load_path {
            Some(path) => {
                let checkpoint = load_state(path)
                    .with_context(|| format!("Failed to resume from {}", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    previous_steps = checkpoint.cost_history.len(),
                    "resuming from checkpoint"
                );
                Some(checkpoint.params)
            }
            None => None,
        };

        let mut specs = Vec::with_capacity(runs);
        for index in 0..runs {
            let initial_params = match resumed.take() {
                Some(params) => params,
                None => random_params(num_params, &mut rng),
            };

            let (results_dir, save_path) = if runs == 1 {
                (self.config.results_dir.clone(), opt.save_path.clone())
            } else {
                (
                    self.config.results_dir.join(run_label(index)),
                    opt.save_path.as_deref().map(|p| suffixed(p, index)),
                )
            };

            specs.push(RunSpec {
                initial_params,
                save_path,
                results_dir,
            });
        }
        Ok(specs)
    }

    /// Driver configured from the loaded settings.
    pub fn driver(&self) -> anyhow::Result<ParallelDriver> {
        let settings = self.config.optimization.settings()?;
        let report = &self.config.report;

        let pdf: Option<Arc<dyn HtmlToPdf>> = if report.pdf {
            Some(Arc::new(WkHtmlToPdf::with_program(report.wkhtmltopdf.clone())))
        } else {
            None
        };

        Ok(ParallelDriver::new(settings, self.config.workers())
            .with_moving_average_window(report.moving_average_window)
            .with_pdf(pdf)
            .with_progress(self.interactive))
    }
}

fn run_label(index: usize) -> String {
    format!("run_{index:03}")
}

/// `dir/state.json` becomes `dir/state_run_003.json`.
fn suffixed(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}_{}", run_label(index));
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqlab_optim::save_state;

    fn context(config: Config) -> AppContext {
        AppContext {
            config,
            verbose: 0,
            interactive: false,
        }
    }

    #[test]
    fn test_suffixed() {
        assert_eq!(
            suffixed(Path::new("checkpoints/state.json"), 3),
            PathBuf::from("checkpoints/state_run_003.json")
        );
        assert_eq!(suffixed(Path::new("state"), 12), PathBuf::from("state_run_012"));
    }

    #[test]
    fn test_single_run_uses_config_paths() {
        let mut config = Config::default();
        config.optimization.save_path = Some(PathBuf::from("state.json"));
        config.optimization.seed = Some(7);

        let runs = context(config).build_runs().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].results_dir, PathBuf::from("results"));
        assert_eq!(runs[0].save_path, Some(PathBuf::from("state.json")));
        assert_eq!(runs[0].initial_params.len(), 2);
        assert!(runs[0].initial_params.iter().all(|p| (0.0..1.0).contains(p)));
    }

    #[test]
    fn test_multiple_runs_get_own_paths() {
        let mut config = Config::default();
        config.runs = 3;
        config.optimization.save_path = Some(PathBuf::from("ck/state.json"));

        let runs = context(config).build_runs().unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[2].results_dir, PathBuf::from("results/run_002"));
        assert_eq!(runs[2].save_path, Some(PathBuf::from("ck/state_run_002.json")));
        assert_ne!(runs[0].initial_params, runs[1].initial_params);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let mut config = Config::default();
        config.runs = 2;
        config.optimization.seed = Some(11);

        let a = context(config.clone()).build_runs().unwrap();
        let b = context(config).build_runs().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resume_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        save_state(&[2.5, -0.75], &[0.3, 0.1], &path).unwrap();

        let mut config = Config::default();
        config.runs = 2;
        config.optimization.load_path = Some(path);

        let runs = context(config).build_runs().unwrap();
        assert_eq!(runs[0].initial_params, vec![2.5, -0.75]);
        assert_ne!(runs[1].initial_params, vec![2.5, -0.75]);
    }

    #[test]
    fn test_missing_checkpoint_fails() {
        let mut config = Config::default();
        config.optimization.load_path = Some(PathBuf::from("/nonexistent/state.json"));
        assert!(context(config).build_runs().is_err());
    }

    #[test]
    fn test_driver_from_config() {
        let mut config = Config::default();
        config.parallel_processes = Some(3);
        let driver = context(config).driver().unwrap();
        assert_eq!(driver.workers(), 3);
        assert_eq!(driver.settings().steps, 100);
    }
}
