//! Parallel execution of independent optimization runs.
//!
//! Runs are CPU-bound and synchronous, so each one executes on a tokio
//! blocking thread. A semaphore bounds how many run at once. All dispatched
//! runs are joined before a failure is reported; nothing is cancelled.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail, ensure};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task;
use vqlab_optim::{OptimizationOutcome, OptimizationSettings, VqeOptimizer};
use vqlab_report::{HtmlToPdf, ReportArtifacts, Reporter};
use vqlab_stats::Metrics;

/// Inputs of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSpec {
    /// Starting parameters.
    pub initial_params: Vec<f64>,
    /// Checkpoint file owned by this run.
    pub save_path: Option<PathBuf>,
    /// Report directory owned by this run.
    pub results_dir: PathBuf,
}

/// Everything one finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: OptimizationOutcome,
    pub metrics: Metrics,
    pub artifacts: ReportArtifacts,
}

/// Bounded pool running optimizations and their reports.
#[derive(Clone)]
pub struct ParallelDriver {
    settings: OptimizationSettings,
    workers: usize,
    moving_average_window: usize,
    pdf: Option<Arc<dyn HtmlToPdf>>,
    progress: bool,
}

impl std::fmt::Debug for ParallelDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelDriver")
            .field("settings", &self.settings)
            .field("workers", &self.workers)
            .field("moving_average_window", &self.moving_average_window)
            .field("pdf", &self.pdf.is_some())
            .field("progress", &self.progress)
            .finish()
    }
}

impl ParallelDriver {
    /// Driver sharing `settings` across runs, with at least one worker.
    pub fn new(settings: OptimizationSettings, workers: usize) -> Self {
        Self {
            settings,
            workers: workers.max(1),
            moving_average_window: vqlab_report::DEFAULT_MOVING_AVERAGE_WINDOW,
            pdf: None,
            progress: false,
        }
    }

    /// Moving-average window used in every report.
    pub fn with_moving_average_window(mut self, window: usize) -> Self {
        self.moving_average_window = window;
        self
    }

    /// PDF converter used in every report.
    pub fn with_pdf(mut self, converter: Option<Arc<dyn HtmlToPdf>>) -> Self {
        self.pdf = converter;
        self
    }

    /// Show a progress bar on stderr.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn settings(&self) -> &OptimizationSettings {
        &self.settings
    }

    /// Optimize every run and return the outcomes in input order.
    pub async fn optimize_all(
        &self,
        runs: Vec<RunSpec>,
    ) -> anyhow::Result<Vec<OptimizationOutcome>> {
        self.settings.validate()?;
        let settings = self.settings.clone();

        self.fan_out("optimize", runs, move |_, run| {
            let settings = OptimizationSettings {
                save_path: run.save_path,
                ..settings.clone()
            };
            let outcome = VqeOptimizer::new(settings)?.run(run.initial_params)?;
            Ok(outcome)
        })
        .await
    }

    /// Compute metrics and write the report of every outcome.
    ///
    /// `runs[i]` supplies the results directory of `outcomes[i]`.
    pub async fn analyze_all(
        &self,
        runs: &[RunSpec],
        outcomes: Vec<OptimizationOutcome>,
    ) -> anyhow::Result<Vec<RunReport>> {
        ensure!(
            runs.len() == outcomes.len(),
            "{} runs but {} outcomes",
            runs.len(),
            outcomes.len()
        );

        let window = self.moving_average_window;
        let pdf = self.pdf.clone();
        let items: Vec<_> = runs
            .iter()
            .map(|run| run.results_dir.clone())
            .zip(outcomes)
            .collect();

        self.fan_out("report", items, move |_, (results_dir, outcome)| {
            let metrics = Metrics::from_history(&outcome.cost_history)?;
            tracing::info!(
                final_cost = metrics.final_cost,
                mean_absolute_error = metrics.mean_absolute_error,
                mean_squared_error = metrics.mean_squared_error,
                "metrics computed"
            );

            let mut reporter = Reporter::new(results_dir).with_moving_average_window(window);
            if let Some(converter) = &pdf {
                reporter = reporter.with_pdf(Arc::clone(converter));
            }
            let artifacts = reporter.generate(&outcome.params, &outcome.cost_history)?;

            Ok(RunReport {
                outcome,
                metrics,
                artifacts,
            })
        })
        .await
    }

    /// Optimize, then report, every run.
    pub async fn run(&self, runs: Vec<RunSpec>) -> anyhow::Result<Vec<RunReport>> {
        let outcomes = self.optimize_all(runs.clone()).await?;
        self.analyze_all(&runs, outcomes).await
    }

    async fn fan_out<T, R, F>(
        &self,
        stage: &'static str,
        items: Vec<T>,
        work: F,
    ) -> anyhow::Result<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(usize, T) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        let total = items.len();
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let work = Arc::new(work);
        let bar = self.progress_bar(total, stage);

        tracing::debug!(stage, runs = total, workers = self.workers, "dispatching runs");

        let mut handles = Vec::with_capacity(total);
        for (index, item) in items.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let work = Arc::clone(&work);
            let bar = bar.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .context("worker pool closed")?;
                let result = task::spawn_blocking(move || {
                    tracing::info_span!("run", index).in_scope(|| (*work)(index, item))
                })
                .await
                .context("worker thread panicked")?;
                bar.inc(1);
                result
            }));
        }

        let mut results = Vec::with_capacity(total);
        let mut failed = 0;
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(Ok(value)) => results.push(value),
                Ok(Err(e)) => {
                    failed += 1;
                    tracing::error!(index, stage, "run failed: {e:#}");
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(index, stage, "run task aborted: {e}");
                }
            }
        }
        bar.finish_and_clear();

        if failed > 0 {
            bail!("{failed} of {total} runs failed during {stage}");
        }
        Ok(results)
    }

    fn progress_bar(&self, total: usize, stage: &'static str) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
        {
            bar.set_style(style);
        }
        bar.set_message(stage);
        bar
    }
}
