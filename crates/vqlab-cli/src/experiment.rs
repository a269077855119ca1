//! One full experiment: build the runs, optimize, report.

use crate::context::AppContext;
use crate::driver::RunReport;

/// Run every configured optimization and write its report.
///
/// Reports come back in run order.
pub async fn run_experiment(ctx: &AppContext) -> anyhow::Result<Vec<RunReport>> {
    let runs = ctx.build_runs()?;
    let driver = ctx.driver()?;

    tracing::info!(
        runs = runs.len(),
        workers = driver.workers(),
        circuit = %driver.settings().circuit,
        "starting experiment"
    );

    let reports = driver.run(runs).await?;

    tracing::info!(
        results_dir = %ctx.config.results_dir.display(),
        "experiment complete"
    );
    Ok(reports)
}
