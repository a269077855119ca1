//! vqlab reports
//!
//! Turns a finished optimization (final parameters and cost history) into a
//! results directory:
//!
//! | file                    | content                                   |
//! |-------------------------|-------------------------------------------|
//! | `results.csv`           | `Step,Cost` table, steps from 0           |
//! | `Figure_1.png`          | cost against step                         |
//! | `Histogram.png`         | 20-bin histogram of the costs             |
//! | `Moving_Average.png`    | moving average of the cost                |
//! | `Boxplot.png`           | horizontal box plot                       |
//! | `Density_Plot.png`      | kernel density estimate                   |
//! | `interactive_plot.html` | plotly.js line chart                      |
//! | `report.html`           | parameters, history, statistics, figures  |
//! | `report.pdf`            | optional, converted from `report.html`    |

pub mod error;
pub mod html;
pub mod interactive;
pub mod pdf;
mod plots;
pub mod table;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vqlab_stats::Statistics;

pub use error::{ReportError, ReportResult};
pub use html::{Figure, ReportDocument, render_report};
pub use interactive::{render_interactive_plot, write_interactive_plot};
pub use pdf::{HtmlToPdf, WkHtmlToPdf};
pub use table::write_results_csv;

/// Default moving-average window.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 10;

/// Number of histogram bins.
pub const HISTOGRAM_BINS: usize = 20;

pub const RESULTS_CSV: &str = "results.csv";
pub const LINE_PLOT: &str = "Figure_1.png";
pub const HISTOGRAM_PLOT: &str = "Histogram.png";
pub const MOVING_AVERAGE_PLOT: &str = "Moving_Average.png";
pub const BOX_PLOT: &str = "Boxplot.png";
pub const DENSITY_PLOT: &str = "Density_Plot.png";
pub const INTERACTIVE_PLOT: &str = "interactive_plot.html";
pub const HTML_REPORT: &str = "report.html";
pub const PDF_REPORT: &str = "report.pdf";

const FIGURES: [Figure; 5] = [
    Figure {
        title: "Cost over Optimization Steps",
        file_name: LINE_PLOT,
    },
    Figure {
        title: "Histogram of Cost Values",
        file_name: HISTOGRAM_PLOT,
    },
    Figure {
        title: "Moving Average of Cost",
        file_name: MOVING_AVERAGE_PLOT,
    },
    Figure {
        title: "Boxplot of Cost Values",
        file_name: BOX_PLOT,
    },
    Figure {
        title: "Density Plot of Cost Values",
        file_name: DENSITY_PLOT,
    },
];

/// Paths written by [`Reporter::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub results_csv: PathBuf,
    pub line_plot: PathBuf,
    pub histogram: PathBuf,
    pub moving_average: PathBuf,
    pub boxplot: PathBuf,
    pub density: PathBuf,
    pub interactive_plot: PathBuf,
    pub html_report: PathBuf,
    pub pdf_report: Option<PathBuf>,
}

impl ReportArtifacts {
    /// Every written path, in write order.
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = vec![
            self.results_csv.as_path(),
            self.line_plot.as_path(),
            self.histogram.as_path(),
            self.moving_average.as_path(),
            self.boxplot.as_path(),
            self.density.as_path(),
            self.interactive_plot.as_path(),
            self.html_report.as_path(),
        ];
        paths.extend(self.pdf_report.as_deref());
        paths
    }
}

/// Writes the full report for one run into a results directory.
#[derive(Clone)]
pub struct Reporter {
    results_dir: PathBuf,
    moving_average_window: usize,
    pdf: Option<Arc<dyn HtmlToPdf>>,
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("results_dir", &self.results_dir)
            .field("moving_average_window", &self.moving_average_window)
            .field("pdf", &self.pdf.is_some())
            .finish()
    }
}

impl Reporter {
    /// Reporter writing into `results_dir`, without PDF output.
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            pdf: None,
        }
    }

    /// Set the moving-average window.
    pub fn with_moving_average_window(mut self, window: usize) -> Self {
        self.moving_average_window = window;
        self
    }

    /// Also convert the HTML report to PDF.
    pub fn with_pdf(mut self, converter: Arc<dyn HtmlToPdf>) -> Self {
        self.pdf = Some(converter);
        self
    }

    /// Output directory.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Write every artifact for `params` and `cost_history`.
    ///
    /// Files are written in a fixed order and the first failure aborts the
    /// rest; files written before the failure are left in place. Existing
    /// files are overwritten.
    pub fn generate(
        &self,
        params: &[f64],
        cost_history: &[f64],
    ) -> ReportResult<ReportArtifacts> {
        let statistics = Statistics::from_history(cost_history)?;

        let dir = &self.results_dir;
        fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;

        let results_csv = dir.join(RESULTS_CSV);
        write_results_csv(&results_csv, cost_history)?;
        tracing::info!(path = %results_csv.display(), "results table saved");

        let line_plot = dir.join(LINE_PLOT);
        plots::line_plot(&line_plot, cost_history)?;

        let histogram = dir.join(HISTOGRAM_PLOT);
        plots::histogram_plot(&histogram, cost_history, HISTOGRAM_BINS)?;

        let moving_average = dir.join(MOVING_AVERAGE_PLOT);
        plots::moving_average_plot(&moving_average, cost_history, self.moving_average_window)?;

        let boxplot = dir.join(BOX_PLOT);
        plots::box_plot(&boxplot, cost_history)?;

        let density = dir.join(DENSITY_PLOT);
        plots::density_plot(&density, cost_history)?;
        tracing::info!(dir = %dir.display(), "plots saved");

        let interactive_plot = dir.join(INTERACTIVE_PLOT);
        write_interactive_plot(&interactive_plot, cost_history)?;
        tracing::info!(path = %interactive_plot.display(), "interactive plot saved");

        let html_report = dir.join(HTML_REPORT);
        let html = render_report(&ReportDocument {
            params,
            cost_history,
            statistics: &statistics,
            figures: &FIGURES,
            interactive_plot: INTERACTIVE_PLOT,
            generated_at: chrono::Utc::now(),
        });
        fs::write(&html_report, html).map_err(|e| ReportError::io(&html_report, e))?;
        tracing::info!(path = %html_report.display(), "HTML report saved");

        let pdf_report = match &self.pdf {
            Some(converter) => {
                let pdf = dir.join(PDF_REPORT);
                converter.convert(&html_report, &pdf)?;
                tracing::info!(path = %pdf.display(), "PDF report saved");
                Some(pdf)
            }
            None => None,
        };

        Ok(ReportArtifacts {
            results_csv,
            line_plot,
            histogram,
            moving_average,
            boxplot,
            density,
            interactive_plot,
            html_report,
            pdf_report,
        })
    }
}
