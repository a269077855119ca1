//! Full report generation into a temporary directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use vqlab_report::{ReportError, Reporter, WkHtmlToPdf};
use vqlab_stats::StatsError;

fn history(n: usize) -> Vec<f64> {
    (0..n).map(|i| (0.5 + 0.08 * i as f64).cos()).collect()
}

#[test]
fn writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");

    let artifacts = Reporter::new(&out)
        .generate(&[2.9, 0.4], &history(30))
        .unwrap();

    assert_eq!(artifacts.paths().len(), 8);
    assert!(artifacts.pdf_report.is_none());
    for path in artifacts.paths() {
        assert!(path.starts_with(&out), "{}", path.display());
        assert!(fs::metadata(path).unwrap().len() > 0, "{}", path.display());
    }

    for name in [
        "results.csv",
        "Figure_1.png",
        "Histogram.png",
        "Moving_Average.png",
        "Boxplot.png",
        "Density_Plot.png",
        "interactive_plot.html",
        "report.html",
    ] {
        assert!(out.join(name).exists(), "missing {name}");
    }
}

#[test]
fn csv_has_zero_based_steps() {
    let dir = tempfile::tempdir().unwrap();
    let data = history(12);
    Reporter::new(dir.path()).generate(&[0.0, 0.0], &data).unwrap();

    let mut reader = csv::Reader::from_path(dir.path().join("results.csv")).unwrap();
    assert_eq!(reader.headers().unwrap(), vec!["Step", "Cost"]);

    let rows: Vec<(usize, f64)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].parse().unwrap(), r[1].parse().unwrap())
        })
        .collect();
    assert_eq!(rows.len(), 12);
    for (i, (step, cost)) in rows.iter().enumerate() {
        assert_eq!(*step, i);
        assert_eq!(*cost, data[i]);
    }
}

#[test]
fn html_references_images_relatively() {
    let dir = tempfile::tempdir().unwrap();
    Reporter::new(dir.path())
        .generate(&[1.5, 0.25], &history(15))
        .unwrap();

    let html = fs::read_to_string(dir.path().join("report.html")).unwrap();
    for image in [
        "Figure_1.png",
        "Histogram.png",
        "Moving_Average.png",
        "Boxplot.png",
        "Density_Plot.png",
    ] {
        assert!(html.contains(&format!("src=\"{image}\"")), "{image}");
    }
    assert!(html.contains("href=\"interactive_plot.html\""));
    assert!(html.contains("<tr><td>15</td>"));
    assert!(!html.contains(&dir.path().display().to_string()));
}

#[test]
fn short_history_fails_at_moving_average() {
    let dir = tempfile::tempdir().unwrap();
    let err = Reporter::new(dir.path())
        .generate(&[0.1, 0.2], &history(5))
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::Stats(StatsError::InvalidWindow { window: 10, len: 5 })
    ));
    assert!(dir.path().join("results.csv").exists());
    assert!(!dir.path().join("report.html").exists());
}

#[test]
fn custom_window_accepts_short_history() {
    let dir = tempfile::tempdir().unwrap();
    Reporter::new(dir.path())
        .with_moving_average_window(3)
        .generate(&[0.1, 0.2], &history(5))
        .unwrap();
    assert!(dir.path().join("report.html").exists());
}

#[test]
fn empty_history_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never");
    let err = Reporter::new(&out).generate(&[0.1, 0.2], &[]).unwrap_err();

    assert!(matches!(err, ReportError::Stats(StatsError::EmptyHistory)));
    assert!(!out.exists());
}

#[test]
fn constant_history_still_reports() {
    let dir = tempfile::tempdir().unwrap();
    Reporter::new(dir.path())
        .generate(&[0.0, 0.0], &[0.0; 20])
        .unwrap();

    let html = fs::read_to_string(dir.path().join("report.html")).unwrap();
    assert!(html.contains("<td>inf</td>"));
    assert!(dir.path().join("Density_Plot.png").exists());
}

#[test]
fn missing_pdf_tool_fails_after_html() {
    let dir = tempfile::tempdir().unwrap();
    let converter = WkHtmlToPdf::with_program(Path::new("/nonexistent/wkhtmltopdf"));
    let err = Reporter::new(dir.path())
        .with_pdf(Arc::new(converter))
        .generate(&[0.1, 0.2], &history(20))
        .unwrap_err();

    assert!(matches!(err, ReportError::PdfConversion { .. }));
    assert!(dir.path().join("report.html").exists());
    assert!(!dir.path().join("report.pdf").exists());
}
