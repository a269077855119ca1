//! PNG charts of a cost history.
//!
//! Charts carry geometry only (axes, series, boxes). Titles and axis labels
//! live in the HTML report, so rendering never touches system fonts.

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use vqlab_stats::{BoxSummary, GaussianKde, Histogram, StatsError, moving_average};

use crate::error::{ReportError, ReportResult};

const SIZE: (u32, u32) = (800, 600);
const MARGIN: u32 = 30;
const DENSITY_POINTS: usize = 200;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Cost against step.
pub(crate) fn line_plot(path: &Path, history: &[f64]) -> ReportResult<()> {
    if history.is_empty() {
        return Err(StatsError::EmptyHistory.into());
    }
    let root = canvas(path)?;
    let (lo, hi) = bounds(history);
    let mut chart = build_chart(
        &root,
        path,
        padded(0.0, (history.len() - 1) as f64),
        padded(lo, hi),
    )?;

    let points = history.iter().enumerate().map(|(i, &c)| (i as f64, c));
    chart
        .draw_series(LineSeries::new(points, BLUE.stroke_width(2)))
        .map_err(|e| ReportError::plot(path, e))?;

    root.present().map_err(|e| ReportError::plot(path, e))
}

/// Equal-width histogram of the cost values.
pub(crate) fn histogram_plot(path: &Path, history: &[f64], bins: usize) -> ReportResult<()> {
    let hist = Histogram::new(history, bins)?;
    let root = canvas(path)?;
    let x = padded(hist.edges[0], hist.edges[hist.edges.len() - 1]);
    let y = 0.0..(hist.max_count().max(1) as f64 * 1.1);
    let mut chart = build_chart(&root, path, x, y)?;

    let fill = BLUE.mix(0.6).filled();
    let outline = BLACK.stroke_width(1);
    chart
        .draw_series(
            hist.bins()
                .map(|(l, r, c)| Rectangle::new([(l, 0.0), (r, c as f64)], fill)),
        )
        .map_err(|e| ReportError::plot(path, e))?;
    chart
        .draw_series(
            hist.bins()
                .map(|(l, r, c)| Rectangle::new([(l, 0.0), (r, c as f64)], outline)),
        )
        .map_err(|e| ReportError::plot(path, e))?;

    root.present().map_err(|e| ReportError::plot(path, e))
}

/// Moving average of the cost, plotted at the step that closes each window.
pub(crate) fn moving_average_plot(
    path: &Path,
    history: &[f64],
    window: usize,
) -> ReportResult<()> {
    let averaged = moving_average(history, window)?;
    let root = canvas(path)?;
    let (lo, hi) = bounds(&averaged);
    let mut chart = build_chart(
        &root,
        path,
        padded(0.0, (history.len() - 1) as f64),
        padded(lo, hi),
    )?;

    let offset = window - 1;
    let points = averaged
        .iter()
        .enumerate()
        .map(|(i, &v)| ((i + offset) as f64, v));
    chart
        .draw_series(LineSeries::new(points, RED.stroke_width(2)))
        .map_err(|e| ReportError::plot(path, e))?;

    root.present().map_err(|e| ReportError::plot(path, e))
}

/// Horizontal box plot with Tukey whiskers and outlier markers.
pub(crate) fn box_plot(path: &Path, history: &[f64]) -> ReportResult<()> {
    let summary = BoxSummary::from_data(history)?;
    let root = canvas(path)?;
    let (lo, hi) = bounds(history);
    let mut chart = build_chart(&root, path, padded(lo, hi), 0.0..1.0)?;

    let (bottom, mid, top) = (0.3, 0.5, 0.7);
    let body = [(summary.q1, bottom), (summary.q3, top)];
    chart
        .draw_series([
            Rectangle::new(body, BLUE.mix(0.3).filled()),
            Rectangle::new(body, BLUE.stroke_width(2)),
        ])
        .map_err(|e| ReportError::plot(path, e))?;

    let segments = vec![
        vec![(summary.median, bottom), (summary.median, top)],
        vec![(summary.lower_whisker, mid), (summary.q1, mid)],
        vec![(summary.q3, mid), (summary.upper_whisker, mid)],
        vec![(summary.lower_whisker, 0.4), (summary.lower_whisker, 0.6)],
        vec![(summary.upper_whisker, 0.4), (summary.upper_whisker, 0.6)],
    ];
    chart
        .draw_series(
            segments
                .into_iter()
                .map(|s| PathElement::new(s, BLACK.stroke_width(2))),
        )
        .map_err(|e| ReportError::plot(path, e))?;

    chart
        .draw_series(
            summary
                .outliers
                .iter()
                .map(|&x| Circle::new((x, mid), 4, RED.filled())),
        )
        .map_err(|e| ReportError::plot(path, e))?;

    root.present().map_err(|e| ReportError::plot(path, e))
}

/// Filled Gaussian kernel density curve.
///
/// Zero-variance data has no density; the chart is left as empty axes.
pub(crate) fn density_plot(path: &Path, history: &[f64]) -> ReportResult<()> {
    if history.is_empty() {
        return Err(StatsError::EmptyHistory.into());
    }
    let root = canvas(path)?;

    match GaussianKde::new(history) {
        Some(kde) => {
            let curve = kde.curve(DENSITY_POINTS);
            let x = curve[0].0..curve[curve.len() - 1].0;
            let peak = curve.iter().map(|&(_, y)| y).fold(0.0, f64::max);
            let mut chart = build_chart(&root, path, x, 0.0..(peak * 1.1))?;
            chart
                .draw_series(AreaSeries::new(curve, 0.0, BLUE.mix(0.3)).border_style(BLUE))
                .map_err(|e| ReportError::plot(path, e))?;
        }
        None => {
            tracing::warn!(
                path = %path.display(),
                "cost history has zero variance; density plot left empty"
            );
            let (lo, hi) = bounds(history);
            build_chart(&root, path, padded(lo, hi), 0.0..1.0)?;
        }
    }

    root.present().map_err(|e| ReportError::plot(path, e))
}

fn canvas(path: &Path) -> ReportResult<Area<'_>> {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ReportError::plot(path, e))?;
    Ok(root)
}

/// Cartesian chart with the two axis lines drawn.
fn build_chart<'a, 'b>(
    root: &'a Area<'b>,
    path: &Path,
    x: Range<f64>,
    y: Range<f64>,
) -> ReportResult<Chart<'a, 'b>> {
    let mut chart = ChartBuilder::on(root)
        .margin(MARGIN)
        .build_cartesian_2d(x.clone(), y.clone())
        .map_err(|e| ReportError::plot(path, e))?;

    let axes = [
        vec![(x.start, y.start), (x.end, y.start)],
        vec![(x.start, y.start), (x.start, y.end)],
    ];
    chart
        .draw_series(
            axes.into_iter()
                .map(|line| PathElement::new(line, BLACK.stroke_width(1))),
        )
        .map_err(|e| ReportError::plot(path, e))?;

    Ok(chart)
}

fn bounds(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
}

/// Range with 5% head room on each side; a degenerate range is widened to
/// unit width.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    } else {
        (lo - 0.5)..(hi + 0.5)
    }
}
