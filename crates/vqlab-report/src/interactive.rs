//! Interactive cost plot as a standalone HTML page backed by plotly.js.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{ReportError, ReportResult};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Serialize)]
struct Trace<'a> {
    x: Vec<usize>,
    y: &'a [f64],
    mode: &'static str,
    name: &'static str,
}

#[derive(Serialize)]
struct Axis {
    title: &'static str,
}

#[derive(Serialize)]
struct Layout {
    title: &'static str,
    xaxis: Axis,
    yaxis: Axis,
}

/// Render the interactive page for `cost_history`.
pub fn render_interactive_plot(cost_history: &[f64]) -> ReportResult<String> {
    let data = [Trace {
        x: (0..cost_history.len()).collect(),
        y: cost_history,
        mode: "lines+markers",
        name: "Cost",
    }];
    let layout = Layout {
        title: "Cost over Optimization Steps",
        xaxis: Axis { title: "Step" },
        yaxis: Axis { title: "Cost" },
    };

    let data = serde_json::to_string(&data)?;
    let layout = serde_json::to_string(&layout)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Cost over Optimization Steps</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="cost-plot" style="width:100%;height:90vh;"></div>
<script>
Plotly.newPlot("cost-plot", {data}, {layout});
</script>
</body>
</html>
"#
    ))
}

/// Write the interactive page to `path`.
pub fn write_interactive_plot(path: &Path, cost_history: &[f64]) -> ReportResult<()> {
    let html = render_interactive_plot(cost_history)?;
    fs::write(path, html).map_err(|e| ReportError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_data() {
        let html = render_interactive_plot(&[0.5, 0.25]).unwrap();
        assert!(html.contains(r#""x":[0,1]"#));
        assert!(html.contains(r#""y":[0.5,0.25]"#));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("Plotly.newPlot"));
    }
}
