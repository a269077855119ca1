//! HTML report emitter.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use vqlab_stats::Statistics;

const REPORT_CSS: &str = include_str!("../static/report.css");

/// A plot embedded in the report by relative file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub title: &'static str,
    pub file_name: &'static str,
}

/// Everything the HTML report shows.
#[derive(Debug, Clone)]
pub struct ReportDocument<'a> {
    pub params: &'a [f64],
    pub cost_history: &'a [f64],
    pub statistics: &'a Statistics,
    pub figures: &'a [Figure],
    /// Relative link to the interactive plot page.
    pub interactive_plot: &'a str,
    pub generated_at: DateTime<Utc>,
}

/// Render `doc` as a complete HTML page.
pub fn render_report(doc: &ReportDocument<'_>) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_document(doc);
    emitter.output
}

struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn emit_document(&mut self, doc: &ReportDocument<'_>) {
        self.writeln("<!DOCTYPE html>");
        self.writeln("<html lang=\"en\">");
        self.writeln("<head>");
        self.writeln("<meta charset=\"utf-8\">");
        self.writeln("<title>VQE Optimization Report</title>");
        self.writeln("<style>");
        self.output.push_str(REPORT_CSS);
        self.writeln("</style>");
        self.writeln("</head>");
        self.writeln("<body>");
        self.writeln("<h1>VQE Optimization Report</h1>");

        self.emit_params(doc.params);
        self.emit_history(doc.cost_history);
        self.emit_statistics(doc.statistics);
        self.emit_figures(doc.figures);

        self.writeln("<h2>Interactive Plot</h2>");
        self.writeln(&format!(
            "<p><a href=\"{}\">Open the interactive cost plot</a></p>",
            doc.interactive_plot
        ));

        self.writeln(&format!(
            "<footer>Generated {}</footer>",
            doc.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        self.writeln("</body>");
        self.writeln("</html>");
    }

    fn emit_params(&mut self, params: &[f64]) {
        self.writeln("<h2>Optimized Parameters</h2>");
        let list = params
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.writeln(&format!("<p><code>[{list}]</code></p>"));
    }

    fn emit_history(&mut self, history: &[f64]) {
        self.writeln("<h2>Cost History</h2>");
        self.writeln("<div class=\"history\">");
        self.writeln("<table>");
        self.writeln("<tr><th>Step</th><th>Cost</th></tr>");
        let mut rows = String::new();
        for (i, cost) in history.iter().enumerate() {
            // Display steps from 1; the CSV keeps 0-based indices.
            let _ = writeln!(rows, "<tr><td>{}</td><td>{cost}</td></tr>", i + 1);
        }
        self.output.push_str(&rows);
        self.writeln("</table>");
        self.writeln("</div>");
    }

    fn emit_statistics(&mut self, stats: &Statistics) {
        self.writeln("<h2>Statistics</h2>");
        self.writeln("<table>");
        self.writeln("<tr><th>Statistic</th><th>Value</th></tr>");
        for (label, value) in stats.entries() {
            self.writeln(&format!(
                "<tr><td class=\"label\">{label}</td><td>{value}</td></tr>"
            ));
        }
        self.writeln("</table>");
    }

    fn emit_figures(&mut self, figures: &[Figure]) {
        for fig in figures {
            self.writeln(&format!("<h2>{}</h2>", fig.title));
            self.writeln("<figure>");
            self.writeln(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                fig.file_name, fig.title
            ));
            self.writeln("</figure>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections() {
        let history = [0.9, 0.5, 0.1];
        let stats = Statistics::from_history(&history).unwrap();
        let figures = [Figure {
            title: "Cost over Optimization Steps",
            file_name: "Figure_1.png",
        }];
        let html = render_report(&ReportDocument {
            params: &[0.1, 0.2],
            cost_history: &history,
            statistics: &stats,
            figures: &figures,
            interactive_plot: "interactive_plot.html",
            generated_at: Utc::now(),
        });

        assert!(html.contains("<code>[0.1, 0.2]</code>"));
        assert!(html.contains("<tr><td>1</td><td>0.9</td></tr>"));
        assert!(html.contains("<tr><td>3</td><td>0.1</td></tr>"));
        assert!(!html.contains("<tr><td>0</td>"));
        assert!(html.contains("Coefficient of Variation"));
        assert!(html.contains("<img src=\"Figure_1.png\""));
        assert!(html.contains("href=\"interactive_plot.html\""));
        assert!(html.contains("<footer>Generated "));
    }
}
