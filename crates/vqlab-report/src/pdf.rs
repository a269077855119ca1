//! HTML to PDF conversion through an external tool.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{ReportError, ReportResult};

/// Converts a rendered HTML report into a PDF file.
pub trait HtmlToPdf: Send + Sync {
    /// Convert the HTML file at `html` into a PDF at `pdf`.
    fn convert(&self, html: &Path, pdf: &Path) -> ReportResult<()>;
}

/// Converter that runs the `wkhtmltopdf` binary.
#[derive(Debug, Clone)]
pub struct WkHtmlToPdf {
    program: PathBuf,
}

impl WkHtmlToPdf {
    /// Use `wkhtmltopdf` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("wkhtmltopdf")
    }

    /// Use the binary at `program`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Binary invoked for conversion.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for WkHtmlToPdf {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlToPdf for WkHtmlToPdf {
    fn convert(&self, html: &Path, pdf: &Path) -> ReportResult<()> {
        let command = self.program.display().to_string();

        // Images are referenced relative to the report, which newer
        // wkhtmltopdf builds refuse without this flag.
        let output = Command::new(&self.program)
            .arg("--quiet")
            .arg("--enable-local-file-access")
            .arg(html)
            .arg(pdf)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ReportError::PdfConversion {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReportError::PdfConversion {
                command,
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}
