//! Tabular export of a cost history.

use std::path::Path;

use crate::error::{ReportError, ReportResult};

/// Write `Step,Cost` rows, steps counted from 0.
pub fn write_results_csv(path: &Path, cost_history: &[f64]) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Step", "Cost"])?;
    for (step, cost) in cost_history.iter().enumerate() {
        writer.write_record([step.to_string(), cost.to_string()])?;
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_results_csv(&path, &[0.5, -0.25]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Step,Cost\n0,0.5\n1,-0.25\n");
    }

    #[test]
    fn test_empty_history_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_results_csv(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Step,Cost\n");
    }
}
