//! JSON checkpoint store.
//!
//! A checkpoint is a single JSON object:
//!
//! ```json
//! {"params": [0.1, 0.2], "cost_history": [0.98, 0.95]}
//! ```
//!
//! Saves go through a sibling temporary file and a rename, so a crash
//! mid-write never leaves a truncated checkpoint behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OptimError, OptimResult};

/// Persisted optimizer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Parameter vector at save time.
    pub params: Vec<f64>,
    /// One cost per completed step.
    pub cost_history: Vec<f64>,
}

/// Write `params` and `cost_history` to `path`, replacing any previous file.
///
/// Missing parent directories are created.
pub fn save_state(params: &[f64], cost_history: &[f64], path: &Path) -> OptimResult<()> {
    #[derive(Serialize)]
    struct View<'a> {
        params: &'a [f64],
        cost_history: &'a [f64],
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OptimError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(&View {
        params,
        cost_history,
    })?;

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| OptimError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        OptimError::io(path, e)
    })?;

    tracing::debug!(
        path = %path.display(),
        steps = cost_history.len(),
        "checkpoint saved"
    );
    Ok(())
}

/// Read a checkpoint written by [`save_state`].
///
/// Extra keys in the file are ignored.
pub fn load_state(path: &Path) -> OptimResult<Checkpoint> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(OptimError::CheckpointNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(OptimError::io(path, e)),
    };

    serde_json::from_str(&content).map_err(|e| OptimError::MalformedCheckpoint {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "checkpoint".into());
    name.push(".tmp");
    path.with_file_name(name)
}
