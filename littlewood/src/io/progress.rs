//! Progress store (`state.json`).
//!
//! The progress file is the only state consulted on restart. It is written
//! after every stored block, always via temp file + rename.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::{debug, info};

use super::atomic::write_atomic;

use crate::core::engine::validate_progress;
use crate::core::types::ProgressState;

const PROGRESS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/progress/v1.schema.json"
));

/// Load progress, creating the default `{Degree: 1, CoeffCode: 0}` on first run.
///
/// Only a missing file counts as "no progress". Malformed content is an error.
pub fn load_progress(path: &Path) -> Result<ProgressState> {
    if !path.exists() {
        let state = ProgressState::default();
        write_progress(path, &state)?;
        info!(path = %path.display(), "created default progress");
        return Ok(state);
    }
    read_progress(path)
}

/// Load progress without creating it.
pub fn peek_progress(path: &Path) -> Result<Option<ProgressState>> {
    if !path.exists() {
        return Ok(None);
    }
    read_progress(path).map(Some)
}

/// Atomically write progress to disk (temp file + rename).
pub fn write_progress(path: &Path, state: &ProgressState) -> Result<()> {
    debug!(path = %path.display(), degree = state.degree, coeff_code = state.coeff_code, "writing progress");
    let mut buf = serde_json::to_string_pretty(state)?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn read_progress(path: &Path) -> Result<ProgressState> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read progress {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse progress {}", path.display()))?;
    validate_schema(&value).with_context(|| format!("validate progress {}", path.display()))?;
    let state: ProgressState = serde_json::from_value(value)
        .with_context(|| format!("deserialize progress {}", path.display()))?;
    validate_progress(&state).with_context(|| format!("check progress {}", path.display()))?;
    debug!(degree = state.degree, coeff_code = state.coeff_code, "progress loaded");
    Ok(state)
}

fn validate_schema(progress: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(PROGRESS_SCHEMA).context("parse progress schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages = compiled
        .iter_errors(progress)
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    if !messages.is_empty() {
        return Err(anyhow!(
            "progress schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
