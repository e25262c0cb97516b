//! Settings stored in `littlewood.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::solver::CompanionSolver;

/// Enumerator configuration (TOML).
///
/// Every field is optional. The storage layout and block size are not configurable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LittlewoodConfig {
    pub solver: SolverConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SolverConfig {
    /// Iteration cap for the eigenvalue routine (0 = unlimited).
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: CompanionSolver::default().max_iterations,
        }
    }
}

impl SolverConfig {
    pub fn solver(&self) -> CompanionSolver {
        CompanionSolver {
            max_iterations: self.max_iterations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Width and height of the square canvas in pixels.
    pub canvas_size: u32,
    /// Pixels per unit in the complex plane.
    pub scale: f64,
    /// Pixel coordinate of the origin on both axes.
    pub offset: f64,
    /// RGBA colour of a plotted root.
    pub color: [u8; 4],
    /// Image path, relative to the working directory.
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_size: 1000,
            scale: 200.0,
            offset: 500.0,
            color: [255, 0, 0, 150],
            output: PathBuf::from("roots.png"),
        }
    }
}

impl LittlewoodConfig {
    pub fn validate(&self) -> Result<()> {
        if self.render.canvas_size == 0 {
            return Err(anyhow!("render.canvas_size must be > 0"));
        }
        if !self.render.scale.is_finite() || self.render.scale <= 0.0 {
            return Err(anyhow!("render.scale must be a positive number"));
        }
        if !self.render.offset.is_finite() {
            return Err(anyhow!("render.offset must be finite"));
        }
        if self.render.output.as_os_str().is_empty() {
            return Err(anyhow!("render.output must not be empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LittlewoodConfig::default()`.
pub fn load_config(path: &Path) -> Result<LittlewoodConfig> {
    if !path.exists() {
        let cfg = LittlewoodConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LittlewoodConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
