//! Scatter image of the stored roots of one degree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use num_complex::Complex64;
use tracing::debug;

use crate::io::block_store::{list_blocks, read_block};
use crate::io::config::RenderConfig;
use crate::io::paths::WorkspacePaths;

/// Affine map from the complex plane onto canvas pixels (same on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub offset: f64,
}

impl Transform {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            scale: config.scale,
            offset: config.offset,
        }
    }

    /// Canvas coordinates of `root`, unrounded.
    pub fn apply(&self, root: Complex64) -> (f64, f64) {
        (
            self.scale * root.re + self.offset,
            self.scale * root.im + self.offset,
        )
    }

    /// Pixel of `root` with coordinates truncated toward zero, or `None` if
    /// it falls off a `size`² canvas.
    pub fn pixel(&self, root: Complex64, size: u32) -> Option<(u32, u32)> {
        let (x, y) = self.apply(root);
        let (x, y) = (x.trunc(), y.trunc());
        let limit = f64::from(size);
        if !(0.0..limit).contains(&x) || !(0.0..limit).contains(&y) {
            return None;
        }
        Some((x as u32, y as u32))
    }
}

/// Rendered image plus the number of roots that landed on it.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    pub points: usize,
}

/// Plot every stored root of `degree` onto a transparent canvas.
///
/// A degree with no stored blocks renders as a fully transparent image.
pub fn render_degree(
    paths: &WorkspacePaths,
    degree: u32,
    config: &RenderConfig,
) -> Result<Rendered> {
    let transform = Transform::from_config(config);
    let color = Rgba(config.color);
    let mut image = RgbaImage::new(config.canvas_size, config.canvas_size);
    let mut points = 0usize;

    for block in list_blocks(paths, degree)? {
        let records = read_block(&block.path)?;
        for root in records.iter().flat_map(|record| record.roots.iter()) {
            if let Some((x, y)) = transform.pixel(*root, config.canvas_size) {
                image.put_pixel(x, y, color);
                points += 1;
            }
        }
        debug!(number = block.id.number, records = records.len(), "block plotted");
    }
    Ok(Rendered { image, points })
}

/// Render `degree` and save it as PNG at `output`.
pub fn render_to_file(
    paths: &WorkspacePaths,
    degree: u32,
    config: &RenderConfig,
    output: &Path,
) -> Result<(PathBuf, usize)> {
    let rendered = render_degree(paths, degree, config)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    }
    rendered
        .image
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("write image {}", output.display()))?;
    Ok((output.to_path_buf(), rendered.points))
}
