//! Pixel-exact comparison of classification maps.
//!
//! Used by `skcc-imgdiff` and by the CLI tests to check a generated map
//! against a reference rendering.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::RgbImage;
use serde::Serialize;

/// Inclusive pixel rectangle, `(x0, y0)` top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl BoundingBox {
    fn point(x: u32, y: u32) -> Self {
        Self { x0: x, y0: y, x1: x, y1: y }
    }

    fn grow(&mut self, x: u32, y: u32) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x);
        self.y1 = self.y1.max(y);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub width: u32,
    pub height: u32,
    pub differing: usize,
    /// `None` when the images are identical.
    pub bounds: Option<BoundingBox>,
}

impl DiffReport {
    pub fn is_identical(&self) -> bool {
        self.differing == 0
    }
}

/// Compare two RGB images of equal size. Differing sizes are an error.
pub fn compare_images(a: &RgbImage, b: &RgbImage) -> Result<DiffReport> {
    if a.dimensions() != b.dimensions() {
        bail!(
            "image sizes differ: {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        );
    }
    let mut differing = 0;
    let mut bounds: Option<BoundingBox> = None;
    for ((x, y, pa), pb) in a.enumerate_pixels().zip(b.pixels()) {
        if pa != pb {
            differing += 1;
            match bounds.as_mut() {
                Some(bb) => bb.grow(x, y),
                None => bounds = Some(BoundingBox::point(x, y)),
            }
        }
    }
    Ok(DiffReport { width: a.width(), height: a.height(), differing, bounds })
}

/// Load both files as RGB and compare them.
pub fn compare_files(a: &Path, b: &Path) -> Result<DiffReport> {
    let load = |p: &Path| -> Result<RgbImage> {
        Ok(image::open(p)
            .with_context(|| format!("Cannot open {}", p.display()))?
            .to_rgb8())
    };
    compare_images(&load(a)?, &load(b)?)
}
