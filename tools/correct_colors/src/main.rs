/// Snap stray colors in a legend-coded map to the nearest valid pixel.
///
/// Resampled or hand-edited maps pick up anti-aliased colors that no legend
/// entry matches. Each such pixel takes the color of the closest pixel whose
/// color the profile lists, found by walking square rings of growing radius.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use image::{Rgba, RgbaImage};
use skcc_core::profile::parse::parse_input_profile;
use skcc_core::Color;

// ── CLI ──────────────────────────────────────────────────────────────────────

/// Axis along which the search wraps around the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Wrap {
    /// Horizontal wrap, for maps with longitude along x.
    X,
    /// Vertical wrap, for maps with longitude along y.
    Y,
}

#[derive(Parser, Debug)]
#[command(
    name = "correct_colors",
    about = "Replace colors missing from a profile with the nearest valid neighbour"
)]
struct Args {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Input color profile listing the valid colors
    colors: PathBuf,

    /// Longitude axis; the search wraps along it and clamps along the other
    #[arg(long, value_enum)]
    wrap: Option<Wrap>,
}

// ── Search ───────────────────────────────────────────────────────────────────

struct ValidMask {
    width: u32,
    height: u32,
    valid: Vec<bool>,
}

impl ValidMask {
    fn new(img: &RgbaImage, colors: &HashSet<Color>) -> Self {
        let valid = img
            .pixels()
            .map(|&Rgba([r, g, b, _])| colors.contains(&Color::new(r, g, b)))
            .collect();
        Self { width: img.width(), height: img.height(), valid }
    }

    fn is_valid(&self, x: u32, y: u32) -> bool {
        self.valid[y as usize * self.width as usize + x as usize]
    }

    fn any_valid(&self) -> bool {
        self.valid.iter().any(|&v| v)
    }

    /// Map an offset position onto the image: wrap along `wrap`, clamp otherwise.
    fn fold(&self, x: i64, y: i64, wrap: Option<Wrap>) -> (u32, u32) {
        let fit = |v: i64, size: u32, wraps: bool| -> u32 {
            let size = i64::from(size);
            let v = if wraps { v.rem_euclid(size) } else { v.clamp(0, size - 1) };
            v as u32
        };
        (
            fit(x, self.width, wrap == Some(Wrap::X)),
            fit(y, self.height, wrap == Some(Wrap::Y)),
        )
    }

    /// Closest valid pixel to `(x, y)` by Chebyshev distance. Within a ring the
    /// walk goes along the top edge, down the right, back along the bottom and
    /// up the left; the first hit wins.
    fn nearest(&self, x: u32, y: u32, wrap: Option<Wrap>) -> Option<(u32, u32)> {
        let (cx, cy) = (i64::from(x), i64::from(y));
        let max_radius = i64::from(self.width.max(self.height));
        for r in 1..=max_radius {
            let top = (-r..r).map(|d| (d, -r));
            let right = (-r..r).map(|d| (r, d));
            let bottom = (-r..r).map(|d| (-d, r));
            let left = (-r..r).map(|d| (-r, -d));
            for (dx, dy) in top.chain(right).chain(bottom).chain(left) {
                let (px, py) = self.fold(cx + dx, cy + dy, wrap);
                if self.is_valid(px, py) {
                    return Some((px, py));
                }
            }
        }
        None
    }
}

/// Correct every invalid pixel in place. Returns the number of corrected pixels.
fn correct(img: &mut RgbaImage, colors: &HashSet<Color>, wrap: Option<Wrap>) -> Result<usize> {
    let mask = ValidMask::new(img, colors);
    if !mask.valid.contains(&false) {
        return Ok(0);
    }
    if !mask.any_valid() {
        bail!("No pixel in the image has a color listed in the profile");
    }

    let source = img.clone();
    let mut corrected = 0;
    for (x, y, px) in img.enumerate_pixels_mut() {
        if mask.is_valid(x, y) {
            continue;
        }
        let Some((nx, ny)) = mask.nearest(x, y, wrap) else {
            bail!("No valid neighbour found for pixel ({x}, {y})");
        };
        let Rgba([r, g, b, _]) = *source.get_pixel(nx, ny);
        log::debug!("({x}, {y}) ← ({nx}, {ny})");
        px.0[..3].copy_from_slice(&[r, g, b]);
        corrected += 1;
    }
    Ok(corrected)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.colors)
        .with_context(|| format!("Cannot read {}", args.colors.display()))?;
    let profile = parse_input_profile(&text)
        .with_context(|| format!("Invalid color profile {}", args.colors.display()))?;
    for w in profile.warnings() {
        log::warn!("{}: {w}", args.colors.display());
    }
    let colors: HashSet<Color> = profile.known_colors().collect();
    log::info!("{} valid colors, wrap: {:?}", colors.len(), args.wrap);

    let mut img = image::open(&args.input)
        .with_context(|| format!("Cannot open {}", args.input.display()))?
        .to_rgba8();
    let corrected = correct(&mut img, &colors, args.wrap)?;
    log::info!(
        "Corrected {corrected} of {} pixels",
        img.width() as usize * img.height() as usize
    );

    img.save(&args.output)
        .with_context(|| format!("Write failed: {}", args.output.display()))?;
    Ok(())
}
