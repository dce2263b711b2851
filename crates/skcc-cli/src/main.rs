/// Seasonal climate classifier: four color-coded seasonal rasters in,
/// one Köppen-Geiger or Holdridge classification map out.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::{DynamicImage, RgbImage};
use skcc_core::profile::parse::{parse_input_profile, parse_output_profile};
use skcc_core::profile::{defaults, ProfileWarning};
use skcc_core::{
    classify_map, Channel, ClassCounts, ColorRaster, InputColorProfile, Mode, OutputColorProfile,
    Profiles, SeasonalLayers, UnresolvedPolicy,
};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "skcc",
    version,
    about = "Classify seasonal temperature/precipitation maps into a climate map"
)]
struct Args {
    /// Output PNG path
    #[arg(short, long)]
    outfile: PathBuf,

    /// Temperature, northern summer
    #[arg(short = 'u', long)]
    tempns: PathBuf,

    /// Temperature, northern winter
    #[arg(short = 't', long)]
    tempnw: PathBuf,

    /// Precipitation, northern summer
    #[arg(short = 'q', long)]
    precns: PathBuf,

    /// Precipitation, northern winter
    #[arg(short = 'p', long)]
    precnw: PathBuf,

    /// Temperature legend profile (built-in legend if omitted)
    #[arg(long)]
    tempprof: Option<PathBuf>,

    /// Precipitation legend profile (built-in legend if omitted)
    #[arg(long)]
    precprof: Option<PathBuf>,

    /// Output color profile (built-in colors if omitted)
    #[arg(short = 'k', long)]
    outprof: Option<PathBuf>,

    /// Classification scheme: koppen or holdridge
    #[arg(short, long, default_value = "koppen")]
    mode: Mode,

    /// Only log warnings and errors
    #[arg(short = 's', long)]
    quiet: bool,

    /// Paint the profile's Unknown color for codes the output profile lacks,
    /// instead of failing
    #[arg(long)]
    paint_unknown: bool,

    /// Write per-class cell counts as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

// ── Inputs ───────────────────────────────────────────────────────────────────

/// Decode an image into a raster, keeping its native channel layout.
fn load_layer(path: &Path) -> Result<ColorRaster> {
    let img = image::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let (width, height) = (img.width(), img.height());
    let (layout, data) = match img {
        DynamicImage::ImageRgb8(buf) => ("RGB", buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => ("RGBA", buf.into_raw()),
        DynamicImage::ImageLuma8(buf) => ("L", buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => ("LA", buf.into_raw()),
        other => ("RGBA", other.to_rgba8().into_raw()),
    };
    ColorRaster::new(width, height, Channel::layout(layout), data)
        .with_context(|| format!("Bad raster data in {}", path.display()))
}

fn report_warnings(path: &Path, warnings: &[ProfileWarning]) {
    for w in warnings {
        log::warn!("{}: {w}", path.display());
    }
}

fn load_input_profile(path: Option<&Path>, fallback: fn() -> InputColorProfile) -> Result<InputColorProfile> {
    let Some(path) = path else {
        return Ok(fallback());
    };
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let profile = parse_input_profile(&text)
        .with_context(|| format!("Invalid input profile {}", path.display()))?;
    report_warnings(path, profile.warnings());
    Ok(profile)
}

fn load_output_profile(path: Option<&Path>, mode: Mode) -> Result<OutputColorProfile> {
    let Some(path) = path else {
        return Ok(defaults::output_profile(mode));
    };
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let profile = parse_output_profile(&text, mode)
        .with_context(|| format!("Invalid output profile {}", path.display()))?;
    report_warnings(path, profile.warnings());
    let missing: Vec<&str> = profile.missing_codes().collect();
    if !missing.is_empty() {
        log::warn!(
            "{}: no color for {} {mode} code(s): {}",
            path.display(),
            missing.len(),
            missing.join(", ")
        );
    }
    Ok(profile)
}

// ── Run ──────────────────────────────────────────────────────────────────────

fn run(args: &Args) -> Result<ClassCounts> {
    let start = Instant::now();

    let profiles = Profiles {
        temperature: load_input_profile(args.tempprof.as_deref(), defaults::temperature_profile)?,
        precipitation: load_input_profile(args.precprof.as_deref(), defaults::precipitation_profile)?,
        output: load_output_profile(args.outprof.as_deref(), args.mode)?,
    };

    let ts = load_layer(&args.tempns)?;
    let tw = load_layer(&args.tempnw)?;
    let ps = load_layer(&args.precns)?;
    let pw = load_layer(&args.precnw)?;
    let layers = SeasonalLayers { temp_summer: &ts, temp_winter: &tw, precip_summer: &ps, precip_winter: &pw };
    log::info!("Loaded 4 layers of {}x{} in {:.2?}", ts.width(), ts.height(), start.elapsed());

    let policy = if args.paint_unknown { UnresolvedPolicy::PaintUnknown } else { UnresolvedPolicy::Fail };
    let map = classify_map(&layers, &profiles, policy).context("Classification failed")?;
    log::info!(
        "Classified {} cells ({} ignored) in {} mode",
        map.counts.classified(),
        map.counts.ignored,
        args.mode
    );

    let img = RgbImage::from_raw(map.width, map.height, map.to_rgb_bytes())
        .context("Classified map does not fill its raster")?;

    // The map is written last; a failed summary leaves no output behind.
    if let Some(path) = &args.summary {
        fs::write(path, serde_json::to_string_pretty(&map.counts)?)
            .with_context(|| format!("Write failed: {}", path.display()))?;
    }
    if let Err(err) = img.save(&args.outfile) {
        if let Some(path) = &args.summary {
            let _ = fs::remove_file(path);
        }
        return Err(err).with_context(|| format!("Write failed: {}", args.outfile.display()));
    }

    log::info!("Wrote {} in {:.2?}", args.outfile.display(), start.elapsed());
    Ok(map.counts)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(&args)?;
    Ok(())
}
