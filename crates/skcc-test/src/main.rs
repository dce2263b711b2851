/// Compare a generated classification map against a reference image.
/// Exits 0 when the two are pixel-identical and 1 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use skcc_test::compare_files;

#[derive(Parser, Debug)]
#[command(name = "skcc-imgdiff", about = "Pixel-exact comparison of two RGB images")]
struct Args {
    /// Reference image.
    expected: PathBuf,

    /// Image under test.
    actual: PathBuf,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let report = compare_files(&args.expected, &args.actual)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    match report.bounds {
        None => {
            log::info!("{} and {} are identical", args.expected.display(), args.actual.display());
            Ok(ExitCode::SUCCESS)
        }
        Some(bb) => {
            log::info!(
                "{} of {} pixels differ, within ({}, {})..=({}, {})",
                report.differing,
                report.width as usize * report.height as usize,
                bb.x0,
                bb.y0,
                bb.x1,
                bb.y1
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
