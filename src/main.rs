//! Panosweep - panorama acquisition from a pan/tilt IP camera
//!
//! Calibrates the camera to a reference position, sweeps it horizontally
//! capturing one still per stop, and hands the ordered captures to an
//! external stitcher. With `-s`/`--stitch-only` the acquisition is skipped
//! and a previously captured shot set is stitched instead.

use panosweep::calibration::{CalibrationConfig, Calibrator};
use panosweep::camera::Camera;
use panosweep::config::AppConfig;
use panosweep::error::Result;
use panosweep::external::{ExternalComparator, Stitcher};
use panosweep::motion::MotionController;
use panosweep::sweep::{SweepConfig, SweepPlanner};
use panosweep::transport::HttpLink;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed command line options
struct CliOptions {
    config_path: String,
    stitch_only: bool,
}

/// Parse command line arguments.
///
/// Supports:
/// - `panosweep <path>` (positional config path)
/// - `panosweep --config <path>` (flag-based)
/// - `panosweep -c <path>` (short flag)
/// - `panosweep -s` / `--stitch-only` (skip acquisition, stitch existing shots)
///
/// Defaults to `panosweep.toml` if no config path is specified.
fn parse_args() -> CliOptions {
    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut stitch_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" if i + 1 < args.len() => {
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            "--stitch-only" | "-s" => stitch_only = true,
            arg if !arg.starts_with('-') && config_path.is_none() => {
                config_path = Some(arg.to_string());
            }
            _ => {}
        }
        i += 1;
    }

    CliOptions {
        config_path: config_path.unwrap_or_else(|| "panosweep.toml".to_string()),
        stitch_only,
    }
}

/// Remove any previous output directory and create a fresh one
fn prepare_output_dir(out_dir: &Path) -> Result<()> {
    match fs::remove_dir_all(out_dir) {
        Ok(()) => log::info!("Removed old output directory"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No previous output directory")
        }
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(out_dir)?;
    Ok(())
}

/// The shot set stitched in stitch-only mode: a previous full default sweep
fn previous_sweep_images() -> Vec<PathBuf> {
    (0..7)
        .map(|i| PathBuf::from(format!("out/pic_{}.jpg", i)))
        .collect()
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("panosweep v0.2.0 starting...");

    let options = parse_args();

    log::info!("Using config: {}", options.config_path);
    let config = AppConfig::from_file(&options.config_path)?;

    let out_dir = PathBuf::from(&config.out_dir);
    let stitcher = Stitcher::new(&config.tools.stitcher_exec, &out_dir);

    let images = if options.stitch_only {
        log::info!("Stitch-only mode: using previously captured shots");
        previous_sweep_images()
    } else {
        prepare_output_dir(&out_dir)?;

        let link = HttpLink::new(&config.camera);
        let camera = Camera::new(link, config.camera.clone());
        let mut rig = MotionController::new(camera, config.steps.clone());

        let comparator = ExternalComparator::new(&config.tools.comparator_exec);
        let calibrator = Calibrator::new(CalibrationConfig::from_app(&config), comparator);
        let mut planner = SweepPlanner::new(SweepConfig::from_app(&config), calibrator);

        planner.acquire_sweep(&mut rig)?
    };

    stitcher.stitch(&images)?;

    log::info!("panosweep finished");
    Ok(())
}
