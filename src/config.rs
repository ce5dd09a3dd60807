//! Configuration for the panosweep application
//!
//! Loads configuration from a TOML file. All device and sweep parameters
//! live here; there is no process-wide mutable state. Each component receives
//! the section it needs by value at construction time.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Output directory for captured shots and the stitched panorama
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    pub camera: CameraConfig,
    pub steps: StepConfig,
    pub options: OptionsConfig,
    pub tools: ToolsConfig,
}

fn default_out_dir() -> String {
    "./out".to_string()
}

/// Camera connection parameters (HTTP CGI endpoints)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Base URL of the camera, e.g. `http://192.168.1.10:81`
    pub base_url: String,
    /// Path prefix for control CGI endpoints, e.g. `/cgi-bin`
    pub cgi_dir: String,
    /// Path prefix for still image endpoints
    pub pic_dir: String,
    pub username: String,
    pub password: String,
    /// Base name (no extension) of the reduced-resolution still
    pub small_pic_name: String,
    /// Base name (no extension) of the full-resolution still
    pub full_pic_name: String,
}

/// Step counts and timing for pan/tilt motion
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StepConfig {
    /// Horizontal steps between consecutive panorama shots
    pub steps_per_panorama_shot: u32,
    /// Settle delay after each single step, in seconds
    pub rotate_sleep: u64,
    /// Step budget for vertical calibration (reaches the mechanical end-stop)
    pub max_vertical_steps: u32,
    /// Upward offset applied after vertical calibration
    pub vertical_default_steps: u32,
    /// Rightward offset applied after horizontal calibration
    pub horizontal_start_steps: u32,
    /// Running step count at which the mid-sweep home preset is captured
    pub horizontal_default_steps: u32,
    /// Step budget for horizontal calibration
    pub max_horizontal_steps: u32,
}

/// Sweep and calibration mode flags
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionsConfig {
    pub calibrate_vertical: bool,
    pub calibrate_horizontal: bool,
    /// Use the image-correlation feedback loop instead of brute-force calibration
    pub calibrate_with_cv: bool,
    /// Capture panorama shots at full resolution
    pub full_size_pic: bool,
    pub num_of_panorama_shots: u32,
    /// Save the current position as home before moving, and return to it after
    pub restore_initial_pos: bool,
}

/// External tool configuration (comparator and stitcher executables)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Correlation score at or above which CV calibration converges
    pub compare_threshold: f64,
    pub stitcher_exec: String,
    pub comparator_exec: String,
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// A missing required key is a parse error and fatal at startup; the
    /// device is never contacted with a partial configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration for an Apexis-style pan/tilt camera
    ///
    /// Suitable for testing and development. Production runs should use a
    /// proper TOML configuration file.
    pub fn apexis_defaults() -> Self {
        Self {
            out_dir: default_out_dir(),
            camera: CameraConfig {
                base_url: "http://192.168.1.10:81".to_string(),
                cgi_dir: "/cgi-bin".to_string(),
                pic_dir: "/snapshot".to_string(),
                username: "admin".to_string(),
                password: "admin".to_string(),
                small_pic_name: "tmpfs".to_string(),
                full_pic_name: "snapshot".to_string(),
            },
            steps: StepConfig {
                steps_per_panorama_shot: 10,
                rotate_sleep: 1,
                max_vertical_steps: 30,
                vertical_default_steps: 10,
                horizontal_start_steps: 0,
                horizontal_default_steps: 30,
                max_horizontal_steps: 120,
            },
            options: OptionsConfig {
                calibrate_vertical: false,
                calibrate_horizontal: true,
                calibrate_with_cv: false,
                full_size_pic: true,
                num_of_panorama_shots: 7,
                restore_initial_pos: false,
            },
            tools: ToolsConfig {
                compare_threshold: 0.9,
                stitcher_exec: "stitcher".to_string(),
                comparator_exec: "comparator".to_string(),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::apexis_defaults()
    }
}
