//! Panorama sweep acquisition
//!
//! Drives the camera through the horizontal shot sequence: calibrate to the
//! start position, capture one frame per stop, then return to the home
//! preset. The ordered capture list is the stitcher's input.

use crate::calibration::Calibrator;
use crate::camera::DEFAULT_PRESET;
use crate::config::AppConfig;
use crate::error::Result;
use crate::external::FrameComparator;
use crate::motion::MotionController;
use crate::transport::DeviceLink;
use std::path::PathBuf;

/// Sweep parameters, assembled once from the app config
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub num_of_panorama_shots: u32,
    pub steps_per_panorama_shot: u32,
    pub horizontal_start_steps: u32,
    /// Running step count at which the mid-sweep home preset is captured
    pub horizontal_default_steps: u32,
    pub restore_initial_pos: bool,
    pub full_size_pic: bool,
    pub out_dir: PathBuf,
}

impl SweepConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            num_of_panorama_shots: config.options.num_of_panorama_shots,
            steps_per_panorama_shot: config.steps.steps_per_panorama_shot,
            horizontal_start_steps: config.steps.horizontal_start_steps,
            horizontal_default_steps: config.steps.horizontal_default_steps,
            restore_initial_pos: config.options.restore_initial_pos,
            full_size_pic: config.options.full_size_pic,
            out_dir: PathBuf::from(&config.out_dir),
        }
    }
}

/// Acquires the ordered shot sequence for one panorama
pub struct SweepPlanner<C: FrameComparator> {
    config: SweepConfig,
    calibrator: Calibrator<C>,
}

impl<C: FrameComparator> SweepPlanner<C> {
    pub fn new(config: SweepConfig, calibrator: Calibrator<C>) -> Self {
        Self { config, calibrator }
    }

    /// Capture the full sweep, returning the shot paths in acquisition order
    ///
    /// Always returns exactly `num_of_panorama_shots` paths regardless of the
    /// calibration outcome. Step failures during the sweep are logged and the
    /// sweep continues with whatever position the camera reached.
    pub fn acquire_sweep<L: DeviceLink>(
        &mut self,
        rig: &mut MotionController<L>,
    ) -> Result<Vec<PathBuf>> {
        let mut images = Vec::with_capacity(self.config.num_of_panorama_shots as usize);

        if self.config.restore_initial_pos {
            // Capture wherever the camera currently sits as the eventual
            // return target, before any motion.
            rig.camera_mut().set_preset(DEFAULT_PRESET)?;
        }

        self.calibrator.establish_start_position(rig)?;

        let mut step_counter = self.config.horizontal_start_steps;

        for shot in 0..self.config.num_of_panorama_shots {
            let dst = self.config.out_dir.join(format!("pic_{}.jpg", shot));
            log::info!("SweepPlanner: taking panorama shot {}", shot);
            rig.camera_mut()
                .take_picture(self.config.full_size_pic, &dst)?;
            images.push(dst);

            step_counter += self.config.steps_per_panorama_shot;

            // One-shot mid-sweep home capture: fires only when not restoring
            // the initial position and the counter lands exactly on the
            // configured default. The counter only grows, so at most once.
            let set_home = !self.config.restore_initial_pos
                && step_counter == self.config.horizontal_default_steps;

            if shot + 1 == self.config.num_of_panorama_shots {
                break;
            }

            if !rig.step_right(self.config.steps_per_panorama_shot, set_home)? {
                log::warn!(
                    "SweepPlanner: step after shot {} failed, continuing sweep",
                    shot
                );
            }
        }

        rig.camera_mut().goto_preset(DEFAULT_PRESET)?;
        Ok(images)
    }
}
