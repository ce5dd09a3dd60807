//! Start-position calibration
//!
//! Before a sweep the camera must sit at a known, repeatable position. Two
//! strategies exist:
//!
//! - **Brute force**: exhaust a fixed step budget toward the mechanical
//!   end-stop. Stepping past the limit is a hardware no-op, so issuing the
//!   full budget lands at the same physical reference regardless of where
//!   the camera started. No captures, no feedback.
//! - **Feedback (CV)**: step and capture repeatedly, scoring consecutive
//!   frames with the external comparator until the correlation crosses a
//!   threshold or the step budget runs out. Exhaustion is accepted silently;
//!   the last reached position becomes the reference (best effort).
//!
//! Either way, the calibrated axis is then offset to the sweep's logical
//! start position.

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::external::FrameComparator;
use crate::motion::MotionController;
use crate::transport::DeviceLink;
use std::path::PathBuf;

/// Immutable calibration parameters, assembled once from the app config
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    pub calibrate_horizontal: bool,
    pub calibrate_vertical: bool,
    pub calibrate_with_cv: bool,
    pub compare_threshold: f64,
    pub max_horizontal_steps: u32,
    pub max_vertical_steps: u32,
    pub steps_per_panorama_shot: u32,
    pub horizontal_start_steps: u32,
    pub vertical_default_steps: u32,
    /// Directory holding the rotating `ref1.jpg`/`ref2.jpg` capture buffers
    pub out_dir: PathBuf,
}

impl CalibrationConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            calibrate_horizontal: config.options.calibrate_horizontal,
            calibrate_vertical: config.options.calibrate_vertical,
            calibrate_with_cv: config.options.calibrate_with_cv,
            compare_threshold: config.tools.compare_threshold,
            max_horizontal_steps: config.steps.max_horizontal_steps,
            max_vertical_steps: config.steps.max_vertical_steps,
            steps_per_panorama_shot: config.steps.steps_per_panorama_shot,
            horizontal_start_steps: config.steps.horizontal_start_steps,
            vertical_default_steps: config.steps.vertical_default_steps,
            out_dir: PathBuf::from(&config.out_dir),
        }
    }
}

/// Establishes the reference position before a sweep
pub struct Calibrator<C: FrameComparator> {
    config: CalibrationConfig,
    comparator: C,
}

impl<C: FrameComparator> Calibrator<C> {
    pub fn new(config: CalibrationConfig, comparator: C) -> Self {
        Self { config, comparator }
    }

    /// Run the configured calibration strategy, then move to the sweep start
    ///
    /// The start offsets are unconditional: they apply regardless of how many
    /// steps the calibration itself consumed.
    pub fn establish_start_position<L: DeviceLink>(
        &mut self,
        rig: &mut MotionController<L>,
    ) -> Result<()> {
        if self.config.calibrate_with_cv {
            self.cv_reset_position(rig)?;
        } else {
            self.brute_force_reset_position(rig)?;
        }

        if self.config.calibrate_horizontal {
            log::info!("Calibrator: moving to horizontal start position");
            rig.step_right(self.config.horizontal_start_steps, false)?;
        }

        if self.config.calibrate_vertical {
            log::info!("Calibrator: moving to vertical start position");
            rig.step_up(self.config.vertical_default_steps, false)?;
        }

        Ok(())
    }

    /// Drive each enabled axis into its mechanical end-stop
    ///
    /// Always issues exactly the configured maximum for the axis; individual
    /// step failures do not matter here since over-stepping the limit is a
    /// no-op on the hardware.
    fn brute_force_reset_position<L: DeviceLink>(
        &mut self,
        rig: &mut MotionController<L>,
    ) -> Result<()> {
        if self.config.calibrate_horizontal {
            log::info!(
                "Calibrator: brute-force horizontal reset ({} steps left)",
                self.config.max_horizontal_steps
            );
            rig.step_left(self.config.max_horizontal_steps, false)?;
        }

        if self.config.calibrate_vertical {
            log::info!(
                "Calibrator: brute-force vertical reset ({} steps down)",
                self.config.max_vertical_steps
            );
            rig.step_down(self.config.max_vertical_steps, false)?;
        }

        Ok(())
    }

    /// Feedback calibration: step left and compare frames until convergence
    ///
    /// A bounded linear scan with fixed step size: no adaptation of step
    /// size or direction from the score trend. Seeing a correlation at or
    /// above the threshold terminates early; exhausting the budget terminates
    /// silently with the last position accepted.
    fn cv_reset_position<L: DeviceLink>(&mut self, rig: &mut MotionController<L>) -> Result<()> {
        let ref1 = self.config.out_dir.join("ref1.jpg");
        let ref2 = self.config.out_dir.join("ref2.jpg");

        if self.config.calibrate_horizontal {
            log::info!("Calibrator: CV horizontal reset");

            rig.camera_mut().take_picture(false, &ref1)?;
            let mut latest_is_ref1 = true;
            let mut steps_taken = 0u32;

            while steps_taken < self.config.max_horizontal_steps {
                log::debug!("Calibrator: stepping left and capturing");
                rig.step_left(self.config.steps_per_panorama_shot, false)?;
                steps_taken += self.config.steps_per_panorama_shot;

                // Alternate capture buffers: overwrite the older frame
                latest_is_ref1 = !latest_is_ref1;
                let current = if latest_is_ref1 { &ref1 } else { &ref2 };
                rig.camera_mut().take_picture(false, current)?;

                // Fixed argument order, independent of which buffer is newer
                let score = self.comparator.correlation(&ref1, &ref2)?;
                log::info!("Calibrator: correlation value = {}", score);

                if score >= self.config.compare_threshold {
                    log::info!(
                        "Calibrator: correlation >= threshold {}, converged",
                        self.config.compare_threshold
                    );
                    break;
                }
            }
        }

        if self.config.calibrate_vertical {
            return Err(Error::VerticalCvUnsupported);
        }

        Ok(())
    }
}
