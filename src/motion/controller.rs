//! Motion controller for executing discrete step commands

use super::StepDirection;
use crate::camera::{Camera, DEFAULT_PRESET};
use crate::config::StepConfig;
use crate::error::Result;
use crate::transport::DeviceLink;
use std::time::Duration;

/// Issues single-step pan/tilt commands with a settle delay between steps
///
/// Steps are never batched: one CGI call per mechanical step, with
/// `rotate_sleep` seconds after each successful step to let the mechanism
/// settle. A failed step aborts the call immediately and steps already taken
/// are not undone; callers that need a known position must re-home.
pub struct MotionController<L: DeviceLink> {
    camera: Camera<L>,
    config: StepConfig,
}

impl<L: DeviceLink> MotionController<L> {
    /// Create a new motion controller
    pub fn new(camera: Camera<L>, config: StepConfig) -> Self {
        log::debug!(
            "MotionController: initialized with rotate_sleep={}s, steps_per_shot={}",
            config.rotate_sleep,
            config.steps_per_panorama_shot
        );
        Self { camera, config }
    }

    /// Issue `count` single steps in `direction`
    ///
    /// Returns `Ok(false)` on the first step the device does not acknowledge;
    /// no settle sleep follows a failed step and no further steps are issued.
    /// With `set_home` the current position is stored as the default preset
    /// after all steps succeed. `count == 0` succeeds trivially.
    pub fn step(&mut self, direction: StepDirection, count: u32, set_home: bool) -> Result<bool> {
        for _ in 0..count {
            if !self.camera.run_cgi(direction.endpoint(), None)? {
                log::warn!("MotionController: step {} failed", direction);
                return Ok(false);
            }
            std::thread::sleep(Duration::from_secs(self.config.rotate_sleep));
        }

        if set_home {
            log::info!("MotionController: storing home preset at current position");
            self.camera.set_preset(DEFAULT_PRESET)?;
        }

        Ok(true)
    }

    /// Step left `count` times
    pub fn step_left(&mut self, count: u32, set_home: bool) -> Result<bool> {
        self.step(StepDirection::Left, count, set_home)
    }

    /// Step right `count` times
    pub fn step_right(&mut self, count: u32, set_home: bool) -> Result<bool> {
        self.step(StepDirection::Right, count, set_home)
    }

    /// Step up `count` times
    pub fn step_up(&mut self, count: u32, set_home: bool) -> Result<bool> {
        self.step(StepDirection::Up, count, set_home)
    }

    /// Step down `count` times
    pub fn step_down(&mut self, count: u32, set_home: bool) -> Result<bool> {
        self.step(StepDirection::Down, count, set_home)
    }

    /// Access the underlying camera (captures, presets)
    pub fn camera_mut(&mut self) -> &mut Camera<L> {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::transport::mock::MockLink;

    fn test_rig(link: MockLink) -> MotionController<MockLink> {
        let camera_config = CameraConfig {
            base_url: "http://cam".to_string(),
            cgi_dir: "/cgi-bin".to_string(),
            pic_dir: "/snapshot".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            small_pic_name: "tmpfs".to_string(),
            full_pic_name: "full".to_string(),
        };
        let step_config = StepConfig {
            steps_per_panorama_shot: 10,
            rotate_sleep: 0, // no settle delay in tests
            max_vertical_steps: 30,
            vertical_default_steps: 10,
            horizontal_start_steps: 0,
            horizontal_default_steps: 30,
            max_horizontal_steps: 120,
        };
        MotionController::new(Camera::new(link, camera_config), step_config)
    }

    #[test]
    fn test_step_issues_one_request_per_step() {
        let link = MockLink::new();
        let mut rig = test_rig(link.clone());

        assert!(rig.step(StepDirection::Right, 3, false).unwrap());
        let requests = link.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r == "/cgi-bin/ptzright.cgi"));
    }

    #[test]
    fn test_step_aborts_on_first_failure() {
        let link = MockLink::new();
        let mut rig = test_rig(link.clone());

        link.push_response(b"ok");
        link.push_response(b"server busy");

        assert!(!rig.step(StepDirection::Left, 5, false).unwrap());
        // one success, one failure, then nothing - remaining 3 never issued
        assert_eq!(link.requests().len(), 2);
    }

    #[test]
    fn test_failed_step_skips_set_home() {
        let link = MockLink::new();
        let mut rig = test_rig(link.clone());

        link.push_response(b"server busy");
        assert!(!rig.step(StepDirection::Up, 1, true).unwrap());

        // no preset.cgi call after a failed step
        assert!(link.requests().iter().all(|r| !r.contains("preset.cgi")));
    }

    #[test]
    fn test_set_home_after_all_steps() {
        let link = MockLink::new();
        let mut rig = test_rig(link.clone());

        assert!(rig.step(StepDirection::Right, 2, true).unwrap());
        let requests = link.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[2],
            "/cgi-bin/preset.cgi?-act=set&-status=1&-number=0"
        );
    }

    #[test]
    fn test_zero_steps_trivially_succeeds() {
        let link = MockLink::new();
        let mut rig = test_rig(link.clone());

        assert!(rig.step(StepDirection::Down, 0, false).unwrap());
        assert!(link.requests().is_empty());
    }
}
