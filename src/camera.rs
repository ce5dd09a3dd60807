//! Camera CGI surface
//!
//! Wraps a [`DeviceLink`] with the camera's CGI command conventions: preset
//! recall/store, still capture, and the device's "ok" success contract.

use crate::config::CameraConfig;
use crate::error::Result;
use crate::transport::DeviceLink;
use std::path::Path;

/// The device-side preset used as home, fixed for the lifetime of a run
pub const DEFAULT_PRESET: u8 = 0;

/// Decides whether a raw CGI response body means success
///
/// The stock classifier reproduces the device's actual contract; swap in a
/// stricter implementation here without touching any caller.
pub trait ResponseClassifier {
    fn is_success(&self, body: &[u8]) -> bool;
}

/// Stock classifier: the literal substring `"ok"` anywhere in the decoded body
///
/// This is the device's real success signal, fragility included: any byte
/// sequence containing `ok`, even inside binary garbage, counts as success.
/// The match is case-sensitive.
pub struct OkSubstring;

impl ResponseClassifier for OkSubstring {
    fn is_success(&self, body: &[u8]) -> bool {
        String::from_utf8_lossy(body).contains("ok")
    }
}

/// Preset actions supported by `preset.cgi`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetAction {
    /// Recall a stored position
    Goto,
    /// Overwrite a stored position with the current one
    Set,
}

impl PresetAction {
    fn as_str(&self) -> &'static str {
        match self {
            PresetAction::Goto => "goto",
            PresetAction::Set => "set",
        }
    }
}

/// Camera control endpoint wrapper
pub struct Camera<L: DeviceLink> {
    link: L,
    config: CameraConfig,
    classifier: Box<dyn ResponseClassifier>,
}

impl<L: DeviceLink> Camera<L> {
    /// Create a camera with the stock `"ok"` substring classifier
    pub fn new(link: L, config: CameraConfig) -> Self {
        Self::with_classifier(link, config, Box::new(OkSubstring))
    }

    /// Create a camera with a custom response classifier
    pub fn with_classifier(
        link: L,
        config: CameraConfig,
        classifier: Box<dyn ResponseClassifier>,
    ) -> Self {
        Self {
            link,
            config,
            classifier,
        }
    }

    /// Run a control CGI, returning whether the device reported success
    ///
    /// Transport failures propagate as errors; a reachable device that does
    /// not acknowledge the command is a `false`, not an error.
    pub fn run_cgi(&mut self, name: &str, params: Option<&str>) -> Result<bool> {
        let mut path = format!("{}/{}", self.config.cgi_dir, name);
        if let Some(params) = params {
            path.push('?');
            path.push_str(params);
        }

        let body = self.link.get(&path)?;
        Ok(self.classifier.is_success(&body))
    }

    /// Issue a preset command (`goto` or `set`) for the given preset number
    pub fn preset(&mut self, action: PresetAction, number: u8) -> Result<bool> {
        let params = format!("-act={}&-status=1&-number={}", action.as_str(), number);
        self.run_cgi("preset.cgi", Some(&params))
    }

    /// Recall a stored preset position
    pub fn goto_preset(&mut self, number: u8) -> Result<()> {
        log::info!("Camera: moving to preset {}", number);
        let ok = self.preset(PresetAction::Goto, number)?;
        if !ok {
            log::warn!("Camera: goto preset {} not acknowledged", number);
        }
        Ok(())
    }

    /// Store the current position as the given preset
    pub fn set_preset(&mut self, number: u8) -> Result<()> {
        let ok = self.preset(PresetAction::Set, number)?;
        if ok {
            log::info!("Camera: stored preset {}", number);
        } else {
            log::warn!("Camera: set preset {} not acknowledged", number);
        }
        Ok(())
    }

    /// Capture a still frame directly into `dst`
    pub fn take_picture(&mut self, full_size: bool, dst: &Path) -> Result<()> {
        let base_name = if full_size {
            &self.config.full_pic_name
        } else {
            &self.config.small_pic_name
        };
        let path = format!("{}/{}.jpg", self.config.pic_dir, base_name);
        self.link.get_to_file(&path, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockLink;

    fn test_camera(link: MockLink) -> Camera<MockLink> {
        let config = CameraConfig {
            base_url: "http://cam".to_string(),
            cgi_dir: "/cgi-bin".to_string(),
            pic_dir: "/snapshot".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            small_pic_name: "tmpfs".to_string(),
            full_pic_name: "full".to_string(),
        };
        Camera::new(link, config)
    }

    #[test]
    fn test_run_cgi_ok_substring() {
        let link = MockLink::new();
        let mut camera = test_camera(link.clone());

        link.push_response(b"result=ok\r\n");
        assert!(camera.run_cgi("ptzleft.cgi", None).unwrap());

        link.push_response(b"server busy");
        assert!(!camera.run_cgi("ptzleft.cgi", None).unwrap());

        // "ok" buried in binary garbage still classifies as success
        link.push_response(&[0xff, 0x00, b'o', b'k', 0xfe]);
        assert!(camera.run_cgi("ptzleft.cgi", None).unwrap());

        // case-sensitive: "OK" is not a success signal
        link.push_response(b"OK");
        assert!(!camera.run_cgi("ptzleft.cgi", None).unwrap());
    }

    #[test]
    fn test_preset_query_format() {
        let link = MockLink::new();
        let mut camera = test_camera(link.clone());

        camera.preset(PresetAction::Goto, 0).unwrap();
        camera.preset(PresetAction::Set, 3).unwrap();

        let requests = link.requests();
        assert_eq!(
            requests[0],
            "/cgi-bin/preset.cgi?-act=goto&-status=1&-number=0"
        );
        assert_eq!(
            requests[1],
            "/cgi-bin/preset.cgi?-act=set&-status=1&-number=3"
        );
    }

    #[test]
    fn test_take_picture_paths() {
        let link = MockLink::new();
        let mut camera = test_camera(link.clone());

        camera
            .take_picture(true, Path::new("out/pic_0.jpg"))
            .unwrap();
        camera.take_picture(false, Path::new("out/ref1.jpg")).unwrap();

        let captures = link.captures();
        assert_eq!(captures[0].0, "/snapshot/full.jpg");
        assert_eq!(captures[0].1.to_str().unwrap(), "out/pic_0.jpg");
        assert_eq!(captures[1].0, "/snapshot/tmpfs.jpg");
    }
}
