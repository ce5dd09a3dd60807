//! Transport layer for camera communication
//!
//! The camera is driven entirely over authenticated HTTP GET requests. The
//! [`DeviceLink`] trait abstracts that transport so the motion and sweep
//! logic can be exercised against a mock without a device on the network.

use crate::error::Result;
use std::path::Path;

mod http;
pub use http::HttpLink;

pub mod mock;

/// Byte transport to the camera's HTTP endpoints
pub trait DeviceLink {
    /// Authenticated GET of `base_url + path`, returns the raw body bytes
    fn get(&mut self, path: &str) -> Result<Vec<u8>>;

    /// Authenticated GET of `base_url + path`, body written directly to `dst`
    fn get_to_file(&mut self, path: &str, dst: &Path) -> Result<()>;
}
