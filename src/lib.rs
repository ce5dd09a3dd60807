//! Panosweep - pan/tilt camera control for panorama acquisition
//!
//! This library drives a motorized pan/tilt IP camera over its HTTP CGI API
//! to acquire a horizontal sweep of still images for an external stitcher.
//!
//! ## Components
//!
//! - [`transport`]: authenticated HTTP transport to the camera, with a mock
//!   for hardware-free testing
//! - [`camera`]: CGI command wrapper (presets, captures, success detection)
//! - [`motion`]: discrete step commands with settle delay
//! - [`calibration`]: brute-force and feedback start-position calibration
//! - [`sweep`]: the panorama acquisition sequence
//! - [`external`]: comparator and stitcher subprocess invocation

pub mod calibration;
pub mod camera;
pub mod config;
pub mod error;
pub mod external;
pub mod motion;
pub mod sweep;
pub mod transport;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
