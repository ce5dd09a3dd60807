//! External tool invocation: frame comparator and panorama stitcher
//!
//! Both tools are opaque executables. The comparator scores the similarity of
//! two frames; the stitcher assembles the sweep into a panorama. Neither is
//! ever reimplemented internally.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Scores the correlation between two captured frames
///
/// The argument order is fixed by the caller and must not be reordered.
pub trait FrameComparator {
    fn correlation(&self, a: &Path, b: &Path) -> Result<f64>;
}

/// Comparator backed by an external executable
///
/// The tool is invoked with the two image paths as positional arguments and
/// prints a single floating-point correlation value on stdout.
pub struct ExternalComparator {
    exec: String,
}

impl ExternalComparator {
    pub fn new(exec: &str) -> Self {
        Self {
            exec: exec.to_string(),
        }
    }
}

impl FrameComparator for ExternalComparator {
    fn correlation(&self, a: &Path, b: &Path) -> Result<f64> {
        log::debug!(
            "Comparator: running {} {} {}",
            self.exec,
            a.display(),
            b.display()
        );
        let output = Command::new(&self.exec).arg(a).arg(b).output()?;

        if !output.status.success() {
            // A failed comparison never aborts calibration; it just scores
            // zero so this round cannot converge.
            log::warn!(
                "Comparator: exited with {}, treating as zero correlation",
                output.status
            );
            return Ok(0.0);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout.trim();
        text.parse::<f64>().map_err(|_| {
            Error::Comparator(format!("expected a correlation value, got {:?}", text))
        })
    }
}

/// Panorama stitcher backed by an external executable
///
/// Invoked as `<exec> --output <out_dir>/panorama.jpg <img>...`. The exit
/// status is logged but never acted upon.
pub struct Stitcher {
    exec: String,
    out_dir: PathBuf,
}

impl Stitcher {
    pub fn new(exec: &str, out_dir: &Path) -> Self {
        Self {
            exec: exec.to_string(),
            out_dir: out_dir.to_path_buf(),
        }
    }

    /// Stitch the ordered capture list, returning the panorama path
    pub fn stitch(&self, images: &[PathBuf]) -> Result<PathBuf> {
        let output_path = self.out_dir.join("panorama.jpg");
        log::info!(
            "Stitcher: running {} on {} images",
            self.exec,
            images.len()
        );

        let status = Command::new(&self.exec)
            .arg("--output")
            .arg(&output_path)
            .args(images)
            .status()?;

        log::info!("Stitcher: exited with {}", status);
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator_parses_stdout() {
        // `echo` stands in for a real comparator printing a score
        let comparator = ExternalComparator::new("echo");
        let score = comparator
            .correlation(Path::new("0.875"), Path::new(""))
            .unwrap();
        // echo prints both args; the second is empty so trim leaves "0.875"
        assert_eq!(score, 0.875);
    }

    #[test]
    fn test_comparator_nonzero_exit_scores_zero() {
        let comparator = ExternalComparator::new("false");
        let score = comparator
            .correlation(Path::new("a.jpg"), Path::new("b.jpg"))
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_comparator_garbage_output_is_error() {
        let comparator = ExternalComparator::new("echo");
        let result = comparator.correlation(Path::new("not-a-number"), Path::new("x"));
        assert!(matches!(result, Err(Error::Comparator(_))));
    }

    #[test]
    fn test_comparator_missing_executable_is_error() {
        let comparator = ExternalComparator::new("/nonexistent/comparator");
        let result = comparator.correlation(Path::new("a.jpg"), Path::new("b.jpg"));
        assert!(result.is_err());
    }
}
