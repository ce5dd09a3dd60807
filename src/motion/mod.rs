//! Pan/tilt motion primitives

mod controller;
pub use controller::MotionController;

/// Discrete pan/tilt step directions
///
/// Each direction maps to its own CGI endpoint on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Left,
    Right,
    Up,
    Down,
}

impl StepDirection {
    /// The single-step CGI endpoint for this direction
    pub fn endpoint(&self) -> &'static str {
        match self {
            StepDirection::Left => "ptzleft.cgi",
            StepDirection::Right => "ptzright.cgi",
            StepDirection::Up => "ptzup.cgi",
            StepDirection::Down => "ptzdown.cgi",
        }
    }
}

impl std::fmt::Display for StepDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StepDirection::Left => "left",
            StepDirection::Right => "right",
            StepDirection::Up => "up",
            StepDirection::Down => "down",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_endpoints() {
        assert_eq!(StepDirection::Left.endpoint(), "ptzleft.cgi");
        assert_eq!(StepDirection::Right.endpoint(), "ptzright.cgi");
        assert_eq!(StepDirection::Up.endpoint(), "ptzup.cgi");
        assert_eq!(StepDirection::Down.endpoint(), "ptzdown.cgi");
    }
}
