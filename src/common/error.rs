//! Error types for rust_planning

use std::fmt;

/// Main error type for the planners
///
/// Only input problems end up here. A search that runs out of frontier or
/// iterations is reported through [`crate::common::PlanOutcome::NoPath`].
#[derive(Debug)]
pub enum RoboticsError {
    /// Occupancy grid is empty, ragged, or holds unknown cell values
    InvalidGrid(String),
    /// Start or goal cell lies outside the grid
    OutOfBounds(String),
    /// Start or goal cell is occupied
    Blocked(String),
    /// Invalid parameter
    InvalidParameter(String),
    /// I/O error
    IoError(std::io::Error),
    /// Visualization error
    VisualizationError(String),
}

impl fmt::Display for RoboticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoboticsError::InvalidGrid(msg) => write!(f, "Invalid grid: {}", msg),
            RoboticsError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
            RoboticsError::Blocked(msg) => write!(f, "Blocked cell: {}", msg),
            RoboticsError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            RoboticsError::IoError(e) => write!(f, "I/O error: {}", e),
            RoboticsError::VisualizationError(msg) => write!(f, "Visualization error: {}", msg),
        }
    }
}

impl std::error::Error for RoboticsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoboticsError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RoboticsError {
    fn from(e: std::io::Error) -> Self {
        RoboticsError::IoError(e)
    }
}

/// Result type alias for planner operations
pub type RoboticsResult<T> = Result<T, RoboticsError>;
