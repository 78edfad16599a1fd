//! RustPlanning - path planning for a 2D point robot
//!
//! This crate provides an A* planner over binary occupancy grids and an
//! RRT planner over continuous workspaces with disk obstacles.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{GridNode, GridPath, NoPathReason, Path2D, PlanOutcome, Point2D};
pub use common::{GridPathPlanner, PathPlanner, TreeObserver};
pub use common::{RoboticsError, RoboticsResult};
