//! Common traits defining interfaces for the planners

use crate::common::error::RoboticsError;
use crate::common::types::*;

/// Trait for planners in continuous 2D space
pub trait PathPlanner {
    /// Plan a path from start to goal
    fn plan(&self, start: Point2D, goal: Point2D) -> Result<PlanOutcome<Path2D>, RoboticsError>;
}

/// Trait for grid-based path planning algorithms
pub trait GridPathPlanner {
    /// Plan a path on a grid from start to goal
    fn plan(&self, start: GridNode, goal: GridNode) -> Result<PlanOutcome<GridPath>, RoboticsError>;
}

/// Node stored in a planner arena that points back at the node it grew from
pub trait ParentLink {
    fn parent(&self) -> Option<usize>;
}

/// Receives the tree as a sampling planner grows it
///
/// Notifications are one-way; a planner never reads anything back.
pub trait TreeObserver {
    /// Called once per obstacle before sampling starts
    fn on_obstacle(&mut self, _center: Point2D, _radius: f64) {}

    /// Called for every accepted edge, parent first
    fn on_edge(&mut self, _from: Point2D, _to: Point2D) {}
}

impl TreeObserver for () {}

/// Trait for visualizable results
pub trait Visualizable {
    /// Draw onto the visualizer
    fn visualize(&self, vis: &mut crate::utils::Visualizer);
}
