//! Common types used throughout rust_planning

use std::convert::TryFrom;

use nalgebra::Vector2;

use crate::common::RoboticsError;

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Path represented as a sequence of 2D points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path2D {
    pub points: Vec<Point2D>,
}

impl Path2D {
    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2D> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2D> {
        self.points.last()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

/// Grid cell coordinate for graph-based planners
///
/// `x` is the row index and `y` the column index, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridNode {
    pub x: i32,
    pub y: i32,
}

impl GridNode {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// L1 distance, the exact step count on an empty 4-connected grid
    pub fn manhattan(&self, other: &GridNode) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Axis-aligned neighbors in the order up, down, left, right
    pub fn neighbors_4(&self) -> [GridNode; 4] {
        [
            GridNode::new(self.x - 1, self.y),
            GridNode::new(self.x + 1, self.y),
            GridNode::new(self.x, self.y - 1),
            GridNode::new(self.x, self.y + 1),
        ]
    }

    pub fn is_adjacent_4(&self, other: &GridNode) -> bool {
        self.manhattan(other) == 1
    }
}

impl TryFrom<(usize, usize)> for GridNode {
    type Error = RoboticsError;

    /// Fails when either index does not fit the signed cell coordinate
    fn try_from(rc: (usize, usize)) -> Result<Self, Self::Error> {
        match (i32::try_from(rc.0), i32::try_from(rc.1)) {
            (Ok(x), Ok(y)) => Ok(Self { x, y }),
            _ => Err(RoboticsError::OutOfBounds(format!(
                "cell ({}, {}) exceeds the grid coordinate range",
                rc.0, rc.1
            ))),
        }
    }
}

/// Path on a grid as an ordered list of cells, start and goal inclusive
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridPath {
    pub cells: Vec<GridNode>,
}

impl GridPath {
    pub fn from_cells(cells: Vec<GridNode>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves, one less than the number of cells
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn contains(&self, cell: &GridNode) -> bool {
        self.cells.contains(cell)
    }

    /// Cells as `(row, column)` pairs
    pub fn to_row_col(&self) -> Vec<(usize, usize)> {
        self.cells.iter().map(|c| (c.x as usize, c.y as usize)).collect()
    }
}

/// Why a planner stopped without reaching the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPathReason {
    /// Every reachable cell was finalized
    FrontierExhausted,
    /// The configured iteration or expansion budget ran out
    IterationBudgetExhausted,
}

/// Result of a planning call that passed input validation
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome<P> {
    Found { path: P, iterations: usize },
    NoPath { reason: NoPathReason, iterations: usize },
}

impl<P> PlanOutcome<P> {
    pub fn is_found(&self) -> bool {
        matches!(self, PlanOutcome::Found { .. })
    }

    pub fn path(&self) -> Option<&P> {
        match self {
            PlanOutcome::Found { path, .. } => Some(path),
            PlanOutcome::NoPath { .. } => None,
        }
    }

    pub fn into_path(self) -> Option<P> {
        match self {
            PlanOutcome::Found { path, .. } => Some(path),
            PlanOutcome::NoPath { .. } => None,
        }
    }

    pub fn iterations(&self) -> usize {
        match self {
            PlanOutcome::Found { iterations, .. } | PlanOutcome::NoPath { iterations, .. } => {
                *iterations
            }
        }
    }

    pub fn no_path_reason(&self) -> Option<NoPathReason> {
        match self {
            PlanOutcome::Found { .. } => None,
            PlanOutcome::NoPath { reason, .. } => Some(*reason),
        }
    }
}
