// Binary occupancy grid for the grid planners.
// Cells hold 0 (free) or 1 (blocked); indexing is (row, column).

use std::convert::TryFrom;

extern crate nalgebra as na;

use crate::common::{GridNode, RoboticsError, RoboticsResult};

pub const FREE: u8 = 0;
pub const BLOCKED: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Blocked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    grid: na::DMatrix<u8>,
}

impl GridMap {
    /// Build from row-major data, `rows[r][c]`
    pub fn from_rows(rows: &[Vec<u8>]) -> RoboticsResult<Self> {
        let nrows = rows.len();
        if nrows == 0 {
            return Err(RoboticsError::InvalidGrid("grid has no rows".to_string()));
        }
        let ncols = rows[0].len();
        if ncols == 0 {
            return Err(RoboticsError::InvalidGrid("grid has no columns".to_string()));
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ncols) {
            return Err(RoboticsError::InvalidGrid(format!(
                "row {} has {} columns, expected {}",
                r,
                row.len(),
                ncols
            )));
        }

        let grid = na::DMatrix::from_fn(nrows, ncols, |r, c| rows[r][c]);
        Self::from_matrix(grid)
    }

    pub fn from_matrix(grid: na::DMatrix<u8>) -> RoboticsResult<Self> {
        if grid.nrows() == 0 || grid.ncols() == 0 {
            return Err(RoboticsError::InvalidGrid(format!(
                "grid must be non-empty, got {}x{}",
                grid.nrows(),
                grid.ncols()
            )));
        }
        if let Some(v) = grid.iter().find(|&&v| v != FREE && v != BLOCKED) {
            return Err(RoboticsError::InvalidGrid(format!(
                "cell value {} is neither {} nor {}",
                v, FREE, BLOCKED
            )));
        }
        Ok(Self { grid })
    }

    /// Grid of the given size with every cell free
    pub fn empty(rows: usize, cols: usize) -> RoboticsResult<Self> {
        Self::from_matrix(na::DMatrix::repeat(rows, cols, FREE))
    }

    /// Blow every cell up into a `scale x scale` block
    pub fn scaled(&self, scale: usize) -> RoboticsResult<Self> {
        if scale < 1 {
            return Err(RoboticsError::InvalidParameter("scale must be >= 1".to_string()));
        }
        let grid = self.grid.kronecker(&na::DMatrix::<u8>::repeat(scale, scale, 1));
        Ok(Self { grid })
    }

    pub fn rows(&self) -> usize {
        self.grid.nrows()
    }

    pub fn cols(&self) -> usize {
        self.grid.ncols()
    }

    pub fn in_bounds(&self, node: &GridNode) -> bool {
        node.x >= 0 && node.y >= 0 && (node.x as usize) < self.rows() && (node.y as usize) < self.cols()
    }

    pub fn cell(&self, node: &GridNode) -> Option<Cell> {
        if !self.in_bounds(node) {
            return None;
        }
        match self.grid[(node.x as usize, node.y as usize)] {
            FREE => Some(Cell::Free),
            _ => Some(Cell::Blocked),
        }
    }

    /// In bounds and not blocked
    pub fn is_free(&self, node: &GridNode) -> bool {
        self.cell(node) == Some(Cell::Free)
    }

    pub fn blocked_cells(&self) -> impl Iterator<Item = GridNode> + '_ {
        itertools::iproduct!(0..self.rows(), 0..self.cols())
            .filter(move |&(r, c)| self.grid[(r, c)] == BLOCKED)
            .filter_map(|rc| GridNode::try_from(rc).ok())
    }
}
