//! A* path planning on a binary occupancy grid
//!
//! Searches a 4-connected grid with unit step cost using the Manhattan
//! distance as heuristic, which is admissible and consistent for this
//! motion model, so the first time the goal is popped its path is optimal.
//!
//! The frontier is allowed to hold several entries for the same cell. A
//! cell is finalized the first time it is popped; later copies are skipped.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::convert::TryFrom;

use log::{debug, trace, warn};

use crate::common::{
    backtrack, GridNode, GridPath, GridPathPlanner, NoPathReason, ParentLink, PlanOutcome,
    RoboticsError, RoboticsResult,
};
use crate::utils::GridMap;

/// Configuration for A* planner
#[derive(Debug, Clone, Default)]
pub struct AStarConfig {
    /// Maximum number of frontier pops before giving up (None = unbounded)
    pub max_expansions: Option<usize>,
}

/// Node created for every push onto the frontier
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub cell: GridNode,
    /// Steps from start
    pub g: u32,
    /// Manhattan distance to goal
    pub h: u32,
    pub parent_index: Option<usize>,
}

impl SearchNode {
    pub fn new(cell: GridNode, g: u32, h: u32, parent_index: Option<usize>) -> Self {
        SearchNode { cell, g, h, parent_index }
    }

    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

impl ParentLink for SearchNode {
    fn parent(&self) -> Option<usize> {
        self.parent_index
    }
}

/// Frontier entry. Ordered by f, then h, then arena index, which is the
/// insertion order.
#[derive(Debug, PartialEq, Eq)]
struct PriorityNode {
    f: u32,
    h: u32,
    index: usize,
}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        (other.f, other.h, other.index).cmp(&(self.f, self.h, self.index))
    }
}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* grid planner
pub struct AStarPlanner {
    grid_map: GridMap,
    config: AStarConfig,
}

impl AStarPlanner {
    pub fn new(grid_map: GridMap, config: AStarConfig) -> Self {
        AStarPlanner { grid_map, config }
    }

    /// Build the grid from `0`/`1` rows and use the default config
    pub fn from_rows(rows: &[Vec<u8>]) -> RoboticsResult<Self> {
        Ok(Self::new(GridMap::from_rows(rows)?, AStarConfig::default()))
    }

    /// Get reference to the grid map
    pub fn grid_map(&self) -> &GridMap {
        &self.grid_map
    }

    fn validate_endpoint(&self, name: &str, node: GridNode) -> RoboticsResult<()> {
        if !self.grid_map.in_bounds(&node) {
            return Err(RoboticsError::OutOfBounds(format!(
                "{} ({}, {}) outside {}x{} grid",
                name,
                node.x,
                node.y,
                self.grid_map.rows(),
                self.grid_map.cols()
            )));
        }
        if !self.grid_map.is_free(&node) {
            return Err(RoboticsError::Blocked(format!("{} ({}, {})", name, node.x, node.y)));
        }
        Ok(())
    }

    fn build_path(&self, goal_index: usize, node_storage: &[SearchNode]) -> GridPath {
        let cells = backtrack(node_storage, goal_index)
            .into_iter()
            .map(|i| node_storage[i].cell)
            .collect();
        GridPath::from_cells(cells)
    }
}

impl GridPathPlanner for AStarPlanner {
    fn plan(&self, start: GridNode, goal: GridNode) -> Result<PlanOutcome<GridPath>, RoboticsError> {
        trace!("[AStar] plan: start=({},{}) goal=({},{})", start.x, start.y, goal.x, goal.y);

        self.validate_endpoint("start", start)?;
        self.validate_endpoint("goal", goal)?;

        let mut open_set = BinaryHeap::new();
        let mut closed_set: HashSet<GridNode> = HashSet::new();
        let mut node_storage: Vec<SearchNode> = Vec::new();

        node_storage.push(SearchNode::new(start, 0, start.manhattan(&goal), None));
        open_set.push(PriorityNode {
            f: node_storage[0].f(),
            h: node_storage[0].h,
            index: 0,
        });

        let mut iterations = 0;
        while let Some(current) = open_set.pop() {
            if let Some(budget) = self.config.max_expansions {
                if iterations >= budget {
                    debug!("[AStar] expansion budget {} exhausted", budget);
                    return Ok(PlanOutcome::NoPath {
                        reason: NoPathReason::IterationBudgetExhausted,
                        iterations,
                    });
                }
            }
            iterations += 1;

            let (cell, g) = {
                let node = &node_storage[current.index];
                (node.cell, node.g)
            };

            if closed_set.contains(&cell) {
                continue;
            }

            if cell == goal {
                debug!("[AStar] goal reached after {} iterations, cost {}", iterations, g);
                return Ok(PlanOutcome::Found {
                    path: self.build_path(current.index, &node_storage),
                    iterations,
                });
            }

            closed_set.insert(cell);

            for neighbor in cell.neighbors_4().iter() {
                if !self.grid_map.is_free(neighbor) || closed_set.contains(neighbor) {
                    continue;
                }

                let node = SearchNode::new(*neighbor, g + 1, neighbor.manhattan(&goal), Some(current.index));
                let priority = PriorityNode {
                    f: node.f(),
                    h: node.h,
                    index: node_storage.len(),
                };
                node_storage.push(node);
                open_set.push(priority);
            }
        }

        debug!(
            "[AStar] no path: frontier empty after {} iterations, {} cells finalized",
            iterations,
            closed_set.len()
        );
        Ok(PlanOutcome::NoPath {
            reason: NoPathReason::FrontierExhausted,
            iterations,
        })
    }
}

/// Grid search with plain `(row, column)` pairs.
///
/// Returns an empty vector when there is no path or the input is invalid;
/// the two cases cannot be told apart here. Rejected input is logged at
/// `warn`. Use [`AStarPlanner`] to get the error or the `NoPath` reason.
pub fn a_star_search(grid: &[Vec<u8>], start: (usize, usize), goal: (usize, usize)) -> Vec<(usize, usize)> {
    let request = AStarPlanner::from_rows(grid).and_then(|planner| {
        let start = GridNode::try_from(start)?;
        let goal = GridNode::try_from(goal)?;
        planner.plan(start, goal)
    });

    match request {
        Ok(outcome) => outcome.into_path().map(|p| p.to_row_col()).unwrap_or_default(),
        Err(e) => {
            warn!("[AStar] rejected request: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    fn reference_grid() -> Vec<Vec<u8>> {
        vec![
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0, 0, 0, 1, 1, 0],
            vec![0, 1, 0, 0, 0, 1, 0, 1, 0, 0],
            vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 0],
            vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0],
            vec![0, 1, 1, 1, 1, 1, 0, 1, 0, 0],
            vec![0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 1, 1, 1, 1, 1, 1, 0],
        ]
    }

    fn bfs_distance(map: &GridMap, start: GridNode, goal: GridNode) -> Option<usize> {
        let mut dist = std::collections::HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(start, 0usize);
        queue.push_back(start);
        while let Some(cell) = queue.pop_front() {
            let d = dist[&cell];
            if cell == goal {
                return Some(d);
            }
            for n in cell.neighbors_4().iter() {
                if map.is_free(n) && !dist.contains_key(n) {
                    dist.insert(*n, d + 1);
                    queue.push_back(*n);
                }
            }
        }
        None
    }

    fn assert_valid_path(map: &GridMap, path: &GridPath, start: GridNode, goal: GridNode) {
        assert_eq!(path.cells.first(), Some(&start));
        assert_eq!(path.cells.last(), Some(&goal));
        assert!(path.cells.iter().all(|c| map.is_free(c)));
        for (a, b) in path.cells.iter().tuple_windows() {
            assert!(a.is_adjacent_4(b), "{:?} -> {:?} is not a single step", a, b);
        }
    }

    #[test]
    fn test_reference_grid_path() {
        let planner = AStarPlanner::from_rows(&reference_grid()).unwrap();
        let start = GridNode::new(0, 0);
        let goal = GridNode::new(9, 9);

        let outcome = planner.plan(start, goal).unwrap();
        let path = outcome.path().expect("path should exist");

        assert_valid_path(planner.grid_map(), path, start, goal);
        assert_eq!(Some(path.steps()), bfs_distance(planner.grid_map(), start, goal));
        assert_eq!(path.steps(), 18);
    }

    #[test]
    fn test_wall_with_gap_routes_through_gap() {
        // Column 3 blocked on rows 1..=3 and 5..=9, gap at row 4
        let mut grid = vec![vec![0u8; 10]; 10];
        for (r, row) in grid.iter_mut().enumerate() {
            if r >= 1 && r != 4 {
                row[3] = 1;
            }
        }
        let planner = AStarPlanner::from_rows(&grid).unwrap();
        let start = GridNode::new(0, 0);
        let goal = GridNode::new(9, 9);

        let path = planner.plan(start, goal).unwrap().into_path().unwrap();
        assert_valid_path(planner.grid_map(), &path, start, goal);
        assert_eq!(path.steps(), 18);

        // Crossing column 3 happens either along row 0 or through the gap
        let crossings: Vec<_> = path.cells.iter().filter(|c| c.y == 3).collect();
        assert_eq!(crossings.len(), 1);
        assert!(crossings[0].x == 0 || crossings[0].x == 4);
    }

    #[test]
    fn test_gap_is_only_crossing() {
        // Column 3 blocked on every row except 4
        let mut grid = vec![vec![0u8; 10]; 10];
        for (r, row) in grid.iter_mut().enumerate() {
            if r != 4 {
                row[3] = 1;
            }
        }
        let planner = AStarPlanner::from_rows(&grid).unwrap();
        let path = planner
            .plan(GridNode::new(0, 0), GridNode::new(9, 9))
            .unwrap()
            .into_path()
            .unwrap();
        assert!(path.contains(&GridNode::new(4, 3)));
        assert_eq!(path.steps(), 18);
    }

    #[test]
    fn test_start_equals_goal() {
        let planner = AStarPlanner::from_rows(&reference_grid()).unwrap();
        let cell = GridNode::new(4, 4);
        let outcome = planner.plan(cell, cell).unwrap();
        assert_eq!(outcome.iterations(), 1);
        assert_eq!(outcome.into_path().unwrap().cells, vec![cell]);
    }

    #[test]
    fn test_enclosed_goal_has_no_path() {
        let grid = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let planner = AStarPlanner::from_rows(&grid).unwrap();
        let outcome = planner.plan(GridNode::new(0, 0), GridNode::new(2, 2)).unwrap();
        assert!(!outcome.is_found());
        assert_eq!(outcome.no_path_reason(), Some(NoPathReason::FrontierExhausted));
    }

    #[test]
    fn test_invalid_endpoints_rejected_before_search() {
        let planner = AStarPlanner::from_rows(&reference_grid()).unwrap();
        assert!(matches!(
            planner.plan(GridNode::new(-1, 0), GridNode::new(9, 9)),
            Err(RoboticsError::OutOfBounds(_))
        ));
        assert!(matches!(
            planner.plan(GridNode::new(0, 0), GridNode::new(10, 9)),
            Err(RoboticsError::OutOfBounds(_))
        ));
        assert!(matches!(
            planner.plan(GridNode::new(1, 1), GridNode::new(9, 9)),
            Err(RoboticsError::Blocked(_))
        ));
        assert!(matches!(
            planner.plan(GridNode::new(0, 0), GridNode::new(5, 5)),
            Err(RoboticsError::Blocked(_))
        ));
    }

    #[test]
    fn test_expansion_budget() {
        let map = GridMap::empty(20, 20).unwrap();
        let planner = AStarPlanner::new(map, AStarConfig { max_expansions: Some(5) });
        let outcome = planner.plan(GridNode::new(0, 0), GridNode::new(19, 19)).unwrap();
        assert_eq!(outcome.no_path_reason(), Some(NoPathReason::IterationBudgetExhausted));
        assert_eq!(outcome.iterations(), 5);
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let map = GridMap::empty(6, 6).unwrap();
        let planner = AStarPlanner::new(map, AStarConfig::default());
        let a = planner.plan(GridNode::new(0, 0), GridNode::new(5, 5)).unwrap();
        let b = planner.plan(GridNode::new(0, 0), GridNode::new(5, 5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.path().unwrap().steps(), 10);
    }

    #[test]
    fn test_matches_bfs_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let rows: usize = rng.gen_range(1..9);
            let cols: usize = rng.gen_range(1..9);
            let grid: Vec<Vec<u8>> = (0..rows)
                .map(|_| (0..cols).map(|_| if rng.gen_bool(0.3) { 1 } else { 0 }).collect())
                .collect();
            let planner = AStarPlanner::from_rows(&grid).unwrap();
            let map = planner.grid_map();

            let free: Vec<GridNode> = itertools::iproduct!(0..rows, 0..cols)
                .filter_map(|rc| GridNode::try_from(rc).ok())
                .filter(|c| map.is_free(c))
                .collect();
            for (&start, &goal) in free.iter().tuple_combinations().take(30) {
                let outcome = planner.plan(start, goal).unwrap();
                let expected = bfs_distance(map, start, goal);
                assert_eq!(outcome.path().map(|p| p.steps()), expected);
                if let Some(path) = outcome.path() {
                    assert_valid_path(map, path, start, goal);
                }
            }
        }
    }

    #[test]
    fn test_a_star_search_pairs() {
        let path = a_star_search(&reference_grid(), (0, 0), (9, 9));
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(9, 9)));
        assert_eq!(path.len(), 19);

        assert!(a_star_search(&reference_grid(), (0, 0), (1, 1)).is_empty());
        assert!(a_star_search(&[], (0, 0), (0, 0)).is_empty());
    }

    #[test]
    fn test_a_star_search_rejects_oversized_coordinates() {
        let grid = vec![vec![0u8; 3]; 3];
        assert_eq!(a_star_search(&grid, (0, 0), (2, 2)).len(), 5);

        // Rows 2^32 and 2^32 + 2 must not wrap onto cells of the grid
        assert!(a_star_search(&grid, (1usize << 32, 0), (2, 2)).is_empty());
        assert!(a_star_search(&grid, (0, 0), ((1usize << 32) + 2, 2)).is_empty());
        assert!(a_star_search(&grid, (0, usize::MAX), (2, 2)).is_empty());
    }
}
