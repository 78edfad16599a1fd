//! RRT (Rapidly-exploring Random Tree) path planning algorithm
//!
//! Sampling-based planner for a point robot among disk obstacles. The tree
//! grows one step per iteration from a selected node toward a goal-biased
//! random sample; edges that come within an obstacle radius are discarded.

use log::{debug, trace, warn};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{
    backtrack, NoPathReason, ParentLink, Path2D, PathPlanner, PlanOutcome, Point2D,
    RoboticsError, RoboticsResult, TreeObserver,
};

/// Node of the RRT tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub x: f64,
    pub y: f64,
    pub parent: Option<usize>,
}

impl TreeNode {
    pub fn new(position: Point2D, parent: Option<usize>) -> Self {
        TreeNode {
            x: position.x,
            y: position.y,
            parent,
        }
    }

    pub fn to_point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl ParentLink for TreeNode {
    fn parent(&self) -> Option<usize> {
        self.parent
    }
}

/// Axis-aligned workspace with one corner at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workspace {
    pub width: f64,
    pub height: f64,
}

impl Workspace {
    pub fn new(width: f64, height: f64) -> Self {
        Workspace { width, height }
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Circular obstacle (x, y, radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleObstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl CircleObstacle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        self.center().distance(p) <= self.radius
    }
}

/// Which tree node the planner extends toward a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearestPolicy {
    /// Always the most recently inserted node
    MostRecent,
    /// Closest node by Euclidean distance, earliest node on ties
    Nearest,
}

/// Distance model used to reject an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCheck {
    /// Perpendicular distance to the infinite line through the edge.
    /// Also rejects edges that only point at an obstacle.
    InfiniteLine,
    /// Distance to the closest point on the edge itself
    Segment,
}

impl CollisionCheck {
    /// Distance from `c` to the edge `a -> b` under this model
    pub fn distance(&self, a: Point2D, b: Point2D, c: Point2D) -> f64 {
        let (a, b, c) = (a.to_vector(), b.to_vector(), c.to_vector());
        let ab = b - a;
        let ac = c - a;
        let len_sq = ab.norm_squared();
        if len_sq <= f64::EPSILON {
            return ac.norm();
        }

        match self {
            CollisionCheck::InfiniteLine => (ab.x * ac.y - ab.y * ac.x).abs() / len_sq.sqrt(),
            CollisionCheck::Segment => {
                let t = (ac.dot(&ab) / len_sq).clamp(0.0, 1.0);
                (c - (a + ab * t)).norm()
            }
        }
    }

    pub fn collides(&self, a: Point2D, b: Point2D, obstacle: &CircleObstacle) -> bool {
        self.distance(a, b, obstacle.center()) <= obstacle.radius
    }
}

/// Configuration for RRT planner
#[derive(Debug, Clone)]
pub struct RRTConfig {
    /// Maximum length of a single tree edge
    pub step_size: f64,
    /// Probability of sampling the goal instead of a uniform point
    pub goal_bias: f64,
    /// Maximum iterations
    pub max_iter: usize,
    pub nearest: NearestPolicy,
    pub collision: CollisionCheck,
    /// Append the exact goal after reaching the goal region if that edge is free
    pub connect_goal: bool,
    /// Seed for the `PathPlanner` entry point (None = OS entropy)
    pub seed: Option<u64>,
}

impl Default for RRTConfig {
    fn default() -> Self {
        Self {
            step_size: 2.0,
            goal_bias: 0.1,
            max_iter: 1000,
            nearest: NearestPolicy::Nearest,
            collision: CollisionCheck::Segment,
            connect_goal: false,
            seed: None,
        }
    }
}

/// RRT path planner
pub struct RRTPlanner {
    workspace: Workspace,
    obstacles: Vec<CircleObstacle>,
    config: RRTConfig,
}

impl RRTPlanner {
    /// Create a new RRT planner
    pub fn new(workspace: Workspace, obstacles: Vec<CircleObstacle>, config: RRTConfig) -> Self {
        RRTPlanner {
            workspace,
            obstacles,
            config,
        }
    }

    /// Create from `(x, y, radius)` obstacle triples
    pub fn from_obstacles(
        width: f64,
        height: f64,
        obstacle_list: &[(f64, f64, f64)],
        config: RRTConfig,
    ) -> Self {
        let obstacles = obstacle_list
            .iter()
            .map(|&(x, y, r)| CircleObstacle::new(x, y, r))
            .collect();

        Self::new(Workspace::new(width, height), obstacles, config)
    }

    /// Legacy planning interface.
    ///
    /// Returns None both when no path was found and when the request is
    /// invalid; the two cases cannot be told apart here. Rejected requests
    /// are logged at `warn`. Use [`PathPlanner::plan`] for the distinction.
    pub fn planning(&self, start: [f64; 2], goal: [f64; 2]) -> Option<Vec<[f64; 2]>> {
        let start_pt = Point2D::new(start[0], start[1]);
        let goal_pt = Point2D::new(goal[0], goal[1]);

        match self.plan(start_pt, goal_pt) {
            Ok(outcome) => outcome
                .into_path()
                .map(|path| path.points.iter().map(|p| [p.x, p.y]).collect()),
            Err(e) => {
                warn!("[RRT] rejected request: {}", e);
                None
            }
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Get obstacles
    pub fn get_obstacles(&self) -> &[CircleObstacle] {
        &self.obstacles
    }

    pub fn config(&self) -> &RRTConfig {
        &self.config
    }

    /// Check every parameter and both endpoints before sampling starts
    pub fn validate(&self, start: Point2D, goal: Point2D) -> RoboticsResult<()> {
        let ws = &self.workspace;
        if !(ws.width.is_finite() && ws.width > 0.0 && ws.height.is_finite() && ws.height > 0.0) {
            return Err(RoboticsError::InvalidParameter(format!(
                "workspace must be positive, got {}x{}",
                ws.width, ws.height
            )));
        }
        if !(self.config.step_size.is_finite() && self.config.step_size > 0.0) {
            return Err(RoboticsError::InvalidParameter(format!(
                "step_size must be positive, got {}",
                self.config.step_size
            )));
        }
        if !(0.0..=1.0).contains(&self.config.goal_bias) {
            return Err(RoboticsError::InvalidParameter(format!(
                "goal_bias must be in [0, 1], got {}",
                self.config.goal_bias
            )));
        }
        if let Some(obs) = self
            .obstacles
            .iter()
            .find(|o| !(o.center().is_finite() && o.radius.is_finite() && o.radius >= 0.0))
        {
            return Err(RoboticsError::InvalidParameter(format!("bad obstacle {:?}", obs)));
        }
        for (name, p) in [("start", start), ("goal", goal)].iter() {
            if !p.is_finite() || !ws.contains(p) {
                return Err(RoboticsError::InvalidParameter(format!(
                    "{} ({}, {}) outside {}x{} workspace",
                    name, p.x, p.y, ws.width, ws.height
                )));
            }
        }
        Ok(())
    }

    /// Run RRT with an explicit random source and tree observer
    pub fn plan_with_rng<R, O>(
        &self,
        start: Point2D,
        goal: Point2D,
        rng: &mut R,
        observer: &mut O,
    ) -> RoboticsResult<PlanOutcome<Path2D>>
    where
        R: Rng + ?Sized,
        O: TreeObserver + ?Sized,
    {
        self.validate(start, goal)?;

        for obs in &self.obstacles {
            observer.on_obstacle(obs.center(), obs.radius);
        }
        if self.obstacles.iter().any(|o| o.contains(&goal)) {
            warn!("[RRT] goal ({:.2},{:.2}) lies inside an obstacle", goal.x, goal.y);
        }
        if self.obstacles.iter().any(|o| o.contains(&start)) {
            warn!("[RRT] start ({:.2},{:.2}) lies inside an obstacle", start.x, start.y);
        }

        let mut tree = vec![TreeNode::new(start, None)];
        if start.distance(&goal) < self.config.step_size {
            debug!("[RRT] start already within one step of goal");
            return Ok(PlanOutcome::Found {
                path: self.build_path(&tree, 0, goal),
                iterations: 0,
            });
        }

        for iteration in 1..=self.config.max_iter {
            let target = self.sample(goal, rng);
            let nearest_ind = self.select_node(&tree, target);
            let from = tree[nearest_ind].to_point();

            let new_point = match self.steer(from, target) {
                Some(p) => p,
                None => {
                    trace!("[RRT] iteration {}: sample coincides with node {}", iteration, nearest_ind);
                    continue;
                }
            };

            if self.edge_collides(from, new_point) {
                trace!(
                    "[RRT] iteration {}: edge to ({:.2},{:.2}) rejected",
                    iteration, new_point.x, new_point.y
                );
                continue;
            }

            tree.push(TreeNode::new(new_point, Some(nearest_ind)));
            observer.on_edge(from, new_point);

            if new_point.distance(&goal) < self.config.step_size {
                debug!(
                    "[RRT] goal region reached after {} iterations, tree size {}",
                    iteration,
                    tree.len()
                );
                return Ok(PlanOutcome::Found {
                    path: self.build_path(&tree, tree.len() - 1, goal),
                    iterations: iteration,
                });
            }
        }

        debug!(
            "[RRT] no path within {} iterations, tree size {}",
            self.config.max_iter,
            tree.len()
        );
        Ok(PlanOutcome::NoPath {
            reason: NoPathReason::IterationBudgetExhausted,
            iterations: self.config.max_iter,
        })
    }

    /// Goal with probability `goal_bias`, otherwise a uniform workspace point
    pub fn sample<R: Rng + ?Sized>(&self, goal: Point2D, rng: &mut R) -> Point2D {
        if rng.gen_bool(self.config.goal_bias) {
            goal
        } else {
            Point2D::new(
                rng.gen_range(0.0..self.workspace.width),
                rng.gen_range(0.0..self.workspace.height),
            )
        }
    }

    /// Index of the node to extend toward `target`
    pub fn select_node(&self, tree: &[TreeNode], target: Point2D) -> usize {
        match self.config.nearest {
            NearestPolicy::MostRecent => tree.len().saturating_sub(1),
            NearestPolicy::Nearest => tree
                .iter()
                .enumerate()
                .min_by_key(|(_, node)| OrderedFloat(node.to_point().distance(&target)))
                .map(|(i, _)| i)
                .unwrap_or(0),
        }
    }

    /// Move from `from` toward `to` by at most `step_size`.
    ///
    /// Returns None when the two points coincide.
    pub fn steer(&self, from: Point2D, to: Point2D) -> Option<Point2D> {
        let offset = to.to_vector() - from.to_vector();
        let d = offset.norm();
        if d <= f64::EPSILON {
            return None;
        }

        let step = if d > self.config.step_size {
            offset * (self.config.step_size / d)
        } else {
            offset
        };
        Some(Point2D::from(from.to_vector() + step))
    }

    pub fn edge_collides(&self, from: Point2D, to: Point2D) -> bool {
        self.obstacles
            .iter()
            .any(|obs| self.config.collision.collides(from, to, obs))
    }

    fn build_path(&self, tree: &[TreeNode], last_index: usize, goal: Point2D) -> Path2D {
        let mut points: Vec<Point2D> = backtrack(tree, last_index)
            .into_iter()
            .map(|i| tree[i].to_point())
            .collect();

        if self.config.connect_goal {
            let last = tree[last_index].to_point();
            if last != goal && !self.edge_collides(last, goal) {
                points.push(goal);
            }
        }
        Path2D::from_points(points)
    }
}

impl PathPlanner for RRTPlanner {
    fn plan(&self, start: Point2D, goal: Point2D) -> Result<PlanOutcome<Path2D>, RoboticsError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.plan_with_rng(start, goal, &mut rng, &mut ())
    }
}
