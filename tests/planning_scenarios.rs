//! End-to-end scenarios through the public planner interfaces

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rust_planning::path_planning::{a_star_search, AStarPlanner, RRTConfig, RRTPlanner};
use rust_planning::utils::TreeRecorder;
use rust_planning::{
    GridNode, GridPathPlanner, NoPathReason, PathPlanner, PlanOutcome, Point2D, RoboticsError,
};

fn wall_grid() -> Vec<Vec<u8>> {
    let mut grid = vec![vec![0u8; 10]; 10];
    for row in grid.iter_mut().take(4).skip(1) {
        row[3] = 1;
    }
    grid
}

#[test]
fn grid_path_around_short_wall() {
    let planner = AStarPlanner::from_rows(&wall_grid()).unwrap();
    let outcome = planner.plan(GridNode::new(0, 0), GridNode::new(9, 9)).unwrap();

    match outcome {
        PlanOutcome::Found { path, .. } => {
            assert_eq!(path.steps(), 18);
            assert!(path.cells.iter().all(|c| planner.grid_map().is_free(c)));
            assert!(path.cells.iter().tuple_windows().all(|(a, b)| a.is_adjacent_4(b)));
        }
        other => panic!("expected a path, got {:?}", other),
    }
}

#[test]
fn grid_no_path_is_distinct_from_invalid_input() {
    let sealed = vec![vec![0, 1, 0], vec![1, 1, 0], vec![0, 0, 0]];
    let planner = AStarPlanner::from_rows(&sealed).unwrap();

    let outcome = planner.plan(GridNode::new(0, 0), GridNode::new(2, 2)).unwrap();
    assert_eq!(outcome.no_path_reason(), Some(NoPathReason::FrontierExhausted));

    assert!(matches!(
        planner.plan(GridNode::new(0, 1), GridNode::new(2, 2)),
        Err(RoboticsError::Blocked(_))
    ));
    assert!(matches!(AStarPlanner::from_rows(&[]), Err(RoboticsError::InvalidGrid(_))));
    assert!(a_star_search(&sealed, (0, 0), (2, 2)).is_empty());
}

#[test]
fn rrt_reaches_goal_with_recorded_tree() {
    let config = RRTConfig {
        goal_bias: 1.0,
        ..Default::default()
    };
    let planner = RRTPlanner::from_obstacles(100.0, 100.0, &[], config);
    let mut recorder = TreeRecorder::default();
    let outcome = planner
        .plan_with_rng(
            Point2D::new(10.0, 10.0),
            Point2D::new(90.0, 90.0),
            &mut StdRng::seed_from_u64(21),
            &mut recorder,
        )
        .unwrap();

    let iterations = outcome.iterations();
    let path = outcome.into_path().unwrap();
    assert!(iterations <= 60);
    assert_eq!(recorder.edges.len(), path.len() - 1);
    assert!(recorder.obstacles.is_empty());
}

#[test]
fn rrt_fails_when_goal_is_walled_off() {
    let config = RRTConfig {
        max_iter: 100,
        seed: Some(8),
        ..Default::default()
    };
    let planner = RRTPlanner::from_obstacles(100.0, 100.0, &[(90.0, 90.0, 25.0)], config);
    let outcome = planner.plan(Point2D::new(10.0, 10.0), Point2D::new(90.0, 90.0)).unwrap();
    assert_eq!(outcome.no_path_reason(), Some(NoPathReason::IterationBudgetExhausted));
}
