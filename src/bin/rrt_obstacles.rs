// RRT planning demo
// Grows a tree across a 100x100 workspace with three disk obstacles.
// Pass `--plot` to render the tree, obstacles and path with gnuplot.

use rust_planning::path_planning::{CollisionCheck, NearestPolicy, RRTConfig, RRTPlanner};
use rust_planning::utils::{PathStyle, TreeRecorder, Visualizer};
use rust_planning::{PlanOutcome, Point2D};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();
    let show_plot = std::env::args().any(|a| a == "--plot");
    let reference = std::env::args().any(|a| a == "--reference");

    println!("RRT path planning start!!");

    let start = Point2D::new(10.0, 10.0);
    let goal = Point2D::new(90.0, 90.0);
    let obstacles = [(40.0, 40.0, 10.0), (60.0, 60.0, 10.0), (70.0, 50.0, 10.0)];

    let mut config = RRTConfig {
        step_size: 2.0,
        goal_bias: 0.1,
        max_iter: 1000,
        ..Default::default()
    };
    if reference {
        // Extend the newest node and test against infinite lines
        config.nearest = NearestPolicy::MostRecent;
        config.collision = CollisionCheck::InfiniteLine;
    }
    let planner = RRTPlanner::from_obstacles(100.0, 100.0, &obstacles, config);

    let mut rng = StdRng::from_entropy();
    let mut recorder = TreeRecorder::default();

    match planner.plan_with_rng(start, goal, &mut rng, &mut recorder) {
        Ok(PlanOutcome::Found { path, iterations }) => {
            println!("Path found after {} iterations:", iterations);
            for p in &path.points {
                println!("({:.2}, {:.2})", p.x, p.y);
            }

            if show_plot {
                let mut vis = Visualizer::new();
                vis.set_title("RRT Path Planning")
                    .set_x_range(0.0, 100.0)
                    .set_y_range(0.0, 100.0)
                    .draw(&recorder)
                    .plot_start(start)
                    .plot_goal(goal)
                    .plot_path(&path, &PathStyle::default());
                if let Err(e) = vis.show() {
                    eprintln!("{}", e);
                }
            }
        }
        Ok(PlanOutcome::NoPath { iterations, .. }) => {
            println!(
                "No path found after {} iterations ({} tree edges)",
                iterations,
                recorder.edges.len()
            );
        }
        Err(e) => {
            eprintln!("Planning failed: {}", e);
        }
    }

    println!("RRT path planning finish!!");
}
