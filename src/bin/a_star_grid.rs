// A* grid planning demo
// Plans across a 10x10 occupancy grid and prints the resulting cells.
// Pass `--plot` to render the grid and path with gnuplot.

use rust_planning::path_planning::AStarPlanner;
use rust_planning::utils::{PathStyle, Visualizer};
use rust_planning::{GridNode, GridPathPlanner, PlanOutcome};

fn main() {
    env_logger::init();
    let show_plot = std::env::args().any(|a| a == "--plot");

    println!("A* path planning start!!");

    #[rustfmt::skip]
    let grid = vec![
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
    ];
    let start = GridNode::new(0, 0);
    let goal = GridNode::new(9, 9);

    let planner = match AStarPlanner::from_rows(&grid) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Invalid grid: {}", e);
            std::process::exit(1);
        }
    };

    match planner.plan(start, goal) {
        Ok(PlanOutcome::Found { path, iterations }) => {
            println!("Path found after {} iterations:", iterations);
            for (row, col) in path.to_row_col() {
                println!("({}, {})", row, col);
            }

            if show_plot {
                let mut vis = Visualizer::new();
                vis.set_title("A* Path Planning")
                    .set_labels("column", "row")
                    .draw(planner.grid_map())
                    .plot_grid_path(&path, &PathStyle::default());
                if let Err(e) = vis.show() {
                    eprintln!("{}", e);
                }
            }
        }
        Ok(PlanOutcome::NoPath { reason, iterations }) => {
            println!("No path found ({:?} after {} iterations)", reason, iterations);
        }
        Err(e) => {
            eprintln!("Planning failed: {}", e);
        }
    }

    println!("A* path planning finish!!");
}
