//! Visualization utilities for rust_planning
//!
//! Collects plot layers and renders them with gnuplot. Planners never
//! depend on this module; they only talk to a [`TreeObserver`].

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{GridPath, Path2D, Point2D, RoboticsError, RoboticsResult, TreeObserver, Visualizable};
use crate::utils::GridMap;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const OBSTACLE: &str = RED;
    pub const BLOCKED_CELL: &str = BLACK;
    pub const TREE: &str = BLUE;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
}

const CIRCLE_SEGMENTS: usize = 64;

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

#[derive(Debug, Clone)]
enum Layer {
    Lines {
        x: Vec<f64>,
        y: Vec<f64>,
        color: String,
        width: f64,
        caption: Option<String>,
    },
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        style: PointStyle,
    },
}

/// Main visualizer struct
pub struct Visualizer {
    layers: Vec<Layer>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            title: String::new(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_labels(&mut self, x_label: &str, y_label: &str) -> &mut Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Set aspect ratio (None for auto)
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.aspect_ratio = ratio;
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Plot a path
    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        self.layers.push(Layer::Lines {
            x: path.x_coords(),
            y: path.y_coords(),
            color: style.color.clone(),
            width: style.line_width,
            caption: Some(style.caption.clone()),
        });
        self
    }

    /// Plot a grid path with columns on X and rows on Y
    pub fn plot_grid_path(&mut self, path: &GridPath, style: &PathStyle) -> &mut Self {
        self.layers.push(Layer::Lines {
            x: path.cells.iter().map(|c| c.y as f64).collect(),
            y: path.cells.iter().map(|c| c.x as f64).collect(),
            color: style.color.clone(),
            width: style.line_width,
            caption: Some(style.caption.clone()),
        });
        self
    }

    /// Plot a single uncaptioned line segment
    pub fn plot_segment(&mut self, from: Point2D, to: Point2D, color: &str) -> &mut Self {
        self.layers.push(Layer::Lines {
            x: vec![from.x, to.x],
            y: vec![from.y, to.y],
            color: color.to_string(),
            width: 1.0,
            caption: None,
        });
        self
    }

    /// Plot a circle outline
    pub fn plot_circle(&mut self, center: Point2D, radius: f64, color: &str) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / CIRCLE_SEGMENTS as f64;
                (center.x + radius * theta.cos(), center.y + radius * theta.sin())
            })
            .unzip();
        self.layers.push(Layer::Lines {
            x,
            y,
            color: color.to_string(),
            width: 2.0,
            caption: None,
        });
        self
    }

    /// Plot multiple points
    pub fn plot_points(&mut self, points: &[Point2D], style: &PointStyle) -> &mut Self {
        self.layers.push(Layer::Points {
            x: points.iter().map(|p| p.x).collect(),
            y: points.iter().map(|p| p.y).collect(),
            style: style.clone(),
        });
        self
    }

    /// Plot a single point (start, goal, etc.)
    pub fn plot_point(&mut self, point: Point2D, style: &PointStyle) -> &mut Self {
        self.plot_points(&[point], style)
    }

    /// Plot start position
    pub fn plot_start(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    /// Plot goal position
    pub fn plot_goal(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Draw any visualizable item
    pub fn draw<V: Visualizable + ?Sized>(&mut self, item: &V) -> &mut Self {
        item.visualize(self);
        self
    }

    /// Finalize and show the plot
    pub fn show(&self) -> RoboticsResult<()> {
        let mut figure = self.render();
        figure
            .show()
            .map(|_| ())
            .map_err(|e| RoboticsError::VisualizationError(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> RoboticsResult<()> {
        let mut figure = self.render();
        figure
            .save_to_png(path, width, height)
            .map_err(|e| RoboticsError::VisualizationError(e.to_string()))
    }

    /// Save plot to SVG file
    pub fn save_svg(&self, path: &str) -> RoboticsResult<()> {
        let mut figure = self.render();
        figure
            .save_to_svg(path, 800, 600)
            .map_err(|e| RoboticsError::VisualizationError(e.to_string()))
    }

    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for layer in &self.layers {
            match layer {
                Layer::Lines { x, y, color, width, caption } => {
                    let mut opts = vec![Color(color.as_str()), LineWidth(*width)];
                    if let Some(caption) = caption {
                        opts.push(Caption(caption.as_str()));
                    }
                    axes.lines(x, y, &opts);
                }
                Layer::Points { x, y, style } => {
                    axes.points(x, y, &[
                        Caption(style.caption.as_str()),
                        Color(style.color.as_str()),
                        PointSymbol(style.symbol),
                        PointSize(style.size),
                    ]);
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }

        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer that keeps every obstacle and accepted edge for later drawing
#[derive(Debug, Clone, Default)]
pub struct TreeRecorder {
    pub obstacles: Vec<(Point2D, f64)>,
    pub edges: Vec<(Point2D, Point2D)>,
}

impl TreeObserver for TreeRecorder {
    fn on_obstacle(&mut self, center: Point2D, radius: f64) {
        self.obstacles.push((center, radius));
    }

    fn on_edge(&mut self, from: Point2D, to: Point2D) {
        self.edges.push((from, to));
    }
}

impl Visualizable for TreeRecorder {
    fn visualize(&self, vis: &mut Visualizer) {
        for &(center, radius) in &self.obstacles {
            vis.plot_circle(center, radius, colors::OBSTACLE);
        }
        for &(from, to) in &self.edges {
            vis.plot_segment(from, to, colors::TREE);
        }
    }
}

impl Visualizable for GridMap {
    fn visualize(&self, vis: &mut Visualizer) {
        let cells: Vec<Point2D> = self
            .blocked_cells()
            .map(|c| Point2D::new(c.y as f64, c.x as f64))
            .collect();
        vis.plot_points(
            &cells,
            &PointStyle::new(colors::BLOCKED_CELL, "Blocked").with_symbol('S'),
        );
    }
}
