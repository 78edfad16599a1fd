//! Utility modules for rust_planning

pub mod grid_map;
pub mod visualization;

pub use grid_map::{Cell, GridMap};
pub use visualization::{colors, PathStyle, PointStyle, TreeRecorder, Visualizer};
