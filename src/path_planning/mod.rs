// Path Planning algorithms module

pub mod a_star;
pub mod rrt;

pub use a_star::*;
pub use rrt::*;
