//! Common types, traits, and error definitions for rust_planning
//!
//! This module provides the building blocks shared by the grid and
//! sampling planners.

pub mod types;
pub mod traits;
pub mod error;
pub mod backtrack;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use backtrack::backtrack;
