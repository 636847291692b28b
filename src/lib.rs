pub mod collections;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod operations;
pub mod visibility;

pub use error::{Result, VisigraphError};
