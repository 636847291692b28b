mod dijkstra;
mod shortest_path;

pub use shortest_path::{Path, ShortestPath};
