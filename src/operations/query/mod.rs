mod isovist;
mod visible_vertices;

pub use isovist::Isovist;
pub use visible_vertices::VisibleVertices;
