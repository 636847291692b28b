pub mod bounding_box;
pub mod edge;
pub mod polygon;
pub mod vertex;

pub use bounding_box::BoundingBox;
pub use edge::{Edge, Intersection};
pub use polygon::Polygon;
pub use vertex::Vertex;
