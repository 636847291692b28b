//! Shortest walk around a square obstacle in a square courtyard.
//!
//! Usage:
//! ```text
//! cargo run --example shortest_path
//! RUST_LOG=visigraph=trace cargo run --example shortest_path
//! ```

use visigraph::geometry::{Polygon, Vertex};
use visigraph::graph::Graph;
use visigraph::operations::path::ShortestPath;
use visigraph::operations::query::Isovist;
use visigraph::visibility::{VisibilityGraph, VisibilityOptions};

fn square(half: f64, is_boundary: bool) -> visigraph::Result<Polygon> {
    Polygon::new(
        vec![
            Vertex::xy(-half, -half),
            Vertex::xy(half, -half),
            Vertex::xy(half, half),
            Vertex::xy(-half, half),
        ],
        is_boundary,
    )
}

fn main() -> visigraph::Result<()> {
    // Default: WARN for everything, DEBUG for visigraph.
    // Override with RUST_LOG (e.g. RUST_LOG=visigraph=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("visigraph=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let base = Graph::from_polygons([square(25.0, true)?, square(7.5, false)?])?;
    let vis = VisibilityGraph::build(&base, VisibilityOptions::default())?;
    println!(
        "visibility graph: {} vertices, {} edges",
        vis.graph().vertex_count(),
        vis.graph().edge_count()
    );

    let origin = Vertex::xy(-20.0, -2.0);
    let destination = Vertex::xy(20.0, 2.0);
    let path = ShortestPath::new(origin, destination).execute(&vis)?;
    println!("path length {:.3}:", path.length());
    for v in path.vertices() {
        println!("  {v}");
    }

    let isovist = Isovist::new(origin).execute(&base)?;
    println!(
        "isovist from {origin}: {} vertices, area {:.3}",
        isovist.vertices().len(),
        isovist.area()
    );
    Ok(())
}
