use thiserror::Error;

/// Top-level error type for the visibility graph engine.
#[derive(Debug, Error)]
pub enum VisigraphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    DegeneratePolygon(usize),

    #[error("empty point list")]
    EmptyPoints,
}

/// Errors related to graph construction and lookup.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("unsupported branch at ({x}, {y}): {degree} incident edges")]
    UnsupportedBranch { x: f64, y: f64, degree: usize },

    #[error("polygon {0} not found")]
    PolygonNotFound(usize),
}

/// Errors raised by the priority structures.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("heap is empty")]
    EmptyHeap,

    #[error("key not found in priority queue")]
    UnknownKey,

    #[error("key already present in priority queue")]
    DuplicateKey,
}

/// Errors raised by path queries.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("no path from ({from_x}, {from_y}) to ({to_x}, {to_y})")]
    Unreachable {
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
    },
}

/// Errors related to query operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`VisigraphError`].
pub type Result<T> = std::result::Result<T, VisigraphError>;
