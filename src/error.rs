//! Error type shared by every region operation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("{what} count {count} exceeds the limit of {max}")]
    TooManyVertices { what: &'static str, count: usize, max: usize },

    #[error("vertex {index} ({x}, {y}) is outside the supported coordinate range")]
    CoordinateOutOfRange { index: usize, x: i64, y: i64 },

    #[error("edge {index} has zero length")]
    DegenerateEdge { index: usize },

    #[error("polygon edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },

    #[error("region is not initialized")]
    InvalidRegion,

    #[error("start point ({x}, {y}) cannot be moved into the region")]
    StartUnreachable { x: i32, y: i32 },

    #[error("end point ({x}, {y}) cannot be moved into the region")]
    EndUnreachable { x: i32, y: i32 },

    #[error("no path connects the start and end points")]
    NoPath,

    #[error("stale region handle {index}:{generation}")]
    StaleHandle { index: u32, generation: u32 },

    #[error("malformed persisted data: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
