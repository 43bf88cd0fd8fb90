pub mod model;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
}
pub mod algorithms {
    pub mod dijkstra;
    pub mod visibility;
}
pub mod arena;
pub mod error;
pub mod persist;
pub mod polygon;
pub mod region;
pub mod walk_region;
mod json;
mod svg;

pub use arena::{RegionArena, RegionEntry, RegionHandle};
pub use error::{Error, Result};
pub use json::DOC_VERSION;
pub use model::{BoundingBox, Vertex};
pub use polygon::Polygon;
pub use region::{ClosestPoint, Region};
pub use svg::path_to_svg;
pub use walk_region::{path_length, WalkRegion, NO_EDGE};
