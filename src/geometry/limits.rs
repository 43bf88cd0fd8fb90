// Ingestion limits for authored and persisted region data.

// |x| and |y| stay below 2^24 so cross products and squared distances fit in i64
pub const COORD_LIMIT: i64 = 1 << 24;

pub const MAX_POLYGON_VERTICES: usize = 4_096;
pub const MAX_HOLES: usize = 256;
// Bounds the N x N visibility matrix
pub const MAX_NODES: usize = 8_192;

#[inline]
pub fn in_coord_bounds(v: i64) -> bool { v > -COORD_LIMIT && v < COORD_LIMIT }
