//! Region plus a precomputed visibility graph for path queries.

use std::ops::Deref;

use crate::algorithms::dijkstra;
use crate::algorithms::visibility::{collect_nodes, compute_visibility_matrix};
use crate::error::{Error, Result};
use crate::geometry::limits::MAX_NODES;
use crate::model::Vertex;
use crate::region::Region;

pub use crate::algorithms::visibility::NO_EDGE;

/// A [`Region`] with its vertices flattened into graph nodes and an all-pairs
/// visibility matrix. Read access to the region goes through `Deref`; moving
/// it must go through the `set_pos*` methods here so the nodes follow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkRegion {
    pub(crate) region: Region,
    pub(crate) nodes: Vec<Vertex>,
    pub(crate) visibility: Vec<Vec<u32>>,
}

impl Deref for WalkRegion {
    type Target = Region;
    fn deref(&self) -> &Region { &self.region }
}

impl WalkRegion {
    pub fn new(contour: &[Vertex], holes: &[Vec<Vertex>]) -> Result<WalkRegion> {
        let mut w = WalkRegion::default();
        w.init(contour, holes)?;
        Ok(w)
    }

    /// Builds the region and its visibility graph. On error the previous state is kept.
    pub fn init(&mut self, contour: &[Vertex], holes: &[Vec<Vertex>]) -> Result<()> {
        let total = contour.len() + holes.iter().map(|h| h.len()).sum::<usize>();
        if total > MAX_NODES {
            return Err(Error::TooManyVertices { what: "walk region node", count: total, max: MAX_NODES });
        }
        let region = Region::new(contour, holes)?;
        let nodes = collect_nodes(&region);
        let visibility = compute_visibility_matrix(&region, &nodes);
        self.region = region;
        self.nodes = nodes;
        self.visibility = visibility;
        Ok(())
    }

    // Restored state; `persist` checks it against the region before calling this.
    pub(crate) fn from_parts(region: Region, nodes: Vec<Vertex>, visibility: Vec<Vec<u32>>) -> WalkRegion {
        WalkRegion { region, nodes, visibility }
    }

    pub fn region(&self) -> &Region { &self.region }
    pub fn nodes(&self) -> &[Vertex] { &self.nodes }
    pub fn visibility_matrix(&self) -> &[Vec<u32>] { &self.visibility }

    /// Edge weight between two nodes, `None` when they cannot see each other
    /// or an index is out of range.
    pub fn edge_weight(&self, i: usize, j: usize) -> Option<u32> {
        self.visibility.get(i).and_then(|row| row.get(j)).copied().filter(|w| *w != NO_EDGE)
    }

    /// Moves the region and its nodes. The visibility matrix does not change.
    pub fn set_pos(&mut self, x: i32, y: i32) -> bool {
        let old = self.region.position();
        if !self.region.set_pos(x, y) {
            return false;
        }
        let dx = x - old.x;
        let dy = y - old.y;
        for n in &mut self.nodes {
            *n = n.translated(dx, dy);
        }
        true
    }

    pub fn set_pos_x(&mut self, x: i32) -> bool { self.set_pos(x, self.region.pos_y()) }
    pub fn set_pos_y(&mut self, y: i32) -> bool { self.set_pos(self.region.pos_x(), y) }

    /// Shortest walkable path from `start` to `end`, both included. Endpoints
    /// outside the region are first moved to the closest region point.
    /// `start == end` yields an empty path, and so do two endpoints that
    /// resolve to the same region point.
    pub fn query_path(&self, start: Vertex, end: Vertex) -> Result<Vec<Vertex>> {
        if !self.region.is_valid() {
            return Err(Error::InvalidRegion);
        }
        if start == end {
            return Ok(Vec::new());
        }
        let start = self.resolve_endpoint(start).ok_or(Error::StartUnreachable { x: start.x, y: start.y })?;
        let end = self.resolve_endpoint(end).ok_or(Error::EndUnreachable { x: end.x, y: end.y })?;
        if start == end {
            return Ok(Vec::new());
        }

        if self.region.is_line_of_sight(start, end) {
            log::trace!("direct line of sight from {:?} to {:?}", start, end);
            return Ok(vec![start, end]);
        }

        let route = dijkstra::search(&self.region, &self.nodes, &self.visibility, start, end).ok_or(Error::NoPath)?;
        let mut path = Vec::with_capacity(route.len() + 2);
        path.push(start);
        path.extend(route.into_iter().map(|i| self.nodes[i]));
        path.push(end);
        Ok(path)
    }

    fn resolve_endpoint(&self, p: Vertex) -> Option<Vertex> {
        if self.region.is_point_in_region(p) {
            return Some(p);
        }
        let moved = self.region.find_closest_region_point(p).point();
        if self.region.is_point_in_region(moved) { Some(moved) } else { None }
    }
}

/// Sum of rounded segment lengths along a path.
pub fn path_length(path: &[Vertex]) -> u32 {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}
