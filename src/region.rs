//! Walkable area made of one contour and any number of holes.

use crate::error::{Error, Result};
use crate::geometry::limits::{in_coord_bounds, MAX_HOLES};
use crate::geometry::math::closest_point_on_segment;
use crate::model::{BoundingBox, Vertex};
use crate::polygon::Polygon;

// Probed around a rounded closest point that fell just outside the region.
const PROBE_OFFSETS: [(i32, i32); 8] = [(2, 0), (-2, 0), (0, 2), (0, -2), (-2, -2), (2, -2), (-2, 2), (2, 2)];

/// Result of [`Region::find_closest_region_point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosestPoint {
    /// The point itself, or the projection onto the nearest boundary edge.
    Boundary(Vertex),
    /// The projection rounded outside the region; a nearby offset was used.
    Probed(Vertex),
    /// Nothing nearby was inside; the nearest polygon vertex is returned.
    NearestVertex(Vertex),
}

impl ClosestPoint {
    pub fn point(&self) -> Vertex {
        match *self {
            ClosestPoint::Boundary(v) | ClosestPoint::Probed(v) | ClosestPoint::NearestVertex(v) => v,
        }
    }

    pub fn is_degraded(&self) -> bool { matches!(self, ClosestPoint::NearestVertex(_)) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub(crate) valid: bool,
    pub(crate) polygons: Vec<Polygon>, // [0] contour, [1..] holes, all clockwise
    pub(crate) position: Vertex,
    pub(crate) bbox: BoundingBox,
}

impl Region {
    pub fn new(contour: &[Vertex], holes: &[Vec<Vertex>]) -> Result<Region> {
        let mut r = Region::default();
        r.init(contour, holes)?;
        Ok(r)
    }

    /// Builds the region from authored vertex lists. On error the previous
    /// state is kept.
    pub fn init(&mut self, contour: &[Vertex], holes: &[Vec<Vertex>]) -> Result<()> {
        if holes.len() > MAX_HOLES {
            return Err(Error::TooManyVertices { what: "hole", count: holes.len(), max: MAX_HOLES });
        }
        let mut polygons = Vec::with_capacity(holes.len() + 1);
        polygons.push(Polygon::new(contour)?);
        for hole in holes {
            polygons.push(Polygon::new(hole)?);
        }
        for p in &mut polygons {
            p.ensure_cw_order();
        }
        self.polygons = polygons;
        self.update_bounding_box();
        self.position = Vertex::new(self.bbox.left, self.bbox.top);
        self.valid = true;
        log::debug!(
            "region initialized: {} polygons, {} vertices, bbox {:?}",
            self.polygons.len(),
            self.polygons.iter().map(|p| p.vertex_count()).sum::<usize>(),
            self.bbox
        );
        Ok(())
    }

    // Used when restoring persisted state: polygons are already absolute.
    pub(crate) fn from_parts(polygons: Vec<Polygon>, position: Vertex) -> Region {
        let mut r = Region { valid: true, polygons, position, bbox: BoundingBox::default() };
        r.update_bounding_box();
        r
    }

    fn update_bounding_box(&mut self) {
        self.bbox = self.polygons.first().map(|c| c.bounding_box()).unwrap_or_default();
    }

    pub fn is_valid(&self) -> bool { self.valid }
    pub fn position(&self) -> Vertex { self.position }
    pub fn pos_x(&self) -> i32 { self.position.x }
    pub fn pos_y(&self) -> i32 { self.position.y }
    pub fn bounding_box(&self) -> BoundingBox { self.bbox }
    pub fn polygon_count(&self) -> usize { self.polygons.len() }
    pub fn polygon(&self, i: usize) -> Option<&Polygon> { self.polygons.get(i) }
    pub fn contour(&self) -> Option<&Polygon> { self.polygons.first() }
    pub fn holes(&self) -> &[Polygon] { self.polygons.get(1..).unwrap_or(&[]) }

    /// Moves the region so its position becomes (x, y). Returns false and
    /// leaves the region untouched when it is not initialized or the move
    /// would leave the coordinate limits.
    pub fn set_pos(&mut self, x: i32, y: i32) -> bool {
        if !self.valid {
            return false;
        }
        let dx = x as i64 - self.position.x as i64;
        let dy = y as i64 - self.position.y as i64;
        let bb = self.bbox;
        let fits = in_coord_bounds(bb.left as i64 + dx)
            && in_coord_bounds(bb.right as i64 + dx)
            && in_coord_bounds(bb.top as i64 + dy)
            && in_coord_bounds(bb.bottom as i64 + dy);
        if !fits {
            log::warn!("set_pos({}, {}) rejected: region would leave the coordinate limits", x, y);
            return false;
        }
        let (dx, dy) = (dx as i32, dy as i32);
        for p in &mut self.polygons {
            p.translate(dx, dy);
        }
        self.update_bounding_box();
        self.position = Vertex::new(x, y);
        true
    }

    pub fn set_pos_x(&mut self, x: i32) -> bool { self.set_pos(x, self.position.y) }
    pub fn set_pos_y(&mut self, y: i32) -> bool { self.set_pos(self.position.x, y) }

    pub fn is_point_in_region(&self, point: Vertex) -> bool {
        if !self.valid || !self.bbox.contains(point) {
            return false;
        }
        if !self.polygons[0].is_point_in_polygon(point, true) {
            return false;
        }
        // a point on a hole's edge still belongs to the region
        self.holes().iter().all(|h| !h.is_point_in_polygon(point, false))
    }

    /// Straight segment a-b stays inside the contour and outside every hole.
    pub fn is_line_of_sight(&self, a: Vertex, b: Vertex) -> bool {
        if !self.valid {
            return false;
        }
        self.polygons[0].is_line_interior(a, b) && self.holes().iter().all(|h| h.is_line_exterior(a, b))
    }

    pub fn centroid(&self) -> Vertex {
        self.contour().map(|c| c.centroid()).unwrap_or_default()
    }

    /// Closest point to `point` that lies inside the region.
    pub fn find_closest_region_point(&self, point: Vertex) -> ClosestPoint {
        if !self.valid {
            return ClosestPoint::NearestVertex(point);
        }
        if self.is_point_in_region(point) {
            return ClosestPoint::Boundary(point);
        }
        let polygon = self
            .holes()
            .iter()
            .find(|h| h.is_point_in_polygon(point, false))
            .unwrap_or(&self.polygons[0]);

        let mut best = polygon.vertices[0];
        let mut best_d2 = i128::MAX;
        for w in polygon.vertices.windows(2) {
            let c = closest_point_on_segment(w[0], w[1], point);
            let d2 = c.sqr_distance(point);
            if d2 < best_d2 {
                best_d2 = d2;
                best = c;
            }
        }
        if self.is_point_in_region(best) {
            return ClosestPoint::Boundary(best);
        }
        for (dx, dy) in PROBE_OFFSETS {
            let probe = best.translated(dx, dy);
            if self.is_point_in_region(probe) {
                return ClosestPoint::Probed(probe);
            }
        }
        let nearest = polygon
            .vertices()
            .iter()
            .copied()
            .min_by_key(|v| v.sqr_distance(point))
            .unwrap_or(best);
        log::warn!(
            "no region point near ({}, {}), falling back to vertex ({}, {})",
            point.x, point.y, nearest.x, nearest.y
        );
        ClosestPoint::NearestVertex(nearest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i32, y: i32) -> Vertex { Vertex::new(x, y) }

    fn square_with_hole() -> Region {
        Region::new(
            &[v(0, 0), v(10, 0), v(10, 10), v(0, 10)],
            &[vec![v(3, 3), v(7, 3), v(7, 7), v(3, 7)]],
        )
        .unwrap()
    }

    #[test]
    fn init_normalizes_winding() {
        // counter-clockwise contour and hole
        let r = Region::new(
            &[v(0, 0), v(0, 10), v(10, 10), v(10, 0)],
            &[vec![v(3, 3), v(3, 7), v(7, 7), v(7, 3)]],
        )
        .unwrap();
        assert!(r.contour().unwrap().is_cw());
        assert!(r.holes()[0].is_cw());
        assert_eq!(r.bounding_box(), BoundingBox { left: 0, top: 0, right: 10, bottom: 10 });
        assert_eq!(r.position(), v(0, 0));
        assert_eq!(r.centroid(), v(5, 5));
    }

    #[test]
    fn failed_init_keeps_region() {
        let mut r = square_with_hole();
        let before = r.clone();
        let bow_tie = vec![v(3, 3), v(7, 7), v(7, 3), v(3, 7)];
        assert!(r.init(&[v(0, 0), v(10, 0), v(10, 10), v(0, 10)], &[bow_tie]).is_err());
        assert_eq!(r, before);
    }

    #[test]
    fn containment_respects_holes() {
        let r = square_with_hole();
        assert!(r.is_point_in_region(v(1, 1)));
        assert!(!r.is_point_in_region(v(5, 5)));
        assert!(r.is_point_in_region(v(3, 5)));
        assert!(r.is_point_in_region(v(7, 7)));
        assert!(r.is_point_in_region(v(10, 10)));
        assert!(!r.is_point_in_region(v(11, 5)));
    }

    #[test]
    fn line_of_sight() {
        let r = square_with_hole();
        assert!(r.is_line_of_sight(v(1, 1), v(9, 1)));
        assert!(!r.is_line_of_sight(v(1, 1), v(9, 9)));
        assert!(r.is_line_of_sight(v(0, 0), v(3, 3)));
        assert!(!r.is_line_of_sight(v(1, 1), v(12, 1)));
    }

    #[test]
    fn set_pos_translates_everything() {
        let mut r = square_with_hole();
        assert!(r.set_pos(100, 50));
        assert_eq!(r.position(), v(100, 50));
        assert_eq!(r.bounding_box(), BoundingBox { left: 100, top: 50, right: 110, bottom: 60 });
        assert!(r.is_point_in_region(v(101, 51)));
        assert!(!r.is_point_in_region(v(105, 55)));
        assert_eq!(r.centroid(), v(105, 55));
        assert!(r.set_pos_x(0));
        assert!(r.set_pos_y(0));
        assert_eq!(r, square_with_hole());
        assert!(!r.set_pos(i32::MAX, 0));
        assert_eq!(r, square_with_hole());
    }

    #[test]
    fn invalid_region_degrades() {
        let mut r = Region::default();
        assert!(!r.is_valid());
        assert!(!r.is_point_in_region(v(0, 0)));
        assert!(!r.is_line_of_sight(v(0, 0), v(1, 1)));
        assert_eq!(r.centroid(), Vertex::default());
        assert!(r.polygon(0).is_none());
        assert!(r.holes().is_empty());
        assert!(!r.set_pos(5, 5));
    }

    #[test]
    fn closest_point() {
        let r = square_with_hole();
        assert_eq!(r.find_closest_region_point(v(2, 2)), ClosestPoint::Boundary(v(2, 2)));
        assert_eq!(r.find_closest_region_point(v(15, 5)).point(), v(10, 5));
        assert_eq!(r.find_closest_region_point(v(-4, -4)).point(), v(0, 0));
        // inside the hole, nearest hole edge is the top one
        let c = r.find_closest_region_point(v(5, 4));
        assert_eq!(c.point(), v(5, 3));
        assert!(!c.is_degraded());
    }

    #[test]
    fn closest_point_from_the_ends_of_the_plane() {
        let r = square_with_hole();
        assert_eq!(r.find_closest_region_point(v(i32::MAX, i32::MIN)), ClosestPoint::Boundary(v(10, 0)));
        assert_eq!(r.find_closest_region_point(v(i32::MIN, i32::MAX)), ClosestPoint::Boundary(v(0, 10)));
        assert_eq!(r.find_closest_region_point(v(i32::MIN, 5)), ClosestPoint::Boundary(v(0, 5)));
    }

    #[test]
    fn rounded_projection_outside_uses_an_offset() {
        // sloped top edge: (2, -3) projects to (1.01, 0.30), which rounds to (1, 0) above it
        let r = Region::new(&[v(0, 0), v(10, 3), v(10, 20), v(0, 20)], &[]).unwrap();
        assert!(!r.is_point_in_region(v(1, 0)));
        let c = r.find_closest_region_point(v(2, -3));
        // (3, 0) and (-1, 0) are still outside, (1, 2) is the first one inside
        assert_eq!(c, ClosestPoint::Probed(v(1, 2)));
        assert!(!c.is_degraded());
        assert!(r.is_point_in_region(c.point()));
    }
}
