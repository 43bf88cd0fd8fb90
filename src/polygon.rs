//! Simple polygons on the integer grid.
//!
//! The vertex list is stored closed: the last entry repeats the first so edge
//! `i` always runs from `vertices[i]` to `vertices[i + 1]`. Winding follows
//! screen coordinates (y grows downwards).

use crate::error::{Error, Result};
use crate::geometry::intersect::{intersect_segments, SegIntersection};
use crate::geometry::limits::{in_coord_bounds, MAX_POLYGON_VERTICES};
use crate::geometry::math::{cross_product, dot_product, is_on_segment, is_strictly_between, segments_cross_properly};
use crate::model::{BoundingBox, Vertex};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polygon {
    pub(crate) vertices: Vec<Vertex>, // closed, len == vertex_count + 1
    pub(crate) is_cw: bool,
    pub(crate) is_convex: bool,
    pub(crate) centroid: Vertex,
}

impl Polygon {
    pub fn new(vertices: &[Vertex]) -> Result<Polygon> {
        let mut p = Polygon::default();
        p.init(vertices)?;
        Ok(p)
    }

    /// Replaces the polygon with `vertices`. On error the previous state is kept.
    pub fn init(&mut self, vertices: &[Vertex]) -> Result<()> {
        if vertices.len() < 3 {
            return Err(Error::TooFewVertices { count: vertices.len() });
        }
        if vertices.len() > MAX_POLYGON_VERTICES {
            return Err(Error::TooManyVertices { what: "polygon vertex", count: vertices.len(), max: MAX_POLYGON_VERTICES });
        }
        for (index, v) in vertices.iter().enumerate() {
            if !in_coord_bounds(v.x as i64) || !in_coord_bounds(v.y as i64) {
                return Err(Error::CoordinateOutOfRange { index, x: v.x as i64, y: v.y as i64 });
            }
        }
        let mut closed = Vec::with_capacity(vertices.len() + 1);
        closed.extend_from_slice(vertices);
        closed.push(vertices[0]);
        check_self_intersection(&closed)?;

        self.vertices = closed;
        self.is_cw = self.compute_is_cw();
        self.is_convex = self.compute_is_convex();
        self.centroid = self.compute_centroid();
        Ok(())
    }

    pub fn vertex_count(&self) -> usize { self.vertices.len().saturating_sub(1) }

    /// Vertices without the closing duplicate.
    pub fn vertices(&self) -> &[Vertex] {
        let n = self.vertex_count();
        &self.vertices[..n]
    }

    pub fn vertex(&self, i: usize) -> Option<Vertex> {
        if i < self.vertex_count() { Some(self.vertices[i]) } else { None }
    }

    pub fn is_cw(&self) -> bool { self.is_cw }
    pub fn is_ccw(&self) -> bool { !self.is_cw }
    pub fn is_convex(&self) -> bool { self.is_convex }
    pub fn centroid(&self) -> Vertex { self.centroid }

    pub fn bounding_box(&self) -> BoundingBox { BoundingBox::from_vertices(self.vertices()) }

    pub fn ensure_cw_order(&mut self) {
        if !self.is_cw {
            self.reverse_vertex_order();
        }
    }

    pub fn ensure_ccw_order(&mut self) {
        if self.is_cw {
            self.reverse_vertex_order();
        }
    }

    pub fn reverse_vertex_order(&mut self) {
        // reversing a closed list keeps it closed
        self.vertices.reverse();
        self.is_cw = self.compute_is_cw();
    }

    /// Moves every vertex. The centroid is recomputed rather than shifted so it
    /// always matches what a freshly built polygon would report.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for v in &mut self.vertices {
            *v = v.translated(dx, dy);
        }
        self.centroid = self.compute_centroid();
    }

    // Lowest-rightmost vertex: largest y, ties broken by largest x. It is always convex.
    fn find_lr_vertex_index(&self) -> usize {
        let mut best = 0;
        for (i, v) in self.vertices().iter().enumerate().skip(1) {
            let b = self.vertices[best];
            if v.y > b.y || (v.y == b.y && v.x > b.x) {
                best = i;
            }
        }
        best
    }

    fn compute_is_cw(&self) -> bool {
        let n = self.vertex_count();
        if n < 3 {
            return false;
        }
        let i = self.find_lr_vertex_index();
        let prev = self.vertices[(i + n - 1) % n];
        let next = self.vertices[(i + 1) % n];
        cross_product(prev, self.vertices[i], next) >= 0
    }

    fn compute_is_convex(&self) -> bool {
        let n = self.vertex_count();
        if n <= 3 {
            return true;
        }
        let mut flags = 0u8;
        for i in 0..n {
            let z = cross_product(self.vertices[i], self.vertices[(i + 1) % n], self.vertices[(i + 2) % n]);
            if z < 0 { flags |= 1; } else if z > 0 { flags |= 2; }
            if flags == 3 {
                return false;
            }
        }
        true
    }

    // Signed-area weighted vertex formula, truncating integer division.
    fn compute_centroid(&self) -> Vertex {
        let n = self.vertex_count();
        let mut area2: i128 = 0;
        let mut cx: i128 = 0;
        let mut cy: i128 = 0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[i + 1];
            let cross = a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128;
            area2 += cross;
            cx += (a.x as i128 + b.x as i128) * cross;
            cy += (a.y as i128 + b.y as i128) * cross;
        }
        if area2 == 0 {
            // zero area cannot pass the self-intersection check, keep a sane value anyway
            let (sx, sy) = self.vertices().iter().fold((0i64, 0i64), |(sx, sy), v| (sx + v.x as i64, sy + v.y as i64));
            let n = n.max(1) as i64;
            return Vertex::new((sx / n) as i32, (sy / n) as i32);
        }
        Vertex::new((cx / (3 * area2)) as i32, (cy / (3 * area2)) as i32)
    }

    // +1 when the polygon is clockwise so that `side > 0` always means "towards the interior".
    fn orientation(&self) -> i64 { if self.is_cw { 1 } else { -1 } }

    fn side(&self, a: Vertex, b: Vertex, p: Vertex) -> i64 {
        cross_product(a, b, p).signum() as i64 * self.orientation()
    }

    /// Crossing-number test with separate left and right crossing counts. Points
    /// on a vertex or an edge return `edges_belong`.
    pub fn is_point_in_polygon(&self, point: Vertex, edges_belong: bool) -> bool {
        let n = self.vertex_count();
        if n < 3 {
            return false;
        }
        let mut rcross = 0u32;
        let mut lcross = 0u32;
        for i in 0..n {
            let vi = self.vertices[i];
            if vi == point {
                return edges_belong;
            }
            let vp = self.vertices[(i + n - 1) % n];
            let (xi, yi) = (vi.x as i128 - point.x as i128, vi.y as i128 - point.y as i128);
            let (xp, yp) = (vp.x as i128 - point.x as i128, vp.y as i128 - point.y as i128);
            let rstrad = (yi > 0) != (yp > 0);
            let lstrad = (yi < 0) != (yp < 0);
            if rstrad || lstrad {
                // sign of the ray intersection x = num / den, exact
                let num = xi * yp - xp * yi;
                let den = yp - yi;
                let sign = num.signum() * den.signum();
                if rstrad && sign > 0 { rcross += 1; }
                if lstrad && sign < 0 { lcross += 1; }
            }
        }
        if rcross % 2 != lcross % 2 {
            return edges_belong;
        }
        rcross % 2 == 1
    }

    // Whether the direction from vertex `i` towards `target` points into the
    // polygon's interior cone at that vertex.
    fn is_line_in_cone(&self, i: usize, target: Vertex, include_edges: bool) -> bool {
        let n = self.vertex_count();
        let v = self.vertices[i];
        let next = self.vertices[(i + 1) % n];
        let prev = self.vertices[(i + n - 1) % n];
        let s_next = self.side(v, next, target);
        let s_prev = self.side(prev, v, target);
        let convex = self.side(prev, v, next) >= 0;
        match (convex, include_edges) {
            (true, true) => s_next >= 0 && s_prev >= 0,
            (true, false) => s_next > 0 && s_prev > 0,
            (false, true) => s_next >= 0 || s_prev >= 0,
            (false, false) => s_next > 0 || s_prev > 0,
        }
    }

    /// True when the whole segment a-b lies inside the polygon or on its boundary.
    pub fn is_line_interior(&self, a: Vertex, b: Vertex) -> bool {
        if !self.is_point_in_polygon(a, true) || !self.is_point_in_polygon(b, true) {
            return false;
        }
        if a == b {
            return true;
        }
        let n = self.vertex_count();
        for i in 0..n {
            let vs = self.vertices[i];
            let ve = self.vertices[i + 1];
            if segments_cross_properly(a, b, vs, ve) {
                return false;
            }
            // an endpoint inside an edge: the other one may not be outside that edge
            if is_strictly_between(vs, ve, a) && self.side(vs, ve, b) < 0 {
                return false;
            }
            if is_strictly_between(vs, ve, b) && self.side(vs, ve, a) < 0 {
                return false;
            }
            if a == vs && !self.is_line_in_cone(i, b, true) {
                return false;
            }
            if b == vs && !self.is_line_in_cone(i, a, true) {
                return false;
            }
            // passing through a vertex: both halves must stay inside
            if is_strictly_between(a, b, vs) && (!self.is_line_in_cone(i, a, true) || !self.is_line_in_cone(i, b, true)) {
                return false;
            }
        }
        true
    }

    /// True when the segment a-b never enters the polygon's interior. Touching
    /// the boundary is allowed.
    pub fn is_line_exterior(&self, a: Vertex, b: Vertex) -> bool {
        if self.is_point_in_polygon(a, false) || self.is_point_in_polygon(b, false) {
            return false;
        }
        if a == b {
            return true;
        }
        let n = self.vertex_count();
        for i in 0..n {
            let vs = self.vertices[i];
            let ve = self.vertices[i + 1];
            if segments_cross_properly(a, b, vs, ve) {
                return false;
            }
            if is_strictly_between(vs, ve, a) && self.side(vs, ve, b) > 0 {
                return false;
            }
            if is_strictly_between(vs, ve, b) && self.side(vs, ve, a) > 0 {
                return false;
            }
            if a == vs && self.is_line_in_cone(i, b, false) {
                return false;
            }
            if b == vs && self.is_line_in_cone(i, a, false) {
                return false;
            }
            if is_on_segment(a, b, vs) && (self.is_line_in_cone(i, a, false) || self.is_line_in_cone(i, b, false)) {
                return false;
            }
        }
        true
    }
}

// O(n^2) simplicity check over the closed vertex list.
fn check_self_intersection(closed: &[Vertex]) -> Result<()> {
    let n = closed.len() - 1;
    for i in 0..n {
        if closed[i] == closed[i + 1] {
            return Err(Error::DegenerateEdge { index: i });
        }
    }
    for i in 0..n {
        let (a, b) = (closed[i], closed[i + 1]);
        for j in (i + 1)..n {
            let (c, d) = (closed[j], closed[j + 1]);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                // shared vertex is b == c (j == i + 1) or a == d (wrap-around)
                let (shared, p, q) = if j == i + 1 { (b, a, d) } else { (a, b, c) };
                let folds_back = cross_product(shared, p, q) == 0 && dot_product(shared, p, q) > 0;
                if folds_back {
                    return Err(Error::SelfIntersecting { first: i, second: j });
                }
                // in a triangle both neighbours are adjacent, nothing else to test
                continue;
            }
            if intersect_segments(a, b, c, d) != SegIntersection::None {
                return Err(Error::SelfIntersecting { first: i, second: j });
            }
        }
    }
    Ok(())
}
