// Exact segment-segment classification on the integer grid.
// Distinguishes proper crossings, endpoint touches and collinear overlaps.

use super::math::{cross_product, is_on_segment};
use crate::model::Vertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegIntersection {
    None,
    // Single shared point interior to both segments
    Proper,
    // Single shared point that is an endpoint of at least one segment
    Touch,
    // Collinear segments sharing more than one point
    CollinearOverlap,
}

// Collinear segments: compare their extents along an axis that separates the points.
fn collinear_overlap(a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> SegIntersection {
    let use_x = !(a.x == b.x && b.x == c.x && c.x == d.x);
    let key = |v: Vertex| if use_x { v.x } else { v.y };
    let (a0, a1) = (key(a).min(key(b)), key(a).max(key(b)));
    let (c0, c1) = (key(c).min(key(d)), key(c).max(key(d)));
    let lo = a0.max(c0);
    let hi = a1.min(c1);
    if lo > hi {
        SegIntersection::None
    } else if lo == hi {
        SegIntersection::Touch
    } else {
        SegIntersection::CollinearOverlap
    }
}

pub fn intersect_segments(a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> SegIntersection {
    let o1 = cross_product(a, b, c).signum();
    let o2 = cross_product(a, b, d).signum();
    let o3 = cross_product(c, d, a).signum();
    let o4 = cross_product(c, d, b).signum();

    if o1 == 0 && o2 == 0 && o3 == 0 && o4 == 0 {
        return collinear_overlap(a, b, c, d);
    }
    if o1 * o2 < 0 && o3 * o4 < 0 {
        return SegIntersection::Proper;
    }
    let touches = (o1 == 0 && is_on_segment(a, b, c))
        || (o2 == 0 && is_on_segment(a, b, d))
        || (o3 == 0 && is_on_segment(c, d, a))
        || (o4 == 0 && is_on_segment(c, d, b));
    if touches { SegIntersection::Touch } else { SegIntersection::None }
}
