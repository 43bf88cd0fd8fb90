use crate::model::Vertex;

/// Cross product of (b - a) and (c - a). Positive when a -> b -> c turns
/// clockwise on screen (y down), negative for a counter-clockwise turn.
/// Exact for any i32 inputs.
#[inline]
pub fn cross_product(a: Vertex, b: Vertex, c: Vertex) -> i128 {
    let (ax, ay) = (a.x as i128, a.y as i128);
    (b.x as i128 - ax) * (c.y as i128 - ay) - (c.x as i128 - ax) * (b.y as i128 - ay)
}

/// Dot product of (b - a) and (c - a).
#[inline]
pub fn dot_product(a: Vertex, b: Vertex, c: Vertex) -> i128 {
    let (ax, ay) = (a.x as i128, a.y as i128);
    (b.x as i128 - ax) * (c.x as i128 - ax) + (b.y as i128 - ay) * (c.y as i128 - ay)
}

/// True when `p` lies on the closed segment a-b.
#[inline]
pub fn is_on_segment(a: Vertex, b: Vertex, p: Vertex) -> bool {
    cross_product(a, b, p) == 0
        && p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// True when `p` lies on segment a-b but is neither endpoint.
#[inline]
pub fn is_strictly_between(a: Vertex, b: Vertex, p: Vertex) -> bool {
    p != a && p != b && is_on_segment(a, b, p)
}

/// Proper crossing: the segments share exactly one point that is interior to both.
pub fn segments_cross_properly(a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> bool {
    let o1 = cross_product(a, b, c).signum();
    let o2 = cross_product(a, b, d).signum();
    let o3 = cross_product(c, d, a).signum();
    let o4 = cross_product(c, d, b).signum();
    o1 * o2 < 0 && o3 * o4 < 0
}

/// Closest point on segment a-b to `p`, clamped to the segment and rounded to the grid.
/// Halves round towards +inf so the result shifts exactly with its inputs.
/// Differences are taken in i64 so `p` may be anywhere in the i32 range.
pub fn closest_point_on_segment(a: Vertex, b: Vertex, p: Vertex) -> Vertex {
    let (ax, ay) = (a.x as i64, a.y as i64);
    let vx = (b.x as i64 - ax) as f64;
    let vy = (b.y as i64 - ay) as f64;
    let wx = (p.x as i64 - ax) as f64;
    let wy = (p.y as i64 - ay) as f64;
    let vv = vx * vx + vy * vy;
    let mut t = if vv > 0.0 { (wx * vx + wy * vy) / vv } else { 0.0 };
    if t < 0.0 { t = 0.0; } else if t > 1.0 { t = 1.0; }
    // the offset never exceeds b - a, so the sum stays between a and b
    Vertex {
        x: (ax + (t * vx + 0.5).floor() as i64) as i32,
        y: (ay + (t * vy + 0.5).floor() as i64) as i32,
    }
}
