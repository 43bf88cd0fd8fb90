use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Integer 2D point. Y grows downwards, matching screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub const fn new(x: i32, y: i32) -> Vertex {
        Vertex { x, y }
    }

    pub fn translated(self, dx: i32, dy: i32) -> Vertex {
        Vertex { x: self.x + dx, y: self.y + dy }
    }

    pub fn sqr_distance(self, other: Vertex) -> i128 {
        let dx = other.x as i128 - self.x as i128;
        let dy = other.y as i128 - self.y as i128;
        dx * dx + dy * dy
    }

    /// Euclidean distance rounded to the nearest integer.
    pub fn distance(self, other: Vertex) -> u32 {
        (self.sqr_distance(other) as f64).sqrt().round() as u32
    }
}

impl Add for Vertex {
    type Output = Vertex;
    fn add(self, rhs: Vertex) -> Vertex {
        Vertex { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vertex {
    type Output = Vertex;
    fn sub(self, rhs: Vertex) -> Vertex {
        Vertex { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl From<(i32, i32)> for Vertex {
    fn from((x, y): (i32, i32)) -> Vertex {
        Vertex { x, y }
    }
}

/// Axis aligned box, inclusive on all four sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn from_vertices(vertices: &[Vertex]) -> BoundingBox {
        let Some(first) = vertices.first() else { return BoundingBox::default() };
        let mut bb = BoundingBox { left: first.x, top: first.y, right: first.x, bottom: first.y };
        for v in &vertices[1..] {
            bb.left = bb.left.min(v.x);
            bb.top = bb.top.min(v.y);
            bb.right = bb.right.max(v.x);
            bb.bottom = bb.bottom.max(v.y);
        }
        bb
    }

    pub fn contains(&self, p: Vertex) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn width(&self) -> i32 { self.right - self.left }
    pub fn height(&self) -> i32 { self.bottom - self.top }

    pub fn translated(self, dx: i32, dy: i32) -> BoundingBox {
        BoundingBox {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Vertex::new(0, 0);
        let b = Vertex::new(3, 4);
        assert_eq!(a.sqr_distance(b), 25);
        assert_eq!(a.distance(b), 5);
        // sqrt(40) = 6.32
        assert_eq!(Vertex::new(1, 1).distance(Vertex::new(7, 3)), 6);
        // sqrt(2) = 1.41, sqrt(8) = 2.83
        assert_eq!(a.distance(Vertex::new(1, 1)), 1);
        assert_eq!(a.distance(Vertex::new(2, 2)), 3);
        // opposite corners of the i32 plane
        let (lo, hi) = (Vertex::new(i32::MIN, i32::MIN), Vertex::new(i32::MAX, i32::MAX));
        assert_eq!(lo.sqr_distance(hi), 2 * (u32::MAX as i128).pow(2));
    }

    #[test]
    fn bbox_is_inclusive() {
        let bb = BoundingBox::from_vertices(&[Vertex::new(2, 3), Vertex::new(8, -1), Vertex::new(5, 9)]);
        assert_eq!(bb, BoundingBox { left: 2, top: -1, right: 8, bottom: 9 });
        assert!(bb.contains(Vertex::new(8, 9)));
        assert!(bb.contains(Vertex::new(2, -1)));
        assert!(!bb.contains(Vertex::new(9, 0)));
        assert_eq!(BoundingBox::from_vertices(&[]), BoundingBox::default());
    }
}
