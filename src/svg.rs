use crate::model::Vertex;
use crate::polygon::Polygon;
use crate::walk_region::WalkRegion;

fn polygon_path(p: &Polygon) -> String {
    let mut d = String::new();
    for (i, v) in p.vertices().iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{} {} {}", if i == 0 { "" } else { " " }, cmd, v.x, v.y));
    }
    d.push_str(" Z");
    d
}

/// Open polyline through the path's waypoints; empty for fewer than two points.
pub fn path_to_svg(path: &[Vertex]) -> String {
    if path.len() < 2 {
        return String::new();
    }
    let mut d = format!("M {} {}", path[0].x, path[0].y);
    for v in &path[1..] {
        d.push_str(&format!(" L {} {}", v.x, v.y));
    }
    d
}

impl WalkRegion {
    /// Debug paths: contour, holes, then one segment per visibility edge.
    pub fn to_svg_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.region.polygons.iter().map(polygon_path).collect();
        for (i, row) in self.visibility.iter().enumerate() {
            for j in (i + 1)..row.len() {
                if self.edge_weight(i, j).is_some() {
                    let (a, b) = (self.nodes[i], self.nodes[j]);
                    paths.push(format!("M {} {} L {} {}", a.x, a.y, b.x, b.y));
                }
            }
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_paths() {
        let w = WalkRegion::new(&[Vertex::new(0, 0), Vertex::new(10, 0), Vertex::new(5, 10)], &[]).unwrap();
        let paths = w.to_svg_paths();
        assert_eq!(paths[0], "M 0 0 L 10 0 L 5 10 Z");
        // one outline plus three visibility edges
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[1], "M 0 0 L 10 0");
        assert_eq!(path_to_svg(&[Vertex::new(1, 2), Vertex::new(3, 4)]), "M 1 2 L 3 4");
        assert_eq!(path_to_svg(&[Vertex::new(1, 2)]), "");
    }
}
