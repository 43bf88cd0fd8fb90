//! Visibility graph over every polygon vertex of a region.

use crate::model::Vertex;
use crate::region::Region;

/// Marks a node pair with no straight walkable connection.
pub const NO_EDGE: u32 = u32::MAX;

/// Every vertex of the contour, then of each hole, in authoring order.
pub fn collect_nodes(region: &Region) -> Vec<Vertex> {
    region.polygons.iter().flat_map(|p| p.vertices().iter().copied()).collect()
}

/// Symmetric N x N matrix of rounded distances between mutually visible nodes.
/// Depends only on the region's shape, so it survives translation unchanged.
pub fn compute_visibility_matrix(region: &Region, nodes: &[Vertex]) -> Vec<Vec<u32>> {
    let n = nodes.len();
    let mut matrix = vec![vec![NO_EDGE; n]; n];
    let mut visible_pairs = 0usize;
    for i in 0..n {
        for j in i..n {
            if region.is_line_of_sight(nodes[i], nodes[j]) {
                let d = nodes[i].distance(nodes[j]);
                matrix[i][j] = d;
                matrix[j][i] = d;
                if i != j {
                    visible_pairs += 1;
                }
            }
        }
    }
    log::debug!("visibility matrix: {} nodes, {} visible pairs", n, visible_pairs);
    matrix
}
