//! Shortest path over the precomputed visibility graph.
//!
//! Start and end are not part of the graph. The start seeds the tentative
//! costs of every node that can see it; the end is a separate `{cost, parent}`
//! record relaxed whenever a node is settled, so the matrix never grows.

use super::visibility::NO_EDGE;
use crate::model::Vertex;
use crate::region::Region;

const INFINITE: u64 = u64::MAX;

#[derive(Clone, Copy, Debug)]
struct EndEntry {
    cost: u64,
    parent: Option<usize>,
}

/// Returns the node indices visited between `start` and `end`, in order, or
/// `None` when the end cannot be reached. Callers handle the direct
/// line-of-sight case before calling this.
pub fn search(region: &Region, nodes: &[Vertex], matrix: &[Vec<u32>], start: Vertex, end: Vertex) -> Option<Vec<usize>> {
    let n = nodes.len();
    let mut cost = vec![INFINITE; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];

    for (i, node) in nodes.iter().enumerate() {
        if region.is_line_of_sight(*node, start) {
            cost[i] = start.distance(*node) as u64;
        }
    }

    let mut end_entry = EndEntry { cost: INFINITE, parent: None };
    loop {
        let mut current: Option<usize> = None;
        for i in 0..n {
            if !settled[i] && cost[i] != INFINITE && current.map_or(true, |c| cost[i] < cost[c]) {
                current = Some(i);
            }
        }
        let Some(u) = current else { break };
        // no remaining node can offer a cheaper route to the end
        if end_entry.cost <= cost[u] {
            break;
        }
        settled[u] = true;

        if region.is_line_of_sight(nodes[u], end) {
            let through = cost[u] + nodes[u].distance(end) as u64;
            if through < end_entry.cost {
                end_entry = EndEntry { cost: through, parent: Some(u) };
            }
        }

        for (v, &w) in matrix[u].iter().enumerate() {
            if settled[v] || w == NO_EDGE {
                continue;
            }
            let through = cost[u] + w as u64;
            if through < cost[v] {
                cost[v] = through;
                parent[v] = Some(u);
            }
        }
    }

    let last = end_entry.parent?;
    log::trace!("path found: cost {}, {} settled nodes", end_entry.cost, settled.iter().filter(|s| **s).count());
    let mut route = vec![last];
    let mut at = last;
    while let Some(p) = parent[at] {
        route.push(p);
        at = p;
    }
    route.reverse();
    Some(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::visibility::{collect_nodes, compute_visibility_matrix};

    fn v(x: i32, y: i32) -> Vertex { Vertex::new(x, y) }

    #[test]
    fn routes_around_hole_corner() {
        let r = Region::new(
            &[v(0, 0), v(10, 0), v(10, 10), v(0, 10)],
            &[vec![v(3, 3), v(7, 3), v(7, 7), v(3, 7)]],
        )
        .unwrap();
        let nodes = collect_nodes(&r);
        let m = compute_visibility_matrix(&r, &nodes);
        let route = search(&r, &nodes, &m, v(1, 1), v(9, 9)).unwrap();
        assert_eq!(route.len(), 1);
        let corner = nodes[route[0]];
        assert!(corner == v(7, 3) || corner == v(3, 7), "unexpected corner {:?}", corner);
    }

    #[test]
    fn end_outside_every_view_is_unreachable() {
        let r = Region::new(&[v(0, 0), v(10, 0), v(10, 10), v(0, 10)], &[]).unwrap();
        let nodes = collect_nodes(&r);
        let m = compute_visibility_matrix(&r, &nodes);
        assert!(search(&r, &nodes, &m, v(1, 1), v(50, 50)).is_none());
    }
}
