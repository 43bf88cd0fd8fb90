use walkmesh::geometry::limits::{COORD_LIMIT, MAX_HOLES, MAX_NODES, MAX_POLYGON_VERTICES};
use walkmesh::{ClosestPoint, Error, Polygon, Region, Vertex, WalkRegion};

fn v(x: i32, y: i32) -> Vertex { Vertex::new(x, y) }

fn square(size: i32) -> Vec<Vertex> { vec![v(0, 0), v(size, 0), v(size, size), v(0, size)] }

#[test]
fn oversized_inputs_are_rejected_before_building() {
    let many = vec![v(0, 0); MAX_POLYGON_VERTICES + 1];
    assert!(matches!(Polygon::new(&many), Err(Error::TooManyVertices { .. })));

    let holes = vec![square(1); MAX_HOLES + 1];
    assert!(matches!(Region::new(&square(10), &holes), Err(Error::TooManyVertices { what: "hole", .. })));

    let half = vec![v(0, 0); MAX_NODES / 2 + 1];
    let err = WalkRegion::new(&half, &[half.clone()]).unwrap_err();
    assert!(matches!(err, Error::TooManyVertices { count, max, .. } if count == MAX_NODES + 2 && max == MAX_NODES));
}

#[test]
fn coordinates_outside_the_limits() {
    let far = COORD_LIMIT as i32;
    let err = Polygon::new(&[v(0, 0), v(far, 0), v(0, 10)]).unwrap_err();
    assert!(matches!(err, Error::CoordinateOutOfRange { index: 1, .. }));
    assert!(Polygon::new(&[v(0, 0), v(far - 1, 0), v(0, 10)]).is_ok());

    let mut r = Region::new(&square(10), &[]).unwrap();
    assert!(!r.set_pos(far - 5, 0));
    assert_eq!(r.position(), v(0, 0));
    assert!(r.set_pos(far - 11, 0));
    assert!(!r.set_pos_y(-far));
}

#[test]
fn zero_area_and_repeated_vertices() {
    assert!(matches!(Polygon::new(&[v(0, 0), v(5, 5), v(10, 10)]), Err(Error::SelfIntersecting { .. })));
    assert!(matches!(Polygon::new(&[v(0, 0), v(10, 0), v(10, 0), v(0, 10)]), Err(Error::DegenerateEdge { index: 1 })));
    // closing edge of zero length
    assert!(matches!(Polygon::new(&[v(0, 0), v(10, 0), v(0, 10), v(0, 0)]), Err(Error::DegenerateEdge { index: 3 })));
    assert!(matches!(Region::new(&[], &[]), Err(Error::TooFewVertices { count: 0 })));
}

#[test]
fn collinear_contour_vertex_is_a_graph_node() {
    let w = WalkRegion::new(&[v(0, 0), v(5, 0), v(10, 0), v(10, 10), v(0, 10)], &[]).unwrap();
    assert_eq!(w.nodes().len(), 5);
    // walking along the top edge passes straight through (5, 0)
    assert_eq!(w.query_path(v(0, 0), v(10, 0)).unwrap(), vec![v(0, 0), v(10, 0)]);
    assert!(w.edge_weight(0, 2).is_some());
    assert_eq!(w.edge_weight(0, 1), Some(5));
}

#[test]
fn queries_from_corners_and_holes() {
    let w = WalkRegion::new(&square(10), &[vec![v(3, 3), v(7, 3), v(7, 7), v(3, 7)]]).unwrap();
    let path = w.query_path(v(0, 0), v(10, 10)).unwrap();
    assert_eq!(path.len(), 3);
    assert!(path[1] == v(7, 3) || path[1] == v(3, 7));

    // start in the middle of the hole: all hole edges tie, the first one wins
    let path = w.query_path(v(5, 5), v(5, 1)).unwrap();
    assert_eq!(path, vec![v(5, 3), v(5, 1)]);
}

#[test]
fn closest_point_on_an_invalid_region() {
    let r = Region::default();
    let c = r.find_closest_region_point(v(4, 4));
    assert_eq!(c, ClosestPoint::NearestVertex(v(4, 4)));
    assert!(c.is_degraded());
}

#[test]
fn thin_sliver_falls_back_to_a_vertex() {
    // long thin triangle: the projection and every offset around it miss the interior
    let r = Region::new(&[v(0, 0), v(100, 1), v(100, 3)], &[]).unwrap();
    let c = r.find_closest_region_point(v(50, -20));
    assert_eq!(c, ClosestPoint::NearestVertex(v(0, 0)));
    assert!(r.is_point_in_region(c.point()));
}
