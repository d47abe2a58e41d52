use super::*;

fn location(x: i32, y: i32) -> Location {
    Location::new(x, y)
}

#[test]
fn can_be_active_only_inside_window() {
    let blockage = Blockage::new(60., 120., vec![location(1, 1), location(1, 3)]);

    assert!(!blockage.is_active(59.));
    assert!(blockage.is_active(60.));
    assert!(!blockage.is_active(120.));
}

#[test]
fn can_cover_nodes_on_polyline() {
    let blockage = Blockage::new(0., 10., vec![location(1, 1), location(1, 3), location(4, 3)]);

    assert!(blockage.covers_node(&location(1, 2)));
    assert!(blockage.covers_node(&location(3, 3)));
    assert!(!blockage.covers_node(&location(2, 2)));
}

parameterized_test! {can_detect_edge_coverage, (from, to, expected), {
    let blockage = Blockage::new(0., 10., vec![location(2, 0), location(2, 4)]);

    assert_eq!(blockage.covers_edge(&Location::from(from), &Location::from(to)), expected);
}}

can_detect_edge_coverage! {
    case_01_perpendicular_cross: ((1, 2), (2, 2), true),
    case_02_collinear: ((2, 1), (2, 2), true),
    case_03_parallel: ((3, 1), (3, 2), false),
    case_04_beyond_end: ((2, 5), (2, 6), false),
    case_05_touch_end: ((2, 4), (3, 4), true),
}

#[test]
fn can_handle_single_point_blockage() {
    let blockage = Blockage::new(0., 10., vec![location(5, 5)]);

    assert_eq!(blockage.segments().count(), 1);
    assert!(blockage.covers_node(&location(5, 5)));
    assert!(blockage.covers_edge(&location(5, 5), &location(5, 6)));
    assert!(!blockage.covers_edge(&location(4, 4), &location(4, 5)));
    assert_eq!(blockage.covered_locations(), vec![location(5, 5)]);
}

#[test]
fn can_list_covered_locations_without_duplicates() {
    let blockage = Blockage::new(0., 10., vec![location(0, 0), location(2, 0), location(2, 1)]);

    assert_eq!(blockage.covered_locations(), vec![location(0, 0), location(1, 0), location(2, 0), location(2, 1)]);
}

#[test]
fn can_ignore_diagonal_segments() {
    let segment = Segment::new(location(0, 0), location(2, 2));

    assert_eq!(segment.orientation(), None);
    assert!(!segment.contains(&location(1, 1)));
    assert!(!segment.intersects(&Segment::new(location(1, 0), location(1, 2))));
}
