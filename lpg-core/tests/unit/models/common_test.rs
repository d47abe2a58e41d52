use super::*;

parameterized_test! {can_calculate_manhattan_distance, (from, to, expected), {
    assert_eq!(Location::from(from).manhattan(&Location::from(to)), expected);
}}

can_calculate_manhattan_distance! {
    case_01_same: ((3, 3), (3, 3), 0),
    case_02_horizontal: ((0, 0), (5, 0), 5),
    case_03_mixed: ((2, 7), (5, 3), 7),
}

#[test]
fn can_detect_adjacent_locations() {
    let location = Location::new(2, 2);

    assert!(location.is_adjacent(&Location::new(2, 3)));
    assert!(location.is_adjacent(&Location::new(1, 2)));
    assert!(!location.is_adjacent(&Location::new(3, 3)));
    assert!(!location.is_adjacent(&location));
}

#[test]
fn can_use_half_open_time_window() {
    let window = TimeWindow::new(10., 20.);

    assert!(window.contains(10.));
    assert!(window.contains(19.9));
    assert!(!window.contains(20.));
    assert!(!window.contains(9.9));
    assert_eq!(window.duration(), 10.);
}

parameterized_test! {can_detect_window_intersection, (start, end, expected), {
    assert_eq!(TimeWindow::new(10., 20.).intersects(start, end), expected);
}}

can_detect_window_intersection! {
    case_01_before: (0., 5., false),
    case_02_touch_start: (0., 10., true),
    case_03_inside: (12., 15., true),
    case_04_touch_end: (20., 30., false),
    case_05_cover: (0., 30., true),
}

#[test]
fn can_format_location() {
    assert_eq!(Location::new(4, 9).to_string(), "(4,9)");
}
