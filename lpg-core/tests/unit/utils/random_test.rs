use super::*;

#[test]
fn can_reproduce_sequence_with_same_seed() {
    let first = DefaultRandom::new_with_seed(7);
    let second = DefaultRandom::new_with_seed(7);

    let first = (0..10).map(|_| first.uniform_int(0, 100)).collect::<Vec<_>>();
    let second = (0..10).map(|_| second.uniform_int(0, 100)).collect::<Vec<_>>();

    assert_eq!(first, second);
}

#[test]
fn can_return_bounds_for_degenerate_ranges() {
    let random = DefaultRandom::new_with_seed(0);

    assert_eq!(random.uniform_int(3, 3), 3);
    assert_eq!(random.uniform_real(1.5, 1.5), 1.5);
}

#[test]
fn can_keep_uniform_real_in_range() {
    let random = DefaultRandom::new_with_seed(1);

    assert!((0..1000).map(|_| random.uniform_real(0.8, 1.2)).all(|value| (0.8..1.2).contains(&value)));
}

parameterized_test! {can_pick_only_positive_weights, (weights, allowed), {
    can_pick_only_positive_weights_impl(weights, allowed);
}}

can_pick_only_positive_weights! {
    case_01_single: (vec![0., 1., 0.], vec![1]),
    case_02_two: (vec![2., 0., 3.], vec![0, 2]),
    case_03_all_zero: (vec![0., 0.], vec![0, 1]),
}

fn can_pick_only_positive_weights_impl(weights: Vec<f64>, allowed: Vec<usize>) {
    let random = DefaultRandom::new_with_seed(11);

    (0..200).for_each(|_| {
        let index = random.weighted(weights.as_slice());
        assert!(allowed.contains(&index), "unexpected index {index}");
    });
}

#[test]
fn can_prefer_heavier_weight() {
    let random = DefaultRandom::new_with_seed(3);

    let heavy = (0..2000).filter(|_| random.weighted(&[1., 9.]) == 1).count();

    assert!(heavy > 1600, "heavy was chosen {heavy} times");
}

#[test]
fn can_derive_different_seeds_for_streams() {
    let seeds = (0..3).flat_map(|stream| (0..3).map(move |index| derive_seed(42, stream, index))).collect::<Vec<_>>();
    let mut unique = seeds.clone();
    unique.sort_unstable();
    unique.dedup();

    assert_eq!(unique.len(), seeds.len());
    assert_eq!(derive_seed(42, 1, 2), derive_seed(42, 1, 2));
}
