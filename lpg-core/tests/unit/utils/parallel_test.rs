use super::*;

#[test]
fn can_collect_in_source_order() {
    let pool = ThreadPool::new(2);

    let result = pool.execute(|| parallel_collect(&[1, 2, 3, 4], |value| value * 10));

    assert_eq!(result, vec![10, 20, 30, 40]);
}

#[test]
fn can_into_collect_owned_values() {
    let pool = ThreadPool::new(0);

    let result = pool.execute(|| parallel_into_collect(vec!["a".to_string(), "bc".to_string()], |value| value.len()));

    assert_eq!(result, vec![1, 2]);
}
