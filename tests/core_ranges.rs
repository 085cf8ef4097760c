use block_tree::find_ranges;
use block_tree_naive_oracle as oracle;
use proptest::collection::vec;
use proptest::prelude::*;
mod proptest_config;

#[test]
fn test_callback_order_and_exclusive_end() {
    let items = ['a', 'a', 'b', 'c', 'c', 'c'];
    let mut seen = Vec::new();
    find_ranges(&items, |x, y| x == y, |_| true, |start, end| seen.push((start, end)));
    assert_eq!(seen, vec![(0, 2), (2, 3), (3, 6)]);
}

#[test]
fn test_custom_equality() {
    let items = [1, 3, 5, 2, 4, 7];
    let mut seen = Vec::new();
    find_ranges(
        &items,
        |x, y| x % 2 == y % 2,
        |x| x % 2 == 1,
        |start, end| seen.push((start, end)),
    );
    assert_eq!(seen, vec![(0, 3), (5, 6)]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_config::cases()))]
    #[test]
    fn differential_test_runs(items in vec(0u8..4, 0..60), keep in 0u8..4) {
        let mut found = Vec::new();
        find_ranges(&items, |a, b| a == b, |v| *v != keep, |start, end| found.push((start, end)));
        prop_assert_eq!(found, oracle::runs(&items, |v| *v != keep));
    }
}
