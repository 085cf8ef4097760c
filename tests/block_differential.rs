use block_tree::Block;
use block_tree_naive_oracle as oracle;
use proptest::prelude::*;
mod proptest_config;

use tree_strategy::tree_strategy;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_config::cases()))]
    #[test]
    fn differential_test_navigation(tree in tree_strategy()) {
        let keys = oracle::keys_in_order(&tree);
        let traversed: Vec<String> = tree
            .traverse_descendant_keys(false)
            .map(str::to_string)
            .collect();
        prop_assert_eq!(&traversed, &keys, "pre-order should match the naive oracle");
        prop_assert_eq!(tree.num_descendants(), oracle::count(&tree));

        for key in &keys {
            let path: Option<Vec<String>> = tree
                .path_to_descendant(key)
                .map(|path| path.into_iter().map(|b| b.key().to_string()).collect());
            prop_assert_eq!(path, oracle::path_keys(&tree, key));

            let after = tree.descendant_after(key).map(Block::key).map(str::to_string);
            prop_assert_eq!(after, oracle::successor_key(&tree, key));

            let before = tree.descendant_before(key).map(Block::key).map(str::to_string);
            prop_assert_eq!(before, oracle::predecessor_key(&tree, key));
        }

        prop_assert!(tree.path_to_descendant("missing").is_none());
        prop_assert!(oracle::path_keys(&tree, "missing").is_none());
    }
}
