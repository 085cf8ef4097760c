#![no_main]

//! Builds a tree from the input bytes (byte i picks the parent of node i + 1)
//! and checks that successor and predecessor walk the pre-order listing.

use block_tree::{Block, BlockMap};
use libfuzzer_sys::fuzz_target;

fn build(node: usize, children: &[Vec<usize>]) -> Block {
    let kids: Vec<Block> = children[node]
        .iter()
        .map(|&child| build(child, children))
        .collect();
    Block::leaf(format!("n{node}")).with_children(BlockMap::from_blocks(kids))
}

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(256)];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); data.len() + 1];
    for (idx, byte) in data.iter().enumerate() {
        children[*byte as usize % (idx + 1)].push(idx + 1);
    }
    let tree = build(0, &children);

    let keys: Vec<&str> = tree.traverse_descendant_keys(false).collect();
    assert_eq!(keys.len(), tree.num_descendants());
    for pair in keys.windows(2) {
        assert_eq!(tree.descendant_after(pair[0]).map(Block::key), Some(pair[1]));
        assert_eq!(tree.descendant_before(pair[1]).map(Block::key), Some(pair[0]));
    }
});
