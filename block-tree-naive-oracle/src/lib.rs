//! A naive, simple oracle implementation for differential testing.
//!
//! Everything here works on a fully materialized pre-order listing of the
//! tree, so it is slow but easy to check by eye.
use block_tree::Block;

/// One node of the flattened tree together with its depth below the root.
#[derive(Debug)]
pub struct Visit<'a, D> {
    pub block: &'a Block<D>,
    pub depth: usize,
}

/// Pre-order listing of `root` and all of its descendants.
pub fn pre_order<D>(root: &Block<D>) -> Vec<Visit<'_, D>> {
    let mut out = Vec::new();
    walk(root, 0, &mut out);
    out
}

fn walk<'a, D>(block: &'a Block<D>, depth: usize, out: &mut Vec<Visit<'a, D>>) {
    out.push(Visit { block, depth });
    for child in block.children().iter() {
        walk(child.as_ref(), depth + 1, out);
    }
}

pub fn keys_in_order<D>(root: &Block<D>) -> Vec<String> {
    pre_order(root)
        .into_iter()
        .map(|visit| visit.block.key().to_string())
        .collect()
}

fn index_of<D>(order: &[Visit<'_, D>], key: &str) -> Option<usize> {
    order.iter().position(|visit| visit.block.key() == key)
}

/// Root-to-target keys, found by scanning the listing backwards for each
/// shallower ancestor. Assumes keys are unique across the whole tree.
pub fn path_keys<D>(root: &Block<D>, key: &str) -> Option<Vec<String>> {
    let order = pre_order(root);
    let target = index_of(&order, key)?;

    let mut path = vec![order[target].block.key().to_string()];
    let mut depth = order[target].depth;
    for visit in order[..target].iter().rev() {
        if visit.depth + 1 == depth {
            path.push(visit.block.key().to_string());
            depth = visit.depth;
        }
    }
    path.reverse();
    Some(path)
}

pub fn successor_key<D>(root: &Block<D>, key: &str) -> Option<String> {
    let order = pre_order(root);
    let target = index_of(&order, key)?;
    order
        .get(target + 1)
        .map(|visit| visit.block.key().to_string())
}

pub fn predecessor_key<D>(root: &Block<D>, key: &str) -> Option<String> {
    let order = pre_order(root);
    let target = index_of(&order, key)?;
    target
        .checked_sub(1)
        .map(|prev| order[prev].block.key().to_string())
}

pub fn count<D>(root: &Block<D>) -> usize {
    pre_order(root).len()
}

/// Runs of equal neighbours as `(start, end)` pairs, filter applied to each
/// run's last item.
pub fn runs<T: PartialEq>(items: &[T], filter: impl Fn(&T) -> bool) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0;
    while start < items.len() {
        let mut end = start + 1;
        while end < items.len() && items[end] == items[end - 1] {
            end += 1;
        }
        if filter(&items[end - 1]) {
            out.push((start, end));
        }
        start = end;
    }
    out
}
