use super::Block;
use std::iter::FusedIterator;

enum Frame<'a, D> {
    Enter(&'a Block<D>),
    Exit(&'a Block<D>),
}

/// Lazy pre-order iterator over a block and all of its descendants.
///
/// Created by [`Block::traverse_descendants`]. Each call starts a fresh walk.
pub struct Descendants<'a, D> {
    stack: Vec<Frame<'a, D>>,
    reverse: bool,
}

impl<'a, D> Descendants<'a, D> {
    pub(super) fn new(root: &'a Block<D>, reverse: bool) -> Self {
        Self {
            stack: vec![Frame::Enter(root)],
            reverse,
        }
    }
}

impl<'a, D> Iterator for Descendants<'a, D> {
    type Item = &'a Block<D>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Exit(block) => return Some(block),
                Frame::Enter(block) if self.reverse => {
                    // Children are pushed first-to-last so the last child pops first.
                    self.stack.push(Frame::Exit(block));
                    self.stack
                        .extend(block.children.iter().map(|child| Frame::Enter(child.as_ref())));
                }
                Frame::Enter(block) => {
                    self.stack.extend(
                        block
                            .children
                            .reversed()
                            .map(|child| Frame::Enter(child.as_ref())),
                    );
                    return Some(block);
                }
            }
        }
        None
    }
}

impl<D> FusedIterator for Descendants<'_, D> {}
