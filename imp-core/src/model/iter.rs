//! Lazy depth-first traversal.

use std::slice;

use super::{NodeId, NodeRef, Tree};

/// Depth-first, pre-order walk below a container.
///
/// Keeps one slice iterator per open container, so only the current path is
/// held in memory.
pub struct Descendants<'a, V, F> {
    tree: &'a Tree<V>,
    stack: Vec<slice::Iter<'a, NodeId>>,
    expand: bool,
    filter: F,
}

impl<'a, V, F> Descendants<'a, V, F>
where
    F: FnMut(&NodeRef<'a, V>) -> bool,
{
    pub(crate) fn new(tree: &'a Tree<V>, container: NodeId, expand: bool, filter: F) -> Self {
        Self {
            tree,
            stack: vec![tree.children(container).iter()],
            expand,
            filter,
        }
    }
}

impl<'a, V, F> Iterator for Descendants<'a, V, F>
where
    F: FnMut(&NodeRef<'a, V>) -> bool,
{
    type Item = NodeRef<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let Some(&id) = top.next() else {
                self.stack.pop();
                continue;
            };

            let node = self.tree.node(id);
            if self.expand && node.is_container() {
                self.stack.push(self.tree.children(id).iter());
            }
            if (self.filter)(&node) {
                return Some(node);
            }
        }
    }
}
