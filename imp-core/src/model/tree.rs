//! Arena-backed component tree.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::Descendants;
use crate::{Error, Result};

/// Handle to a node stored in a [`Tree`].
///
/// Ids are only meaningful for the tree that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Shape {
    /// A component without children.
    Leaf,
    /// An ordered list of children.
    Container,
    /// A container that also owns a name scope.
    Named,
    /// A transparent container: named insertions go to the enclosing scope.
    Group,
}

impl Shape {
    /// Returns true if nodes of this shape can hold children.
    pub fn is_container(&self) -> bool {
        !matches!(self, Self::Leaf)
    }
}

#[derive(Debug, Clone)]
struct Node<V> {
    value: V,
    shape: Shape,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    names: IndexMap<String, NodeId>,
}

/// Owns every component of a model.
///
/// Nodes are created standalone and then attached to exactly one container.
/// Parents are stored as ids into the same arena, so the ownership structure
/// stays a strict tree: the arena owns all nodes, and dropping the tree drops
/// the whole model.
///
/// # Example
///
/// ```
/// use imp_core::model::Tree;
///
/// let mut tree = Tree::new();
/// let module = tree.named_container("module");
/// let group = tree.group("group");
/// tree.attach(module, group)?;
///
/// // Groups register names in the enclosing named container.
/// let param = tree.leaf("param");
/// tree.attach_named(group, "p1", param)?;
/// assert_eq!(tree.lookup(module, "p1"), Some(param));
/// # Ok::<(), imp_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tree<V> {
    nodes: Vec<Node<V>>,
}

impl<V> Tree<V> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a standalone leaf component.
    pub fn leaf(&mut self, value: V) -> NodeId {
        self.insert(value, Shape::Leaf)
    }

    /// Create a standalone ordered container.
    pub fn container(&mut self, value: V) -> NodeId {
        self.insert(value, Shape::Container)
    }

    /// Create a standalone container with its own name scope.
    pub fn named_container(&mut self, value: V) -> NodeId {
        self.insert(value, Shape::Named)
    }

    /// Create a standalone transparent group.
    pub fn group(&mut self, value: V) -> NodeId {
        self.insert(value, Shape::Group)
    }

    fn insert(&mut self, value: V, shape: Shape) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            value,
            shape,
            parent: None,
            children: Vec::new(),
            names: IndexMap::new(),
        });
        id
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Append `child` to `container`, setting its parent.
    ///
    /// # Errors
    ///
    /// Fails without modifying the tree if `container` is a leaf, if `child`
    /// already has a parent, or if `child` encloses `container`.
    pub fn attach(&mut self, container: NodeId, child: NodeId) -> Result<NodeId> {
        self.check_attach(container, child)?;
        self.link(container, child);
        Ok(child)
    }

    /// Append `child` to `container` and bind `name` to it in the nearest
    /// naming scope (see [`Tree::scope_of`]).
    ///
    /// # Errors
    ///
    /// Everything [`Tree::attach`] rejects, plus [`Error::DuplicateName`] if
    /// the scope already binds `name` and [`Error::NoNamingScope`] if there is
    /// no scope. On failure neither the children nor the names change.
    pub fn attach_named(
        &mut self,
        container: NodeId,
        name: impl Into<String>,
        child: NodeId,
    ) -> Result<NodeId> {
        let name = name.into();
        self.check_attach(container, child)?;
        let scope = self.scope_of(container)?;
        self.check_unbound(scope, &name)?;

        self.link(container, child);
        self.nodes[scope.0].names.insert(name, child);
        Ok(child)
    }

    /// Bind an additional `name` to `node` in the scope of `container`
    /// without changing any parent/child relation.
    ///
    /// Used for declarations that introduce several names at once.
    pub fn bind(&mut self, container: NodeId, name: impl Into<String>, node: NodeId) -> Result<()> {
        let name = name.into();
        let scope = self.scope_of(container)?;
        self.check_unbound(scope, &name)?;
        self.nodes[scope.0].names.insert(name, node);
        Ok(())
    }

    /// Find the naming scope for insertions into `container`.
    ///
    /// Named containers are their own scope. Groups delegate to their parent,
    /// so a chain of groups resolves to the first named container above it.
    /// Plain containers and detached groups have no scope.
    pub fn scope_of(&self, container: NodeId) -> Result<NodeId> {
        let mut current = container;
        loop {
            let node = &self.nodes[current.0];
            match (node.shape, node.parent) {
                (Shape::Named, _) => return Ok(current),
                (Shape::Group, Some(parent)) => current = parent,
                _ => return Err(Error::NoNamingScope { node: container }),
            }
        }
    }

    fn check_attach(&self, container: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes[container.0].shape.is_container() {
            return Err(Error::NotAContainer { node: container });
        }
        if let Some(parent) = self.nodes[child.0].parent {
            return Err(Error::AlreadyAttached {
                node: child,
                parent,
            });
        }
        if self.ancestors(container).any(|ancestor| ancestor == child) {
            return Err(Error::CyclicAttachment {
                node: child,
                container,
            });
        }
        Ok(())
    }

    fn check_unbound(&self, scope: NodeId, name: &str) -> Result<()> {
        if self.nodes[scope.0].names.contains_key(name) {
            return Err(Error::DuplicateName {
                name: name.to_string(),
                scope,
            });
        }
        Ok(())
    }

    fn link(&mut self, container: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(container);
        self.nodes[container.0].children.push(child);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_, V> {
        assert!(id.0 < self.nodes.len(), "{} is not part of this tree", id);
        NodeRef { tree: self, id }
    }

    /// Borrow a node if `id` belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, V>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    pub fn value(&self, id: NodeId) -> &V {
        &self.nodes[id.0].value
    }

    pub fn shape(&self, id: NodeId) -> Shape {
        self.nodes[id.0].shape
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Strict ancestors of `id`, nearest first, plus `id` itself at the front.
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |current| self.nodes[current.0].parent)
    }

    /// Look `name` up in the scope that insertions into `container` use.
    pub fn lookup(&self, container: NodeId, name: &str) -> Option<NodeId> {
        let scope = self.scope_of(container).ok()?;
        self.nodes[scope.0].names.get(name).copied()
    }

    /// Look `name` up in the scope of `container`, then in each enclosing scope.
    pub fn resolve(&self, container: NodeId, name: &str) -> Option<NodeId> {
        let mut scope = self.scope_of(container).ok()?;
        loop {
            if let Some(found) = self.nodes[scope.0].names.get(name) {
                return Some(*found);
            }
            scope = self.scope_of(self.nodes[scope.0].parent?).ok()?;
        }
    }

    /// Names bound in `id`'s own scope, in binding order.
    pub fn names(&self, id: NodeId) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.nodes[id.0]
            .names
            .iter()
            .map(|(name, node)| (name.as_str(), *node))
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Depth-first descendants of `container`.
    ///
    /// With `expand` false only direct children are produced.
    pub fn iter(&self, container: NodeId, expand: bool) -> impl Iterator<Item = NodeRef<'_, V>> {
        self.iter_filtered(container, expand, |_| true)
    }

    /// Depth-first descendants of `container` accepted by `filter`.
    ///
    /// The filter only decides which nodes are produced; rejected containers
    /// are still descended into when `expand` is set.
    pub fn iter_filtered<'a, F>(
        &'a self,
        container: NodeId,
        expand: bool,
        filter: F,
    ) -> Descendants<'a, V, F>
    where
        F: FnMut(&NodeRef<'a, V>) -> bool,
    {
        Descendants::new(self, container, expand, filter)
    }

    /// Every non-container descendant of `container`, in document order.
    pub fn leaves(&self, container: NodeId) -> impl Iterator<Item = NodeRef<'_, V>> {
        self.iter_filtered(container, true, |node| !node.is_container())
    }

    /// Returns true if `node` appears anywhere below `container`.
    pub fn contains(&self, container: NodeId, node: NodeId) -> bool {
        self.iter(container, true).any(|item| item.id() == node)
    }
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A borrowed view of one node and the tree around it.
pub struct NodeRef<'a, V> {
    tree: &'a Tree<V>,
    id: NodeId,
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<'a, V> NodeRef<'a, V> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree<V> {
        self.tree
    }

    pub fn value(&self) -> &'a V {
        self.tree.value(self.id)
    }

    pub fn shape(&self) -> Shape {
        self.tree.shape(self.id)
    }

    pub fn is_container(&self) -> bool {
        self.shape().is_container()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        let tree = self.tree;
        tree.parent(self.id).map(|id| NodeRef { tree, id })
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, V>> + use<'a, V> {
        let tree = self.tree;
        tree.children(self.id)
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    pub fn has_children(&self) -> bool {
        !self.tree.children(self.id).is_empty()
    }

    /// Another node of the same tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'a, V>> {
        self.tree.get(id)
    }

    /// Look `name` up in this node's naming scope.
    pub fn lookup(&self, name: &str) -> Option<NodeRef<'a, V>> {
        let tree = self.tree;
        tree.lookup(self.id, name).map(|id| NodeRef { tree, id })
    }

    pub fn iter(&self, expand: bool) -> impl Iterator<Item = NodeRef<'a, V>> + use<'a, V> {
        self.tree.iter(self.id, expand)
    }
}

impl<V: fmt::Debug> fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_with_group() -> (Tree<&'static str>, NodeId, NodeId) {
        let mut tree = Tree::new();
        let module = tree.named_container("module");
        let group = tree.group("group");
        tree.attach(module, group).unwrap();
        (tree, module, group)
    }

    #[test]
    fn test_attach_sets_parent_and_order() {
        let mut tree = Tree::new();
        let root = tree.container("root");
        let a = tree.leaf("a");
        let b = tree.leaf("b");
        tree.attach(root, a).unwrap();
        tree.attach(root, b).unwrap();

        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_attach_twice_fails() {
        let mut tree = Tree::new();
        let first = tree.container("first");
        let second = tree.container("second");
        let child = tree.leaf("child");
        tree.attach(first, child).unwrap();

        let err = tree.attach(second, child).unwrap_err();
        assert_eq!(
            err,
            Error::AlreadyAttached {
                node: child,
                parent: first
            }
        );
        // Same container again is rejected too.
        assert!(matches!(
            tree.attach(first, child),
            Err(Error::AlreadyAttached { .. })
        ));
        assert_eq!(tree.parent(child), Some(first));
        assert!(tree.children(second).is_empty());
        assert_eq!(tree.children(first), &[child]);
    }

    #[test]
    fn test_attach_to_leaf_fails() {
        let mut tree = Tree::new();
        let leaf = tree.leaf("leaf");
        let other = tree.leaf("other");
        assert_eq!(
            tree.attach(leaf, other),
            Err(Error::NotAContainer { node: leaf })
        );
    }

    #[test]
    fn test_attach_ancestor_fails() {
        let mut tree = Tree::new();
        let root = tree.container("root");
        let inner = tree.container("inner");
        tree.attach(root, inner).unwrap();

        assert!(matches!(
            tree.attach(inner, root),
            Err(Error::CyclicAttachment { .. })
        ));
        assert!(matches!(
            tree.attach(root, root),
            Err(Error::CyclicAttachment { .. })
        ));
    }

    #[test]
    fn test_attach_named_and_lookup() {
        let mut tree = Tree::new();
        let module = tree.named_container("module");
        let p1 = tree.leaf("p1");
        tree.attach_named(module, "p1", p1).unwrap();

        assert_eq!(tree.lookup(module, "p1"), Some(p1));
        assert_eq!(tree.lookup(module, "missing"), None);
        assert_eq!(tree.children(module), &[p1]);
    }

    #[test]
    fn test_duplicate_name_leaves_tree_unchanged() {
        let mut tree = Tree::new();
        let module = tree.named_container("module");
        let first = tree.leaf("first");
        let second = tree.leaf("second");
        tree.attach_named(module, "x", first).unwrap();

        let err = tree.attach_named(module, "x", second).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateName {
                name: "x".to_string(),
                scope: module
            }
        );
        assert_eq!(tree.lookup(module, "x"), Some(first));
        assert_eq!(tree.names(module).count(), 1);
        assert_eq!(tree.children(module), &[first]);
        assert_eq!(tree.parent(second), None);
    }

    #[test]
    fn test_group_delegates_names_to_enclosing_scope() {
        let (mut tree, module, group) = module_with_group();
        let inner = tree.group("inner");
        tree.attach(group, inner).unwrap();

        let param = tree.leaf("param");
        tree.attach_named(inner, "p", param).unwrap();

        assert_eq!(tree.scope_of(inner), Ok(module));
        assert_eq!(tree.parent(param), Some(inner));
        assert_eq!(tree.lookup(module, "p"), Some(param));
        assert_eq!(tree.lookup(group, "p"), Some(param));

        let clash = tree.leaf("clash");
        assert!(matches!(
            tree.attach_named(module, "p", clash),
            Err(Error::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_named_container_starts_new_scope() {
        let (mut tree, module, group) = module_with_group();
        let block = tree.named_container("block");
        tree.attach_named(group, "blk", block).unwrap();

        let inner = tree.leaf("inner");
        tree.attach_named(block, "x", inner).unwrap();
        let outer = tree.leaf("outer");
        tree.attach_named(module, "x", outer).unwrap();

        assert_eq!(tree.lookup(block, "x"), Some(inner));
        assert_eq!(tree.lookup(module, "x"), Some(outer));
        assert_eq!(tree.resolve(block, "blk"), Some(block));
        assert_eq!(tree.resolve(block, "nope"), None);
    }

    #[test]
    fn test_no_naming_scope() {
        let mut tree = Tree::new();
        let detached = tree.group("detached");
        let plain = tree.container("plain");
        let leaf = tree.leaf("leaf");

        assert_eq!(
            tree.attach_named(detached, "a", leaf),
            Err(Error::NoNamingScope { node: detached })
        );
        assert_eq!(
            tree.attach_named(plain, "a", leaf),
            Err(Error::NoNamingScope { node: plain })
        );
        assert_eq!(tree.parent(leaf), None);
    }

    #[test]
    fn test_bind_extra_name() {
        let mut tree = Tree::new();
        let module = tree.named_container("module");
        let decl = tree.leaf("a, b");
        tree.attach_named(module, "a", decl).unwrap();
        tree.bind(module, "b", decl).unwrap();

        assert_eq!(tree.lookup(module, "b"), Some(decl));
        assert!(tree.bind(module, "a", decl).is_err());
        let names: Vec<_> = tree.names(module).map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_iteration() {
        let (mut tree, module, group) = module_with_group();
        let a = tree.leaf("a");
        let b = tree.leaf("b");
        let c = tree.leaf("c");
        tree.attach(group, a).unwrap();
        tree.attach(group, b).unwrap();
        tree.attach(module, c).unwrap();

        let expanded: Vec<_> = tree.iter(module, true).map(|n| *n.value()).collect();
        assert_eq!(expanded, vec!["group", "a", "b", "c"]);

        let direct: Vec<_> = tree.iter(module, false).map(|n| *n.value()).collect();
        assert_eq!(direct, vec!["group", "c"]);

        let leaves: Vec<_> = tree.leaves(module).map(|n| n.id()).collect();
        assert_eq!(leaves, vec![a, b, c]);

        // The filter does not prune the walk.
        let filtered: Vec<_> = tree
            .iter_filtered(module, true, |n| *n.value() != "group")
            .map(|n| *n.value())
            .collect();
        assert_eq!(filtered, vec!["a", "b", "c"]);

        assert!(tree.contains(module, b));
        assert!(!tree.contains(group, c));
    }

    #[test]
    fn test_node_ref_navigation() {
        let (mut tree, module, group) = module_with_group();
        let leaf = tree.leaf("leaf");
        tree.attach_named(group, "leaf", leaf).unwrap();

        let node = tree.node(leaf);
        assert_eq!(node.parent().map(|p| p.id()), Some(group));
        assert_eq!(node.parent().and_then(|p| p.parent()).map(|p| p.id()), Some(module));
        assert_eq!(tree.node(module).lookup("leaf").map(|n| n.id()), Some(leaf));
        assert!(tree.node(group).has_children());
        assert!(!node.is_container());
        assert!(tree.get(NodeId::new(99)).is_none());
    }
}
