//! Builder API for module contents.

use imp_core::{Error, Result, model::NodeId, model::Tree};

use super::{Block, Comment, Construct, DataType, Declaration, Module, ParamKind};

/// Create a standalone module. Modules are named containers: they own the
/// name scope of everything declared inside them.
pub fn module(tree: &mut Tree<Construct>, name: impl Into<String>) -> NodeId {
    tree.named_container(Construct::Module(Module::new(name)))
}

/// Appends constructs to one container of a tree.
///
/// Named items register in the container's naming scope; inside a group
/// that is the scope of the nearest enclosing module or block.
///
/// # Example
///
/// ```
/// use imp_core::model::Tree;
/// use imp_sv::models::{DataType, ItemBuilder, module};
///
/// let mut tree = Tree::new();
/// let root = module(&mut tree, "example");
/// let p1 = ItemBuilder::new(&mut tree, root).localparam("p1", DataType::int(), 30)?;
/// assert_eq!(tree.lookup(root, "p1"), Some(p1));
/// # Ok::<(), imp_core::Error>(())
/// ```
pub struct ItemBuilder<'t> {
    tree: &'t mut Tree<Construct>,
    container: NodeId,
}

impl<'t> ItemBuilder<'t> {
    pub fn new(tree: &'t mut Tree<Construct>, container: NodeId) -> Self {
        Self { tree, container }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn tree(&self) -> &Tree<Construct> {
        self.tree
    }

    /// A builder appending to `container` instead, typically a group or
    /// block created by this builder.
    pub fn within(&mut self, container: NodeId) -> ItemBuilder<'_> {
        ItemBuilder::new(self.tree, container)
    }

    /// Transparent group: shares the enclosing name scope.
    pub fn group(&mut self) -> Result<NodeId> {
        let group = self.tree.group(Construct::Group);
        self.tree.attach(self.container, group)
    }

    /// Nested name scope, optionally itself registered under `name`.
    pub fn block(&mut self, name: Option<&str>) -> Result<NodeId> {
        let block = self.tree.named_container(Construct::Block(Block {
            name: name.map(str::to_string),
        }));
        match name {
            Some(name) => self.tree.attach_named(self.container, name, block),
            None => self.tree.attach(self.container, block),
        }
    }

    pub fn comment(&mut self, text: impl Into<String>) -> Result<NodeId> {
        self.push(Construct::Comment(Comment::line(text)))
    }

    pub fn banner(&mut self, text: impl Into<String>) -> Result<NodeId> {
        self.push(Construct::Comment(Comment::banner(text)))
    }

    pub fn block_comment(&mut self, text: impl Into<String>) -> Result<NodeId> {
        self.push(Construct::Comment(Comment::block(text)))
    }

    /// Append an arbitrary leaf.
    pub fn push(&mut self, construct: Construct) -> Result<NodeId> {
        let leaf = self.tree.leaf(construct);
        self.tree.attach(self.container, leaf)
    }

    /// `localparam DTYPE NAME = VALUE;`
    pub fn localparam(
        &mut self,
        name: &str,
        dtype: DataType,
        value: impl ToString,
    ) -> Result<NodeId> {
        self.declare(
            ParamKind::LocalParam,
            &[name],
            dtype,
            Some(value.to_string()),
        )
    }

    /// `parameter DTYPE NAME = DEFAULT;`
    pub fn parameter(
        &mut self,
        name: &str,
        dtype: DataType,
        default: impl ToString,
    ) -> Result<NodeId> {
        self.declare(
            ParamKind::Parameter,
            &[name],
            dtype,
            Some(default.to_string()),
        )
    }

    /// Declare one or more constants in a single statement.
    ///
    /// Every name is bound to the returned declaration node. Either all
    /// names are bound or, on error, none are. An empty `names` is a
    /// [`Error::MissingName`].
    pub fn declare(
        &mut self,
        kind: ParamKind,
        names: &[&str],
        dtype: DataType,
        value: Option<String>,
    ) -> Result<NodeId> {
        let Some((first, rest)) = names.split_first() else {
            return Err(Error::MissingName {
                kind: kind.as_str(),
            });
        };
        let scope = self.tree.scope_of(self.container)?;
        for (index, name) in names.iter().enumerate() {
            if self.tree.lookup(scope, name).is_some() || names[..index].contains(name) {
                return Err(Error::DuplicateName {
                    name: name.to_string(),
                    scope,
                });
            }
        }
        let dtype = self.tree.leaf(Construct::DataType(dtype));
        let declaration = Declaration::new(
            names.iter().map(|name| name.to_string()).collect(),
            dtype,
            value,
        );
        let node = self.tree.leaf(match kind {
            ParamKind::LocalParam => Construct::LocalParam(declaration),
            ParamKind::Parameter => Construct::Parameter(declaration),
        });

        self.tree.attach_named(self.container, *first, node)?;
        for name in rest {
            self.tree.bind(self.container, *name, node)?;
        }
        Ok(node)
    }
}
