//! Variant-directed conversion of tree nodes into token streams.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::{
    Error, Result,
    model::NodeRef,
    tokens::{Token, TokenStream},
};

/// Tag identifying one variant of a closed set of node payloads.
///
/// Tags form a forest through [`VariantKind::parent`]: a tag refines its
/// parent, and a handler registered for the parent also matches the child
/// unless a more specific handler takes precedence.
pub trait VariantKind: Copy + Eq + Hash + Debug + 'static {
    /// Every tag of the set.
    fn all() -> &'static [Self];

    /// The more general tag this one refines, if any.
    fn parent(self) -> Option<Self>;

    /// Returns true if `self` is `other` or refines it.
    fn is_a(self, other: Self) -> bool {
        std::iter::successors(Some(self), |kind| kind.parent()).any(|kind| kind == other)
    }
}

/// A node payload that can be dispatched on.
pub trait Variant: Debug {
    type Kind: VariantKind;

    fn kind(&self) -> Self::Kind;
}

/// Produces the tokens for one node.
///
/// Handlers render nested nodes by calling back into the tokenizer
/// ([`Tokenizer::tokenize`]) rather than walking the tree themselves.
pub type Handler<V> = for<'a> fn(NodeRef<'a, V>, &'a Tokenizer<V>) -> Result<TokenStream<'a>>;

/// Something the tokenizer can be asked to render.
pub enum Item<'a, V> {
    /// Already a leaf of the output; passed through unchanged.
    Token(Token),
    /// A tree node, dispatched on its variant.
    Node(NodeRef<'a, V>),
}

impl<V> From<Token> for Item<'_, V> {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl<'a, V> From<NodeRef<'a, V>> for Item<'a, V> {
    fn from(node: NodeRef<'a, V>) -> Self {
        Self::Node(node)
    }
}

/// One handler registration.
pub struct Registration<V: Variant> {
    pub kind: V::Kind,
    pub name: &'static str,
    pub priority: i32,
    handler: Handler<V>,
}

impl<V: Variant> Clone for Registration<V> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name,
            priority: self.priority,
            handler: self.handler,
        }
    }
}

impl<V: Variant> Debug for Registration<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Collects handler registrations and resolves them into a [`Tokenizer`].
///
/// # Example
///
/// ```ignore
/// let tokenizer = TokenizerBuilder::new()
///     .register(Kind::Banner, "banner", banner_tokenizer)
///     .register(Kind::Comment, "comment", comment_tokenizer)
///     .build()?;
/// ```
pub struct TokenizerBuilder<V: Variant> {
    registrations: Vec<Registration<V>>,
}

impl<V: Variant> TokenizerBuilder<V> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Register `handler` for `kind` at default priority.
    ///
    /// Handlers with equal priority are tried in registration order.
    pub fn register(self, kind: V::Kind, name: &'static str, handler: Handler<V>) -> Self {
        self.register_with_priority(kind, name, handler, 0)
    }

    /// Register `handler` for `kind`; higher priorities are tried first.
    pub fn register_with_priority(
        mut self,
        kind: V::Kind,
        name: &'static str,
        handler: Handler<V>,
        priority: i32,
    ) -> Self {
        self.registrations.push(Registration {
            kind,
            name,
            priority,
            handler,
        });
        self
    }

    /// Resolve every variant tag to the first matching handler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShadowedHandler`] if a registration could never be
    /// selected: the same tag registered twice, or a refined tag tried after
    /// a handler for one of its ancestors.
    pub fn build(mut self) -> Result<Tokenizer<V>> {
        // Stable: equal priorities keep registration order.
        self.registrations
            .sort_by_key(|registration| std::cmp::Reverse(registration.priority));

        for (index, later) in self.registrations.iter().enumerate() {
            if let Some(earlier) = self.registrations[..index]
                .iter()
                .find(|earlier| later.kind.is_a(earlier.kind))
            {
                return Err(Error::ShadowedHandler {
                    handler: later.name,
                    shadowed_by: earlier.name,
                });
            }
        }

        let table = V::Kind::all()
            .iter()
            .filter_map(|&kind| {
                self.registrations
                    .iter()
                    .position(|registration| kind.is_a(registration.kind))
                    .map(|index| (kind, index))
            })
            .collect();

        Ok(Tokenizer {
            registrations: self.registrations,
            table,
        })
    }
}

impl<V: Variant> Default for TokenizerBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches nodes to their registered handlers.
///
/// Dispatch is a direct table lookup on the node's variant tag, resolved
/// once by [`TokenizerBuilder::build`].
pub struct Tokenizer<V: Variant> {
    registrations: Vec<Registration<V>>,
    table: HashMap<V::Kind, usize>,
}

impl<V: Variant> Tokenizer<V> {
    pub fn builder() -> TokenizerBuilder<V> {
        TokenizerBuilder::new()
    }

    /// Tokens for `item`.
    ///
    /// Tokens pass through unchanged. Nodes are dispatched lazily: the
    /// handler runs when the stream is first pulled, and a node whose
    /// variant has no handler yields [`Error::DispatchNotFound`].
    pub fn tokenize<'a>(&'a self, item: impl Into<Item<'a, V>>) -> TokenStream<'a> {
        match item.into() {
            Item::Token(token) => token.into(),
            Item::Node(node) => TokenStream::deferred(move || self.dispatch(node)),
        }
    }

    /// Tokens for every direct child of `node`, in order.
    pub fn tokenize_children<'a>(&'a self, node: NodeRef<'a, V>) -> TokenStream<'a> {
        TokenStream::from_streams(node.children().map(move |child| self.tokenize(child)))
    }

    fn dispatch<'a>(&'a self, node: NodeRef<'a, V>) -> Result<TokenStream<'a>> {
        let value = node.value();
        let kind = value.kind();
        let registration = self
            .table
            .get(&kind)
            .map(|&index| &self.registrations[index])
            .ok_or_else(|| Error::DispatchNotFound {
                node: format!("{} {:?}", node.id(), value),
                kind: format!("{:?}", kind),
            })?;
        (registration.handler)(node, self)
    }

    /// Name of the handler that renders `kind`.
    pub fn handler_for(&self, kind: V::Kind) -> Option<&'static str> {
        self.table
            .get(&kind)
            .map(|&index| self.registrations[index].name)
    }

    /// Registrations in the order they are tried.
    pub fn registrations(&self) -> &[Registration<V>] {
        &self.registrations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::Tree,
        tokens::{keyword, newline, sp, symbol},
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        List,
        Comment,
        Banner,
        Unhandled,
    }

    impl VariantKind for Kind {
        fn all() -> &'static [Self] {
            &[Kind::List, Kind::Comment, Kind::Banner, Kind::Unhandled]
        }

        fn parent(self) -> Option<Self> {
            match self {
                Kind::Banner => Some(Kind::Comment),
                _ => None,
            }
        }
    }

    #[derive(Debug)]
    enum Node {
        List,
        Comment(&'static str),
        Banner(&'static str),
        Unhandled,
    }

    impl Variant for Node {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Node::List => Kind::List,
                Node::Comment(_) => Kind::Comment,
                Node::Banner(_) => Kind::Banner,
                Node::Unhandled => Kind::Unhandled,
            }
        }
    }

    fn list<'a>(node: NodeRef<'a, Node>, t: &'a Tokenizer<Node>) -> Result<TokenStream<'a>> {
        Ok(t.tokenize_children(node))
    }

    fn comment<'a>(node: NodeRef<'a, Node>, _: &'a Tokenizer<Node>) -> Result<TokenStream<'a>> {
        let text = match node.value() {
            Node::Comment(text) | Node::Banner(text) => *text,
            other => return Err(Error::variant_mismatch("comment", other)),
        };
        Ok(symbol("//") + sp() + keyword(text) + newline())
    }

    fn banner<'a>(node: NodeRef<'a, Node>, _: &'a Tokenizer<Node>) -> Result<TokenStream<'a>> {
        let Node::Banner(text) = node.value() else {
            return Err(Error::variant_mismatch("banner", node.value()));
        };
        Ok(symbol("//") + symbol("==") + sp() + keyword(*text) + newline())
    }

    fn tokenizer() -> Tokenizer<Node> {
        Tokenizer::<Node>::builder()
            .register(Kind::List, "list", list)
            .register(Kind::Banner, "banner", banner)
            .register(Kind::Comment, "comment", comment)
            .build()
            .unwrap()
    }

    #[test]
    fn test_specific_handler_wins() {
        let t = tokenizer();
        assert_eq!(t.handler_for(Kind::Banner), Some("banner"));
        assert_eq!(t.handler_for(Kind::Comment), Some("comment"));
        assert_eq!(t.handler_for(Kind::Unhandled), None);
    }

    #[test]
    fn test_general_handler_covers_refined_kind() {
        let t = Tokenizer::<Node>::builder()
            .register(Kind::Comment, "comment", comment)
            .build()
            .unwrap();
        assert_eq!(t.handler_for(Kind::Banner), Some("comment"));

        let mut tree = Tree::new();
        let node = tree.leaf(Node::Banner("hi"));
        let tokens = t.tokenize(tree.node(node)).collect_tokens().unwrap();
        assert_eq!(tokens[2], keyword("hi"));
    }

    #[test]
    fn test_shadowed_registration_is_rejected() {
        let result = Tokenizer::<Node>::builder()
            .register(Kind::Comment, "comment", comment)
            .register(Kind::Banner, "banner", banner)
            .build();
        assert_eq!(
            result.err(),
            Some(Error::ShadowedHandler {
                handler: "banner",
                shadowed_by: "comment"
            })
        );

        let duplicate = Tokenizer::<Node>::builder()
            .register(Kind::List, "first", list)
            .register(Kind::List, "second", list)
            .build();
        assert!(matches!(duplicate, Err(Error::ShadowedHandler { .. })));
    }

    #[test]
    fn test_priority_reorders_registrations() {
        let t = Tokenizer::<Node>::builder()
            .register(Kind::Comment, "comment", comment)
            .register_with_priority(Kind::Banner, "banner", banner, 10)
            .build()
            .unwrap();
        assert_eq!(t.handler_for(Kind::Banner), Some("banner"));
        let names: Vec<_> = t.registrations().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["banner", "comment"]);
    }

    #[test]
    fn test_recursive_dispatch() {
        let mut tree = Tree::new();
        let root = tree.container(Node::List);
        let a = tree.leaf(Node::Comment("a"));
        let b = tree.leaf(Node::Banner("b"));
        tree.attach(root, a).unwrap();
        tree.attach(root, b).unwrap();

        let t = tokenizer();
        let tokens = t.tokenize(tree.node(root)).collect_tokens().unwrap();
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[2], keyword("a"));
        assert_eq!(tokens[5], symbol("=="));
    }

    #[test]
    fn test_tokens_pass_through() {
        let t = tokenizer();
        let tokens = t.tokenize(symbol(";")).collect_tokens().unwrap();
        assert_eq!(tokens, vec![symbol(";")]);
    }

    #[test]
    fn test_dispatch_not_found_names_node() {
        let mut tree = Tree::new();
        let root = tree.container(Node::List);
        let bad = tree.leaf(Node::Unhandled);
        tree.attach(root, bad).unwrap();

        let t = tokenizer();
        let err = t.tokenize(tree.node(root)).collect_tokens().unwrap_err();
        assert_eq!(
            err,
            Error::DispatchNotFound {
                node: "node#1 Unhandled".to_string(),
                kind: "Unhandled".to_string(),
            }
        );
    }

    #[test]
    fn test_dispatch_is_lazy() {
        let mut tree = Tree::new();
        let bad = tree.leaf(Node::Unhandled);
        let t = tokenizer();
        // Building the stream does not dispatch; pulling it does.
        let mut stream = t.tokenize(tree.node(bad));
        assert!(matches!(
            stream.next(),
            Some(Err(Error::DispatchNotFound { .. }))
        ));
        assert!(stream.next().is_none());
    }
}
