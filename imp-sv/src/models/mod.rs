//! SystemVerilog construct model.
//!
//! Every construct is a [`Construct`] payload stored in an
//! [`imp_core::model::Tree`]. [`ConstructKind`] is the dispatch tag.

mod builder;
mod comments;
mod datatypes;
mod modules;
mod parameters;

pub use builder::{ItemBuilder, module};
pub use comments::{BANNER_BORDER, BANNER_WIDTH, Comment, CommentStyle};
pub use datatypes::{AtomKind, DataType, DataTypeError, Range, VectorKind};
use imp_core::writer::{Variant, VariantKind};
pub use modules::{Block, Module};
pub use parameters::{Declaration, ParamKind};

/// Node payload for SystemVerilog designs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    Module(Module),
    Group,
    Block(Block),
    Comment(Comment),
    DataType(DataType),
    LocalParam(Declaration),
    Parameter(Declaration),
}

impl Construct {
    /// The declaration of a `localparam` or `parameter` node.
    pub fn declaration(&self) -> Option<(ParamKind, &Declaration)> {
        match self {
            Construct::LocalParam(decl) => Some((ParamKind::LocalParam, decl)),
            Construct::Parameter(decl) => Some((ParamKind::Parameter, decl)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Module,
    Group,
    Block,
    Comment,
    Banner,
    BlockComment,
    DataType,
    IntegerAtom,
    IntegerVector,
    LocalParam,
    Parameter,
}

impl VariantKind for ConstructKind {
    fn all() -> &'static [Self] {
        &[
            ConstructKind::Module,
            ConstructKind::Group,
            ConstructKind::Block,
            ConstructKind::Comment,
            ConstructKind::Banner,
            ConstructKind::BlockComment,
            ConstructKind::DataType,
            ConstructKind::IntegerAtom,
            ConstructKind::IntegerVector,
            ConstructKind::LocalParam,
            ConstructKind::Parameter,
        ]
    }

    fn parent(self) -> Option<Self> {
        match self {
            ConstructKind::Banner | ConstructKind::BlockComment => Some(ConstructKind::Comment),
            ConstructKind::IntegerAtom | ConstructKind::IntegerVector => {
                Some(ConstructKind::DataType)
            }
            _ => None,
        }
    }
}

impl Variant for Construct {
    type Kind = ConstructKind;

    fn kind(&self) -> ConstructKind {
        match self {
            Construct::Module(_) => ConstructKind::Module,
            Construct::Group => ConstructKind::Group,
            Construct::Block(_) => ConstructKind::Block,
            Construct::Comment(comment) => match comment.style {
                CommentStyle::Line => ConstructKind::Comment,
                CommentStyle::Banner { .. } => ConstructKind::Banner,
                CommentStyle::Block => ConstructKind::BlockComment,
            },
            Construct::DataType(DataType::IntegerAtom { .. }) => ConstructKind::IntegerAtom,
            Construct::DataType(DataType::IntegerVector { .. }) => ConstructKind::IntegerVector,
            Construct::LocalParam(_) => ConstructKind::LocalParam,
            Construct::Parameter(_) => ConstructKind::Parameter,
        }
    }
}
