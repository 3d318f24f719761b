//! Parameter and localparam declarations.

use imp_core::model::NodeId;

/// One declaration statement introducing one or more constants.
///
/// `dtype` refers to a standalone [`Construct::DataType`](super::Construct::DataType)
/// node of the same tree: it is rendered through the tokenizer but is never a
/// child of any container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub names: Vec<String>,
    pub dtype: NodeId,
    pub value: Option<String>,
}

impl Declaration {
    pub fn new(names: Vec<String>, dtype: NodeId, value: Option<String>) -> Self {
        Self {
            names,
            dtype,
            value,
        }
    }
}

/// Which declaration keyword introduces the constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    LocalParam,
    Parameter,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::LocalParam => "localparam",
            ParamKind::Parameter => "parameter",
        }
    }
}
