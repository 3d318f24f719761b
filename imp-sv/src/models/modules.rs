//! Modules and blocks.

/// A SystemVerilog module definition. Rendered as a named container, so
/// every item declared inside shares its name scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A nested name scope inside a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub name: Option<String>,
}
