use miette::Diagnostic;
use thiserror::Error;

use crate::model::NodeId;

/// Result type for model construction and rendering.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a component tree or rendering it.
///
/// All of these are programmer errors: they are reported at the point of
/// violation and abort the current operation without partial recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error("an item named '{name}' already exists in the scope of {scope}")]
    #[diagnostic(
        code(imp::duplicate_name),
        help("names must be unique within the nearest named container")
    )]
    DuplicateName { name: String, scope: NodeId },

    #[error("{kind} declaration without a name")]
    #[diagnostic(
        code(imp::missing_name),
        help("a declaration binds at least one name")
    )]
    MissingName { kind: &'static str },

    #[error("{node} is already attached to {parent}")]
    #[diagnostic(
        code(imp::already_attached),
        help("a component can only belong to one container")
    )]
    AlreadyAttached { node: NodeId, parent: NodeId },

    #[error("{node} is not a container")]
    #[diagnostic(code(imp::not_a_container))]
    NotAContainer { node: NodeId },

    #[error("attaching {node} to {container} would create a cycle")]
    #[diagnostic(code(imp::cyclic_attachment))]
    CyclicAttachment { node: NodeId, container: NodeId },

    #[error("no named container encloses {node}")]
    #[diagnostic(
        code(imp::no_naming_scope),
        help("named items must live below a named container, possibly through groups")
    )]
    NoNamingScope { node: NodeId },

    #[error("no tokenizer registered for {node} (kind {kind})")]
    #[diagnostic(code(imp::dispatch_not_found))]
    DispatchNotFound { node: String, kind: String },

    #[error("tokenizer '{handler}' cannot render {node}")]
    #[diagnostic(code(imp::variant_mismatch))]
    VariantMismatch { handler: &'static str, node: String },

    #[error("tokenizer '{handler}' is shadowed by '{shadowed_by}' and would never run")]
    #[diagnostic(
        code(imp::shadowed_handler),
        help("register more specific kinds before the general kinds they refine")
    )]
    ShadowedHandler {
        handler: &'static str,
        shadowed_by: &'static str,
    },

    #[error("dedent without a matching indent on output line {line}")]
    #[diagnostic(code(imp::unbalanced_indentation))]
    UnbalancedIndentation { line: usize },

    #[error("{depth} indentation level(s) left open at the end of the token stream")]
    #[diagnostic(code(imp::unclosed_indentation))]
    UnclosedIndentation { depth: usize },

    #[error("malformed token {token}: {reason}")]
    #[diagnostic(code(imp::malformed_token))]
    MalformedTokenInput { token: String, reason: &'static str },
}

impl Error {
    /// Create a variant mismatch error for a handler given the wrong payload.
    pub fn variant_mismatch(handler: &'static str, node: &impl std::fmt::Debug) -> Self {
        Self::VariantMismatch {
            handler,
            node: format!("{:?}", node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_message() {
        let err = Error::DuplicateName {
            name: "p1".to_string(),
            scope: NodeId::new(0),
        };
        assert_eq!(
            err.to_string(),
            "an item named 'p1' already exists in the scope of node#0"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::UnbalancedIndentation { line: 3 };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("imp::unbalanced_indentation"));
    }
}
