use serde::{Deserialize, Serialize};

use super::Indent;

/// Rendering options, read from the `[format]` table of a design manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    /// Prefix added per indentation level.
    pub indent: Indent,
    /// Record a [`TraceEntry`](super::TraceEntry) for every processed token.
    pub trace: bool,
}

impl FormatOptions {
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
