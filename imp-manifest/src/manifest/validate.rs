//! Validation context and utilities for manifest parsing.

use std::{collections::HashMap, ops::Range, sync::Arc};

use imp_sv::{DataType, DataTypeError};
use miette::SourceSpan;
use toml::Spanned;

use super::{ItemKind, ItemSpec, Manifest, toml_value_to_sv};
use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Carries the source and the path of module and item names leading to the
/// entry being validated, so nested errors can say where they are.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(&SourceContext::new(src, "imp.toml"));
/// ctx.validate_name(&module.name, "module")?;
///
/// // For nested validation
/// let nested = ctx.push("top").push("regs");
/// nested.validate_name(&param.name, "localparam")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["top", "regs"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &SourceContext) -> Self {
        Self {
            source: Arc::new(source.clone()),
            path: Vec::new(),
        }
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// The current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Context description for error messages, e.g. "localparam in 'top'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a name is a usable SystemVerilog identifier.
    pub fn validate_name(&self, name: &Spanned<String>, kind: &str) -> Result<()> {
        let span = span_of(name.span());

        if is_sv_keyword(name.get_ref()) {
            return Err(Box::new(Error::ReservedKeyword {
                src: self.source.named_source(),
                span,
                name: name.get_ref().clone(),
                context: self.context_for(kind),
            }));
        }

        match validate_identifier(name.get_ref()) {
            Some(reason) => Err(Box::new(Error::InvalidIdentifier {
                src: self.source.named_source(),
                span,
                name: name.get_ref().clone(),
                context: self.context_for(kind),
                reason: reason.to_string(),
            })),
            None => Ok(()),
        }
    }

    /// Validate that a type string parses as a [`DataType`].
    pub fn validate_type(&self, ty: &Spanned<String>) -> Result<DataType> {
        ty.get_ref()
            .parse()
            .map_err(|reason: DataTypeError| {
                self.source
                    .invalid_type_error(ty.get_ref(), reason.to_string(), span_of(ty.span()))
            })
    }
}

/// Convert a byte range from the TOML parser into a miette span.
pub(crate) fn span_of(range: Range<usize>) -> SourceSpan {
    SourceSpan::from(range)
}

/// Validate the manifest after parsing.
pub(crate) fn validate_manifest(manifest: &Manifest, source: &SourceContext) -> Result<()> {
    let ctx = ParseContext::new(source);
    let mut seen: HashMap<&str, Range<usize>> = HashMap::new();

    for module in &manifest.modules {
        let name = module.name.get_ref();
        ctx.validate_name(&module.name, "module")?;

        if let Some(first) = seen.get(name.as_str()) {
            return Err(Box::new(Error::DuplicateModule {
                src: ctx.source.named_source(),
                first_span: span_of(first.clone()),
                second_span: span_of(module.name.span()),
                name: name.clone(),
            }));
        }
        seen.insert(name.as_str(), module.name.span());

        let module_ctx = ctx.push(name);
        for item in &module.items {
            validate_item(item, &module_ctx)?;
        }
    }
    Ok(())
}

fn validate_item<'a>(item: &'a ItemSpec, ctx: &ParseContext<'a>) -> Result<()> {
    let kind = item.kind();
    let kind_span = span_of(item.kind.span());
    let source = ctx.source_context();
    let context = ctx.context_for(kind.as_str());

    if !item.items.is_empty() && !kind.is_container() {
        return Err(source.validation_error_at(
            format!("{} cannot contain nested items", context),
            kind_span,
        ));
    }

    if kind.is_comment() {
        if item.text.is_none() {
            return Err(source.validation_error_at(
                format!("{} requires a 'text' field", context),
                kind_span,
            ));
        }
        if item.all_names().next().is_some() || item.ty.is_some() || item.value.is_some() {
            return Err(source.validation_error_at(
                format!("{} only takes a 'text' field", context),
                kind_span,
            ));
        }
        return Ok(());
    }

    if item.text.is_some() {
        return Err(source.validation_error_at(
            format!("{} does not take a 'text' field", context),
            kind_span,
        ));
    }

    if kind.is_declaration() {
        if item.all_names().next().is_none() {
            return Err(source.validation_error_at(
                format!("{} requires a 'name' field", context),
                kind_span,
            ));
        }
        for name in item.all_names() {
            ctx.validate_name(name, kind.as_str())?;
        }

        let Some(ty) = &item.ty else {
            return Err(source.validation_error_at(
                format!("{} requires a 'type' field", context),
                kind_span,
            ));
        };
        ctx.validate_type(ty)?;

        if let Some(value) = &item.value {
            match toml_value_to_sv(value.get_ref()) {
                None => {
                    return Err(source.validation_error_at(
                        "value must be a string, number or boolean",
                        span_of(value.span()),
                    ));
                }
                Some(text) if text.contains(['\n', '\r']) => {
                    return Err(source.validation_error_at(
                        format!("value of {} must fit on one line", context),
                        span_of(value.span()),
                    ));
                }
                Some(_) => {}
            }
        }
        return Ok(());
    }

    // Groups and blocks.
    if item.ty.is_some() || item.value.is_some() || !item.names.is_empty() {
        return Err(source.validation_error_at(
            format!("{} only takes nested items", context),
            kind_span,
        ));
    }
    match (&item.name, kind) {
        (Some(name), ItemKind::Group) => {
            return Err(source.validation_error_at(
                "groups share the enclosing scope and cannot be named",
                span_of(name.span()),
            ));
        }
        (Some(name), _) => ctx.validate_name(name, "block")?,
        (None, _) => {}
    }

    let nested = match &item.name {
        Some(name) => ctx.push(name.get_ref()),
        None => ctx.push(kind.as_str()),
    };
    for child in &item.items {
        validate_item(child, &nested)?;
    }
    Ok(())
}

/// SystemVerilog reserved keywords (IEEE 1800-2017 Annex B), restricted to
/// those a generated name is likely to collide with.
pub(crate) const SV_KEYWORDS: &[&str] = &[
    "always", "always_comb", "always_ff", "always_latch", "and", "assert", "assign", "assume",
    "automatic", "begin", "bind", "bit", "break", "buf", "byte", "case", "casex", "casez", "cell",
    "chandle", "class", "clocking", "config", "const", "constraint", "context", "continue",
    "cover", "default", "defparam", "design", "disable", "do", "edge", "else", "end", "endcase",
    "endclass", "endclocking", "endconfig", "endfunction", "endgenerate", "endinterface",
    "endmodule", "endpackage", "endprogram", "endproperty", "endsequence", "endtask", "enum",
    "event", "export", "extends", "extern", "final", "for", "force", "foreach", "forever",
    "fork", "function", "generate", "genvar", "if", "iff", "import", "initial", "inout",
    "input", "int", "integer", "interface", "join", "join_any", "join_none", "localparam",
    "logic", "longint", "macromodule", "modport", "module", "nand", "negedge", "new", "nor",
    "not", "null", "or", "output", "package", "packed", "parameter", "posedge", "priority",
    "program", "property", "protected", "pure", "rand", "randc", "real", "realtime", "reg",
    "release", "repeat", "return", "sequence", "shortint", "shortreal", "signed", "static",
    "string", "struct", "super", "supply0", "supply1", "task", "this", "time", "timeprecision",
    "timeunit", "tri", "type", "typedef", "union", "unique", "unsigned", "var", "virtual",
    "void", "wait", "while", "wire", "with", "xor",
];

pub(crate) fn is_sv_keyword(name: &str) -> bool {
    SV_KEYWORDS.contains(&name)
}

/// Validate that a name is a simple SystemVerilog identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')) {
        return Some("name must contain only letters, numbers, underscores, and '$'");
    }

    None
}
