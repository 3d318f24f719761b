use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// A manifest's text and the name it is reported under.
///
/// Every diagnostic carries a copy as its `#[source_code]`, so labels can
/// point into the original file.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Wrap a TOML syntax or schema error, keeping its span.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span: source.span().map(SourceSpan::from),
            source,
        })
    }

    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    pub fn invalid_type_error(
        &self,
        ty: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span: span.into(),
            ty: ty.into(),
            reason: reason.into(),
        })
    }

    /// Attach a model construction error to the manifest location that
    /// caused it.
    pub fn model_error(&self, source: imp_core::Error, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Model {
            src: self.named_source(),
            span,
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the manifest location with '--config <path>'"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse design manifest")]
    #[diagnostic(code(imp::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid TOML here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate module '{name}'")]
    #[diagnostic(
        code(imp::duplicate_module),
        help("module names must be unique within a design")
    )]
    DuplicateModule {
        #[source_code]
        src: NamedSource<String>,
        #[label("first defined here")]
        first_span: SourceSpan,
        #[label("redefined here")]
        second_span: SourceSpan,
        name: String,
    },

    #[error("invalid data type '{ty}'")]
    #[diagnostic(
        code(imp::invalid_type),
        help("{reason}. Examples: 'int', 'int unsigned', 'logic [7:0]', 'bit signed [3:0]'")
    )]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown type")]
        span: SourceSpan,
        ty: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(code(imp::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a SystemVerilog reserved keyword")]
    #[diagnostic(
        code(imp::reserved_keyword),
        help("rename '{name}' to something else, e.g. '{name}_i' or '{name}_q'")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: SourceSpan,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(imp::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, underscores and '$', starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: SourceSpan,
        name: String,
        context: String,
        reason: String,
    },

    #[error("{source}")]
    #[diagnostic(code(imp::model_error))]
    Model {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        source: imp_core::Error,
    },
}
