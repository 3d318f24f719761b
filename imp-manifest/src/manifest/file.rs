use std::path::{Path, PathBuf};

use super::{Design, Manifest, parse::read_source};
use crate::{Result, error::SourceContext};

/// A loaded imp.toml: where it came from, its text and the parsed manifest.
///
/// Keeping the text around lets [`ImpToml::lower`] point its diagnostics at
/// the file the manifest was read from.
#[derive(Debug)]
pub struct ImpToml {
    path: PathBuf,
    source: SourceContext,
    manifest: Manifest,
}

impl ImpToml {
    /// Open and parse an imp.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = read_source(path)?;
        Self::from_source(path.to_path_buf(), source)
    }

    /// Parse manifest text that did not come from disk.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        Self::from_source(PathBuf::from(filename), SourceContext::new(content, filename))
    }

    fn from_source(path: PathBuf, source: SourceContext) -> Result<Self> {
        let manifest = Manifest::from_source(&source)?;
        Ok(Self {
            path,
            source,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    pub fn content(&self) -> &str {
        self.source.src()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Build the design tree, reporting errors against this file.
    pub fn lower(&self) -> Result<Design> {
        self.manifest.lower(&self.source)
    }
}
