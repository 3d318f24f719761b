//! Reading and parsing imp.toml sources.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::validate_manifest};
use crate::{Error, Result, error::SourceContext};

/// File name a manifest is looked up and reported under by default.
pub const MANIFEST_FILE: &str = "imp.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, MANIFEST_FILE)
    }
}

impl Manifest {
    /// Read, parse and validate a manifest file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_source(&read_source(path.as_ref())?)
    }

    /// Parse `content`, labelling diagnostics with `filename`.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }

    /// Parse and validate an already loaded source.
    pub fn from_source(source: &SourceContext) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(source.src()).map_err(|err| source.parse_error(err))?;
        validate_manifest(&manifest, source)?;
        Ok(manifest)
    }
}

/// Parse and validate manifest text, reporting errors against `filename`.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    Manifest::from_source(&SourceContext::new(content, filename))
}

/// Load a file, naming the source after its path.
pub(crate) fn read_source(path: &Path) -> Result<SourceContext> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source,
        })
    })?;
    Ok(SourceContext::new(content, path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_is_used_in_diagnostics() {
        let err = parse_manifest("[[modules]]\nname = \"1x\"\n", "rtl/imp.toml").unwrap_err();
        let Error::InvalidIdentifier { src, .. } = *err else {
            panic!("expected an identifier error");
        };
        assert_eq!(src.name(), "rtl/imp.toml");
    }

    #[test]
    fn test_syntax_error_has_span() {
        let err = Manifest::from_str("[[modules]\nname = \"top\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::from_str("").unwrap();
        assert!(manifest.modules.is_empty());
        assert_eq!(manifest.format, Default::default());
    }
}
