//! Indentation configuration for generated text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix added for each open indentation level.
///
/// Deserializes from a width (`indent = 4`), `"tab"`, or any other string,
/// which is used verbatim (`indent = "| "`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawIndent", into = "RawIndent")]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
    /// An arbitrary prefix string.
    Custom(String),
}

impl Indent {
    /// 2-space indentation (SystemVerilog, Verilog).
    pub const HDL: Self = Self::Spaces(2);

    /// 4-space indentation (VHDL).
    pub const VHDL: Self = Self::Spaces(4);

    /// The prefix string for one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
            Self::Custom(prefix) => prefix.clone(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::HDL
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spaces(width) => write!(f, "{} spaces", width),
            Self::Tab => write!(f, "tab"),
            Self::Custom(prefix) => write!(f, "{:?}", prefix),
        }
    }
}

impl std::str::FromStr for Indent {
    type Err = std::convert::Infallible;

    /// `"tab"`, a width such as `"4"`, or a literal prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Indent::from(RawIndent::Text(s.to_string())))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawIndent {
    Width(u8),
    Text(String),
}

impl From<RawIndent> for Indent {
    fn from(raw: RawIndent) -> Self {
        match raw {
            RawIndent::Width(width) => Indent::Spaces(width),
            RawIndent::Text(text) if text.eq_ignore_ascii_case("tab") => Indent::Tab,
            RawIndent::Text(text) => match text.parse::<u8>() {
                Ok(width) => Indent::Spaces(width),
                Err(_) => Indent::Custom(text),
            },
        }
    }
}

impl From<Indent> for RawIndent {
    fn from(indent: Indent) -> Self {
        match indent {
            Indent::Spaces(width) => RawIndent::Width(width),
            Indent::Tab => RawIndent::Text("tab".to_string()),
            Indent::Custom(prefix) => RawIndent::Text(prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_unit() {
        assert_eq!(Indent::Spaces(2).unit(), "  ");
        assert_eq!(Indent::Spaces(4).unit(), "    ");
        assert_eq!(Indent::Spaces(3).unit(), "   ");
        assert_eq!(Indent::Tab.unit(), "\t");
        assert_eq!(Indent::Custom("| ".to_string()).unit(), "| ");
    }

    #[test]
    fn test_default() {
        assert_eq!(Indent::default(), Indent::HDL);
        assert_eq!(Indent::default().unit(), "  ");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("tab".parse::<Indent>().unwrap(), Indent::Tab);
        assert_eq!("4".parse::<Indent>().unwrap(), Indent::Spaces(4));
        assert_eq!(
            "--".parse::<Indent>().unwrap(),
            Indent::Custom("--".to_string())
        );
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            indent: Indent,
        }

        let parse = |src: &str| toml::from_str::<Wrapper>(src).unwrap().indent;
        assert_eq!(parse("indent = 4"), Indent::Spaces(4));
        assert_eq!(parse("indent = \"tab\""), Indent::Tab);
        assert_eq!(parse("indent = \"| \""), Indent::Custom("| ".to_string()));
    }
}
