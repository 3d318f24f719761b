//! SystemVerilog integral data types.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// `integer_atom_type`: fixed-width integral types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Byte,
    ShortInt,
    Int,
    LongInt,
    Integer,
    Time,
}

impl AtomKind {
    pub const ALL: [AtomKind; 6] = [
        AtomKind::Byte,
        AtomKind::ShortInt,
        AtomKind::Int,
        AtomKind::LongInt,
        AtomKind::Integer,
        AtomKind::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AtomKind::Byte => "byte",
            AtomKind::ShortInt => "shortint",
            AtomKind::Int => "int",
            AtomKind::LongInt => "longint",
            AtomKind::Integer => "integer",
            AtomKind::Time => "time",
        }
    }

    /// Every atom type is signed unless declared otherwise, except `time`.
    pub fn default_signed(&self) -> bool {
        !matches!(self, AtomKind::Time)
    }
}

/// `integer_vector_type`: types with a user-defined packed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Bit,
    Logic,
    Reg,
}

impl VectorKind {
    pub const ALL: [VectorKind; 3] = [VectorKind::Bit, VectorKind::Logic, VectorKind::Reg];

    pub fn as_str(&self) -> &'static str {
        match self {
            VectorKind::Bit => "bit",
            VectorKind::Logic => "logic",
            VectorKind::Reg => "reg",
        }
    }
}

/// Packed dimension `[msb:lsb]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub msb: i64,
    pub lsb: i64,
}

impl Range {
    pub fn new(msb: i64, lsb: i64) -> Self {
        Self { msb, lsb }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.msb, self.lsb)
    }
}

/// A data type usable in parameter and signal declarations.
///
/// `signed` is `None` when the declaration leaves signedness implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    IntegerAtom {
        kind: AtomKind,
        signed: Option<bool>,
    },
    IntegerVector {
        kind: VectorKind,
        range: Option<Range>,
        signed: Option<bool>,
    },
}

impl DataType {
    /// `int`
    pub fn int() -> Self {
        Self::atom(AtomKind::Int)
    }

    pub fn atom(kind: AtomKind) -> Self {
        Self::IntegerAtom { kind, signed: None }
    }

    /// `logic [msb:lsb]`
    pub fn logic(msb: i64, lsb: i64) -> Self {
        Self::vector(VectorKind::Logic, Some(Range::new(msb, lsb)))
    }

    pub fn vector(kind: VectorKind, range: Option<Range>) -> Self {
        Self::IntegerVector {
            kind,
            range,
            signed: None,
        }
    }

    /// Declare signedness explicitly.
    pub fn with_signed(mut self, value: bool) -> Self {
        match &mut self {
            Self::IntegerAtom { signed, .. } | Self::IntegerVector { signed, .. } => {
                *signed = Some(value)
            }
        }
        self
    }

    pub fn default_signed(&self) -> bool {
        match self {
            Self::IntegerAtom { kind, .. } => kind.default_signed(),
            Self::IntegerVector { .. } => false,
        }
    }

    /// Effective signedness.
    pub fn is_signed(&self) -> bool {
        self.explicit_signed().unwrap_or(self.default_signed())
    }

    /// Signedness that has to be spelled out, i.e. declared and different
    /// from the type's default.
    pub fn signing_keyword(&self) -> Option<&'static str> {
        match self.explicit_signed() {
            Some(signed) if signed != self.default_signed() => {
                Some(if signed { "signed" } else { "unsigned" })
            }
            _ => None,
        }
    }

    fn explicit_signed(&self) -> Option<bool> {
        match self {
            Self::IntegerAtom { signed, .. } | Self::IntegerVector { signed, .. } => *signed,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::IntegerAtom { kind, .. } => kind.as_str(),
            Self::IntegerVector { kind, .. } => kind.as_str(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())?;
        if let Some(signing) = self.signing_keyword() {
            write!(f, " {}", signing)?;
        }
        if let Self::IntegerVector {
            range: Some(range), ..
        } = self
        {
            write!(f, " {}", range)?;
        }
        Ok(())
    }
}

/// Errors from parsing a [`DataType`] out of its source spelling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataTypeError {
    #[error(
        "unknown data type '{0}', expected an integer atom (int, byte, ...) or vector (logic, bit, reg)"
    )]
    UnknownType(String),

    #[error("'{0}' does not take a packed range")]
    UnexpectedRange(String),

    #[error("invalid range '{0}', expected '[msb:lsb]'")]
    InvalidRange(String),

    #[error("invalid range bound '{0}'")]
    InvalidBound(String),
}

impl FromStr for DataType {
    type Err = DataTypeError;

    /// Parses `int`, `int unsigned`, `logic [7:0]`, `bit signed [3:0]`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let mut rest = rest.trim_start();

        let mut dtype = if let Some(kind) = AtomKind::ALL.iter().find(|k| k.as_str() == name) {
            DataType::atom(*kind)
        } else if let Some(kind) = VectorKind::ALL.iter().find(|k| k.as_str() == name) {
            DataType::vector(*kind, None)
        } else {
            return Err(DataTypeError::UnknownType(name.to_string()));
        };

        for (word, signed) in [("signed", true), ("unsigned", false)] {
            let Some(after) = rest.strip_prefix(word) else {
                continue;
            };
            if after.is_empty() || after.starts_with([' ', '\t', '[']) {
                dtype = dtype.with_signed(signed);
                rest = after.trim_start();
                break;
            }
        }

        if rest.is_empty() {
            return Ok(dtype);
        }

        let DataType::IntegerVector { range, .. } = &mut dtype else {
            return Err(DataTypeError::UnexpectedRange(name.to_string()));
        };
        *range = Some(parse_range(rest)?);
        Ok(dtype)
    }
}

fn parse_range(s: &str) -> Result<Range, DataTypeError> {
    let invalid = || DataTypeError::InvalidRange(s.to_string());
    let inner = s
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (msb, lsb) = inner.split_once(':').ok_or_else(invalid)?;
    let bound = |text: &str| {
        let text = text.trim();
        text.parse::<i64>()
            .map_err(|_| DataTypeError::InvalidBound(text.to_string()))
    };
    Ok(Range::new(bound(msb)?, bound(lsb)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("int".parse::<DataType>().unwrap(), DataType::int());
        assert_eq!(
            "int unsigned".parse::<DataType>().unwrap(),
            DataType::int().with_signed(false)
        );
        assert_eq!(
            "logic [7:0]".parse::<DataType>().unwrap(),
            DataType::logic(7, 0)
        );
        assert_eq!(
            " bit signed [3 : 0] ".parse::<DataType>().unwrap(),
            DataType::vector(VectorKind::Bit, Some(Range::new(3, 0))).with_signed(true)
        );
        assert_eq!(
            "reg".parse::<DataType>().unwrap(),
            DataType::vector(VectorKind::Reg, None)
        );
        assert_eq!(
            "logic signed".parse::<DataType>().unwrap(),
            DataType::vector(VectorKind::Logic, None).with_signed(true)
        );
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("".parse::<DataType>().is_err());
        assert_eq!(
            "integral".parse::<DataType>(),
            Err(DataTypeError::UnknownType("integral".to_string()))
        );
        assert_eq!(
            "int [3:0]".parse::<DataType>(),
            Err(DataTypeError::UnexpectedRange("int".to_string()))
        );
        assert_eq!(
            "logic [7]".parse::<DataType>(),
            Err(DataTypeError::InvalidRange("[7]".to_string()))
        );
        assert_eq!(
            "logic [a:0]".parse::<DataType>(),
            Err(DataTypeError::InvalidBound("a".to_string()))
        );
        assert!("logic signedness".parse::<DataType>().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = "logic [7]".parse::<DataType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid range '[7]', expected '[msb:lsb]'");
    }

    #[test]
    fn test_signedness() {
        assert!(DataType::int().is_signed());
        assert!(!DataType::atom(AtomKind::Time).is_signed());
        assert!(!DataType::logic(3, 0).is_signed());
        assert_eq!(DataType::int().with_signed(true).signing_keyword(), None);
        assert_eq!(
            DataType::int().with_signed(false).signing_keyword(),
            Some("unsigned")
        );
        assert_eq!(
            DataType::logic(3, 0).with_signed(true).signing_keyword(),
            Some("signed")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::int().to_string(), "int");
        assert_eq!(
            DataType::int().with_signed(false).to_string(),
            "int unsigned"
        );
        assert_eq!(
            DataType::logic(7, 0).with_signed(true).to_string(),
            "logic signed [7:0]"
        );
    }
}
