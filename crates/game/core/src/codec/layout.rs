//! Serialized-version dispatch for item payloads.
//!
//! The version marker is decoded exactly once, at the parse boundary, into a
//! [`SerializedLayout`]; downstream code matches on that and never re-inspects
//! the raw keys.

use core::fmt;

use super::{DictReader, Value};
use crate::error::{ItemError, ItemResult};

/// Key whose presence selects the structured layout.
pub const SERIALIZED_VERSION_KEY: &str = "serialized-version";

/// Versions this crate can write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SerializedVersion {
    /// Flat layout: one summed stats map plus skill lists.
    #[default]
    V1,
    /// Structured layout: graded stat and skill option lists.
    V2,
}

impl SerializedVersion {
    pub const fn number(self) -> i64 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

impl TryFrom<i64> for SerializedVersion {
    type Error = ItemError;

    fn try_from(version: i64) -> ItemResult<Self> {
        match version {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            version => Err(ItemError::UnsupportedVersion { version }),
        }
    }
}

impl fmt::Display for SerializedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// A payload classified by its version marker.
#[derive(Clone, Copy, Debug)]
pub enum SerializedLayout<'a> {
    /// No marker: the legacy flat layout.
    LegacyFlat(DictReader<'a>),
    /// Explicit marker; the version is carried as found.
    Structured {
        version: i64,
        reader: DictReader<'a>,
    },
}

impl<'a> SerializedLayout<'a> {
    pub fn detect(value: &'a Value, context: &'static str) -> ItemResult<Self> {
        let reader = DictReader::new(value, context)?;
        if reader.contains(SERIALIZED_VERSION_KEY) {
            let version = reader.integer(SERIALIZED_VERSION_KEY)?;
            Ok(Self::Structured { version, reader })
        } else {
            Ok(Self::LegacyFlat(reader))
        }
    }
}
