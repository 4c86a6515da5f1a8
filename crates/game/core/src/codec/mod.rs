//! Keyed persistence codec.
//!
//! Domain types convert to and from the [`Value`] tree through [`ToValue`] and
//! [`FromValue`]. With the `serde` feature, a tree encodes to deterministic
//! bincode bytes and a SHA-256 fingerprint of those bytes.

mod layout;
mod reader;
mod value;

pub use layout::{SERIALIZED_VERSION_KEY, SerializedLayout, SerializedVersion};
pub use reader::DictReader;
pub use value::{Dict, Value, dict, merge};

use crate::error::ItemResult;

/// Conversion into the keyed persistence tree.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Conversion out of the keyed persistence tree.
///
/// Implementations fail with [`crate::ItemError::InvalidFormat`] on any cast or
/// missing key; they never return a partially decoded value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> ItemResult<Self>;
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

#[cfg(feature = "serde")]
impl Value {
    /// Deterministic binary encoding.
    pub fn to_bytes(&self) -> ItemResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| crate::ItemError::invalid_format("value", "<bytes>", e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> ItemResult<Self> {
        bincode::deserialize(bytes)
            .map_err(|e| crate::ItemError::invalid_format("value", "<bytes>", e.to_string()))
    }

    /// SHA-256 over the canonical byte encoding.
    ///
    /// Two trees with the same content always hash the same because dict keys
    /// are ordered; higher layers compare fingerprints to detect state changes.
    pub fn fingerprint(&self) -> ItemResult<[u8; 32]> {
        use sha2::{Digest, Sha256};

        let bytes = self.to_bytes()?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hasher.finalize().into())
    }
}
