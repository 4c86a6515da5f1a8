//! Typed key lookups over a [`Dict`].
//!
//! Every failed lookup or cast becomes an [`ItemError::InvalidFormat`] naming
//! the structure and key, and is logged before it is returned.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::{Dict, FromValue, Value};
use crate::error::{ItemError, ItemResult};

/// Read-only view of a dict node that knows what it is decoding.
#[derive(Clone, Copy, Debug)]
pub struct DictReader<'a> {
    dict: &'a Dict,
    context: &'static str,
}

impl<'a> DictReader<'a> {
    /// Casts `value` to a dict, failing with `InvalidFormat` otherwise.
    pub fn new(value: &'a Value, context: &'static str) -> ItemResult<Self> {
        match value {
            Value::Dict(dict) => Ok(Self { dict, context }),
            other => Err(ItemError::invalid_format(
                context,
                "<root>",
                format!("expected dict, found {}", other.kind()),
            )),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.dict.contains_key(key)
    }

    /// All entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + use<'a> {
        self.dict.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn required(&self, key: &str) -> ItemResult<&'a Value> {
        self.dict
            .get(key)
            .ok_or_else(|| ItemError::invalid_format(self.context, key, "missing key"))
    }

    fn mismatch(&self, key: &str, expected: &str, found: &Value) -> ItemError {
        ItemError::invalid_format(
            self.context,
            key,
            format!("expected {expected}, found {}", found.kind()),
        )
    }

    pub fn integer(&self, key: &str) -> ItemResult<i64> {
        let value = self.required(key)?;
        value
            .as_integer()
            .ok_or_else(|| self.mismatch(key, "integer", value))
    }

    /// Integer narrowed to `i32`.
    pub fn int(&self, key: &str) -> ItemResult<i32> {
        let wide = self.integer(key)?;
        i32::try_from(wide).map_err(|_| {
            ItemError::invalid_format(self.context, key, format!("{wide} does not fit in i32"))
        })
    }

    /// Integer narrowed to `u32`.
    pub fn uint(&self, key: &str) -> ItemResult<u32> {
        let wide = self.integer(key)?;
        u32::try_from(wide).map_err(|_| {
            ItemError::invalid_format(self.context, key, format!("{wide} does not fit in u32"))
        })
    }

    pub fn decimal(&self, key: &str) -> ItemResult<Decimal> {
        let value = self.required(key)?;
        value
            .as_decimal()
            .ok_or_else(|| self.mismatch(key, "decimal", value))
    }

    pub fn text(&self, key: &str) -> ItemResult<&'a str> {
        let value = self.required(key)?;
        value
            .as_text()
            .ok_or_else(|| self.mismatch(key, "text", value))
    }

    pub fn boolean(&self, key: &str) -> ItemResult<bool> {
        let value = self.required(key)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(key, "boolean", value))
    }

    pub fn list(&self, key: &str) -> ItemResult<&'a [Value]> {
        let value = self.required(key)?;
        value
            .as_list()
            .ok_or_else(|| self.mismatch(key, "list", value))
    }

    /// Fixed-width identifier stored as 16 raw bytes.
    pub fn uuid(&self, key: &str) -> ItemResult<Uuid> {
        let value = self.required(key)?;
        let bytes = value
            .as_binary()
            .ok_or_else(|| self.mismatch(key, "binary", value))?;
        Uuid::from_slice(bytes)
            .map_err(|e| ItemError::invalid_format(self.context, key, e.to_string()))
    }

    /// Parses `key` as a nested structure.
    pub fn nested<T: FromValue>(&self, key: &str) -> ItemResult<T> {
        T::from_value(self.required(key)?)
    }

    /// Parses every element of the list at `key`, preserving order.
    pub fn nested_list<T: FromValue>(&self, key: &str) -> ItemResult<Vec<T>> {
        self.list(key)?.iter().map(T::from_value).collect()
    }

    /// Parses an enum stored by name (strum `EnumString`).
    pub fn parsed<T>(&self, key: &str) -> ItemResult<T>
    where
        T: core::str::FromStr,
        T::Err: core::fmt::Display,
    {
        let text = self.text(key)?;
        text.parse()
            .map_err(|e: T::Err| ItemError::invalid_format(self.context, key, format!("'{text}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::dict;

    #[test]
    fn missing_key_is_invalid_format_with_context() {
        let value = dict([("grade", 1.into())]);
        let reader = DictReader::new(&value, "stat-option").unwrap();
        let err = reader.decimal("stat-value").unwrap_err();
        assert_eq!(
            err,
            ItemError::InvalidFormat {
                context: "stat-option",
                key: "stat-value".into(),
                reason: "missing key".into(),
            }
        );
    }

    #[test]
    fn wrong_kind_is_invalid_format() {
        let value = dict([("grade", "one".into())]);
        let reader = DictReader::new(&value, "stat-option").unwrap();
        assert!(matches!(
            reader.integer("grade"),
            Err(ItemError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn non_dict_root_is_rejected() {
        let value = Value::List(vec![]);
        assert!(DictReader::new(&value, "equipment-stats").is_err());
    }

    #[test]
    fn uuid_requires_sixteen_bytes() {
        let value = dict([("item-id", Value::Binary(vec![1, 2, 3]))]);
        let reader = DictReader::new(&value, "item").unwrap();
        assert!(reader.uuid("item-id").is_err());

        let id = Uuid::from_u128(42);
        let value = dict([("item-id", id.into())]);
        let reader = DictReader::new(&value, "item").unwrap();
        assert_eq!(reader.uuid("item-id").unwrap(), id);
    }
}
