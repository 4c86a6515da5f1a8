//! Utility functions for xtask commands

use anyhow::{Context, Result};
use std::path::Path;

use item_core::{
    Equipment, EnhancementConfig, FromValue, ItemUsable, ItemResult, SERIALIZED_VERSION_KEY,
    Value,
};
use item_content::ConfigLoader;

/// A decoded item blob; equipment payloads carry `level` and `equipped`.
pub enum LoadedItem {
    Plain(ItemUsable),
    Equipment(Equipment),
}

impl LoadedItem {
    pub fn decode(value: &Value) -> ItemResult<Self> {
        let is_equipment = value
            .as_dict()
            .is_some_and(|dict| dict.contains_key("level") && dict.contains_key("equipped"));
        if is_equipment {
            Equipment::from_value(value).map(Self::Equipment)
        } else {
            ItemUsable::from_value(value).map(Self::Plain)
        }
    }

    pub fn item(&self) -> &ItemUsable {
        match self {
            Self::Plain(item) => item,
            Self::Equipment(equipment) => equipment.item(),
        }
    }

    /// Enhancement level; plain items are never enhanced.
    pub fn level(&self) -> u32 {
        match self {
            Self::Plain(_) => 0,
            Self::Equipment(equipment) => equipment.level(),
        }
    }

    pub fn migrate(&self, to_version: i64) -> ItemResult<Value> {
        match self {
            Self::Plain(item) => item.migrate_serialized_version(to_version),
            Self::Equipment(equipment) => equipment.migrate_serialized_version(to_version),
        }
    }
}

/// Read an item blob, returning the decoded tree and the file size.
pub fn read_value(path: &Path) -> Result<(Value, usize)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read item file: {}", path.display()))?;
    let value = Value::from_bytes(&bytes)
        .with_context(|| format!("Failed to decode item file: {}", path.display()))?;
    Ok((value, bytes.len()))
}

/// Write an item blob, returning the number of bytes written.
pub fn write_value(path: &Path, value: &Value) -> Result<usize> {
    let bytes = value.to_bytes().context("Failed to encode item payload")?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write item file: {}", path.display()))?;
    Ok(bytes.len())
}

/// Version marker of a raw payload, `None` for the legacy layout.
pub fn payload_version(value: &Value) -> Option<i64> {
    value
        .as_dict()
        .and_then(|dict| dict.get(SERIALIZED_VERSION_KEY))
        .and_then(Value::as_integer)
}

/// Load enhancement config from `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EnhancementConfig> {
    match path {
        Some(path) => ConfigLoader::load(path),
        None => Ok(EnhancementConfig::default()),
    }
}

pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
