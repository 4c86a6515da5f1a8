//! Migrate serialized item blobs between serialized versions
//!
//! Migrating from 2 down to 1 is lossy: option grades and per-option identity
//! are dropped and only the summed stats map and skills are written.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use crate::utils::{LoadedItem, format_bytes, payload_version, read_value, write_value};

/// Rewrite an item file in another serialized version
#[derive(Parser)]
pub struct MigrateItem {
    /// Path to the serialized item file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Target serialized version (1 = flat, 2 = structured)
    #[arg(short, long, value_name = "VERSION")]
    to: i64,

    /// Where to write the migrated item
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,
}

impl MigrateItem {
    pub fn execute(self) -> Result<()> {
        let (value, _) = read_value(&self.file)?;
        let loaded = LoadedItem::decode(&value)
            .with_context(|| format!("Failed to deserialize item: {}", self.file.display()))?;

        let migrated = loaded
            .migrate(self.to)
            .with_context(|| format!("Failed to migrate item to version {}", self.to))?;
        let written = write_value(&self.output, &migrated)?;

        let from = payload_version(&value).unwrap_or(1);
        if from > self.to {
            tracing::warn!(from, to = self.to, "downgrade drops option grades");
        }

        println!(
            "{} {} (v{}) -> {} (v{}, {})",
            style("Migrated:").bold().green(),
            self.file.display(),
            from,
            self.output.display(),
            self.to,
            format_bytes(written)
        );
        Ok(())
    }
}
