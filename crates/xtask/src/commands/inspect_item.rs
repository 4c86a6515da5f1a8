//! Read and inspect serialized item blobs
//!
//! Decodes a bincode-encoded item payload and displays its options, flat stats
//! map, and the per-attribute base/additional split recovered by decomposition.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use item_core::{EquipmentStats, GameError, ItemOption, ItemUsable, Value};

use crate::utils::{LoadedItem, format_bytes, load_config, payload_version, read_value};

/// Read and inspect an item file
#[derive(Parser)]
pub struct InspectItem {
    /// Path to the serialized item file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Enhancement config TOML (defaults to the built-in curve)
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (identity, options, stat split)
    Summary,
    /// Full JSON output of the keyed payload
    Json,
    /// Pretty-printed debug format of the decoded item
    Debug,
}

impl InspectItem {
    pub fn execute(self) -> Result<()> {
        if !self.file.exists() {
            anyhow::bail!("Item file not found: {}", self.file.display());
        }

        let (value, size) = read_value(&self.file)?;
        let loaded = LoadedItem::decode(&value)
            .with_context(|| format!("Failed to deserialize item: {}", self.file.display()))?;
        let config = load_config(self.config.as_deref())?;

        // Print header
        println!(
            "{} {}",
            style("Item File:").bold().cyan(),
            self.file.display()
        );
        println!("{} {}", style("File Size:").bold().cyan(), format_bytes(size));
        println!(
            "{} {}",
            style("Fingerprint:").bold().cyan(),
            hex::encode(value.fingerprint()?)
        );
        println!();

        match self.format {
            OutputFormat::Summary => {
                print_summary(&value, &loaded);
                let base_attribute = loaded
                    .item()
                    .base_stat_option()
                    .map(|option| option.attribute())
                    .unwrap_or_default();
                match EquipmentStats::from_stats_map(
                    loaded.level(),
                    base_attribute,
                    loaded.item().stats_map(),
                    &config,
                ) {
                    Ok(stats) => print_split(&stats),
                    Err(e) => println!(
                        "{} {} [{}]",
                        style("No stat split:").bold().red(),
                        e,
                        e.error_code()
                    ),
                }
            }
            OutputFormat::Json => print_json(&value)?,
            OutputFormat::Debug => print_debug(&loaded),
        }

        Ok(())
    }
}

fn print_summary(value: &Value, loaded: &LoadedItem) {
    let item = loaded.item();
    let template = item.template();

    println!("{}", style("=== Item Summary ===").bold().green());
    println!();

    println!("{}", style("Identity:").bold().yellow());
    println!("  Item ID: {}", item.item_id());
    println!(
        "  Template: {} ({}, grade {})",
        template.id, template.category, template.grade
    );
    match payload_version(value) {
        Some(version) => println!("  Layout: structured (v{})", version),
        None => println!("  Layout: legacy flat (v1)"),
    }
    println!("  Required Block Index: {}", item.required_block_index());
    println!("  Required Character Level: {}", item.required_character_level());
    if let LoadedItem::Equipment(equipment) = loaded {
        println!("  Enhancement Level: {}", equipment.level());
        println!("  Equipped: {}", equipment.equipped());
    }
    println!();

    print_options(item);

    println!("{}", style("Stats Map:").bold().yellow());
    for entry in item.stats_map().entries() {
        println!(
            "  {:<4} value {:>12}  additional {:>12}",
            entry.attribute, entry.value, entry.additional_value
        );
    }
    println!("  Option Count: {}", item.option_count());
    println!();
}

fn print_options(item: &ItemUsable) {
    println!("{}", style("Options:").bold().yellow());
    match item.base_stat_option() {
        Some(base) => println!(
            "  Base: {} {} (grade {})",
            base.attribute(),
            base.value(),
            base.grade()
        ),
        None => println!("  Base: none"),
    }
    for option in item.stat_options() {
        println!(
            "  Stat: {} {} (grade {})",
            option.attribute(),
            option.value(),
            option.grade()
        );
    }
    for option in item.skill_options() {
        let skill = option.skill();
        println!(
            "  Skill: #{} {} chance {} power {} (grade {})",
            skill.id(),
            skill.category(),
            skill.chance(),
            skill.power(),
            option.grade()
        );
    }
    println!();
}

fn print_split(stats: &EquipmentStats) {
    println!("{}", style("Stat Split:").bold().yellow());
    for (attribute, base, additional) in stats.base_and_additional_raw_stats(true) {
        println!("  {:<4} base {:>12}  additional {:>12}", attribute, base, additional);
    }
    println!();
}

fn render_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize item to JSON")
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

fn print_debug(loaded: &LoadedItem) {
    match loaded {
        LoadedItem::Plain(item) => println!("{:#?}", item),
        LoadedItem::Equipment(equipment) => println!("{:#?}", equipment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::Dict;

    #[test]
    fn json_keeps_keys_and_node_kinds() {
        let value = Value::Dict(Dict::from([
            ("grade".to_owned(), Value::Integer(3)),
            ("stat-type".to_owned(), Value::Text("HP".to_owned())),
        ]));
        let json: serde_json::Value = serde_json::from_str(&render_json(&value).unwrap()).unwrap();
        assert_eq!(json["Dict"]["grade"]["Integer"], 3);
        assert_eq!(json["Dict"]["stat-type"]["Text"], "HP");
    }
}
