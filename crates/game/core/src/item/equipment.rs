use rust_decimal::Decimal;
use uuid::Uuid;

use super::{ItemTemplate, ItemUsable};
use crate::codec::{DictReader, FromValue, Value, dict, merge};
use crate::config::EnhancementConfig;
use crate::error::{ItemError, ItemResult};
use crate::stats::EquipmentStats;

/// An equippable item: one struct for every equipment category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equipment {
    item: ItemUsable,
    level: u32,
    equipped: bool,
}

impl Equipment {
    pub fn new(template: ItemTemplate, item_id: Uuid, required_block_index: i64) -> ItemResult<Self> {
        Self::from_item(ItemUsable::new(template, item_id, required_block_index)?, 0)
    }

    /// Wraps an existing carrier at a known enhancement level.
    pub fn from_item(item: ItemUsable, level: u32) -> ItemResult<Self> {
        let category = item.template().category;
        if !category.is_equipment() {
            return Err(ItemError::NotEquipment { category });
        }
        Ok(Self {
            item,
            level,
            equipped: false,
        })
    }

    pub fn item(&self) -> &ItemUsable {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut ItemUsable {
        &mut self.item
    }

    pub fn into_item(self) -> ItemUsable {
        self.item
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn equipped(&self) -> bool {
        self.equipped
    }

    pub fn equip(&mut self) {
        self.equipped = true;
    }

    pub fn unequip(&mut self) {
        self.equipped = false;
    }

    /// Structured stats recovered from the flat map at the current level.
    pub fn equipment_stats(&self, config: &EnhancementConfig) -> ItemResult<EquipmentStats> {
        let base_attribute = self
            .item
            .base_stat_option()
            .map(|option| option.attribute())
            .unwrap_or_default();
        EquipmentStats::from_stats_map(self.level, base_attribute, self.item.stats_map(), config)
    }

    /// One enhancement level: the base option grows by `base_growth`, every
    /// other stat option by `option_growth`.
    pub fn enhance(&mut self, config: &EnhancementConfig) -> ItemResult<()> {
        let level = self
            .level
            .checked_add(1)
            .ok_or_else(|| ItemError::overflow("incrementing enhancement level"))?;
        config.check_level(level)?;

        let base_ratio = config.curve.base_growth - Decimal::ONE;
        let option_ratio = config.curve.option_growth - Decimal::ONE;
        self.item
            .enhance_stat_options(base_ratio, option_ratio, &config.ratio_policy)?;
        self.level = level;

        tracing::debug!(item_id = %self.item.item_id(), level, "enhanced equipment");
        Ok(())
    }

    /// Carrier payload plus `level` and `equipped`.
    pub fn serialize(&self) -> ItemResult<Value> {
        Ok(merge(self.item.serialize()?, self.own_keys()))
    }

    pub fn migrate_serialized_version(&self, to_version: i64) -> ItemResult<Value> {
        Ok(merge(
            self.item.migrate_serialized_version(to_version)?,
            self.own_keys(),
        ))
    }

    fn own_keys(&self) -> Value {
        dict([
            ("level", self.level.into()),
            ("equipped", self.equipped.into()),
        ])
    }

    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> ItemResult<[u8; 32]> {
        self.serialize()?.fingerprint()
    }
}

impl FromValue for Equipment {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "equipment")?;
        let mut equipment = Self::from_item(ItemUsable::from_value(value)?, reader.uint("level")?)?;
        equipment.equipped = reader.boolean("equipped")?;
        Ok(equipment)
    }
}
