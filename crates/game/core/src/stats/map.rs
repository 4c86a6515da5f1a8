//! Flat historical stats map.
//!
//! The legacy (v1) persistence format stores only a final summed value per
//! attribute, split into a primary value and an additional value. This module
//! owns that representation; [`super::EquipmentStats`] converts to and from it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::{AttributeType, EquipmentStats};
use crate::codec::{Dict, DictReader, FromValue, ToValue, Value, dict};
use crate::error::{ItemError, ItemResult};

/// One attribute's flat entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatMapEntry {
    pub attribute: AttributeType,
    pub value: Decimal,
    pub additional_value: Decimal,
}

impl StatMapEntry {
    fn empty(attribute: AttributeType) -> Self {
        Self {
            attribute,
            value: Decimal::ZERO,
            additional_value: Decimal::ZERO,
        }
    }

    /// `value + additional_value`, or [`ItemError::ArithmeticOverflow`].
    pub fn total(&self) -> ItemResult<Decimal> {
        self.value
            .checked_add(self.additional_value)
            .ok_or_else(|| ItemError::overflow("summing a stats map entry"))
    }
}

/// `attribute -> (value, additional_value)`.
///
/// Entries exist only for attributes that were touched, and iterate in the fixed
/// HP, ATK, DEF, CRI, HIT, SPD order. [`AttributeType::None`] is never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsMap {
    entries: BTreeMap<AttributeType, StatMapEntry>,
}

impl StatsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, attribute: AttributeType) -> Option<&StatMapEntry> {
        self.entries.get(&attribute)
    }

    pub fn entries(&self) -> impl Iterator<Item = &StatMapEntry> {
        self.entries.values()
    }

    /// Entries whose additional value is nonzero.
    pub fn additional_entries(&self) -> impl Iterator<Item = &StatMapEntry> {
        self.entries
            .values()
            .filter(|entry| !entry.additional_value.is_zero())
    }

    pub fn value_of(&self, attribute: AttributeType) -> Decimal {
        self.get(attribute).map_or(Decimal::ZERO, |e| e.value)
    }

    pub fn additional_of(&self, attribute: AttributeType) -> Decimal {
        self.get(attribute).map_or(Decimal::ZERO, |e| e.additional_value)
    }

    pub fn total_of(&self, attribute: AttributeType) -> ItemResult<Decimal> {
        self.get(attribute).map_or(Ok(Decimal::ZERO), StatMapEntry::total)
    }

    fn entry_mut(&mut self, attribute: AttributeType) -> Option<&mut StatMapEntry> {
        if attribute.is_none() {
            return None;
        }
        Some(
            self.entries
                .entry(attribute)
                .or_insert_with(|| StatMapEntry::empty(attribute)),
        )
    }

    pub fn set_value(&mut self, attribute: AttributeType, value: Decimal) {
        if let Some(entry) = self.entry_mut(attribute) {
            entry.value = value;
        }
    }

    /// Adds to the primary value; on overflow the entry is left as it was.
    pub fn add_value(&mut self, attribute: AttributeType, value: Decimal) -> ItemResult<()> {
        if let Some(entry) = self.entry_mut(attribute) {
            entry.value = entry
                .value
                .checked_add(value)
                .ok_or_else(|| ItemError::overflow("adding to a stats map value"))?;
        }
        Ok(())
    }

    pub fn set_additional_value(&mut self, attribute: AttributeType, value: Decimal) {
        if let Some(entry) = self.entry_mut(attribute) {
            entry.additional_value = value;
        }
    }

    /// Adds to the additional value; on overflow the entry is left as it was.
    pub fn add_additional_value(
        &mut self,
        attribute: AttributeType,
        value: Decimal,
    ) -> ItemResult<()> {
        if let Some(entry) = self.entry_mut(attribute) {
            entry.additional_value = entry
                .additional_value
                .checked_add(value)
                .ok_or_else(|| ItemError::overflow("adding to a stats map additional value"))?;
        }
        Ok(())
    }
}

impl TryFrom<&EquipmentStats> for StatsMap {
    type Error = ItemError;

    /// The base stat becomes the primary value of its attribute; every option,
    /// including ones sharing the base attribute, adds to an additional value.
    fn try_from(stats: &EquipmentStats) -> ItemResult<Self> {
        let mut map = StatsMap::new();
        let base = stats.base_stat();
        map.set_value(base.attribute(), base.value());
        for option in stats.option_stats() {
            map.add_additional_value(option.stat.attribute(), option.stat.value())?;
        }
        Ok(map)
    }
}

impl ToValue for StatsMap {
    fn to_value(&self) -> Value {
        let entries: Dict = self
            .entries
            .values()
            .map(|entry| {
                (
                    entry.attribute.as_ref().to_owned(),
                    dict([
                        ("value", entry.value.into()),
                        ("additional-value", entry.additional_value.into()),
                    ]),
                )
            })
            .collect();
        Value::Dict(entries)
    }
}

impl FromValue for StatsMap {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "stats-map")?;

        let mut map = StatsMap::new();
        for (key, raw) in reader.entries() {
            let attribute: AttributeType = key
                .parse()
                .map_err(|e| ItemError::invalid_format("stats-map", key, format!("{e}")))?;
            let entry = DictReader::new(raw, "stats-map-entry")?;
            map.set_value(attribute, entry.decimal("value")?);
            map.set_additional_value(attribute, entry.decimal("additional-value")?);
        }
        Ok(map)
    }
}
