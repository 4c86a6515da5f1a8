use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::codec::{DictReader, FromValue, ToValue, Value, dict};
use crate::error::ItemResult;
use crate::stats::{AttributeType, AttributeValue};

/// Item category tag; replaces a per-category type hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Belt,
    Necklace,
    Ring,
    Consumable,
}

impl ItemCategory {
    pub const fn is_equipment(self) -> bool {
        !matches!(self, ItemCategory::Consumable)
    }
}

/// Template row an item instance is minted from.
///
/// `stats[0]` is the base stat; any further entries are extra stats that become
/// grade-1 options on the minted item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub id: i32,
    pub grade: i32,
    pub category: ItemCategory,
    pub stats: Vec<AttributeValue>,
}

impl ItemTemplate {
    pub fn new(id: i32, grade: i32, category: ItemCategory, stats: Vec<AttributeValue>) -> Self {
        Self {
            id,
            grade,
            category,
            stats,
        }
    }

    pub fn base_stat(&self) -> Option<&AttributeValue> {
        self.stats.first()
    }

    /// Attribute of the base stat, `None` for a template without stats.
    pub fn base_attribute(&self) -> AttributeType {
        self.base_stat()
            .map(|stat| stat.attribute)
            .unwrap_or_default()
    }
}

impl ToValue for ItemTemplate {
    fn to_value(&self) -> Value {
        dict([
            ("id", self.id.into()),
            ("grade", self.grade.into()),
            ("item-category", self.category.as_ref().into()),
            ("stats", self.stats.to_value()),
        ])
    }
}

impl FromValue for ItemTemplate {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "item-template")?;
        Ok(Self {
            id: reader.int("id")?,
            grade: reader.int("grade")?,
            category: reader.parsed("item-category")?,
            stats: reader.nested_list("stats")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn only_consumables_are_not_equipment() {
        use strum::IntoEnumIterator;
        let equipment: Vec<_> = ItemCategory::iter().filter(|c| c.is_equipment()).collect();
        assert_eq!(equipment.len(), 5);
        assert!(!ItemCategory::Consumable.is_equipment());
    }

    #[test]
    fn base_attribute_is_first_stat() {
        let template = ItemTemplate::new(
            10_100_000,
            1,
            ItemCategory::Weapon,
            vec![
                AttributeValue::new(AttributeType::Atk, dec!(11)),
                AttributeValue::new(AttributeType::Hit, dec!(2)),
            ],
        );
        assert_eq!(template.base_attribute(), AttributeType::Atk);
        assert_eq!(ItemTemplate::from_value(&template.to_value()).unwrap(), template);

        let empty = ItemTemplate::new(1, 1, ItemCategory::Consumable, vec![]);
        assert_eq!(empty.base_attribute(), AttributeType::None);
    }
}
