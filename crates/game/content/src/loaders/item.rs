//! Item template catalog loader.

use std::collections::HashSet;
use std::path::Path;

use item_core::ItemTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
///
/// ```ron
/// (
///     items: [
///         (
///             id: 10100000,
///             grade: 1,
///             category: Weapon,
///             stats: [(attribute: ATK, value: "11")],
///         ),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemTemplate>,
}

impl ItemCatalog {
    /// Finds a template by id.
    pub fn get(&self, id: i32) -> Option<&ItemTemplate> {
        self.items.iter().find(|template| template.id == id)
    }

    /// Rejects duplicate ids and equipment templates without a base stat.
    pub fn validate(&self) -> LoadResult<()> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for template in &self.items {
            if !seen.insert(template.id) {
                anyhow::bail!("Duplicate item template id {}", template.id);
            }
            if template.category.is_equipment() && template.base_stat().is_none() {
                anyhow::bail!(
                    "Equipment template {} ({}) has no base stat",
                    template.id,
                    template.category
                );
            }
        }
        Ok(())
    }
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    ///
    /// # Returns
    ///
    /// Returns the validated ItemCatalog.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        catalog.validate()?;

        tracing::debug!(count = catalog.items.len(), "loaded item catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::{AttributeType, ItemCategory};
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_catalog(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_catalog() {
        let file = write_catalog(
            r#"(
    items: [
        (
            id: 10100000,
            grade: 1,
            category: Weapon,
            stats: [(attribute: ATK, value: "11.5"), (attribute: HIT, value: "2")],
        ),
        (
            id: 201000,
            grade: 1,
            category: Consumable,
            stats: [],
        ),
    ],
)"#,
        );

        let catalog = ItemLoader::load(file.path()).unwrap();
        assert_eq!(catalog.items.len(), 2);
        let weapon = catalog.get(10_100_000).unwrap();
        assert_eq!(weapon.category, ItemCategory::Weapon);
        assert_eq!(weapon.base_attribute(), AttributeType::Atk);
        assert_eq!(weapon.stats[0].value, dec!(11.5));
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let file = write_catalog(
            r#"(items: [
    (id: 1, grade: 1, category: Ring, stats: [(attribute: SPD, value: "1")]),
    (id: 1, grade: 2, category: Belt, stats: [(attribute: HP, value: "5")]),
])"#,
        );
        let err = ItemLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_equipment_without_base_stat_is_rejected() {
        let file = write_catalog(r#"(items: [(id: 7, grade: 1, category: Armor, stats: [])])"#);
        assert!(ItemLoader::load(file.path()).is_err());
    }
}
