use std::path::PathBuf;

use item_content::ContentFactory;
use item_core::{EnhancementConfig, Equipment, ItemCategory, ItemError};

/// Workspace `data/` directory.
fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn test_shipped_config_matches_defaults() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().expect("load enhancement.toml");
    assert_eq!(config, EnhancementConfig::default());
}

#[test]
fn test_shipped_catalog_mints_equipment() {
    let factory = ContentFactory::new(data_dir());
    let catalog = factory.load_items().expect("load items.ron");
    let config = factory.load_config().expect("load enhancement.toml");

    for template in &catalog.items {
        // Nil id: only the stat model is under test here.
        let minted = Equipment::new(template.clone(), Default::default(), 0);
        if template.category == ItemCategory::Consumable {
            assert!(matches!(minted, Err(ItemError::NotEquipment { .. })));
        } else {
            let equipment = minted.expect("equipment template");
            let stats = equipment.equipment_stats(&config).expect("decompose");
            assert_eq!(stats.base_stat_type(), template.base_attribute());
        }
    }
}
