//! Deterministic item stat model and persistence shared across tools.
//!
//! `item-core` computes the per-attribute power of equippable items from a base
//! stat, graded options, and repeated enhancement, and owns the versioned keyed
//! layout those items persist in. Every operation is a synchronous value
//! transformation over owned state; supporting crates depend on the types
//! re-exported here.
pub mod codec;
pub mod config;
pub mod error;
pub mod item;
pub mod stats;
pub use codec::{
    Dict, DictReader, FromValue, SERIALIZED_VERSION_KEY, SerializedLayout, SerializedVersion,
    ToValue, Value,
};
pub use config::{EnhancementConfig, EnhancementCurve, RatioPolicy};
pub use error::{ErrorSeverity, GameError, ItemError, ItemResult};
pub use item::{
    Equipment, ItemCategory, ItemOption, ItemOptionKind, ItemTemplate, ItemUsable, Skill,
    SkillCategory, SkillOption, StatOption,
};
pub use stats::{
    AttributeType, AttributeValue, EnhancedAttributeValue, EquipmentStats, GradeAndStat,
    StatMapEntry, StatsMap,
};
