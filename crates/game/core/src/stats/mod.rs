//! Item stat model.
//!
//! ```text
//! [ AttributeValue / EnhancedAttributeValue ]   single contributors
//!      ↓
//! [ EquipmentStats ]                            base + ordered options, six totals
//!      ↕  decompose / TryFrom<&EquipmentStats>
//! [ StatsMap ]                                  flat legacy view
//! ```
//!
//! ## Principles
//!
//! 1. **Totals are derived**: recomputed from contributors after every mutation
//! 2. **Per-contributor floor**: each contributor adds `max(0, value)`
//! 3. **One curve**: enhancement and decomposition read the same growth factors
//! 4. **Fixed order**: every view enumerates HP, ATK, DEF, CRI, HIT, SPD

pub mod attribute;
pub mod decompose;
pub mod equipment;
pub mod map;

pub use attribute::{
    AttributeType, AttributeValue, EnhancedAttributeValue, floor_to_int, truncate_to_int,
};
pub use decompose::{LEGACY_OPTION_GRADE, split_enhanced};
pub use equipment::{EquipmentStats, GradeAndStat};
pub use map::{StatMapEntry, StatsMap};
