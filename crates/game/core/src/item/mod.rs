//! Items: templates, options, the option carrier, and equipment.
//!
//! ```text
//! ItemTemplate ──mint──▶ ItemUsable ──wrap──▶ Equipment
//!                        │  base StatOption
//!                        │  StatOption* / SkillOption*   (descending grade)
//!                        └─ StatsMap / skills            (live projections)
//! ```

pub mod equipment;
pub mod option;
pub mod skill;
pub mod template;
pub mod usable;

pub use equipment::Equipment;
pub use option::{ItemOption, ItemOptionKind, SkillOption, StatOption};
pub use skill::{Skill, SkillCategory};
pub use template::{ItemCategory, ItemTemplate};
pub use usable::{ItemUsable, TEMPLATE_OPTION_GRADE};
