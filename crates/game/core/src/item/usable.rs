//! The option carrier of a concrete item instance.
//!
//! [`ItemUsable`] owns the graded stat and skill options of one item and keeps
//! two projections of them live: the flat [`StatsMap`] and the skill lists.
//! It also owns the versioned persistence contract:
//!
//! | version | layout | keys |
//! |---|---|---|
//! | 1 | flat | `item-id`, `stats-map`, `skills`, `buff-skills`, `required-block-index` |
//! | 2 | structured | `serialized-version`, `item-id`, `base-stat-option`, `stat-options`, `skill-options`, `required-block-index`, `required-character-level` |
//!
//! Both layouts are merged into the template's own keys. Writing v1 from
//! structured options is lossy: grades and per-option identity are discarded,
//! only the summed map and the skills survive.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::{ItemOption, ItemTemplate, Skill, SkillOption, StatOption};
use crate::codec::{
    DictReader, FromValue, SERIALIZED_VERSION_KEY, SerializedLayout, SerializedVersion, ToValue,
    Value, dict, merge,
};
use crate::config::RatioPolicy;
use crate::error::{ItemError, ItemResult};
use crate::stats::{LEGACY_OPTION_GRADE, StatsMap};

/// Grade assigned to options minted from a template row.
pub const TEMPLATE_OPTION_GRADE: i32 = 1;

/// Inserts `option` after every option of equal or higher grade.
///
/// Equivalent to appending and stable-sorting by descending grade.
fn insert_by_grade<T: ItemOption>(options: &mut Vec<T>, option: T) {
    let at = options.partition_point(|existing| existing.grade() >= option.grade());
    options.insert(at, option);
}

fn sort_by_grade<T: ItemOption>(options: &mut [T]) {
    options.sort_by(|a, b| b.grade().cmp(&a.grade()));
}

#[derive(Clone, Debug)]
pub struct ItemUsable {
    template: ItemTemplate,
    item_id: Uuid,
    serialized_version: i64,
    required_block_index: i64,
    required_character_level: i32,
    base_stat_option: Option<StatOption>,
    stat_options: Vec<StatOption>,
    skill_options: Vec<SkillOption>,
    stats_map: StatsMap,
    skills: Vec<Skill>,
    buff_skills: Vec<Skill>,
}

/// Base-item equality plus identity.
impl PartialEq for ItemUsable {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template && self.item_id == other.item_id
    }
}

impl Eq for ItemUsable {}

impl ItemUsable {
    /// Mints a v1 item from a template row.
    pub fn new(template: ItemTemplate, item_id: Uuid, required_block_index: i64) -> ItemResult<Self> {
        Self::with_version(
            SerializedVersion::V1.number(),
            template,
            item_id,
            required_block_index,
            0,
        )
    }

    /// Mints an item that serializes as `serialized_version`.
    ///
    /// The version is recorded as given; an unknown one only fails once the
    /// item is serialized.
    pub fn with_version(
        serialized_version: i64,
        template: ItemTemplate,
        item_id: Uuid,
        required_block_index: i64,
        required_character_level: i32,
    ) -> ItemResult<Self> {
        check_block_index(required_block_index)?;

        let mut stats = template.stats.iter();
        let base_stat_option = stats
            .next()
            .map(|stat| StatOption::from_attribute(TEMPLATE_OPTION_GRADE, stat));
        let mut stat_options: Vec<_> = stats
            .map(|stat| StatOption::from_attribute(TEMPLATE_OPTION_GRADE, stat))
            .collect();
        sort_by_grade(&mut stat_options);

        let mut item = Self {
            template,
            item_id,
            serialized_version,
            required_block_index,
            required_character_level,
            base_stat_option,
            stat_options,
            skill_options: Vec::new(),
            stats_map: StatsMap::new(),
            skills: Vec::new(),
            buff_skills: Vec::new(),
        };
        item.update_stats_map()?;
        item.update_skills();
        Ok(item)
    }

    // ===== accessors =====

    pub fn template(&self) -> &ItemTemplate {
        &self.template
    }

    pub fn item_id(&self) -> Uuid {
        self.item_id
    }

    pub fn serialized_version(&self) -> i64 {
        self.serialized_version
    }

    pub fn required_block_index(&self) -> i64 {
        self.required_block_index
    }

    pub fn required_character_level(&self) -> i32 {
        self.required_character_level
    }

    pub fn base_stat_option(&self) -> Option<&StatOption> {
        self.base_stat_option.as_ref()
    }

    pub fn stat_options(&self) -> &[StatOption] {
        &self.stat_options
    }

    pub fn skill_options(&self) -> &[SkillOption] {
        &self.skill_options
    }

    pub fn stats_map(&self) -> &StatsMap {
        &self.stats_map
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Only ever populated from a v1 payload.
    pub fn buff_skills(&self) -> &[Skill] {
        &self.buff_skills
    }

    /// Number of additional stats plus granted skills.
    pub fn option_count(&self) -> usize {
        self.stats_map.additional_entries().count() + self.skills.len() + self.buff_skills.len()
    }

    // ===== mutation =====

    /// Re-issues the item at `block_index`.
    pub fn update(&mut self, block_index: i64) -> ItemResult<()> {
        check_block_index(block_index)?;
        self.required_block_index = block_index;
        Ok(())
    }

    /// Fails with [`ItemError::ArithmeticOverflow`] if the map's additional
    /// value would overflow; the option is then not added.
    pub fn add_stat_option(&mut self, option: StatOption) -> ItemResult<()> {
        self.stats_map
            .add_additional_value(option.attribute(), option.value())?;
        insert_by_grade(&mut self.stat_options, option);
        Ok(())
    }

    pub fn add_skill_option(&mut self, option: SkillOption) {
        self.skills.push(option.skill().clone());
        insert_by_grade(&mut self.skill_options, option);
    }

    /// One enhancement step over every stat option.
    ///
    /// The base option is scaled by `base_ratio` and the others by `option_ratio`,
    /// each checked against `policy`. Options are enhanced on copies; the carrier
    /// changes only when all of them succeed.
    pub fn enhance_stat_options(
        &mut self,
        base_ratio: Decimal,
        option_ratio: Decimal,
        policy: &RatioPolicy,
    ) -> ItemResult<()> {
        let mut base_stat_option = self.base_stat_option.clone();
        if let Some(option) = base_stat_option.as_mut() {
            option.enhance_with(base_ratio, policy)?;
        }
        let mut stat_options = self.stat_options.clone();
        for option in &mut stat_options {
            option.enhance_with(option_ratio, policy)?;
        }

        let stats_map = project_stats_map(base_stat_option.as_ref(), &stat_options)?;

        self.base_stat_option = base_stat_option;
        self.stat_options = stat_options;
        self.stats_map = stats_map;
        Ok(())
    }

    fn update_stats_map(&mut self) -> ItemResult<()> {
        self.stats_map = project_stats_map(self.base_stat_option.as_ref(), &self.stat_options)?;
        Ok(())
    }

    fn update_skills(&mut self) {
        self.skills = self
            .skill_options
            .iter()
            .map(|option| option.skill().clone())
            .collect();
        self.buff_skills.clear();
    }

    /// Recovers structured options from legacy projections.
    ///
    /// Flat maps carry no grades, so every option gets [`LEGACY_OPTION_GRADE`].
    fn rebuild_legacy_options(&mut self) -> ItemResult<()> {
        let base_attribute = self.template.base_attribute();
        self.base_stat_option = None;
        self.stat_options.clear();

        for entry in self.stats_map.entries() {
            if entry.attribute == base_attribute {
                self.base_stat_option = Some(StatOption::new(
                    LEGACY_OPTION_GRADE,
                    entry.attribute,
                    entry.value,
                ));
                if entry.additional_value.is_zero() {
                    continue;
                }
                self.stat_options.push(StatOption::new(
                    LEGACY_OPTION_GRADE,
                    entry.attribute,
                    entry.additional_value,
                ));
            } else {
                self.stat_options.push(StatOption::new(
                    LEGACY_OPTION_GRADE,
                    entry.attribute,
                    entry.total()?,
                ));
            }
        }

        self.skill_options = self
            .skills
            .iter()
            .chain(&self.buff_skills)
            .map(|skill| SkillOption::new(LEGACY_OPTION_GRADE, skill.clone()))
            .collect();
        Ok(())
    }

    // ===== persistence =====

    /// Serializes in the recorded version.
    pub fn serialize(&self) -> ItemResult<Value> {
        let version = SerializedVersion::try_from(self.serialized_version)?;
        Ok(self.serialize_as(version))
    }

    /// Serializes in `to_version` without changing the recorded version.
    ///
    /// Going from 2 down to 1 drops option grades and identities.
    pub fn migrate_serialized_version(&self, to_version: i64) -> ItemResult<Value> {
        if to_version == self.serialized_version {
            return self.serialize();
        }
        let version = SerializedVersion::try_from(to_version)?;
        tracing::debug!(
            item_id = %self.item_id,
            from = self.serialized_version,
            to = %version,
            "migrating item payload"
        );
        Ok(self.serialize_as(version))
    }

    fn serialize_as(&self, version: SerializedVersion) -> Value {
        let own = match version {
            SerializedVersion::V1 => self.serialize_flat(),
            SerializedVersion::V2 => self.serialize_structured(),
        };
        merge(self.template.to_value(), own)
    }

    fn serialize_flat(&self) -> Value {
        dict([
            ("item-id", self.item_id.into()),
            ("stats-map", self.stats_map.to_value()),
            ("skills", sorted_skills(&self.skills)),
            ("buff-skills", sorted_skills(&self.buff_skills)),
            ("required-block-index", self.required_block_index.into()),
        ])
    }

    fn serialize_structured(&self) -> Value {
        dict([
            (SERIALIZED_VERSION_KEY, SerializedVersion::V2.number().into()),
            ("item-id", self.item_id.into()),
            (
                "base-stat-option",
                self.base_stat_option.as_ref().map(ToValue::to_value).into(),
            ),
            ("stat-options", self.stat_options.to_value()),
            ("skill-options", self.skill_options.to_value()),
            ("required-block-index", self.required_block_index.into()),
            (
                "required-character-level",
                self.required_character_level.into(),
            ),
        ])
    }

    fn deserialize_flat(template: ItemTemplate, reader: DictReader<'_>) -> ItemResult<Self> {
        let required_block_index = reader.integer("required-block-index")?;
        check_block_index(required_block_index)?;

        let mut item = Self {
            template,
            item_id: reader.uuid("item-id")?,
            serialized_version: SerializedVersion::V1.number(),
            required_block_index,
            required_character_level: 0,
            base_stat_option: None,
            stat_options: Vec::new(),
            skill_options: Vec::new(),
            stats_map: reader.nested("stats-map")?,
            skills: reader.nested_list("skills")?,
            buff_skills: reader.nested_list("buff-skills")?,
        };
        item.rebuild_legacy_options()?;
        Ok(item)
    }

    fn deserialize_structured(template: ItemTemplate, reader: DictReader<'_>) -> ItemResult<Self> {
        let required_block_index = reader.integer("required-block-index")?;
        check_block_index(required_block_index)?;

        let mut stat_options: Vec<StatOption> = reader.nested_list("stat-options")?;
        sort_by_grade(&mut stat_options);
        let mut skill_options: Vec<SkillOption> = reader.nested_list("skill-options")?;
        sort_by_grade(&mut skill_options);

        let mut item = Self {
            template,
            item_id: reader.uuid("item-id")?,
            serialized_version: SerializedVersion::V2.number(),
            required_block_index,
            required_character_level: reader.int("required-character-level")?,
            base_stat_option: StatOption::try_from_nullable(reader.required("base-stat-option")?)?,
            stat_options,
            skill_options,
            stats_map: StatsMap::new(),
            skills: Vec::new(),
            buff_skills: Vec::new(),
        };
        item.update_stats_map()?;
        item.update_skills();
        Ok(item)
    }

    /// SHA-256 of the canonical bytes of [`Self::serialize`].
    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> ItemResult<[u8; 32]> {
        self.serialize()?.fingerprint()
    }
}

/// The flat map view of structured options: the base option fills its
/// attribute's primary value, every other option adds to an additional value.
fn project_stats_map(
    base_stat_option: Option<&StatOption>,
    stat_options: &[StatOption],
) -> ItemResult<StatsMap> {
    let mut stats_map = StatsMap::new();
    if let Some(base) = base_stat_option {
        stats_map.add_value(base.attribute(), base.value())?;
    }
    for option in stat_options {
        stats_map.add_additional_value(option.attribute(), option.value())?;
    }
    Ok(stats_map)
}

fn check_block_index(block_index: i64) -> ItemResult<()> {
    if block_index < 0 {
        return Err(ItemError::out_of_range(
            "required block index",
            block_index,
            0,
            i64::MAX,
        ));
    }
    Ok(())
}

/// Descending chance, then descending power.
fn sorted_skills(skills: &[Skill]) -> Value {
    let mut sorted = skills.to_vec();
    sorted.sort_by(|a, b| {
        b.chance()
            .cmp(&a.chance())
            .then_with(|| b.power().cmp(&a.power()))
    });
    sorted.to_value()
}

impl FromValue for ItemUsable {
    /// Dispatches on the version marker: absent means legacy v1, `2` means
    /// structured, anything else is refused.
    fn from_value(value: &Value) -> ItemResult<Self> {
        let layout = SerializedLayout::detect(value, "item-usable")?;
        let template = ItemTemplate::from_value(value)?;
        match layout {
            SerializedLayout::LegacyFlat(reader) => Self::deserialize_flat(template, reader),
            SerializedLayout::Structured { version: 2, reader } => {
                Self::deserialize_structured(template, reader)
            }
            SerializedLayout::Structured { version, .. } => {
                tracing::error!(version, "no deserializer for item payload version");
                Err(ItemError::DeserializeNotImplemented { version })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemCategory, SkillCategory};
    use crate::stats::{AttributeType, AttributeValue};
    use rust_decimal_macros::dec;

    fn ring() -> ItemTemplate {
        ItemTemplate::new(
            10_310_000,
            2,
            ItemCategory::Ring,
            vec![
                AttributeValue::new(AttributeType::Def, dec!(8)),
                AttributeValue::new(AttributeType::Spd, dec!(3)),
            ],
        )
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn template_stats_become_base_and_options() {
        let item = ItemUsable::new(ring(), id(1), 5).unwrap();
        let base = item.base_stat_option().unwrap();
        assert_eq!((base.attribute(), base.value()), (AttributeType::Def, dec!(8)));
        assert_eq!(item.stat_options().len(), 1);
        assert_eq!(item.stats_map().value_of(AttributeType::Def), dec!(8));
        assert_eq!(item.stats_map().additional_of(AttributeType::Spd), dec!(3));
        assert_eq!(item.option_count(), 1);
    }

    #[test]
    fn options_stay_sorted_by_descending_grade() {
        let mut item = ItemUsable::new(ring(), id(1), 0).unwrap();
        item.add_stat_option(StatOption::new(3, AttributeType::Hp, dec!(10))).unwrap();
        item.add_stat_option(StatOption::new(2, AttributeType::Atk, dec!(1))).unwrap();
        item.add_stat_option(StatOption::new(3, AttributeType::Cri, dec!(1))).unwrap();

        let order: Vec<_> = item
            .stat_options()
            .iter()
            .map(|o| (o.grade(), o.attribute()))
            .collect();
        assert_eq!(
            order,
            [
                (3, AttributeType::Hp),
                (3, AttributeType::Cri),
                (2, AttributeType::Atk),
                (1, AttributeType::Spd),
            ]
        );
    }

    #[test]
    fn base_type_options_go_to_additional() {
        let mut item = ItemUsable::new(ring(), id(1), 0).unwrap();
        item.add_stat_option(StatOption::new(2, AttributeType::Def, dec!(4))).unwrap();
        assert_eq!(item.stats_map().value_of(AttributeType::Def), dec!(8));
        assert_eq!(item.stats_map().additional_of(AttributeType::Def), dec!(4));
    }

    #[test]
    fn negative_block_index_is_rejected() {
        assert!(matches!(
            ItemUsable::new(ring(), id(1), -1),
            Err(ItemError::RangeViolation { .. })
        ));
        let mut item = ItemUsable::new(ring(), id(1), 0).unwrap();
        assert!(item.update(-5).is_err());
        assert_eq!(item.required_block_index(), 0);
        item.update(42).unwrap();
        assert_eq!(item.required_block_index(), 42);
    }

    #[test]
    fn identity_is_part_of_equality() {
        let a = ItemUsable::new(ring(), id(1), 0).unwrap();
        let b = ItemUsable::new(ring(), id(2), 0).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, ItemUsable::new(ring(), id(1), 99).unwrap());
    }

    #[test]
    fn unknown_recorded_version_fails_on_serialize() {
        let item = ItemUsable::with_version(3, ring(), id(1), 0, 1).unwrap();
        assert_eq!(
            item.serialize(),
            Err(ItemError::UnsupportedVersion { version: 3 })
        );
        assert!(item.migrate_serialized_version(2).is_ok());
        assert_eq!(
            item.migrate_serialized_version(0),
            Err(ItemError::UnsupportedVersion { version: 0 })
        );
    }

    #[test]
    fn v1_skills_are_sorted_by_chance_then_power() {
        let mut item = ItemUsable::new(ring(), id(1), 0).unwrap();
        for (chance, power) in [(5, 10), (9, 1), (5, 30)] {
            item.add_skill_option(SkillOption::new(
                1,
                Skill::new(1, SkillCategory::Attack, chance, power),
            ));
        }
        let value = item.serialize().unwrap();
        let skills = DictReader::new(&value, "test")
            .unwrap()
            .nested_list::<Skill>("skills")
            .unwrap();
        let order: Vec<_> = skills.iter().map(|s| (s.chance(), s.power())).collect();
        assert_eq!(order, [(9, 1), (5, 30), (5, 10)]);
    }

    #[test]
    fn failed_enhancement_keeps_options() {
        let mut item = ItemUsable::new(ring(), id(1), 0).unwrap();
        item.add_stat_option(StatOption::new(1, AttributeType::Hp, Decimal::MAX)).unwrap();
        let before = item.stat_options().to_vec();
        let map_before = item.stats_map().clone();
        assert!(
            item.enhance_stat_options(dec!(0.1), dec!(0.3), &RatioPolicy::Unbounded)
                .is_err()
        );
        assert_eq!(item.stat_options(), before.as_slice());
        assert_eq!(item.stats_map(), &map_before);
        assert_eq!(item.base_stat_option().unwrap().value(), dec!(8));
    }

    #[test]
    fn overflowing_stat_option_is_reported_and_not_added() {
        let mut item = ItemUsable::new(ring(), id(1), 0).unwrap();
        item.add_stat_option(StatOption::new(1, AttributeType::Hp, Decimal::MAX)).unwrap();

        assert!(matches!(
            item.add_stat_option(StatOption::new(1, AttributeType::Hp, Decimal::MAX)),
            Err(ItemError::ArithmeticOverflow { .. })
        ));
        assert_eq!(item.stat_options().len(), 2);
        assert_eq!(item.stats_map().additional_of(AttributeType::Hp), Decimal::MAX);
    }
}
