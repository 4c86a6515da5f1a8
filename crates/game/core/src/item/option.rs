//! Graded, enhanceable item options.
//!
//! Options are independent of any carrier: a [`StatOption`] scales a decimal
//! stat value, a [`SkillOption`] scales the integer chance and power of a skill.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use strum::{AsRefStr, Display, EnumString};

use super::Skill;
use crate::codec::{DictReader, FromValue, ToValue, Value, dict};
use crate::config::RatioPolicy;
use crate::error::{ItemError, ItemResult};
use crate::stats::{AttributeType, AttributeValue, truncate_to_int};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ItemOptionKind {
    Stat,
    Skill,
}

/// Behavior shared by every option kind.
///
/// Grade and identity never change; only the scalar payload is enhanced.
pub trait ItemOption {
    fn grade(&self) -> i32;

    fn kind(&self) -> ItemOptionKind;

    /// Multiplies the payload by `1 + ratio` after checking `ratio` against `policy`.
    ///
    /// On any error the option is left unchanged.
    fn enhance_with(&mut self, ratio: Decimal, policy: &RatioPolicy) -> ItemResult<()>;

    /// [`Self::enhance_with`] under [`RatioPolicy::Unbounded`].
    fn enhance(&mut self, ratio: Decimal) -> ItemResult<()> {
        self.enhance_with(ratio, &RatioPolicy::Unbounded)
    }
}

fn growth_factor(ratio: Decimal) -> ItemResult<Decimal> {
    Decimal::ONE
        .checked_add(ratio)
        .ok_or_else(|| ItemError::overflow("computing an enhancement factor"))
}

// ============================================================================
// StatOption
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatOption {
    grade: i32,
    attribute: AttributeType,
    value: Decimal,
}

impl StatOption {
    pub fn new(grade: i32, attribute: AttributeType, value: Decimal) -> Self {
        Self {
            grade,
            attribute,
            value,
        }
    }

    pub fn from_attribute(grade: i32, stat: &AttributeValue) -> Self {
        Self::new(grade, stat.attribute, stat.value)
    }

    pub fn attribute(&self) -> AttributeType {
        self.attribute
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Integer view, rounding toward zero.
    pub fn value_as_int(&self) -> i32 {
        truncate_to_int(self.value)
    }

    /// Reads a nullable slot: `Null` is `None`, a dict is an option.
    pub fn try_from_nullable(value: &Value) -> ItemResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            value => Self::from_value(value).map(Some),
        }
    }
}

impl ItemOption for StatOption {
    fn grade(&self) -> i32 {
        self.grade
    }

    fn kind(&self) -> ItemOptionKind {
        ItemOptionKind::Stat
    }

    fn enhance_with(&mut self, ratio: Decimal, policy: &RatioPolicy) -> ItemResult<()> {
        policy.check(ratio)?;
        self.value = self
            .value
            .checked_mul(growth_factor(ratio)?)
            .ok_or_else(|| ItemError::overflow("enhancing a stat option"))?;
        Ok(())
    }
}

impl ToValue for StatOption {
    fn to_value(&self) -> Value {
        dict([
            ("grade", self.grade.into()),
            ("stat-type", self.attribute.as_ref().into()),
            ("stat-value", self.value.into()),
        ])
    }
}

impl FromValue for StatOption {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "stat-option")?;
        Ok(Self {
            grade: reader.int("grade")?,
            attribute: reader.parsed("stat-type")?,
            value: reader.decimal("stat-value")?,
        })
    }
}

// ============================================================================
// SkillOption
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillOption {
    grade: i32,
    skill: Skill,
}

impl SkillOption {
    pub fn new(grade: i32, skill: Skill) -> Self {
        Self { grade, skill }
    }

    pub fn skill(&self) -> &Skill {
        &self.skill
    }
}

/// `value * factor`, truncated toward zero, failing when it leaves `i32`.
fn scale_truncated(value: i32, factor: Decimal, what: &'static str) -> ItemResult<i32> {
    Decimal::from(value)
        .checked_mul(factor)
        .and_then(|scaled| scaled.trunc().to_i32())
        .ok_or_else(|| ItemError::overflow(what))
}

impl ItemOption for SkillOption {
    fn grade(&self) -> i32 {
        self.grade
    }

    fn kind(&self) -> ItemOptionKind {
        ItemOptionKind::Skill
    }

    fn enhance_with(&mut self, ratio: Decimal, policy: &RatioPolicy) -> ItemResult<()> {
        policy.check(ratio)?;
        let factor = growth_factor(ratio)?;
        let chance = scale_truncated(self.skill.chance(), factor, "enhancing skill chance")?;
        let power = scale_truncated(self.skill.power(), factor, "enhancing skill power")?;
        self.skill.update(chance, power);
        Ok(())
    }
}

impl ToValue for SkillOption {
    fn to_value(&self) -> Value {
        dict([
            ("grade", self.grade.into()),
            ("skill", self.skill.to_value()),
        ])
    }
}

impl FromValue for SkillOption {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "skill-option")?;
        Ok(Self {
            grade: reader.int("grade")?,
            skill: reader.nested("skill")?,
        })
    }
}
