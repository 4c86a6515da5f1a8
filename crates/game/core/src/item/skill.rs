use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::codec::{DictReader, FromValue, ToValue, Value, dict};
use crate::error::ItemResult;

/// What a granted skill does.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum SkillCategory {
    #[default]
    Attack,
    Heal,
    Buff,
    Debuff,
}

/// A skill grant: activation chance and power, both integers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    id: i32,
    category: SkillCategory,
    chance: i32,
    power: i32,
}

impl Skill {
    pub fn new(id: i32, category: SkillCategory, chance: i32, power: i32) -> Self {
        Self {
            id,
            category,
            chance,
            power,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn category(&self) -> SkillCategory {
        self.category
    }

    pub fn chance(&self) -> i32 {
        self.chance
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn update(&mut self, chance: i32, power: i32) {
        self.chance = chance;
        self.power = power;
    }
}

impl ToValue for Skill {
    fn to_value(&self) -> Value {
        dict([
            ("skill-id", self.id.into()),
            ("category", self.category.as_ref().into()),
            ("chance", self.chance.into()),
            ("power", self.power.into()),
        ])
    }
}

impl FromValue for Skill {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "skill")?;
        Ok(Self {
            id: reader.int("skill-id")?,
            category: reader.parsed("category")?,
            chance: reader.int("chance")?,
            power: reader.int("power")?,
        })
    }
}
