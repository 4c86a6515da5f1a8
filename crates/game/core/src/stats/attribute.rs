//! Attribute identifiers and single-attribute values.
//!
//! [`AttributeValue`] is a plain named number. [`EnhancedAttributeValue`] splits
//! the same number into an immutable base portion and an enhanced portion that
//! only enhancement ever changes.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::codec::{DictReader, FromValue, ToValue, Value, dict};
use crate::error::{ItemError, ItemResult};

/// Closed set of item attributes.
///
/// `None` never participates in totals. Ordering follows declaration order,
/// which is also the fixed enumeration order of every stat view.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[strum(serialize_all = "UPPERCASE")]
pub enum AttributeType {
    #[default]
    None,
    Hp,
    Atk,
    Def,
    Cri,
    Hit,
    Spd,
}

impl AttributeType {
    /// The six attributes that carry totals, in enumeration order.
    pub const TOTALED: [AttributeType; 6] = [
        AttributeType::Hp,
        AttributeType::Atk,
        AttributeType::Def,
        AttributeType::Cri,
        AttributeType::Hit,
        AttributeType::Spd,
    ];

    pub const fn is_none(self) -> bool {
        matches!(self, AttributeType::None)
    }

    /// Position in [`Self::TOTALED`], or `None` for [`AttributeType::None`].
    pub const fn slot(self) -> Option<usize> {
        match self {
            AttributeType::None => None,
            AttributeType::Hp => Some(0),
            AttributeType::Atk => Some(1),
            AttributeType::Def => Some(2),
            AttributeType::Cri => Some(3),
            AttributeType::Hit => Some(4),
            AttributeType::Spd => Some(5),
        }
    }
}

/// Floor-rounded integer view, saturating at the `i32` range.
pub fn floor_to_int(value: Decimal) -> i32 {
    saturate(value.floor(), value)
}

/// Integer view rounding toward zero, saturating at the `i32` range.
pub fn truncate_to_int(value: Decimal) -> i32 {
    saturate(value.trunc(), value)
}

fn saturate(rounded: Decimal, original: Decimal) -> i32 {
    rounded.to_i32().unwrap_or(if original.is_sign_negative() {
        i32::MIN
    } else {
        i32::MAX
    })
}

/// A single named attribute value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeValue {
    pub attribute: AttributeType,
    pub value: Decimal,
}

impl AttributeValue {
    pub fn new(attribute: AttributeType, value: Decimal) -> Self {
        Self { attribute, value }
    }

    pub fn value_as_int(&self) -> i32 {
        floor_to_int(self.value)
    }

    /// What this value adds to a total: negatives count as zero.
    pub fn contribution(&self) -> Decimal {
        self.value.max(Decimal::ZERO)
    }
}

impl ToValue for AttributeValue {
    fn to_value(&self) -> Value {
        dict([
            ("stat-type", self.attribute.as_ref().into()),
            ("value", self.value.into()),
        ])
    }
}

impl FromValue for AttributeValue {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "attribute-value")?;
        Ok(Self {
            attribute: reader.parsed("stat-type")?,
            value: reader.decimal("value")?,
        })
    }
}

/// An attribute value split into base and enhanced portions.
///
/// `value() == base_portion() + enhanced_portion()` always holds. The base
/// portion is fixed at construction; enhancement only rewrites the enhanced one.
/// The sum is checked once when the portions are set, so a pair whose sum
/// does not fit a `Decimal` can never be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnhancedAttributeValue {
    attribute: AttributeType,
    base: Decimal,
    enhanced: Decimal,
    value: Decimal,
}

impl EnhancedAttributeValue {
    /// A fresh value: everything is base, nothing enhanced.
    pub fn new(attribute: AttributeType, value: Decimal) -> Self {
        Self {
            attribute,
            base: value,
            enhanced: Decimal::ZERO,
            value,
        }
    }

    /// Fails with [`ItemError::ArithmeticOverflow`] when `base + enhanced` overflows.
    pub fn with_portions(
        attribute: AttributeType,
        base: Decimal,
        enhanced: Decimal,
    ) -> ItemResult<Self> {
        let value = base
            .checked_add(enhanced)
            .ok_or_else(|| ItemError::overflow("summing base and enhanced portions"))?;
        Ok(Self {
            attribute,
            base,
            enhanced,
            value,
        })
    }

    pub fn attribute(&self) -> AttributeType {
        self.attribute
    }

    pub fn base_portion(&self) -> Decimal {
        self.base
    }

    pub fn enhanced_portion(&self) -> Decimal {
        self.enhanced
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn value_as_int(&self) -> i32 {
        floor_to_int(self.value())
    }

    pub fn contribution(&self) -> Decimal {
        self.value().max(Decimal::ZERO)
    }

    /// Compounds the current value by `growth`, keeping the base portion.
    ///
    /// `enhanced' = (base + enhanced) * growth - base`, which is exactly what
    /// dividing by `growth` undoes during decomposition.
    pub(crate) fn grown(&self, growth: Decimal) -> ItemResult<Self> {
        let grown = self
            .value
            .checked_mul(growth)
            .ok_or_else(|| ItemError::overflow("growing an enhanced value"))?;
        let enhanced = grown
            .checked_sub(self.base)
            .ok_or_else(|| ItemError::overflow("growing an enhanced value"))?;
        Ok(Self {
            enhanced,
            value: grown,
            ..self.clone()
        })
    }
}

impl ToValue for EnhancedAttributeValue {
    fn to_value(&self) -> Value {
        dict([
            ("stat-type", self.attribute.as_ref().into()),
            ("base-value", self.base.into()),
            ("enhanced-value", self.enhanced.into()),
        ])
    }
}

impl FromValue for EnhancedAttributeValue {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "enhanced-stat")?;
        Self::with_portions(
            reader.parsed("stat-type")?,
            reader.decimal("base-value")?,
            reader.decimal("enhanced-value")?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip_through_strum() {
        for attribute in AttributeType::iter() {
            let name = attribute.as_ref();
            assert_eq!(name.parse::<AttributeType>().unwrap(), attribute);
        }
        assert_eq!(AttributeType::Hp.as_ref(), "HP");
        assert_eq!(AttributeType::None.to_string(), "NONE");
    }

    #[test]
    fn totaled_excludes_none_and_matches_slots() {
        for (index, attribute) in AttributeType::TOTALED.iter().enumerate() {
            assert_eq!(attribute.slot(), Some(index));
        }
        assert_eq!(AttributeType::None.slot(), None);
    }

    #[test]
    fn integer_views() {
        assert_eq!(floor_to_int(dec!(1.9)), 1);
        assert_eq!(floor_to_int(dec!(-1.1)), -2);
        assert_eq!(truncate_to_int(dec!(-1.1)), -1);
        assert_eq!(floor_to_int(Decimal::from(100_000_000_000_i64)), i32::MAX);
        assert_eq!(truncate_to_int(Decimal::from(-100_000_000_000_i64)), i32::MIN);
    }

    #[test]
    fn negative_values_contribute_zero() {
        assert_eq!(
            AttributeValue::new(AttributeType::Atk, dec!(-5)).contribution(),
            dec!(0)
        );
        assert_eq!(
            EnhancedAttributeValue::with_portions(AttributeType::Atk, dec!(2), dec!(-3))
                .unwrap()
                .contribution(),
            dec!(0)
        );
    }

    #[test]
    fn growth_keeps_base_portion() {
        let value = EnhancedAttributeValue::new(AttributeType::Def, dec!(100));
        let grown = value.grown(dec!(1.1)).unwrap().grown(dec!(1.1)).unwrap();
        assert_eq!(grown.base_portion(), dec!(100));
        assert_eq!(grown.enhanced_portion(), dec!(21));
        assert_eq!(grown.value(), dec!(121));
    }

    #[test]
    fn growth_overflow_is_reported() {
        let value = EnhancedAttributeValue::new(AttributeType::Hp, Decimal::MAX);
        assert!(matches!(
            value.grown(dec!(2)),
            Err(ItemError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn enhanced_value_round_trips() {
        let value =
            EnhancedAttributeValue::with_portions(AttributeType::Spd, dec!(3.5), dec!(0.25))
                .unwrap();
        assert_eq!(value.value(), dec!(3.75));
        assert_eq!(
            EnhancedAttributeValue::from_value(&value.to_value()).unwrap(),
            value
        );
    }

    #[test]
    fn portions_whose_sum_overflows_are_rejected() {
        assert!(matches!(
            EnhancedAttributeValue::with_portions(AttributeType::Hp, Decimal::MAX, dec!(1)),
            Err(ItemError::ArithmeticOverflow { .. })
        ));

        let payload = dict([
            ("stat-type", "HP".into()),
            ("base-value", Decimal::MAX.into()),
            ("enhanced-value", Decimal::MAX.into()),
        ]);
        assert!(matches!(
            EnhancedAttributeValue::from_value(&payload),
            Err(ItemError::ArithmeticOverflow { .. })
        ));
    }
}
