//! Equipment stat aggregate.
//!
//! One base stat plus an ordered list of graded option stats. The six attribute
//! totals are derived data: every mutation rebuilds them from the contributors
//! before returning.

use rust_decimal::Decimal;

use super::{AttributeType, EnhancedAttributeValue, floor_to_int};
use crate::codec::{DictReader, FromValue, ToValue, Value, dict};
use crate::config::EnhancementCurve;
use crate::error::{ItemError, ItemResult};

/// An option stat together with the grade it was attached at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeAndStat {
    pub grade: i32,
    pub stat: EnhancedAttributeValue,
}

impl GradeAndStat {
    pub fn new(grade: i32, stat: EnhancedAttributeValue) -> Self {
        Self { grade, stat }
    }
}

impl ToValue for GradeAndStat {
    fn to_value(&self) -> Value {
        dict([
            ("grade", self.grade.into()),
            ("enhanced-stat", self.stat.to_value()),
        ])
    }
}

impl FromValue for GradeAndStat {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "grade-and-stat")?;
        Ok(Self {
            grade: reader.int("grade")?,
            stat: reader.nested("enhanced-stat")?,
        })
    }
}

/// Per-attribute totals, indexed by [`AttributeType::slot`].
type Totals = [Decimal; 6];

/// Base stat, ordered option stats, and their six derived totals.
///
/// Equality compares the base stat and the option list as an ordered sequence;
/// the same options inserted in a different order are a different value.
#[derive(Clone, Debug)]
pub struct EquipmentStats {
    base_stat: EnhancedAttributeValue,
    option_stats: Vec<GradeAndStat>,
    totals: Totals,
}

impl PartialEq for EquipmentStats {
    fn eq(&self, other: &Self) -> bool {
        self.base_stat == other.base_stat && self.option_stats == other.option_stats
    }
}

impl Eq for EquipmentStats {}

impl EquipmentStats {
    /// A fresh aggregate with a single base stat and no options.
    pub fn new(attribute: AttributeType, value: Decimal) -> Self {
        let base_stat = EnhancedAttributeValue::new(attribute, value);
        let mut totals = Totals::default();
        if let Some(slot) = attribute.slot() {
            totals[slot] = base_stat.contribution();
        }
        Self {
            base_stat,
            option_stats: Vec::new(),
            totals,
        }
    }

    /// Assembles an aggregate from already-split contributors, keeping option order.
    ///
    /// Fails with [`ItemError::ArithmeticOverflow`] when a total does not fit.
    pub fn from_parts(
        base_stat: EnhancedAttributeValue,
        option_stats: Vec<GradeAndStat>,
    ) -> ItemResult<Self> {
        let totals = compute_totals(&base_stat, &option_stats)?;
        Ok(Self {
            base_stat,
            option_stats,
            totals,
        })
    }

    pub fn base_stat(&self) -> &EnhancedAttributeValue {
        &self.base_stat
    }

    pub fn base_stat_type(&self) -> AttributeType {
        self.base_stat.attribute()
    }

    pub fn option_stats(&self) -> &[GradeAndStat] {
        &self.option_stats
    }

    /// Appends a fresh (unenhanced) option.
    ///
    /// If the new total overflows, the option is not added.
    pub fn add_option_stat(
        &mut self,
        attribute: AttributeType,
        value: Decimal,
        grade: i32,
    ) -> ItemResult<()> {
        self.option_stats.push(GradeAndStat::new(
            grade,
            EnhancedAttributeValue::new(attribute, value),
        ));
        match compute_totals(&self.base_stat, &self.option_stats) {
            Ok(totals) => {
                self.totals = totals;
                Ok(())
            }
            Err(e) => {
                self.option_stats.pop();
                Err(e)
            }
        }
    }

    /// One enhancement step on the default curve.
    pub fn enhance(&mut self) -> ItemResult<()> {
        self.enhance_with(&EnhancementCurve::default())
    }

    /// Grows the base stat by `base_growth` and every option by `option_growth`.
    ///
    /// All contributors are grown on copies first; on overflow nothing changes.
    pub fn enhance_with(&mut self, curve: &EnhancementCurve) -> ItemResult<()> {
        let base_stat = self.base_stat.grown(curve.base_growth)?;
        let option_stats = self
            .option_stats
            .iter()
            .map(|option| {
                option
                    .stat
                    .grown(curve.option_growth)
                    .map(|stat| GradeAndStat::new(option.grade, stat))
            })
            .collect::<ItemResult<Vec<_>>>()?;

        self.totals = compute_totals(&base_stat, &option_stats)?;
        self.base_stat = base_stat;
        self.option_stats = option_stats;
        Ok(())
    }

    // ===== read surface =====

    /// Sum of non-negative contributions for `attribute`.
    pub fn total(&self, attribute: AttributeType) -> Decimal {
        attribute
            .slot()
            .map_or(Decimal::ZERO, |slot| self.totals[slot])
    }

    pub fn total_int(&self, attribute: AttributeType) -> i32 {
        floor_to_int(self.total(attribute))
    }

    /// The base stat's contribution to `attribute`.
    pub fn base(&self, attribute: AttributeType) -> Decimal {
        if attribute.is_none() || self.base_stat.attribute() != attribute {
            return Decimal::ZERO;
        }
        self.base_stat.contribution()
    }

    pub fn base_int(&self, attribute: AttributeType) -> i32 {
        floor_to_int(self.base(attribute))
    }

    /// `total - base`, taken from the live totals.
    pub fn additional(&self, attribute: AttributeType) -> Decimal {
        self.total(attribute) - self.base(attribute)
    }

    pub fn additional_int(&self, attribute: AttributeType) -> i32 {
        self.total_int(attribute)
            .saturating_sub(self.base_int(attribute))
    }

    pub fn has(&self, attribute: AttributeType) -> bool {
        self.total(attribute) > Decimal::ZERO
    }

    pub fn has_base(&self, attribute: AttributeType) -> bool {
        self.base(attribute) > Decimal::ZERO
    }

    pub fn has_additional(&self, attribute: AttributeType) -> bool {
        self.additional(attribute) > Decimal::ZERO
    }

    pub fn has_additional_stats(&self) -> bool {
        AttributeType::TOTALED
            .iter()
            .any(|&attribute| self.has_additional(attribute))
    }

    pub fn hp(&self) -> i32 {
        self.total_int(AttributeType::Hp)
    }

    pub fn atk(&self) -> i32 {
        self.total_int(AttributeType::Atk)
    }

    pub fn def(&self) -> i32 {
        self.total_int(AttributeType::Def)
    }

    pub fn cri(&self) -> i32 {
        self.total_int(AttributeType::Cri)
    }

    pub fn hit(&self) -> i32 {
        self.total_int(AttributeType::Hit)
    }

    pub fn spd(&self) -> i32 {
        self.total_int(AttributeType::Spd)
    }

    // ===== enumerable views, always HP..SPD =====

    pub fn stats(&self, ignore_zero: bool) -> impl Iterator<Item = (AttributeType, i32)> + '_ {
        self.view(ignore_zero, Self::has, Self::total_int)
    }

    pub fn raw_stats(
        &self,
        ignore_zero: bool,
    ) -> impl Iterator<Item = (AttributeType, Decimal)> + '_ {
        self.view(ignore_zero, Self::has, Self::total)
    }

    pub fn base_stats(&self, ignore_zero: bool) -> impl Iterator<Item = (AttributeType, i32)> + '_ {
        self.view(ignore_zero, Self::has_base, Self::base_int)
    }

    pub fn additional_stats(
        &self,
        ignore_zero: bool,
    ) -> impl Iterator<Item = (AttributeType, i32)> + '_ {
        self.view(ignore_zero, Self::has_additional, Self::additional_int)
    }

    pub fn base_and_additional_stats(
        &self,
        ignore_zero: bool,
    ) -> impl Iterator<Item = (AttributeType, i32, i32)> + '_ {
        self.view(
            ignore_zero,
            |stats, attribute| stats.has_base(attribute) || stats.has_additional(attribute),
            |stats, attribute| (stats.base_int(attribute), stats.additional_int(attribute)),
        )
        .map(|(attribute, (base, additional))| (attribute, base, additional))
    }

    pub fn base_and_additional_raw_stats(
        &self,
        ignore_zero: bool,
    ) -> impl Iterator<Item = (AttributeType, Decimal, Decimal)> + '_ {
        self.view(
            ignore_zero,
            |stats, attribute| stats.has_base(attribute) || stats.has_additional(attribute),
            |stats, attribute| (stats.base(attribute), stats.additional(attribute)),
        )
        .map(|(attribute, (base, additional))| (attribute, base, additional))
    }

    fn view<T>(
        &self,
        ignore_zero: bool,
        present: impl Fn(&Self, AttributeType) -> bool,
        read: impl Fn(&Self, AttributeType) -> T,
    ) -> impl Iterator<Item = (AttributeType, T)> {
        AttributeType::TOTALED
            .into_iter()
            .filter(move |&attribute| !ignore_zero || present(self, attribute))
            .map(move |attribute| (attribute, read(self, attribute)))
    }
}

/// Rebuilds the six totals; each contributor is floored at zero on its own.
fn compute_totals(
    base_stat: &EnhancedAttributeValue,
    option_stats: &[GradeAndStat],
) -> ItemResult<Totals> {
    let mut totals = Totals::default();
    let contributors = core::iter::once(base_stat).chain(option_stats.iter().map(|o| &o.stat));
    for stat in contributors {
        if let Some(slot) = stat.attribute().slot() {
            totals[slot] = totals[slot]
                .checked_add(stat.contribution())
                .ok_or_else(|| ItemError::overflow("summing an attribute total"))?;
        }
    }
    Ok(totals)
}

impl ToValue for EquipmentStats {
    fn to_value(&self) -> Value {
        dict([
            ("base-stat", self.base_stat.to_value()),
            ("option-stats", self.option_stats.to_value()),
        ])
    }
}

impl FromValue for EquipmentStats {
    fn from_value(value: &Value) -> ItemResult<Self> {
        let reader = DictReader::new(value, "equipment-stats")?;
        Self::from_parts(
            reader.nested("base-stat")?,
            reader.nested_list("option-stats")?,
        )
    }
}
