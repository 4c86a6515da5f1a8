//! Flat map to structured stats.
//!
//! A legacy stats map stores only summed values. Given the item's enhancement
//! level, each value is divided back down the enhancement curve to recover the
//! base portion; whatever remains is the enhanced portion.

use rust_decimal::Decimal;

use super::{AttributeType, EnhancedAttributeValue, EquipmentStats, GradeAndStat, StatsMap};
use crate::config::EnhancementConfig;
use crate::error::{ItemError, ItemResult};

/// Grade given to options recovered from a flat map, which never stored one.
pub const LEGACY_OPTION_GRADE: i32 = 1;

/// Fractional digits kept on a decomposed base portion.
const BASE_PORTION_SCALE: u32 = 16;

/// Splits `value` into `(base, enhanced)` by dividing by `growth` `level` times.
///
/// `base + enhanced == value` exactly: the enhanced portion absorbs whatever
/// the base lost to rounding.
pub fn split_enhanced(value: Decimal, level: u32, growth: Decimal) -> ItemResult<(Decimal, Decimal)> {
    let mut base = value;
    for _ in 0..level {
        base = base
            .checked_div(growth)
            .ok_or_else(|| ItemError::overflow("decomposing an enhanced value"))?;
    }
    let base = base.round_dp(BASE_PORTION_SCALE);
    let enhanced = value
        .checked_sub(base)
        .ok_or_else(|| ItemError::overflow("decomposing an enhanced value"))?;
    Ok((base, enhanced))
}

fn decompose(
    attribute: AttributeType,
    value: Decimal,
    level: u32,
    growth: Decimal,
) -> ItemResult<EnhancedAttributeValue> {
    let (base, enhanced) = split_enhanced(value, level, growth)?;
    EnhancedAttributeValue::with_portions(attribute, base, enhanced)
}

impl EquipmentStats {
    /// Rebuilds structured stats from a flat map at a known enhancement level.
    ///
    /// The base attribute's primary value becomes the base stat (on the base
    /// curve); its additional value, when nonzero, becomes an option. Every
    /// other attribute's `value + additional` becomes one option. Options follow
    /// the map's HP..SPD order and carry [`LEGACY_OPTION_GRADE`].
    pub fn from_stats_map(
        level: u32,
        base_attribute: AttributeType,
        map: &StatsMap,
        config: &EnhancementConfig,
    ) -> ItemResult<Self> {
        config.check_level(level)?;
        let curve = &config.curve;

        let base_entry = map.get(base_attribute).ok_or(ItemError::MissingBaseStat {
            attribute: base_attribute,
        })?;
        let base_stat = decompose(base_attribute, base_entry.value, level, curve.base_growth)?;

        let mut option_stats = Vec::with_capacity(map.len());
        for entry in map.entries() {
            let value = if entry.attribute == base_attribute {
                if entry.additional_value.is_zero() {
                    continue;
                }
                entry.additional_value
            } else {
                entry.total()?
            };
            let stat = decompose(entry.attribute, value, level, curve.option_growth)?;
            option_stats.push(GradeAndStat::new(LEGACY_OPTION_GRADE, stat));
        }

        tracing::trace!(
            level,
            base = %base_attribute,
            options = option_stats.len(),
            "decomposed stats map"
        );
        Self::from_parts(base_stat, option_stats)
    }
}
