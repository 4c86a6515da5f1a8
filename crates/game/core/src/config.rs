//! Enhancement constants and tunable parameters.
//!
//! The forward enhancement step ([`crate::stats::EquipmentStats::enhance_with`],
//! [`crate::item::Equipment::enhance`]) and the flat-map decomposition both read
//! their growth factors from one [`EnhancementCurve`], so a value enhanced `n`
//! times decomposes back to its original base portion.

use rust_decimal::Decimal;

use crate::error::{ItemError, ItemResult};

/// Per-level growth factors.
///
/// Each enhancement multiplies a contributor's current value by its growth
/// factor; decomposition divides by the same factor once per level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnhancementCurve {
    /// Growth applied to the item's base stat.
    pub base_growth: Decimal,
    /// Growth applied to every option stat.
    pub option_growth: Decimal,
}

impl EnhancementCurve {
    pub fn new(base_growth: Decimal, option_growth: Decimal) -> Self {
        Self {
            base_growth,
            option_growth,
        }
    }

    /// Growth factor for a contributor, by role.
    pub fn growth(&self, is_base_stat: bool) -> Decimal {
        if is_base_stat {
            self.base_growth
        } else {
            self.option_growth
        }
    }
}

impl Default for EnhancementCurve {
    fn default() -> Self {
        Self {
            base_growth: EnhancementConfig::DEFAULT_BASE_GROWTH,
            option_growth: EnhancementConfig::DEFAULT_OPTION_GROWTH,
        }
    }
}

/// Accepted domain for option enhancement ratios.
///
/// Historical item variants disagreed here: stat options rejected ratios outside
/// `[0, 1]` while skill options accepted anything. The policy is therefore data,
/// not code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum RatioPolicy {
    /// Any ratio, including negative ones that can flip the payload's sign.
    #[default]
    Unbounded,
    /// Inclusive bounds.
    Bounded { min: Decimal, max: Decimal },
}

impl RatioPolicy {
    /// The historical `[0, 1]` bound.
    pub fn unit() -> Self {
        Self::Bounded {
            min: Decimal::ZERO,
            max: Decimal::ONE,
        }
    }

    /// Rejects `ratio` with [`ItemError::RangeViolation`] when outside the bound.
    pub fn check(&self, ratio: Decimal) -> ItemResult<()> {
        match self {
            Self::Unbounded => Ok(()),
            Self::Bounded { min, max } if ratio < *min || ratio > *max => Err(
                ItemError::out_of_range("enhancement ratio", ratio, min, max),
            ),
            Self::Bounded { .. } => Ok(()),
        }
    }
}

/// Enhancement configuration shared by the stat model and the item carrier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnhancementConfig {
    pub curve: EnhancementCurve,
    pub ratio_policy: RatioPolicy,
    /// Highest enhancement level accepted by decomposition and `Equipment::enhance`.
    pub max_enhancement_level: u32,
}

impl EnhancementConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_GROWTH: Decimal = Decimal::from_parts(11, 0, 0, false, 1);
    pub const DEFAULT_OPTION_GROWTH: Decimal = Decimal::from_parts(13, 0, 0, false, 1);
    pub const DEFAULT_MAX_ENHANCEMENT_LEVEL: u32 = 20;

    pub fn new() -> Self {
        Self {
            curve: EnhancementCurve::default(),
            ratio_policy: RatioPolicy::default(),
            max_enhancement_level: Self::DEFAULT_MAX_ENHANCEMENT_LEVEL,
        }
    }

    pub fn with_ratio_policy(mut self, ratio_policy: RatioPolicy) -> Self {
        self.ratio_policy = ratio_policy;
        self
    }

    pub fn with_curve(mut self, curve: EnhancementCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Checks the invariants a loaded config must satisfy.
    pub fn validate(&self) -> ItemResult<()> {
        for (what, growth) in [
            ("base growth", self.curve.base_growth),
            ("option growth", self.curve.option_growth),
        ] {
            if growth <= Decimal::ZERO {
                return Err(ItemError::out_of_range(what, growth, "0 (exclusive)", "∞"));
            }
        }

        if let RatioPolicy::Bounded { min, max } = &self.ratio_policy
            && min > max
        {
            return Err(ItemError::out_of_range("ratio bound minimum", min, "-∞", max));
        }

        if self.max_enhancement_level == 0 {
            return Err(ItemError::out_of_range(
                "max enhancement level",
                0,
                1,
                u32::MAX,
            ));
        }

        Ok(())
    }

    /// Rejects levels beyond [`Self::max_enhancement_level`].
    pub fn check_level(&self, level: u32) -> ItemResult<()> {
        if level > self.max_enhancement_level {
            return Err(ItemError::out_of_range(
                "enhancement level",
                level,
                0,
                self.max_enhancement_level,
            ));
        }
        Ok(())
    }
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self::new()
    }
}
