use item_core::{
    AttributeType, EnhancementConfig, EnhancementCurve, EquipmentStats, FromValue, StatsMap,
    ToValue, Value,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MAX_OPTIONS: usize = 10;
const MAX_LEVEL: u32 = 10;

/// Option `index` cycles through the attributes; values are a fixed sequence.
fn option_attribute(index: usize) -> AttributeType {
    AttributeType::TOTALED[index % AttributeType::TOTALED.len()]
}

fn option_value(index: usize) -> Decimal {
    Decimal::from(10 + index as i64 * 3) + dec!(0.25)
}

fn build(base: AttributeType, options: usize, level: u32) -> EquipmentStats {
    let mut stats = EquipmentStats::new(base, dec!(123.45));
    for index in 0..options {
        stats.add_option_stat(option_attribute(index), option_value(index), (index % 4) as i32 + 1)
            .expect("add option");
    }
    for _ in 0..level {
        stats.enhance().expect("enhance within decimal range");
    }
    stats
}

/// Flat map as a legacy item at `level` stores it: one additional entry per
/// option attribute, all values already compounded.
fn legacy_map(base: AttributeType, option_attributes: &[AttributeType], level: u32) -> StatsMap {
    let curve = EnhancementCurve::default();
    let compound = |value: Decimal, growth: Decimal| {
        (0..level).fold(value, |acc, _| acc * growth)
    };

    let mut map = StatsMap::new();
    map.set_value(base, compound(dec!(200), curve.base_growth));
    for (index, &attribute) in option_attributes.iter().enumerate() {
        map.add_additional_value(attribute, compound(option_value(index), curve.option_growth))
            .expect("additional value within decimal range");
    }
    map
}

#[test]
fn test_keyed_round_trip_grid() {
    for base in AttributeType::TOTALED {
        for options in 0..=MAX_OPTIONS {
            for level in 0..=MAX_LEVEL {
                let stats = build(base, options, level);
                let value = stats.to_value();

                let decoded = EquipmentStats::from_value(&value)
                    .unwrap_or_else(|e| panic!("{base}/{options}/{level}: {e}"));
                assert_eq!(decoded, stats, "{base}/{options}/{level}");

                let bytes = value.to_bytes().expect("encode");
                let from_bytes = Value::from_bytes(&bytes).expect("decode");
                assert_eq!(
                    EquipmentStats::from_value(&from_bytes).expect("rehydrate"),
                    stats
                );
            }
        }
    }
}

#[test]
fn test_stats_map_equivalence() {
    let config = EnhancementConfig::default();
    for base in AttributeType::TOTALED {
        // Each attribute at most once; the base attribute gets an additional too.
        let option_attributes: Vec<_> = AttributeType::TOTALED.to_vec();
        for level in 0..=MAX_LEVEL {
            let original_map = legacy_map(base, &option_attributes, level);
            let stats = EquipmentStats::from_stats_map(level, base, &original_map, &config)
                .expect("decompose legacy map");

            let reproduced = StatsMap::try_from(&stats).expect("flatten stats");
            assert_eq!(reproduced, original_map, "{base} at level {level}");

            let rebuilt = EquipmentStats::from_stats_map(level, base, &reproduced, &config)
                .expect("decompose reproduced map");
            assert_eq!(rebuilt, stats, "{base} at level {level}");
        }
    }
}

#[test]
fn test_decomposition_inverts_enhancement() {
    let config = EnhancementConfig::default();
    for level in 0..=MAX_LEVEL {
        let mut stats = EquipmentStats::new(AttributeType::Def, dec!(80));
        // Enumeration order, one option per attribute, so decomposition
        // reproduces the same option sequence.
        for (index, attribute) in AttributeType::TOTALED.into_iter().enumerate() {
            stats.add_option_stat(attribute, option_value(index), 1).expect("add option");
        }
        for _ in 0..level {
            stats.enhance_with(&config.curve).expect("enhance");
        }

        let map = StatsMap::try_from(&stats).expect("flatten stats");
        let decomposed =
            EquipmentStats::from_stats_map(level, AttributeType::Def, &map, &config).expect("decompose");

        assert_eq!(decomposed.base_stat().base_portion(), dec!(80), "level {level}");
        for (original, recovered) in stats.option_stats().iter().zip(decomposed.option_stats()) {
            assert_eq!(recovered.stat.attribute(), original.stat.attribute());
            assert_eq!(recovered.stat.base_portion(), original.stat.base_portion());
            assert_eq!(recovered.stat.value(), original.stat.value());
        }
        for attribute in AttributeType::TOTALED {
            assert_eq!(decomposed.total(attribute), stats.total(attribute));
        }
    }
}

#[test]
fn test_total_is_base_plus_additional() {
    let mut stats = EquipmentStats::new(AttributeType::Hp, dec!(33.3));
    for step in 0..12 {
        if step % 3 == 0 {
            stats.enhance().expect("enhance");
        } else {
            stats.add_option_stat(option_attribute(step), option_value(step) - dec!(15), 2)
                .expect("add option");
        }
        for attribute in AttributeType::TOTALED {
            assert_eq!(
                stats.total(attribute),
                stats.base(attribute) + stats.additional(attribute)
            );
            assert_eq!(
                stats.total_int(attribute),
                stats.base_int(attribute) + stats.additional_int(attribute)
            );
            assert!(stats.total(attribute) >= Decimal::ZERO);
        }
    }
}

#[test]
fn test_insertion_order_matters_for_equality_only() {
    let attributes = [AttributeType::Cri, AttributeType::Atk, AttributeType::Hit];
    let mut forward = EquipmentStats::new(AttributeType::Spd, dec!(5));
    let mut reverse = EquipmentStats::new(AttributeType::Spd, dec!(5));
    for (index, attribute) in attributes.iter().enumerate() {
        forward.add_option_stat(*attribute, option_value(index), 1).expect("add option");
    }
    for (index, attribute) in attributes.iter().enumerate().rev() {
        reverse.add_option_stat(*attribute, option_value(index), 1).expect("add option");
    }

    assert_ne!(forward, reverse);
    let forward_totals: Vec<_> = forward.raw_stats(false).collect();
    let reverse_totals: Vec<_> = reverse.raw_stats(false).collect();
    assert_eq!(forward_totals, reverse_totals);
}

#[test]
fn test_deeply_negative_option_never_drives_total_below_zero() {
    let mut stats = EquipmentStats::new(AttributeType::Atk, dec!(10));
    stats.add_option_stat(AttributeType::Atk, dec!(-1000000), 1).expect("add option");
    stats.add_option_stat(AttributeType::Hit, dec!(-3), 1).expect("add option");
    stats.enhance().expect("enhance");

    assert_eq!(stats.total(AttributeType::Atk), dec!(11));
    assert_eq!(stats.additional(AttributeType::Atk), dec!(0));
    assert_eq!(stats.total(AttributeType::Hit), dec!(0));
    assert!(!stats.has(AttributeType::Hit));
    assert!(stats.option_stats()[0].stat.value() < Decimal::ZERO);
}
