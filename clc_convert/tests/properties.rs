use std::collections::HashSet;

use clc_convert::prelude::*;
use rand::prelude::*;

fn plans() -> Vec<Plan> {
    [
        PrecisionPolicy::STANDARD,
        PrecisionPolicy::FULL_GUARDED,
        PrecisionPolicy {
            int64: Extension::Native,
            fp64: Extension::Native,
        },
    ]
    .iter()
    .map(|p| Plan::build(p).unwrap())
    .collect()
}

#[test]
fn saturation_for_every_integer_destination() {
    for plan in plans() {
        let reg = plan.registry();
        let present: HashSet<ConversionVariant> =
            plan.records().iter().map(|r| r.variant()).collect();
        for dst in reg.integer_types() {
            for src in reg.types() {
                for width in VectorWidth::ALL {
                    let v = ConversionVariant::new(src.ty, dst.ty, width, true, RoundingMode::None);
                    assert!(present.contains(&v), "missing {}", v);
                }
            }
        }
    }
}

#[test]
fn identity_saturation_is_kept() {
    let plan = Plan::build(&PrecisionPolicy::STANDARD).unwrap();
    let r = plan
        .records()
        .iter()
        .find(|r| {
            r.src == ScalarType::Int
                && r.dst == ScalarType::Int
                && r.width == VectorWidth::W3
                && r.saturate
        })
        .unwrap();
    assert_eq!(r.name, "convert_int3_sat");
}

#[test]
fn rounding_suffix_only_from_float_to_integer() {
    for plan in plans() {
        for r in plan.records() {
            let src = r.src.descriptor();
            let dst = r.dst.descriptor();
            let suffixed = r.rounding != RoundingMode::None;
            if suffixed {
                assert!(dst.is_integer && src.is_float(), "{}", r.name);
            }
            if dst.is_float() {
                assert!(!suffixed && !r.saturate, "{}", r.name);
                assert_eq!(r.clamp, None);
            }
        }
        // both saturation settings times all five rounding choices
        let reg = plan.registry();
        for src in reg.float_types() {
            for dst in reg.integer_types() {
                let modes: HashSet<(bool, RoundingMode)> = plan
                    .records()
                    .iter()
                    .filter(|r| r.src == src.ty && r.dst == dst.ty && r.width == VectorWidth::W8)
                    .map(|r| (r.saturate, r.rounding))
                    .collect();
                assert_eq!(modes.len(), 10);
            }
        }
    }
}

#[test]
fn guards_are_exclusive_and_follow_policy() {
    for plan in plans() {
        let guards = GuardResolver::new(plan.policy());
        for r in plan.records() {
            let g = guards.guard_for(&r.variant());
            assert_eq!(g, r.guard);
            let has_double = [r.src, r.dst].contains(&ScalarType::Double);
            let has_long = [r.src, r.dst]
                .iter()
                .any(|t| matches!(t, ScalarType::Long | ScalarType::Ulong));
            let expected = if has_double && plan.policy().fp64.is_guarded() {
                Some(Guard::Fp64)
            } else if has_long && plan.policy().int64.is_guarded() {
                Some(Guard::Int64)
            } else {
                None
            };
            assert_eq!(g, expected, "{}", r.name);
        }
    }
}

#[test]
fn clamp_bounds_only_when_saturating() {
    for plan in plans() {
        for r in plan.records() {
            assert_eq!(r.clamp.is_some(), r.saturate, "{}", r.name);
            if let Some(c) = r.clamp {
                assert_eq!(Some(c), r.dst.descriptor().clamp);
            }
        }
    }
}

#[test]
fn names_round_trip() {
    let plan = Plan::build(&PrecisionPolicy::FULL_GUARDED).unwrap();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for r in plan.records().choose_multiple(&mut rng, 500) {
        let parsed = ParsedName::parse(&r.name).unwrap();
        assert!(parsed.matches(&r.variant()), "{}", r.name);
        let rebuilt = ConversionVariant::new(
            r.src,
            parsed.dst,
            parsed.width,
            parsed.saturate,
            parsed.rounding,
        );
        assert_eq!(rebuilt.function_name(), r.name);
    }
}

#[test]
fn unknown_names_are_rejected() {
    let reg = TypeRegistry::new(&PrecisionPolicy::STANDARD);
    assert_eq!(
        reg.lookup("bool").err(),
        Some(clc_convert::Error::UnknownType("bool".into()))
    );
}
