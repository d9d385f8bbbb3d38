use std::collections::HashSet;

use clc_convert::prelude::*;
use clc_convert_gen::{sha256, CodeGen};
use pretty_assertions::assert_eq;

fn generate(policy: PrecisionPolicy) -> String {
    CodeGen::generate(&Plan::build(&policy).unwrap()).unwrap()
}

// (function name, parameter type) of every definition
fn signatures(source: &str) -> Vec<(String, String)> {
    source
        .lines()
        .filter(|l| l.contains(" convert_") && l.ends_with(" x)"))
        .map(|l| {
            let (_, rest) = l.split_once(' ').unwrap();
            let (name, param) = rest.split_once('(').unwrap();
            (name.to_string(), param.trim_end_matches(" x)").to_string())
        })
        .collect()
}

#[test]
fn regeneration_is_byte_stable() {
    for policy in [PrecisionPolicy::STANDARD, PrecisionPolicy::FULL_GUARDED] {
        let a = generate(policy);
        let b = generate(policy);
        assert_eq!(sha256(&a), sha256(&b));
        assert_eq!(a, b);
    }
}

#[test]
fn one_definition_per_overload() {
    let source = generate(PrecisionPolicy::FULL_GUARDED);
    let sigs = signatures(&source);
    let plan = Plan::build(&PrecisionPolicy::FULL_GUARDED).unwrap();
    assert_eq!(sigs.len(), plan.len());
    let unique: HashSet<_> = sigs.iter().collect();
    assert_eq!(unique.len(), sigs.len());
}

#[test]
fn standard_output_is_unguarded() {
    let source = generate(PrecisionPolicy::STANDARD);
    assert!(!source.contains("#if"));
    assert!(!source.contains("#endif"));
    assert!(!source.contains("double"));
    assert!(!source.contains("long"));
    assert!(source.starts_with("/* Generated by gen-convert."));
    assert!(source.contains("#include <clc/clc.h>\n"));
    assert!(source.contains("\nint4 convert_int4_sat_rte(float4 x)\n"));
    assert!(source.contains("\nchar convert_char_sat(uint x)\n"));
    assert!(!source.contains("convert_float2_sat"));
    assert!(!source.contains("convert_int_rtz(char"));
}

#[test]
fn guards_balance_and_never_nest() {
    let source = generate(PrecisionPolicy::FULL_GUARDED);
    let mut depth = 0;
    for line in source.lines() {
        if line.starts_with("#if") {
            depth += 1;
            assert_eq!(depth, 1, "nested guard");
        } else if line == "#endif" {
            depth -= 1;
        }
    }
    assert_eq!(depth, 0);
    assert!(source.contains("#pragma OPENCL EXTENSION cl_khr_fp64 : enable"));
    assert!(source.contains(Guard::Int64.open_directive()));
}

#[test]
fn guarded_definitions_sit_inside_their_guard() {
    let source = generate(PrecisionPolicy::FULL_GUARDED);
    let mut current: Option<&str> = None;
    for line in source.lines() {
        if line.starts_with("#if") {
            current = Some(line);
        } else if line == "#endif" {
            current = None;
        } else if line.ends_with(" x)") {
            let mentions_double = line.contains("double");
            let mentions_long = line.contains("long");
            let expected = if mentions_double {
                Some(Guard::Fp64.open_directive())
            } else if mentions_long {
                Some(Guard::Int64.open_directive())
            } else {
                None
            };
            assert_eq!(current, expected, "{}", line);
        }
    }
}

#[test]
fn native_extensions_are_unguarded() {
    let source = generate(PrecisionPolicy {
        int64: Extension::Native,
        fp64: Extension::Native,
    });
    assert!(source.contains("\nulong8 convert_ulong8_sat_rtn(double8 x)\n"));
    assert!(!source.contains("#if"));
    assert!(source.contains("#pragma OPENCL EXTENSION cl_khr_fp64 : enable"));
}
