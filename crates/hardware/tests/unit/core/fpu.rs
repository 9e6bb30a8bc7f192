//! FPU Accuracy Properties.
//!
//! Compares every arithmetic operation against the host's correctly rounded IEEE
//! result over normal operands with moderate exponents. Each property runs 100 000
//! cases.
//!
//! # Error Bounds (ULP)
//!
//! - `fadd`, `fsub`, `fdiv`, `fsqrt`: at most 1
//! - `fmul`: at most 2
//! - `itof`: exact; `ftoi`: round to nearest, ties to even

use dualsim_core::core::units::fpu::{Fp32, add, convert, div, mul, sqrt, ulp_distance};
use proptest::prelude::*;

const CASES: u32 = 100_000;

/// Normal pattern with a biased exponent in `127 - spread ..= 127 + spread`.
fn moderate(spread: u32) -> impl Strategy<Value = Fp32> {
    (0u32..2, (127 - spread)..=(127 + spread), 0u32..(1 << 23))
        .prop_map(|(s, e, m)| Fp32::from_parts(s, e, m))
}

fn positive(spread: u32) -> impl Strategy<Value = Fp32> {
    ((127 - spread)..=(127 + spread), 0u32..(1 << 23)).prop_map(|(e, m)| Fp32::from_parts(0, e, m))
}

fn host(x: Fp32) -> f32 {
    x.as_float()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(CASES))]

    #[test]
    fn fadd_within_one_ulp(a in moderate(30), b in moderate(30)) {
        let got = add::fadd(a, b).bits();
        let want = (host(a) + host(b)).to_bits();
        prop_assert!(ulp_distance(got, want) <= 1, "{:?} + {:?}: {got:#x} vs {want:#x}", host(a), host(b));
    }

    #[test]
    fn fsub_within_one_ulp(a in moderate(30), b in moderate(30)) {
        let got = add::fsub(a, b).bits();
        let want = (host(a) - host(b)).to_bits();
        prop_assert!(ulp_distance(got, want) <= 1, "{:?} - {:?}: {got:#x} vs {want:#x}", host(a), host(b));
    }

    #[test]
    fn fmul_within_two_ulp(a in moderate(40), b in moderate(40)) {
        let got = mul::fmul(a, b).bits();
        let want = (host(a) * host(b)).to_bits();
        prop_assert!(ulp_distance(got, want) <= 2, "{:?} * {:?}: {got:#x} vs {want:#x}", host(a), host(b));
    }

    #[test]
    fn fdiv_within_one_ulp(a in moderate(40), b in moderate(40)) {
        let got = div::fdiv(a, b).bits();
        let want = (host(a) / host(b)).to_bits();
        prop_assert!(ulp_distance(got, want) <= 1, "{:?} / {:?}: {got:#x} vs {want:#x}", host(a), host(b));
    }

    #[test]
    fn fsqrt_within_one_ulp(a in positive(60)) {
        let got = sqrt::fsqrt(a).bits();
        let want = host(a).sqrt().to_bits();
        prop_assert!(ulp_distance(got, want) <= 1, "sqrt {:?}: {got:#x} vs {want:#x}", host(a));
    }

    #[test]
    fn itof_matches_host_rounding(value in any::<i32>()) {
        prop_assert_eq!(convert::itof(value).bits(), (value as f32).to_bits());
    }

    #[test]
    fn ftoi_rounds_to_nearest_even(a in moderate(20)) {
        let want = host(a).round_ties_even() as i32;
        prop_assert_eq!(convert::ftoi(a), want);
    }

    #[test]
    fn small_integers_survive_a_round_trip(value in -(1i32 << 24)..=(1 << 24)) {
        prop_assert_eq!(convert::ftoi(convert::itof(value)), value);
    }
}

#[test]
fn operand_order_does_not_matter() {
    let a = Fp32::from_float(1.25);
    let b = Fp32::from_float(-3.5);
    assert_eq!(add::fadd(a, b), add::fadd(b, a));
    assert_eq!(mul::fmul(a, b), mul::fmul(b, a));
}

#[test]
fn exact_cancellation_gives_zero() {
    let a = Fp32::from_float(7.0);
    assert!(add::fsub(a, a).is_zero());
}
