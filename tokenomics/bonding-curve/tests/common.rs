//! Common test utilities for bonding curve tests

// Silence warnings for helpers not used by every test binary
#![allow(dead_code)]

use bonding_curve_core::{Amount, CurveEngine, CurveKind, CurveParameters};
use num::BigUint;

// Test configuration constants
pub const ONE_RESERVE: u128 = 1_000_000_000; // one whole unit of reserve in nano
pub const DEFAULT_FEE: u32 = 100; // 1% in basis points
pub const MAINNET_THRESHOLD: u128 = 799_999_999_998_688_507;
pub const MAINNET_THRESHOLD_RESERVE: u128 = 1_833_000_000_000;
pub const CP_VIRTUAL_RESERVE: u128 = 625_000_000_000;
pub const CP_VIRTUAL_SUPPLY: u128 = 1_073_000_000_000_000_000;

pub fn big(v: u128) -> Amount {
    BigUint::from(v)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn mainnet_engine() -> CurveEngine {
    init_tracing();
    CurveEngine::mainnet().expect("mainnet parameters are valid")
}

pub fn testnet_engine() -> CurveEngine {
    init_tracing();
    CurveEngine::testnet().expect("testnet parameters are valid")
}

/// A constant-product engine with the testnet threshold.
pub fn constant_product_engine() -> CurveEngine {
    init_tracing();
    let params = CurveParameters::testnet().with_curve(CurveKind::ConstantProduct {
        virtual_reserve: big(CP_VIRTUAL_RESERVE),
        virtual_supply: big(CP_VIRTUAL_SUPPLY),
    });
    CurveEngine::new(params).expect("constant-product parameters are valid")
}

pub fn all_engines() -> Vec<(&'static str, CurveEngine)> {
    vec![
        ("mainnet", mainnet_engine()),
        ("testnet", testnet_engine()),
        ("constant_product", constant_product_engine()),
    ]
}

pub fn abs_diff(a: &Amount, b: &Amount) -> Amount {
    if a > b {
        a - b
    } else {
        b - a
    }
}

pub fn assert_within_units(actual: &Amount, expected: &Amount, units: u128) {
    let diff = abs_diff(actual, expected);
    assert!(
        diff <= big(units),
        "Value {} not within {} units of expected {} (off by {})",
        actual,
        units,
        expected,
        diff
    );
}
