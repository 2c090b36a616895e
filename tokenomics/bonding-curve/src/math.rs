//! # Curve Math
//!
//! Integer primitives shared by every curve: scaled multiply/divide with explicit
//! rounding, conversion to and from the internal fixed-point representation, and
//! an exact integer square root. Nothing here touches floating point.
//!
//! Operands are unbounded `BigUint`s, so `a * b` never overflows before the
//! division. A zero divisor is a programming error and panics.

use num::{BigUint, One, Zero};

/// Decimal exponent of the internal fixed-point multiplier used by curves that
/// need precision headroom beyond the external nano unit.
pub const INTERNAL_SCALE_DECIMALS: u32 = 9;

/// Rounding applied to the quotient of a scaled division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    /// Round half up (adds `c / 2` before the floor division).
    HalfUp,
    Ceil,
}

/// `10^exp` as a big integer.
pub fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Computes `a * b / c` with the requested rounding.
pub fn mul_div(a: &BigUint, b: &BigUint, c: &BigUint, rounding: Rounding) -> BigUint {
    assert!(!c.is_zero(), "mul_div: division by zero");
    let product = a * b;
    match rounding {
        Rounding::Floor => product / c,
        Rounding::HalfUp => (product + (c >> 1u32)) / c,
        Rounding::Ceil => (product + c - 1u32) / c,
    }
}

pub fn mul_div_floor(a: &BigUint, b: &BigUint, c: &BigUint) -> BigUint {
    mul_div(a, b, c, Rounding::Floor)
}

pub fn mul_div_round(a: &BigUint, b: &BigUint, c: &BigUint) -> BigUint {
    mul_div(a, b, c, Rounding::HalfUp)
}

pub fn mul_div_ceil(a: &BigUint, b: &BigUint, c: &BigUint) -> BigUint {
    mul_div(a, b, c, Rounding::Ceil)
}

/// Converts a nano-denominated amount into the internal fixed-point representation.
pub fn scale_up(x: &BigUint) -> BigUint {
    x * pow10(INTERNAL_SCALE_DECIMALS)
}

/// Converts an internal fixed-point value back to nano units, flooring.
pub fn scale_down(x: &BigUint) -> BigUint {
    x / pow10(INTERNAL_SCALE_DECIMALS)
}

/// Floor of the exact square root, by Newton's method over integers.
///
/// The iterate is non-increasing once it overshoots the root, so the loop stops
/// the first time the next estimate fails to improve.
pub fn isqrt(n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }
    let mut x = n.clone();
    let mut y = (&x + BigUint::one()) >> 1u32;
    while y < x {
        x = y;
        y = (&x + n / &x) >> 1u32;
    }
    x
}
