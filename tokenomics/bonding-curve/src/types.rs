use crate::error::{CurveError, Result};
use num::{BigInt, BigUint, Signed, ToPrimitive, Zero};
use ruint::Uint;
use std::str::FromStr;

/// EVM word, used when handing amounts to contract-call encoders.
pub type U256 = Uint<256, 4>;

/// A token or reserve amount in base units. Unbounded and non-negative.
pub type Amount = BigUint;

// Constants shared by every parameter set
pub const BASIS_POINTS: u32 = 10_000; // 100% in basis points
pub const NANO_DECIMALS: u32 = 9; // base units per whole unit = 10^9
pub const MAX_SUPPLY: u128 = 1_000_000_000_000_000_000; // 10^9 whole tokens
pub const DEFAULT_BUY_FEE_BPS: u32 = 100; // 1%
pub const DEFAULT_SELL_FEE_BPS: u32 = 100; // 1%

/// A proportional fee in basis points, validated to `0..=10000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeBasisPoints(u32);

impl FeeBasisPoints {
    pub const ZERO: FeeBasisPoints = FeeBasisPoints(0);

    pub fn new(bps: u32) -> Result<Self> {
        if bps > BASIS_POINTS {
            return Err(CurveError::invalid_input(
                "fee_bps",
                format!("must be at most {}, got {}", BASIS_POINTS, bps),
            ));
        }
        Ok(Self(bps))
    }

    pub fn bps(&self) -> u32 {
        self.0
    }

    /// `amount * (10000 - bps) / 10000`, floored.
    pub fn apply(&self, amount: &Amount) -> Amount {
        amount * BigUint::from(BASIS_POINTS - self.0) / BigUint::from(BASIS_POINTS)
    }

    /// The part of `amount` withheld by [`apply`](Self::apply).
    pub fn fee_on(&self, amount: &Amount) -> Amount {
        amount - self.apply(amount)
    }
}

impl TryFrom<u32> for FeeBasisPoints {
    type Error = CurveError;

    fn try_from(bps: u32) -> Result<Self> {
        Self::new(bps)
    }
}

/// An amount entering a trade together with the fee charged on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub amount_in: Amount,
    pub fee: FeeBasisPoints,
}

impl TradeRequest {
    pub fn new(amount_in: impl Into<Amount>, fee_bps: u32) -> Result<Self> {
        Ok(Self {
            amount_in: amount_in.into(),
            fee: FeeBasisPoints::new(fee_bps)?,
        })
    }

    /// Builds a request from a signed amount, as read from untyped sources.
    pub fn from_signed(amount_in: &BigInt, fee_bps: u32) -> Result<Self> {
        Ok(Self {
            amount_in: amount_from_signed(amount_in)?,
            fee: FeeBasisPoints::new(fee_bps)?,
        })
    }
}

pub fn amount_from_signed(value: &BigInt) -> Result<Amount> {
    if value.is_negative() {
        return Err(CurveError::invalid_input(
            "amount",
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(value.magnitude().clone())
}

pub fn amount_from_i128(value: i128) -> Result<Amount> {
    amount_from_signed(&BigInt::from(value))
}

/// Parses a decimal base-unit amount. A leading `-` is rejected as negative.
pub fn parse_amount(s: &str) -> Result<Amount> {
    let value = BigInt::from_str(s.trim())
        .map_err(|e| CurveError::invalid_input("amount", format!("`{}`: {}", s, e)))?;
    amount_from_signed(&value)
}

pub fn amount_to_u64(amount: &Amount) -> Result<u64> {
    amount
        .to_u64()
        .ok_or(CurveError::ArithmeticOverflow { target: "u64" })
}

pub fn amount_to_u128(amount: &Amount) -> Result<u128> {
    amount
        .to_u128()
        .ok_or(CurveError::ArithmeticOverflow { target: "u128" })
}

pub fn amount_to_u256(amount: &Amount) -> Result<U256> {
    if amount.is_zero() {
        return Ok(U256::ZERO);
    }
    U256::try_from_be_slice(&amount.to_bytes_be())
        .ok_or(CurveError::ArithmeticOverflow { target: "U256" })
}

pub fn amount_from_u256(value: U256) -> Amount {
    BigUint::from_bytes_be(&value.to_be_bytes::<32>())
}

/// Base units to whole units. Display only.
pub fn from_nano(amount: &Amount) -> f64 {
    amount.to_f64().unwrap_or(f64::INFINITY) / 10f64.powi(NANO_DECIMALS as i32)
}
