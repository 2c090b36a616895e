use num::BigUint;
use thiserror::Error;

/// Errors returned by the pricing engine.
///
/// Every rejection is reported to the caller; nothing is recovered internally.
/// The buy-side threshold clamp is a policy outcome and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Negative amount, malformed fee or slippage, unparsable number.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A sell asked for more tokens than are in circulation.
    #[error("insufficient supply: requested {requested}, available {available}")]
    InsufficientSupply { requested: BigUint, available: BigUint },

    /// The caller passed a supply above the curve's threshold.
    #[error("supply {supply} exceeds threshold {threshold}")]
    SupplyExceedsThreshold { supply: BigUint, threshold: BigUint },

    /// An amount does not fit the fixed-width integer a chain expects.
    #[error("arithmetic overflow: amount does not fit in {target}")]
    ArithmeticOverflow { target: &'static str },

    /// Curve parameters failed validation.
    #[error("invalid curve configuration: {0}")]
    InvalidConfig(String),
}

impl CurveError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        CurveError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurveError>;
