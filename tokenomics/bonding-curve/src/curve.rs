//! # Curve Shapes
//!
//! A bonding curve maps the reserve currency deposited from zero to the token
//! supply it mints (the forward function) and back (the reverse function).
//! Trade sizing only ever goes through the [`BondingCurve`] trait, so the shape
//! is a configuration choice rather than a separate engine.

use crate::error::{CurveError, Result};
use crate::math::{isqrt, mul_div_floor, pow10, scale_down, scale_up};
use crate::types::Amount;
use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A deterministic supply/reserve relationship.
///
/// Implementations must be non-decreasing in both directions and return zero at
/// zero. Callers keep `supply` inside the curve's domain; see
/// [`max_supply_exclusive`](BondingCurve::max_supply_exclusive).
pub trait BondingCurve: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Supply minted by depositing `reserve` from zero.
    fn supply_for_reserve(&self, reserve: &Amount) -> Amount;

    /// Reserve backing `supply` tokens in circulation.
    fn reserve_for_supply(&self, supply: &Amount) -> Result<Amount>;

    /// Exclusive upper bound of the supply domain, if the curve has one.
    fn max_supply_exclusive(&self) -> Option<&Amount> {
        None
    }

    /// Tokens minted by adding `reserve_in` at the current supply level:
    /// `f(f⁻¹(S) + in) - S`, or zero when that would not exceed `S`.
    ///
    /// Measured from `S` itself rather than `f(f⁻¹(S))`, so selling the minted
    /// tokens straight back never releases more than `reserve_in`.
    fn token_amount_for_buy(&self, current_supply: &Amount, reserve_in: &Amount) -> Result<Amount> {
        let base = self.reserve_for_supply(current_supply)?;
        let after = self.supply_for_reserve(&(base + reserve_in));
        if &after <= current_supply {
            return Ok(BigUint::zero());
        }
        Ok(after - current_supply)
    }

    /// Reserve released by burning `token_in` at the current supply level.
    fn reserve_amount_for_sell(&self, current_supply: &Amount, token_in: &Amount) -> Result<Amount> {
        ensure_sellable(current_supply, token_in)?;
        let before = self.reserve_for_supply(current_supply)?;
        let after = self.reserve_for_supply(&(current_supply - token_in))?;
        Ok(before - after)
    }
}

pub(crate) fn ensure_sellable(current_supply: &Amount, token_in: &Amount) -> Result<()> {
    if token_in > current_supply {
        return Err(CurveError::InsufficientSupply {
            requested: token_in.clone(),
            available: current_supply.clone(),
        });
    }
    Ok(())
}

/// Square-root curve: price grows linearly with supply, reserve with its square.
///
/// `f(r) = isqrt(r * m^2) * a / m` and `f⁻¹(s) = s^2 * m / a^2 / m`,
/// where `a` is the curve constant and `m = 10^precision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareRootCurve {
    curve_constant: Amount,
    curve_constant_sq: Amount,
    multiplier: Amount,
}

impl SquareRootCurve {
    pub fn new(curve_constant: Amount, precision: u32) -> Result<Self> {
        if curve_constant.is_zero() {
            return Err(CurveError::InvalidConfig(
                "square-root curve constant must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            curve_constant_sq: &curve_constant * &curve_constant,
            curve_constant,
            multiplier: pow10(precision),
        })
    }

    pub fn curve_constant(&self) -> &Amount {
        &self.curve_constant
    }
}

impl BondingCurve for SquareRootCurve {
    fn name(&self) -> &'static str {
        "square_root"
    }

    fn supply_for_reserve(&self, reserve: &Amount) -> Amount {
        if reserve.is_zero() {
            return BigUint::zero();
        }
        let root = isqrt(&(reserve * &self.multiplier * &self.multiplier));
        mul_div_floor(&root, &self.curve_constant, &self.multiplier)
    }

    fn reserve_for_supply(&self, supply: &Amount) -> Result<Amount> {
        if supply.is_zero() {
            return Ok(BigUint::zero());
        }
        let scaled_sq = supply * supply * &self.multiplier;
        Ok(scaled_sq / &self.curve_constant_sq / &self.multiplier)
    }
}

/// Constant-product curve over virtual liquidity.
///
/// Holds `(vR + R) * (vS - S) = vR * vS` for real reserve `R` and circulating
/// supply `S`, which gives `S(R) = vS * R / (vR + R)` and
/// `R(S) = vR * S / (vS - S)`, both floored. The reverse side is also kept in
/// internal fixed-point units so a sell subtracts two levels before flooring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductCurve {
    virtual_reserve: Amount,
    virtual_supply: Amount,
}

impl ConstantProductCurve {
    pub fn new(virtual_reserve: Amount, virtual_supply: Amount) -> Result<Self> {
        if virtual_reserve.is_zero() || virtual_supply.is_zero() {
            return Err(CurveError::InvalidConfig(
                "constant-product virtual liquidity must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            virtual_reserve,
            virtual_supply,
        })
    }

    pub fn k(&self) -> Amount {
        &self.virtual_reserve * &self.virtual_supply
    }

    fn ensure_in_domain(&self, supply: &Amount) -> Result<()> {
        if supply >= &self.virtual_supply {
            return Err(CurveError::InvalidInput {
                field: "supply",
                reason: format!(
                    "{} is outside the curve domain (virtual supply {})",
                    supply, self.virtual_supply
                ),
            });
        }
        Ok(())
    }

    /// `R(S)` in internal fixed-point units.
    fn scaled_reserve_for_supply(&self, supply: &Amount) -> Result<Amount> {
        self.ensure_in_domain(supply)?;
        Ok(mul_div_floor(
            &scale_up(&self.virtual_reserve),
            supply,
            &(&self.virtual_supply - supply),
        ))
    }
}

impl BondingCurve for ConstantProductCurve {
    fn name(&self) -> &'static str {
        "constant_product"
    }

    fn supply_for_reserve(&self, reserve: &Amount) -> Amount {
        mul_div_floor(&self.virtual_supply, reserve, &(&self.virtual_reserve + reserve))
    }

    fn reserve_for_supply(&self, supply: &Amount) -> Result<Amount> {
        Ok(scale_down(&self.scaled_reserve_for_supply(supply)?))
    }

    fn max_supply_exclusive(&self) -> Option<&Amount> {
        Some(&self.virtual_supply)
    }

    // Subtract before flooring so the two legs lose one rounding step, not two.
    fn reserve_amount_for_sell(&self, current_supply: &Amount, token_in: &Amount) -> Result<Amount> {
        ensure_sellable(current_supply, token_in)?;
        let before = self.scaled_reserve_for_supply(current_supply)?;
        let after = self.scaled_reserve_for_supply(&(current_supply - token_in))?;
        Ok(scale_down(&(before - after)))
    }
}

/// Serializable selector for the curve family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveKind {
    SquareRoot {
        #[serde(with = "crate::config::amount_serde")]
        curve_constant: Amount,
    },
    ConstantProduct {
        #[serde(with = "crate::config::amount_serde")]
        virtual_reserve: Amount,
        #[serde(with = "crate::config::amount_serde")]
        virtual_supply: Amount,
    },
}

impl CurveKind {
    pub fn build(&self, precision: u32) -> Result<Box<dyn BondingCurve>> {
        Ok(match self {
            CurveKind::SquareRoot { curve_constant } => {
                Box::new(SquareRootCurve::new(curve_constant.clone(), precision)?)
            }
            CurveKind::ConstantProduct {
                virtual_reserve,
                virtual_supply,
            } => Box::new(ConstantProductCurve::new(
                virtual_reserve.clone(),
                virtual_supply.clone(),
            )?),
        })
    }
}
