use crate::error::{CurveError, Result};
use crate::types::{Amount, FeeBasisPoints, BASIS_POINTS};
use num::{BigUint, Zero};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A sized trade, ready to be embedded in a chain-specific transaction.
///
/// For a buy, `amount_in` is reserve and `amount_out` is tokens; for a sell it
/// is the other way round. `fee_amount` is denominated in reserve on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeQuote {
    pub side: TradeSide,
    pub current_supply: Amount,
    pub amount_in: Amount,
    pub fee: FeeBasisPoints,
    pub fee_amount: Amount,
    pub amount_out: Amount,
    /// The buy hit the supply threshold and was clamped.
    pub capped: bool,
}

impl TradeQuote {
    pub fn new(side: TradeSide, current_supply: Amount, amount_in: Amount) -> Self {
        Self {
            side,
            current_supply,
            amount_in,
            fee: FeeBasisPoints::ZERO,
            fee_amount: BigUint::zero(),
            amount_out: BigUint::zero(),
            capped: false,
        }
    }

    pub fn with_fee(mut self, fee: FeeBasisPoints, fee_amount: Amount) -> Self {
        self.fee = fee;
        self.fee_amount = fee_amount;
        self
    }

    pub fn with_output(mut self, amount_out: Amount, capped: bool) -> Self {
        self.amount_out = amount_out;
        self.capped = capped;
        self
    }

    /// Supply after the trade settles.
    pub fn supply_after(&self) -> Result<Amount> {
        match self.side {
            TradeSide::Buy => Ok(&self.current_supply + &self.amount_out),
            TradeSide::Sell => {
                if self.amount_in > self.current_supply {
                    return Err(CurveError::InsufficientSupply {
                        requested: self.amount_in.clone(),
                        available: self.current_supply.clone(),
                    });
                }
                Ok(&self.current_supply - &self.amount_in)
            }
        }
    }

    /// Minimum acceptable output under `slippage_bps` tolerance, floored.
    pub fn minimum_out(&self, slippage_bps: u32) -> Result<Amount> {
        if slippage_bps > BASIS_POINTS {
            return Err(CurveError::invalid_input(
                "slippage_bps",
                format!("must be at most {}, got {}", BASIS_POINTS, slippage_bps),
            ));
        }
        let multiplier = BigUint::from(BASIS_POINTS - slippage_bps);
        Ok(&self.amount_out * multiplier / BigUint::from(BASIS_POINTS))
    }
}
