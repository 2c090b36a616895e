//! # Trade Sizing
//!
//! [`CurveEngine`] is the single entry point for chain clients. It owns an
//! immutable parameter set and the curve built from it, and answers pure
//! questions about trades: how many tokens a deposit buys, how much reserve a
//! sell releases, and the display price at a supply level.
//!
//! The engine holds no mutable state, so one instance can be shared by
//! reference across threads without synchronization.

use crate::config::{CurveParameters, Network};
use crate::curve::BondingCurve;
use crate::error::{CurveError, Result};
use crate::math::pow10;
use crate::quote::{TradeQuote, TradeSide};
use crate::types::{from_nano, Amount, FeeBasisPoints, TradeRequest, BASIS_POINTS};
use num::{BigUint, ToPrimitive, Zero};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct CurveEngine {
    params: CurveParameters,
    curve: Box<dyn BondingCurve>,
}

impl CurveEngine {
    pub fn new(params: CurveParameters) -> Result<Self> {
        params.validate()?;
        let curve = params.curve.build(params.precision)?;
        debug!(
            curve = curve.name(),
            threshold = %params.supply_threshold,
            precision = params.precision,
            "built curve engine"
        );
        Ok(Self { params, curve })
    }

    pub fn for_network(network: Network) -> Result<Self> {
        Self::new(CurveParameters::for_network(network))
    }

    pub fn mainnet() -> Result<Self> {
        Self::for_network(Network::Mainnet)
    }

    pub fn testnet() -> Result<Self> {
        Self::for_network(Network::Testnet)
    }

    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    pub fn curve(&self) -> &dyn BondingCurve {
        self.curve.as_ref()
    }

    pub fn supply_threshold(&self) -> &Amount {
        &self.params.supply_threshold
    }

    fn ensure_supply(&self, current_supply: &Amount) -> Result<()> {
        if current_supply > &self.params.supply_threshold {
            return Err(CurveError::SupplyExceedsThreshold {
                supply: current_supply.clone(),
                threshold: self.params.supply_threshold.clone(),
            });
        }
        Ok(())
    }

    /// Reserve currency backing `current_supply` tokens.
    pub fn reserve_supply(&self, current_supply: &Amount) -> Result<Amount> {
        self.ensure_supply(current_supply)?;
        self.curve.reserve_for_supply(current_supply)
    }

    /// Reserve needed to mint the full threshold supply from zero.
    pub fn threshold_reserve(&self) -> Result<Amount> {
        match &self.params.threshold_reserve {
            Some(reserve) => Ok(reserve.clone()),
            None => self.curve.reserve_for_supply(&self.params.supply_threshold),
        }
    }

    /// Tokens minted for `reserve_in`, before fees and without the threshold cap.
    pub fn token_amount_for_buy(&self, current_supply: &Amount, reserve_in: &Amount) -> Result<Amount> {
        self.ensure_supply(current_supply)?;
        self.curve.token_amount_for_buy(current_supply, reserve_in)
    }

    /// Reserve released for burning `token_in`, before fees.
    pub fn reserve_amount_for_sell(&self, current_supply: &Amount, token_in: &Amount) -> Result<Amount> {
        self.ensure_supply(current_supply)?;
        self.curve.reserve_amount_for_sell(current_supply, token_in)
    }

    /// Tokens received for a buy after the fee, clamped to the remaining
    /// supply below the threshold.
    ///
    /// An oversized buy partially fills at the cap rather than failing. The
    /// engine reports only the clamped token amount; it does not compute a
    /// refund for the excess reserve.
    pub fn calculate_buy_amount(&self, current_supply: &Amount, reserve_in: &Amount, fee_bps: u32) -> Result<Amount> {
        let fee = FeeBasisPoints::new(fee_bps)?;
        Ok(self.size_buy(current_supply, reserve_in, fee)?.0)
    }

    /// Reserve received for a sell, after the fee.
    pub fn calculate_sell_amount(&self, current_supply: &Amount, token_in: &Amount, fee_bps: u32) -> Result<Amount> {
        let fee = FeeBasisPoints::new(fee_bps)?;
        let gross = self.reserve_amount_for_sell(current_supply, token_in)?;
        Ok(fee.apply(&gross))
    }

    pub fn calculate_buy_amount_default(&self, current_supply: &Amount, reserve_in: &Amount) -> Result<Amount> {
        self.calculate_buy_amount(current_supply, reserve_in, self.params.buy_fee_bps)
    }

    pub fn calculate_sell_amount_default(&self, current_supply: &Amount, token_in: &Amount) -> Result<Amount> {
        self.calculate_sell_amount(current_supply, token_in, self.params.sell_fee_bps)
    }

    /// Returns the token amount and whether the threshold cap applied.
    fn size_buy(&self, current_supply: &Amount, reserve_in: &Amount, fee: FeeBasisPoints) -> Result<(Amount, bool)> {
        let effective = fee.apply(reserve_in);
        let tokens = self.token_amount_for_buy(current_supply, &effective)?;
        let remaining = &self.params.supply_threshold - current_supply;
        trace!(%reserve_in, %effective, %tokens, "sized buy");
        if tokens > remaining {
            debug!(
                supply = %current_supply,
                requested = %tokens,
                capped = %remaining,
                "buy clamped at supply threshold"
            );
            return Ok((remaining, true));
        }
        Ok((tokens, false))
    }

    /// Reserve per whole token at `current_supply`, from the tokens one whole
    /// unit of reserve buys. Display only.
    pub fn calculate_price(&self, current_supply: &Amount) -> Result<f64> {
        let one = pow10(self.params.precision);
        let tokens = self.token_amount_for_buy(current_supply, &one)?;
        if tokens.is_zero() {
            return Err(CurveError::invalid_input(
                "current_supply",
                format!("one whole unit of reserve buys nothing at supply {}", current_supply),
            ));
        }
        let one = one.to_f64().unwrap_or(f64::INFINITY);
        let tokens = tokens.to_f64().unwrap_or(f64::INFINITY);
        Ok(one / tokens)
    }

    /// Price times the maximum supply in whole units. Display only.
    pub fn calculate_market_cap(&self, current_supply: &Amount) -> Result<f64> {
        let price = self.calculate_price(current_supply)?;
        Ok(price * from_nano(&self.params.max_supply))
    }

    /// Tokens left before trading on the curve ends.
    pub fn remaining_supply(&self, current_supply: &Amount) -> Result<Amount> {
        self.ensure_supply(current_supply)?;
        Ok(&self.params.supply_threshold - current_supply)
    }

    pub fn is_threshold_reached(&self, current_supply: &Amount) -> Result<bool> {
        self.ensure_supply(current_supply)?;
        Ok(current_supply == &self.params.supply_threshold)
    }

    /// Progress toward the threshold in basis points, floored.
    pub fn threshold_progress_bps(&self, current_supply: &Amount) -> Result<u32> {
        self.ensure_supply(current_supply)?;
        let progress = current_supply * BigUint::from(BASIS_POINTS) / &self.params.supply_threshold;
        progress
            .to_u32()
            .ok_or(CurveError::ArithmeticOverflow { target: "u32" })
    }

    pub fn quote_buy(&self, current_supply: &Amount, request: &TradeRequest) -> Result<TradeQuote> {
        let (amount_out, capped) = self.size_buy(current_supply, &request.amount_in, request.fee)?;
        Ok(TradeQuote::new(TradeSide::Buy, current_supply.clone(), request.amount_in.clone())
            .with_fee(request.fee, request.fee.fee_on(&request.amount_in))
            .with_output(amount_out, capped))
    }

    pub fn quote_sell(&self, current_supply: &Amount, request: &TradeRequest) -> Result<TradeQuote> {
        let gross = self.reserve_amount_for_sell(current_supply, &request.amount_in)?;
        let net = request.fee.apply(&gross);
        Ok(TradeQuote::new(TradeSide::Sell, current_supply.clone(), request.amount_in.clone())
            .with_fee(request.fee, request.fee.fee_on(&gross))
            .with_output(net, false))
    }
}
