//! Launch simulation: a mock ledger stands in for the on-chain minter so the
//! engine can be driven through a whole curve lifecycle, from zero supply to
//! the threshold and back out again.

use crate::{Amount, CurveEngine, TradeRequest};
use anyhow::{anyhow, Result};
use num::Zero;
use std::collections::HashMap;
use tracing::debug;

/// Balances the minter contract would hold.
pub struct MockLaunch {
    pub engine: CurveEngine,
    pub supply: Amount,
    pub reserve_balance: Amount,
    pub fees_collected: Amount,
    pub holders: HashMap<&'static str, Amount>,
}

impl MockLaunch {
    pub fn new(engine: CurveEngine) -> Self {
        Self {
            engine,
            supply: Amount::zero(),
            reserve_balance: Amount::zero(),
            fees_collected: Amount::zero(),
            holders: HashMap::new(),
        }
    }

    pub fn balance_of(&self, holder: &str) -> Amount {
        self.holders.get(holder).cloned().unwrap_or_default()
    }

    /// Deposits `reserve_in` and mints the quoted tokens. Excess reserve on a
    /// capped buy stays with the minter.
    pub fn buy(&mut self, holder: &'static str, reserve_in: Amount) -> Result<Amount> {
        let fee = self.engine.params().buy_fee_bps;
        let quote = self.engine.quote_buy(&self.supply, &TradeRequest::new(reserve_in, fee)?)?;

        self.reserve_balance += &quote.amount_in - &quote.fee_amount;
        self.fees_collected += &quote.fee_amount;
        self.supply = quote.supply_after()?;
        *self.holders.entry(holder).or_default() += &quote.amount_out;

        debug!(holder, tokens = %quote.amount_out, supply = %self.supply, "mock buy");
        Ok(quote.amount_out)
    }

    pub fn sell(&mut self, holder: &'static str, tokens: Amount) -> Result<Amount> {
        let held = self.balance_of(holder);
        if tokens > held {
            return Err(anyhow!("{} holds {} but tried to sell {}", holder, held, tokens));
        }
        let fee = self.engine.params().sell_fee_bps;
        let quote = self.engine.quote_sell(&self.supply, &TradeRequest::new(tokens.clone(), fee)?)?;
        let gross = &quote.amount_out + &quote.fee_amount;
        if gross > self.reserve_balance {
            return Err(anyhow!("minter insolvent: owes {} but holds {}", gross, self.reserve_balance));
        }

        self.reserve_balance -= &gross;
        self.fees_collected += &quote.fee_amount;
        self.supply = quote.supply_after()?;
        self.holders.insert(holder, held - tokens);

        debug!(holder, reserve = %quote.amount_out, supply = %self.supply, "mock sell");
        Ok(quote.amount_out)
    }

    pub fn is_graduated(&self) -> Result<bool> {
        Ok(self.engine.is_threshold_reached(&self.supply)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u128 = 1_000_000_000;

    fn big(v: u128) -> Amount {
        Amount::from(v)
    }

    fn run_lifecycle(engine: CurveEngine) -> Result<MockLaunch> {
        let mut launch = MockLaunch::new(engine);

        launch.buy("alice", big(10 * ONE))?;
        launch.buy("bob", big(250 * ONE))?;
        launch.buy("carol", big(40 * ONE))?;

        let half = launch.balance_of("alice") / 2u32;
        launch.sell("alice", half)?;
        let all = launch.balance_of("bob");
        launch.sell("bob", all)?;

        // an oversized buy fills the rest of the curve
        launch.buy("carol", big(5_000 * ONE))?;
        assert!(launch.is_graduated()?);

        // nothing left to mint after graduation
        assert!(launch.buy("dave", big(ONE))?.is_zero());
        Ok(launch)
    }

    #[test]
    fn test_mainnet_launch_lifecycle() -> Result<()> {
        println!("Testing mainnet launch lifecycle...");

        let launch = run_lifecycle(CurveEngine::mainnet()?)?;
        let total: Amount = launch.holders.values().sum();
        assert_eq!(total, launch.supply);
        assert_eq!(&launch.supply, launch.engine.supply_threshold());
        assert!(launch.fees_collected > Amount::zero());

        println!("✅ Mainnet launch lifecycle test passed");
        Ok(())
    }

    #[test]
    fn test_everyone_can_exit_after_graduation() -> Result<()> {
        for engine in [CurveEngine::mainnet()?, CurveEngine::testnet()?] {
            let mut launch = run_lifecycle(engine)?;

            for holder in ["alice", "carol", "bob", "dave"] {
                let tokens = launch.balance_of(holder);
                launch.sell(holder, tokens)?;
            }

            assert!(launch.supply.is_zero());
            assert!(launch.reserve_balance > Amount::zero(), "minter keeps fees and rounding dust");
        }
        Ok(())
    }

    #[test]
    fn test_overselling_holder_is_rejected() -> Result<()> {
        let mut launch = MockLaunch::new(CurveEngine::mainnet()?);
        let tokens = launch.buy("alice", big(ONE))?;
        assert!(launch.sell("alice", tokens + 1u32).is_err());
        assert!(launch.sell("bob", big(1)).is_err());
        Ok(())
    }
}
