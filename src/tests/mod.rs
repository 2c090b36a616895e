// Launch scenarios driven through a mock ledger
pub mod launch_simulation_test;

#[cfg(test)]
mod curve_tests {
    use crate::*;
    use crate::types::{amount_from_u256, amount_to_u256};

    fn big(v: u128) -> Amount {
        Amount::from(v)
    }

    #[test]
    fn test_reexports_reach_core_engine() {
        let engine = CurveEngine::new(CurveParameters::mainnet()).unwrap();
        assert_eq!(engine.curve().name(), "square_root");
        assert_eq!(engine.supply_threshold(), &big(799_999_999_998_688_507));
    }

    #[test]
    fn test_network_presets_differ() {
        let mainnet = CurveEngine::for_network(Network::Mainnet).unwrap();
        let testnet = CurveEngine::for_network(Network::Testnet).unwrap();
        let one = big(1_000_000_000);
        let on_mainnet = mainnet.token_amount_for_buy(&big(0), &one).unwrap();
        let on_testnet = testnet.token_amount_for_buy(&big(0), &one).unwrap();
        assert_eq!(on_mainnet, big(18_685_673_434_650_971));
        assert_eq!(on_testnet, big(505_964_425_626_928_000));
    }

    #[test]
    fn test_quote_fits_evm_word() {
        let engine = CurveEngine::mainnet().unwrap();
        let request = TradeRequest::new(big(3_000_000_000), DEFAULT_BUY_FEE_BPS).unwrap();
        let quote = engine.quote_buy(&big(0), &request).unwrap();
        let min_out = quote.minimum_out(100).unwrap();
        let word = amount_to_u256(&min_out).unwrap();
        assert_eq!(amount_from_u256(word), min_out);
    }

    #[test]
    fn test_constants() {
        assert_eq!(BASIS_POINTS, 10_000);
        assert_eq!(NANO_DECIMALS, 9);
        assert_eq!(MAX_SUPPLY, 1_000_000_000_000_000_000);
        assert_eq!(DEFAULT_BUY_FEE_BPS, 100);
        assert_eq!(DEFAULT_SELL_FEE_BPS, 100);
    }
}
