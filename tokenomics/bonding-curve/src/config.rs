//! Curve parameter sets.
//!
//! Parameters are immutable once an engine is built from them. Two presets ship
//! with the crate (mainnet and testnet); any other set can be loaded from TOML.

use crate::curve::CurveKind;
use crate::error::{CurveError, Result};
use crate::types::{Amount, BASIS_POINTS, DEFAULT_BUY_FEE_BPS, DEFAULT_SELL_FEE_BPS, MAX_SUPPLY, NANO_DECIMALS};
use anyhow::Context;
use num::Zero;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// Mainnet parameter set
const CURVE_A: u128 = 590_892_876_676;
const THRESHOLD_SUPPLY: u128 = 799_999_999_998_688_507;
const THRESHOLD_RESERVE: u128 = 1_833_000_000_000;
const LIQUIDITY_FEE: u128 = 50_000_000_000;

// Testnet parameter set
const CURVE_A_TESTNET: u128 = 16_000_000_000_000;
const THRESHOLD_SUPPLY_TESTNET: u128 = 800_000_000_000_000_000;
const THRESHOLD_RESERVE_TESTNET: u128 = 2_500_000_000;
const LIQUIDITY_FEE_TESTNET: u128 = 500_000_000;

const MAX_PRECISION: u32 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// The network selected at build time through the `testnet` cargo feature.
    pub fn from_build() -> Self {
        if cfg!(feature = "testnet") {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParameters {
    #[serde(with = "amount_serde")]
    pub supply_threshold: Amount,
    /// Scale exponent of the curve's fixed-point multiplier.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Reserve advertised as the migration target. Derived from the curve when absent.
    #[serde(default, with = "amount_serde::option", skip_serializing_if = "Option::is_none")]
    pub threshold_reserve: Option<Amount>,
    #[serde(default = "default_max_supply", with = "amount_serde")]
    pub max_supply: Amount,
    /// Reserve withheld when liquidity migrates to open trading.
    #[serde(default, with = "amount_serde")]
    pub liquidity_fee: Amount,
    #[serde(default = "default_buy_fee_bps")]
    pub buy_fee_bps: u32,
    #[serde(default = "default_sell_fee_bps")]
    pub sell_fee_bps: u32,
    pub curve: CurveKind,
}

fn default_precision() -> u32 {
    NANO_DECIMALS
}

fn default_max_supply() -> Amount {
    Amount::from(MAX_SUPPLY)
}

fn default_buy_fee_bps() -> u32 {
    DEFAULT_BUY_FEE_BPS
}

fn default_sell_fee_bps() -> u32 {
    DEFAULT_SELL_FEE_BPS
}

impl CurveParameters {
    pub fn mainnet() -> Self {
        Self::square_root(CURVE_A, THRESHOLD_SUPPLY, THRESHOLD_RESERVE, LIQUIDITY_FEE)
    }

    pub fn testnet() -> Self {
        Self::square_root(
            CURVE_A_TESTNET,
            THRESHOLD_SUPPLY_TESTNET,
            THRESHOLD_RESERVE_TESTNET,
            LIQUIDITY_FEE_TESTNET,
        )
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
        }
    }

    fn square_root(curve_constant: u128, threshold: u128, threshold_reserve: u128, liquidity_fee: u128) -> Self {
        Self {
            curve: CurveKind::SquareRoot {
                curve_constant: Amount::from(curve_constant),
            },
            supply_threshold: Amount::from(threshold),
            precision: NANO_DECIMALS,
            threshold_reserve: Some(Amount::from(threshold_reserve)),
            max_supply: Amount::from(MAX_SUPPLY),
            liquidity_fee: Amount::from(liquidity_fee),
            buy_fee_bps: DEFAULT_BUY_FEE_BPS,
            sell_fee_bps: DEFAULT_SELL_FEE_BPS,
        }
    }

    pub fn with_curve(mut self, curve: CurveKind) -> Self {
        self.curve = curve;
        self.threshold_reserve = None;
        self
    }

    pub fn with_supply_threshold(mut self, supply_threshold: Amount) -> Self {
        self.supply_threshold = supply_threshold;
        self.threshold_reserve = None;
        self
    }

    pub fn with_fees(mut self, buy_fee_bps: u32, sell_fee_bps: u32) -> Self {
        self.buy_fee_bps = buy_fee_bps;
        self.sell_fee_bps = sell_fee_bps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.supply_threshold.is_zero() {
            return Err(CurveError::InvalidConfig(
                "supply threshold must be non-zero".to_string(),
            ));
        }
        if self.supply_threshold > self.max_supply {
            return Err(CurveError::InvalidConfig(format!(
                "supply threshold {} exceeds max supply {}",
                self.supply_threshold, self.max_supply
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(CurveError::InvalidConfig(format!(
                "precision {} exceeds {}",
                self.precision, MAX_PRECISION
            )));
        }
        if self.buy_fee_bps > BASIS_POINTS || self.sell_fee_bps > BASIS_POINTS {
            return Err(CurveError::InvalidConfig(format!(
                "fees must be at most {} bps, got buy {} / sell {}",
                BASIS_POINTS, self.buy_fee_bps, self.sell_fee_bps
            )));
        }
        if let CurveKind::ConstantProduct { virtual_supply, .. } = &self.curve {
            if &self.supply_threshold >= virtual_supply {
                return Err(CurveError::InvalidConfig(format!(
                    "supply threshold {} must stay below virtual supply {}",
                    self.supply_threshold, virtual_supply
                )));
            }
        }
        // non-zero curve constants
        self.curve.build(self.precision).map(|_| ())
    }

    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        let params: CurveParameters =
            toml::from_str(source).context("Failed to parse curve parameters")?;
        params.validate().context("Curve parameters failed validation")?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        info!("Loading curve parameters from {:?}", path);
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read curve parameters from {:?}", path))?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize curve parameters")
    }
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self::for_network(Network::from_build())
    }
}

/// Amounts as decimal strings on the way out; strings or integers on the way in.
pub(crate) mod amount_serde {
    use crate::types::Amount;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::str::FromStr;

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
            Ok(Amount::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
            Ok(Amount::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
            u64::try_from(v)
                .map(Amount::from)
                .map_err(|_| E::custom(format!("amount must be non-negative, got {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
            Amount::from_str(v.trim()).map_err(|e| E::custom(format!("invalid amount `{}`: {}", v, e)))
        }
    }

    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    pub mod option {
        use super::AmountVisitor;
        use crate::types::Amount;
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(amount: &Option<Amount>, serializer: S) -> Result<S::Ok, S::Error> {
            match amount {
                Some(amount) => super::serialize(amount, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Amount>, D::Error> {
            deserializer.deserialize_any(AmountVisitor).map(Some)
        }
    }
}
