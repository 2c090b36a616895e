//! # Bonding Curve Core
//!
//! Pure, side-effect-free pricing for tokens traded against a reserve currency
//! along a deterministic curve, up to the supply threshold where the token
//! migrates to open trading. Chain clients feed in the current supply and a
//! trade amount and embed the returned amount in their own transactions.
//!
//! Layering, bottom up: [`math`] (fixed-point and integer square root),
//! [`curve`] (curve shapes), [`calculator`] (fees, threshold cap, display price).

pub mod calculator;
pub mod config;
pub mod curve;
pub mod error;
pub mod math;
pub mod quote;
pub mod types;

pub use calculator::CurveEngine;
pub use config::{CurveParameters, Network};
pub use curve::{BondingCurve, ConstantProductCurve, CurveKind, SquareRootCurve};
pub use error::{CurveError, Result};
pub use quote::{TradeQuote, TradeSide};
pub use types::{
    Amount, FeeBasisPoints, TradeRequest, BASIS_POINTS, DEFAULT_BUY_FEE_BPS, DEFAULT_SELL_FEE_BPS,
    MAX_SUPPLY, NANO_DECIMALS, U256,
};
